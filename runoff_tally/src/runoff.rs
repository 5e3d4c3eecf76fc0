use log::{debug, info};

use crate::config::*;
use crate::rank::rank;
use crate::tally::tally;

impl RoundState {
    /// Returns the next round state, without `last` in the slate nor on any ballot.
    ///
    /// Every occurrence is filtered out, so the ballots stay correct even if
    /// one of them named the candidate twice.
    pub fn eliminate(&self, last: &str) -> RoundState {
        RoundState {
            candidates: self
                .candidates
                .iter()
                .filter(|c| c.as_str() != last)
                .cloned()
                .collect(),
            ballots: self.ballots.iter().map(|b| b.without(last)).collect(),
        }
    }
}

enum Decision {
    Terminal(Vec<CandidateVotes>),
    Eliminate(String),
}

// Majority test: the leader strictly exceeds half of the valid first choices
// (integer division), or only two candidates are left.
fn decide(ranked: &[CandidateVotes], majority_threshold: u64) -> Decision {
    match ranked {
        [only] => Decision::Terminal(vec![only.clone()]),
        [first, second] => Decision::Terminal(vec![first.clone(), second.clone()]),
        [first, second, .., last] => {
            if first.first_choices() > majority_threshold {
                Decision::Terminal(vec![first.clone(), second.clone()])
            } else {
                Decision::Eliminate(last.candidate.clone())
            }
        }
        [] => unreachable!("decide: empty ranking"),
    }
}

/// Runs the instant runoff for one category.
///
/// Each round tallies the current ballots, ranks the candidates and either
/// stops or eliminates the lowest ranked candidate. Every elimination removes
/// exactly one candidate, so a slate of `n >= 2` candidates ends after at most
/// `n - 1` rounds.
pub fn run_runoff(category: &Category, rules: &TallyRules) -> Result<RunoffResult, VotingErrors> {
    if category.candidates.is_empty() || category.ballots.is_empty() {
        return Err(VotingErrors::EmptyElection);
    }
    let with_title = |e: VotingErrors| match e {
        VotingErrors::UnknownCandidate { name, .. } => VotingErrors::UnknownCandidate {
            category: category.title.clone(),
            name,
        },
        VotingErrors::DuplicateChoice { name, .. } => VotingErrors::DuplicateChoice {
            category: category.title.clone(),
            name,
        },
        e => e,
    };

    let mut state = RoundState::from(category);
    let mut round_stats: Vec<RoundStats> = Vec::new();
    let mut honorable_mention: Option<CandidateVotes> = None;

    let max_rounds = category.candidates.len() as u32;
    for round_id in 1..=max_rounds {
        let t = tally(&state).map_err(with_title)?;
        let valid_first_choices = t.valid_first_choices;
        let majority_threshold = valid_first_choices / 2;
        let ranked = rank(t, rules.tiebreak_mode, round_id);
        debug!(
            "run_runoff: {:?} round {}: valid first choices {}, ranking {:?}",
            category.title, round_id, valid_first_choices, ranked
        );

        let mention = honorable_mention.get_or_insert_with(|| ranked[0].clone());

        let decision = decide(&ranked, majority_threshold);
        let eliminated = match &decision {
            Decision::Eliminate(last) => Some(last.clone()),
            Decision::Terminal(_) => None,
        };
        round_stats.push(RoundStats {
            round: round_id,
            valid_first_choices,
            majority_threshold,
            ranking: ranked,
            eliminated,
        });

        match decision {
            Decision::Terminal(winners) => {
                info!(
                    "run_runoff: {:?} decided in round {}: {:?}",
                    category.title,
                    round_id,
                    winners.iter().map(|w| &w.candidate).collect::<Vec<_>>()
                );
                return Ok(RunoffResult {
                    winners,
                    honorable_mention: mention.clone(),
                    round_stats,
                });
            }
            Decision::Eliminate(last) => {
                info!(
                    "run_runoff: {:?} round {}: eliminating {:?}",
                    category.title, round_id, last
                );
                let next = state.eliminate(&last);
                // Invariant: every elimination removes exactly one candidate.
                assert_eq!(
                    next.candidates.len() + 1,
                    state.candidates.len(),
                    "The number of candidates did not decrease by one: {:?} -> {:?}",
                    state.candidates,
                    next.candidates
                );
                state = next;
            }
        }
    }
    Err(VotingErrors::NoConvergence)
}
