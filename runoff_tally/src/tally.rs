use log::debug;
use std::collections::HashMap;

use crate::config::*;

/// The outcome of counting one round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Tally {
    /// One vector per candidate, in the order of the round's slate.
    pub votes: Vec<CandidateVotes>,
    /// The number of ballots with an occupied first position.
    pub valid_first_choices: u64,
}

/// Computes the positional histogram of every candidate of the round.
///
/// Every vector has one entry per candidate still running. This is a raw
/// count of positions, recomputed from the reduced ballots each round.
pub fn tally(state: &RoundState) -> Result<Tally, VotingErrors> {
    let width = state.candidates.len();
    let index: HashMap<&str, usize> = state
        .candidates
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect();

    let mut votes: Vec<CandidateVotes> = state
        .candidates
        .iter()
        .map(|name| CandidateVotes {
            candidate: name.clone(),
            votes: vec![0; width],
        })
        .collect();

    let mut valid_first_choices: u64 = 0;
    for ballot in state.ballots.iter() {
        for (pos, name) in ballot.choices().iter().enumerate() {
            let cidx = *index
                .get(name.as_str())
                .ok_or_else(|| VotingErrors::UnknownCandidate {
                    category: String::new(),
                    name: name.clone(),
                })?;
            // A ballot is never longer than the slate unless it repeats a name.
            let slot = votes[cidx].votes.get_mut(pos).ok_or_else(|| {
                VotingErrors::DuplicateChoice {
                    category: String::new(),
                    name: name.clone(),
                }
            })?;
            *slot += 1;
            if pos == 0 {
                valid_first_choices += 1;
            }
        }
    }
    debug!(
        "tally: {} candidates, {} ballots, {} valid first choices",
        width,
        state.ballots.len(),
        valid_first_choices
    );

    Ok(Tally {
        votes,
        valid_first_choices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(cands: &[&str], ballots: &[&[&str]]) -> RoundState {
        RoundState {
            candidates: cands.iter().map(|s| s.to_string()).collect(),
            ballots: ballots
                .iter()
                .map(|b| Ballot::new(b.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }

    #[test]
    fn counts_every_position() {
        let t = tally(&state(
            &["X", "Y", "Z"],
            &[&["X", "Y"], &["Y", "X", "Z"], &["X"], &[]],
        ))
        .unwrap();
        assert_eq!(t.valid_first_choices, 3);
        assert_eq!(t.votes[0].candidate, "X");
        assert_eq!(t.votes[0].votes, vec![2, 1, 0]);
        assert_eq!(t.votes[1].votes, vec![1, 1, 0]);
        assert_eq!(t.votes[2].votes, vec![0, 0, 1]);
    }

    #[test]
    fn first_choices_add_up() {
        let t = tally(&state(
            &["A", "B", "C"],
            &[&["A", "B"], &["C"], &["B", "C", "A"], &["C", "A"], &[]],
        ))
        .unwrap();
        let sum: u64 = t.votes.iter().map(|cv| cv.first_choices()).sum();
        assert_eq!(sum, t.valid_first_choices);
        assert_eq!(sum, 4);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let res = tally(&state(&["A", "B"], &[&["A", "Q"]]));
        assert!(matches!(
            res,
            Err(VotingErrors::UnknownCandidate { name, .. }) if name == "Q"
        ));
    }

    #[test]
    fn ballot_longer_than_slate_is_an_error() {
        let res = tally(&state(&["A", "B"], &[&["A", "B", "A"]]));
        assert!(matches!(
            res,
            Err(VotingErrors::DuplicateChoice { name, .. }) if name == "A"
        ));
    }
}
