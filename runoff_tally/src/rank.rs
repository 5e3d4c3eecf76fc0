use log::debug;
use std::cmp::Ordering;

use crate::config::*;
use crate::tally::Tally;

/// Orders the candidates of a tally, best first.
///
/// Vectors are compared position by position from the first choice: the first
/// position where they differ decides, the larger count ranking higher.
/// Identical vectors are ordered by the tie-break mode. The sort is stable, so
/// with [TieBreakMode::UseCandidateOrder] ties keep the slate order.
pub fn rank(tally: Tally, tiebreak: TieBreakMode, num_round: u32) -> Vec<CandidateVotes> {
    let mut ranked: Vec<CandidateVotes> = match tiebreak {
        TieBreakMode::UseCandidateOrder => tally.votes,
        TieBreakMode::Random(seed) => candidate_permutation_crypto(tally.votes, seed, num_round),
    };
    ranked.sort_by(compare_votes);
    debug!(
        "rank: round {}: {:?}",
        num_round,
        ranked.iter().map(|cv| &cv.candidate).collect::<Vec<_>>()
    );
    ranked
}

/// Descending lexicographic order on the vote vectors.
///
/// Only the common prefix is compared: vectors that agree on it are tied.
pub fn compare_votes(a: &CandidateVotes, b: &CandidateVotes) -> Ordering {
    a.votes
        .iter()
        .zip(b.votes.iter())
        .map(|(x, y)| y.cmp(x))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Generates a "random" permutation of the candidates. Random in this context means hard to guess in advance.
fn candidate_permutation_crypto(
    votes: Vec<CandidateVotes>,
    seed: u32,
    num_round: u32,
) -> Vec<CandidateVotes> {
    let mut data: Vec<(String, CandidateVotes)> = votes
        .into_iter()
        .map(|cv| {
            let key = sha256::digest(format!("{:08}{:08}{}", seed, num_round, cv.candidate));
            (key, cv)
        })
        .collect();
    data.sort_by(|a, b| a.0.cmp(&b.0));
    data.into_iter().map(|p| p.1).collect()
}
