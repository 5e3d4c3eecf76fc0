use crate::config::*;

/// Turns the terminal state of a runoff into a decisive win or a tie.
///
/// Only the first-choice counts of the final two candidates are compared here.
/// The honorable mention is kept only when it is not one of the candidates
/// already named in the outcome. A result without winners is an
/// [VotingErrors::EmptyElection].
pub fn classify(result: &RunoffResult) -> Result<Outcome, VotingErrors> {
    let mention = &result.honorable_mention;
    let outcome = match result.winners.as_slice() {
        [first, second, ..] if first.first_choices() <= second.first_choices() => Outcome::Tie {
            first: first.clone(),
            second: second.clone(),
            honorable_mention: if mention.candidate != first.candidate
                && mention.candidate != second.candidate
            {
                Some(mention.clone())
            } else {
                None
            },
        },
        [first, rest @ ..] => Outcome::Winner {
            winner: first.clone(),
            runner_up: rest.first().cloned(),
            honorable_mention: if mention.candidate != first.candidate {
                Some(mention.clone())
            } else {
                None
            },
        },
        [] => return Err(VotingErrors::EmptyElection),
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv(name: &str, votes: &[u64]) -> CandidateVotes {
        CandidateVotes {
            candidate: name.to_string(),
            votes: votes.to_vec(),
        }
    }

    fn result(winners: Vec<CandidateVotes>, mention: CandidateVotes) -> RunoffResult {
        RunoffResult {
            winners,
            honorable_mention: mention,
            round_stats: vec![],
        }
    }

    #[test]
    fn decisive_win_suppresses_mention_of_the_winner() {
        let r = result(vec![cv("X", &[3, 0]), cv("Y", &[2, 0])], cv("X", &[3, 0, 0]));
        match classify(&r).unwrap() {
            Outcome::Winner {
                winner,
                runner_up,
                honorable_mention,
            } => {
                assert_eq!(winner.candidate, "X");
                assert_eq!(runner_up.unwrap().candidate, "Y");
                assert_eq!(honorable_mention, None);
            }
            o => panic!("unexpected outcome {:?}", o),
        }
    }

    #[test]
    fn runner_up_can_be_the_mention() {
        let r = result(vec![cv("X", &[5, 0]), cv("Y", &[4, 0])], cv("Y", &[4, 1, 0]));
        let o = classify(&r).unwrap();
        assert!(!o.is_tie());
        assert_eq!(o.honorable_mention().unwrap().candidate, "Y");
    }

    #[test]
    fn equal_first_choices_tie() {
        // The ranking may still separate them on later positions.
        let r = result(vec![cv("A", &[2, 1]), cv("B", &[2, 0])], cv("C", &[3, 0, 0]));
        match classify(&r).unwrap() {
            Outcome::Tie {
                first,
                second,
                honorable_mention,
            } => {
                assert_eq!(first.candidate, "A");
                assert_eq!(second.candidate, "B");
                assert_eq!(honorable_mention.unwrap().candidate, "C");
            }
            o => panic!("unexpected outcome {:?}", o),
        }
    }

    #[test]
    fn tie_suppresses_mention_of_either_side() {
        let r = result(vec![cv("A", &[2, 0]), cv("B", &[2, 0])], cv("B", &[2, 0]));
        assert_eq!(classify(&r).unwrap().honorable_mention(), None);
    }

    #[test]
    fn lone_candidate_wins() {
        let r = result(vec![cv("Solo", &[1])], cv("Solo", &[1]));
        assert_eq!(
            classify(&r),
            Ok(Outcome::Winner {
                winner: cv("Solo", &[1]),
                runner_up: None,
                honorable_mention: None,
            })
        );
    }

    #[test]
    fn no_winner_is_an_error() {
        let r = result(vec![], cv("A", &[1]));
        assert_eq!(classify(&r), Err(VotingErrors::EmptyElection));
    }
}
