use log::debug;
use std::collections::HashSet;

pub use crate::config::*;

/// A builder for assembling a category.
///
/// ```
/// use runoff_tally::builder::Builder;
/// # use runoff_tally::VotingErrors;
///
/// let mut builder = Builder::new("Best picture")
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_ballot_simple(&["Bob".to_string(), "Anna".to_string()])?;
/// builder.add_ballot_simple(&["Anna".to_string(), "".to_string()])?;
///
/// let category = builder.build()?;
/// assert_eq!(category.ballots()[1].choices(), &["Anna".to_string()]);
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _title: String,
    pub(crate) _candidates: Option<Vec<String>>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(title: &str) -> Builder {
        Builder {
            _title: title.to_string(),
            _candidates: None,
            _ballots: Vec::new(),
        }
    }

    /// Declares the slate. Without a declared slate (or with an empty one),
    /// the candidates are collected from the first choices of the ballots.
    ///
    /// Names must be non-empty: an empty entry ends a ballot.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        let mut seen: HashSet<&str> = HashSet::new();
        for name in cands {
            if name.is_empty() {
                return Err(VotingErrors::EmptyCandidate {
                    category: self._title,
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(VotingErrors::DuplicateCandidate {
                    category: self._title,
                    name: name.clone(),
                });
            }
        }
        Ok(Builder {
            _title: self._title,
            _candidates: Some(cands.to_vec()),
            _ballots: self._ballots,
        })
    }

    /// Adds a ballot, given as the names in rank order.
    ///
    /// The ballot stops at the first empty name: anything ranked after a gap is dropped.
    pub fn add_ballot_simple(&mut self, choices: &[String]) -> Result<(), VotingErrors> {
        let ranked: Vec<String> = choices
            .iter()
            .take_while(|c| !c.is_empty())
            .cloned()
            .collect();
        self.add_ballot(Ballot::new(ranked))
    }

    pub fn add_ballot(&mut self, ballot: Ballot) -> Result<(), VotingErrors> {
        let mut seen: HashSet<&str> = HashSet::new();
        for name in ballot.choices() {
            if !seen.insert(name.as_str()) {
                return Err(VotingErrors::DuplicateChoice {
                    category: self._title.clone(),
                    name: name.clone(),
                });
            }
        }
        self._ballots.push(ballot);
        Ok(())
    }

    pub fn build(self) -> Result<Category, VotingErrors> {
        let candidates = match self._candidates {
            Some(cands) if !cands.is_empty() => cands,
            _ => {
                let cands = bootstrap_candidates(&self._ballots);
                debug!(
                    "build: {:?}: no declared slate, bootstrapped {:?}",
                    self._title, cands
                );
                cands
            }
        };

        let valid: HashSet<&str> = candidates.iter().map(|s| s.as_str()).collect();
        for ballot in self._ballots.iter() {
            if let Some(name) = ballot.choices().iter().find(|c| !valid.contains(c.as_str())) {
                return Err(VotingErrors::UnknownCandidate {
                    category: self._title,
                    name: name.clone(),
                });
            }
        }

        Ok(Category {
            title: self._title,
            candidates,
            ballots: self._ballots,
        })
    }
}

// Distinct first choices, in the order they are first seen.
fn bootstrap_candidates(ballots: &[Ballot]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for first in ballots.iter().filter_map(|b| b.first_choice()) {
        if seen.insert(first) {
            res.push(first.to_string());
        }
    }
    res
}
