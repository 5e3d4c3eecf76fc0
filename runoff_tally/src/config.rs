// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One voter's ranking within a category.
///
/// Position 0 is the first choice. A ballot never holds empty placeholders:
/// it stops at the first unranked position.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Default)]
pub struct Ballot {
    choices: Vec<String>,
}

impl Ballot {
    pub fn new(choices: Vec<String>) -> Ballot {
        Ballot { choices }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn first_choice(&self) -> Option<&str> {
        self.choices.first().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// A copy of this ballot with every occurrence of `name` removed.
    /// The remaining choices keep their relative order.
    pub fn without(&self, name: &str) -> Ballot {
        Ballot {
            choices: self
                .choices
                .iter()
                .filter(|c| c.as_str() != name)
                .cloned()
                .collect(),
        }
    }
}

/// One independent contest: a slate and the ballots cast for it.
///
/// Built with [crate::builder::Builder], which guarantees that every name on
/// a ballot belongs to the slate.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Category {
    pub(crate) title: String,
    pub(crate) candidates: Vec<String>,
    pub(crate) ballots: Vec<Ballot>,
}

impl Category {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }
}

/// The mutable part of a category, as seen by one round of the runoff.
///
/// Each elimination produces a fresh state, see [RoundState::eliminate].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundState {
    pub candidates: Vec<String>,
    pub ballots: Vec<Ballot>,
}

impl From<&Category> for RoundState {
    fn from(category: &Category) -> Self {
        RoundState {
            candidates: category.candidates.clone(),
            ballots: category.ballots.clone(),
        }
    }
}

// ******** Output data structures *********

/// The positional histogram of a candidate for one round.
///
/// `votes[i]` is the number of ballots ranking this candidate at position `i`.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct CandidateVotes {
    pub candidate: String,
    pub votes: Vec<u64>,
}

impl CandidateVotes {
    pub fn first_choices(&self) -> u64 {
        self.votes.first().cloned().unwrap_or(0)
    }
}

/// Statistics for one round
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    /// The number of ballots that still express a first choice.
    pub valid_first_choices: u64,
    /// A leader must have strictly more first choices than this to win outright.
    pub majority_threshold: u64,
    /// Candidates in ranked order, best first.
    pub ranking: Vec<CandidateVotes>,
    pub eliminated: Option<String>,
}

/// The terminal state of the runoff.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunoffResult {
    /// The top two candidates of the last round, best first.
    /// Holds a single entry when the slate only had one candidate.
    pub winners: Vec<CandidateVotes>,
    /// The top candidate of the first round, with its first round tally.
    pub honorable_mention: CandidateVotes,
    pub round_stats: Vec<RoundStats>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Outcome {
    Winner {
        winner: CandidateVotes,
        runner_up: Option<CandidateVotes>,
        honorable_mention: Option<CandidateVotes>,
    },
    Tie {
        first: CandidateVotes,
        second: CandidateVotes,
        honorable_mention: Option<CandidateVotes>,
    },
}

impl Outcome {
    pub fn honorable_mention(&self) -> Option<&CandidateVotes> {
        match self {
            Outcome::Winner {
                honorable_mention, ..
            } => honorable_mention.as_ref(),
            Outcome::Tie {
                honorable_mention, ..
            } => honorable_mention.as_ref(),
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie { .. })
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CategoryResult {
    pub title: String,
    pub outcome: Outcome,
    pub round_stats: Vec<RoundStats>,
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// No candidate or no ballot to tabulate.
    EmptyElection,
    NoConvergence,
    UnknownCandidate {
        category: String,
        name: String,
    },
    DuplicateCandidate {
        category: String,
        name: String,
    },
    /// A declared candidate with an empty name.
    EmptyCandidate {
        category: String,
    },
    DuplicateChoice {
        category: String,
        name: String,
    },
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::EmptyElection => write!(f, "no candidate or no ballot to tabulate"),
            VotingErrors::NoConvergence => write!(f, "the runoff did not converge"),
            VotingErrors::UnknownCandidate { category, name } => write!(
                f,
                "category {:?}: a ballot names {:?}, which is not a candidate",
                category, name
            ),
            VotingErrors::DuplicateCandidate { category, name } => write!(
                f,
                "category {:?}: candidate {:?} is declared twice",
                category, name
            ),
            VotingErrors::EmptyCandidate { category } => {
                write!(f, "category {:?}: a candidate has an empty name", category)
            }
            VotingErrors::DuplicateChoice { category, name } => write!(
                f,
                "category {:?}: a ballot ranks {:?} more than once",
                category, name
            ),
        }
    }
}

// ********* Configuration **********

/// How candidates with identical vote-count vectors are ordered.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// Keep the order of the slate: declared order, or first-seen order
    /// when the slate was bootstrapped from the ballots.
    UseCandidateOrder,
    // Orders the tied candidates by a SHA-256 digest of the seed, the round
    // and the candidate name. Hard to guess in advance, yet reproducible.
    Random(u32),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyRules {
    pub tiebreak_mode: TieBreakMode,
}

impl TallyRules {
    pub const DEFAULT_RULES: TallyRules = TallyRules {
        tiebreak_mode: TieBreakMode::UseCandidateOrder,
    };
}

impl Default for TallyRules {
    fn default() -> Self {
        TallyRules::DEFAULT_RULES
    }
}
