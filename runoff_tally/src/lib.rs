/*!
Instant-runoff tabulation for forms that hold several independent categories.

Each [Category] is tabulated on its own: the ballots are counted by rank
position, the candidates are ranked on those counts, and the lowest ranked
candidate is eliminated until a leader holds a strict majority of the first
choices or two candidates remain.

```
use runoff_tally::builder::Builder;
use runoff_tally::{tabulate_category, Outcome, TallyRules};
# use runoff_tally::VotingErrors;

let mut builder = Builder::new("Best picture")
    .candidates(&["X".to_string(), "Y".to_string(), "Z".to_string()])?;
for choices in [["X"], ["X"], ["X"], ["Y"], ["Y"], ["Z"]] {
    builder.add_ballot_simple(&[choices[0].to_string()])?;
}
let result = tabulate_category(&builder.build()?, &TallyRules::DEFAULT_RULES)?;
assert!(matches!(result.outcome, Outcome::Winner { ref winner, .. } if winner.candidate == "X"));
assert_eq!(result.round_stats.len(), 2);
# Ok::<(), VotingErrors>(())
```
*/

pub mod builder;
mod config;
pub mod manual;
pub mod outcome;
pub mod quick_start;
pub mod rank;
pub mod runoff;
pub mod tally;

use log::info;

pub use crate::config::*;

/// Runs the runoff for one category and classifies its final round.
pub fn tabulate_category(
    category: &Category,
    rules: &TallyRules,
) -> Result<CategoryResult, VotingErrors> {
    info!(
        "Processing category {:?}: {} candidates, {} ballots, rules: {:?}",
        category.title(),
        category.candidates().len(),
        category.ballots().len(),
        rules
    );
    let res = runoff::run_runoff(category, rules)?;
    for rs in res.round_stats.iter() {
        info!(
            "Round {} (valid first choices: {}, majority above {})",
            rs.round, rs.valid_first_choices, rs.majority_threshold
        );
        for cv in rs.ranking.iter() {
            info!("      {:?} {}", cv.votes, cv.candidate);
        }
    }
    let outcome = outcome::classify(&res)?;
    info!("Category {:?}: {:?}", category.title(), outcome);
    Ok(CategoryResult {
        title: category.title().to_string(),
        outcome,
        round_stats: res.round_stats,
    })
}
