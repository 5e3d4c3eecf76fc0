// Human readable report and JSON summary of the tabulated categories.

use serde_json::json;

use crate::rcv::*;

/// "1st", "2nd", "3rd", "4th", ..., "11th", "21st".
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn votes_line(cv: &CandidateVotes) -> String {
    let counts: Vec<String> = cv
        .votes
        .iter()
        .enumerate()
        .map(|(idx, count)| format!("{}: {}", ordinal(idx + 1), count))
        .collect();
    format!("{} [{}]", cv.candidate, counts.join(", "))
}

fn plural(count: u64) -> &'static str {
    if count == 1 {
        "vote"
    } else {
        "votes"
    }
}

fn named_count(cv: &CandidateVotes) -> String {
    let count = cv.first_choices();
    format!("{} ({} {})", cv.candidate, count, plural(count))
}

fn render_rounds(lines: &mut Vec<String>, round_stats: &[RoundStats]) {
    for rs in round_stats.iter() {
        lines.push(format!(
            "Round {} (valid first choices: {}, majority above {})",
            rs.round, rs.valid_first_choices, rs.majority_threshold
        ));
        for (idx, cv) in rs.ranking.iter().enumerate() {
            lines.push(format!("  {}. {}", idx + 1, votes_line(cv)));
        }
        if let Some(name) = &rs.eliminated {
            lines.push(format!("  Eliminated: {}", name));
        }
    }
}

fn render_outcome(lines: &mut Vec<String>, title: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Winner {
            winner, runner_up, ..
        } => {
            lines.push(format!("Winner for {}: {}", title, named_count(winner)));
            if let Some(r) = runner_up {
                lines.push(format!("Runner-up: {}", named_count(r)));
            }
        }
        Outcome::Tie { first, second, .. } => {
            lines.push(format!(
                "Tie for {} between {} and {}",
                title,
                named_count(first),
                named_count(second)
            ));
        }
    }
    if let Some(hm) = outcome.honorable_mention() {
        let count = hm.first_choices();
        lines.push(format!(
            "Honorable mention: {} ({} {} in round 1)",
            hm.candidate,
            count,
            plural(count)
        ));
    }
}

/// The text report of one category: its slate, its ballots, every round and the outcome.
pub fn render_category(t: &Tabulated) -> String {
    let category = &t.category;
    let mut lines: Vec<String> = vec![format!("== {} ==", category.title())];
    lines.push(format!("Candidates: {}", category.candidates().join(", ")));
    lines.push(format!("Ballots ({}):", category.ballots().len()));
    for (idx, ballot) in category.ballots().iter().enumerate() {
        let choices = if ballot.is_empty() {
            "(empty)".to_string()
        } else {
            ballot.choices().join(", ")
        };
        lines.push(format!("  {}. {}", idx + 1, choices));
    }

    match &t.result {
        Ok(res) => {
            render_rounds(&mut lines, &res.round_stats);
            render_outcome(&mut lines, category.title(), &res.outcome);
        }
        Err(e) => lines.push(format!("Skipped {}: {}", category.title(), e)),
    }
    lines.push(String::new());
    lines.join("\n")
}

fn candidate_votes_to_json(cv: &CandidateVotes) -> JSValue {
    json!({"candidate": cv.candidate, "votes": cv.votes})
}

fn outcome_to_json(outcome: &Outcome) -> JSValue {
    let hm = outcome.honorable_mention().map(candidate_votes_to_json);
    match outcome {
        Outcome::Winner {
            winner, runner_up, ..
        } => json!({
            "winner": candidate_votes_to_json(winner),
            "runnerUp": runner_up.as_ref().map(candidate_votes_to_json),
            "honorableMention": hm,
        }),
        Outcome::Tie { first, second, .. } => json!({
            "tie": [candidate_votes_to_json(first), candidate_votes_to_json(second)],
            "honorableMention": hm,
        }),
    }
}

fn category_to_json(t: &Tabulated) -> JSValue {
    let category = &t.category;
    match &t.result {
        Ok(res) => {
            let rounds: Vec<JSValue> = res
                .round_stats
                .iter()
                .map(|rs| {
                    let tally: Vec<JSValue> =
                        rs.ranking.iter().map(candidate_votes_to_json).collect();
                    json!({
                        "round": rs.round,
                        "validFirstChoices": rs.valid_first_choices,
                        "majorityThreshold": rs.majority_threshold,
                        "tally": tally,
                        "eliminated": rs.eliminated,
                    })
                })
                .collect();
            json!({
                "category": category.title(),
                "candidates": category.candidates(),
                "ballots": category.ballots().len(),
                "rounds": rounds,
                "outcome": outcome_to_json(&res.outcome),
            })
        }
        Err(e) => json!({
            "category": category.title(),
            "candidates": category.candidates(),
            "ballots": category.ballots().len(),
            "skipped": e.to_string(),
        }),
    }
}

/// The JSON summary of an election, in the input order of the categories.
///
/// Only depends on the contest and the rules, so that summaries produced from
/// different locations can be compared.
pub fn summary_json(settings: &ElectionSettings, tabulated: &[Tabulated]) -> JSValue {
    let (mode, seed) = match settings.rules.tiebreak_mode {
        TieBreakMode::UseCandidateOrder => ("useCandidateOrder", None),
        TieBreakMode::Random(seed) => ("random", Some(seed)),
    };
    let results: Vec<JSValue> = tabulated.iter().map(category_to_json).collect();
    json!({
        "config": {
            "contest": settings.contest_name,
            "tiebreakMode": mode,
            "randomSeed": seed,
        },
        "results": results
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use runoff_tally::builder::Builder;

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn tabulated(candidates: &[&str], ballots: &[&[&str]]) -> Tabulated {
        let mut builder = Builder::new("Best film")
            .candidates(&names(candidates))
            .unwrap();
        for b in ballots {
            builder.add_ballot_simple(&names(b)).unwrap();
        }
        let category = builder.build().unwrap();
        let result = tabulate_category(&category, &TallyRules::DEFAULT_RULES);
        Tabulated { category, result }
    }

    fn settings() -> ElectionSettings {
        ElectionSettings {
            contest_name: "Film club".to_string(),
            input: "/tmp/votes.csv".to_string(),
            input_type: InputType::Csv,
            excel_worksheet_name: None,
            first_vote_column: 1,
            rules: TallyRules::DEFAULT_RULES,
            out: Some("/tmp/out.json".to_string()),
            reference: None,
        }
    }

    #[test]
    fn ordinals() {
        let xs: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 111]
            .iter()
            .map(|n| ordinal(*n))
            .collect();
        assert_eq!(
            xs,
            names(&["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "111th"])
        );
    }

    #[test]
    fn decisive_report() {
        let t = tabulated(
            &["X", "Y", "Z"],
            &[&["X"], &["X"], &["X"], &["Y"], &["Y"], &["Z", "Y"]],
        );
        let text = render_category(&t);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== Best film ==");
        assert_eq!(lines[1], "Candidates: X, Y, Z");
        assert_eq!(lines[2], "Ballots (6):");
        assert_eq!(lines[8], "  6. Z, Y");
        assert!(lines.contains(&"Round 1 (valid first choices: 6, majority above 3)"));
        assert!(lines.contains(&"  1. X [1st: 3, 2nd: 0, 3rd: 0]"));
        assert!(lines.contains(&"  3. Z [1st: 1, 2nd: 0, 3rd: 0]"));
        assert!(lines.contains(&"  Eliminated: Z"));
        assert!(lines.contains(&"  2. Y [1st: 3, 2nd: 0]"));
        assert!(lines.contains(&"Tie for Best film between X (3 votes) and Y (3 votes)"));
        assert!(!text.contains("Honorable mention"));
    }

    #[test]
    fn mention_of_an_eliminated_leader() {
        // A leads the first round, then falls behind once D is eliminated.
        let t = tabulated(
            &["A", "B", "C", "D"],
            &[
                &["A"],
                &["A"],
                &["A"],
                &["B", "C"],
                &["B", "C"],
                &["C", "B"],
                &["C", "B"],
                &["D", "B"],
                &["D", "C"],
            ],
        );
        let text = render_category(&t);
        assert!(text.contains("  Eliminated: D"));
        assert!(text.contains("  Eliminated: A"));
        assert!(text.contains("Tie for Best film between B (3 votes) and C (3 votes)"));
        assert!(text.contains("Honorable mention: A (3 votes in round 1)"));
    }

    #[test]
    fn skipped_category() {
        let t = tabulated(&["X", "Y"], &[]);
        let text = render_category(&t);
        assert!(text.contains("Ballots (0):"));
        assert!(text.contains("Skipped Best film: no candidate or no ballot to tabulate"));
        assert!(!text.contains("Round 1"));
    }

    #[test]
    fn summary_content() {
        let t = tabulated(&["X", "Y"], &[&["X"], &["X", "Y"], &["Y"]]);
        let js = summary_json(&settings(), &[t]);
        assert_eq!(js["config"]["contest"], json!("Film club"));
        assert_eq!(js["config"]["tiebreakMode"], json!("useCandidateOrder"));
        assert_eq!(js["config"]["randomSeed"], JSValue::Null);
        let res = &js["results"][0];
        assert_eq!(res["category"], json!("Best film"));
        assert_eq!(res["ballots"], json!(3));
        assert_eq!(res["rounds"][0]["tally"][0], json!({"candidate": "X", "votes": [2, 0]}));
        assert_eq!(res["outcome"]["winner"]["candidate"], json!("X"));
        assert_eq!(res["outcome"]["runnerUp"]["votes"], json!([1, 1]));
        assert_eq!(res["outcome"]["honorableMention"], JSValue::Null);
    }

    #[test]
    fn summary_does_not_depend_on_paths() {
        let mk = || tabulated(&["X", "Y"], &[&["X"], &["Y"]]);
        let mut other = settings();
        other.input = "/elsewhere/votes.csv".to_string();
        other.out = None;
        other.reference = Some("/tmp/ref.json".to_string());
        assert_eq!(
            summary_json(&settings(), &[mk()]),
            summary_json(&other, &[mk()])
        );
        let js = summary_json(&other, &[mk()]);
        assert!(js["results"][0]["outcome"]["tie"].is_array());
    }

    #[test]
    fn summary_reports_skipped_categories() {
        let t = tabulated(&["X", "Y"], &[]);
        let js = summary_json(&settings(), &[t]);
        assert_eq!(
            js["results"][0]["skipped"],
            json!("no candidate or no ballot to tabulate")
        );
    }
}
