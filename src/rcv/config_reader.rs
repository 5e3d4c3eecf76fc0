use crate::rcv::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstVoteColumnIndex")]
    _first_vote_column_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    /// The 0-based index of the first vote column, if configured.
    pub fn first_vote_column_index(&self) -> RcvResult<Option<usize>> {
        match &self._first_vote_column_index {
            Some(js) => {
                let x = read_js_int(js)?;
                ensure!(x >= 1, ParsingJsonNumberSnafu {});
                Ok(Some(x - 1))
            }
            None => Ok(None),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RcvRules {
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: String,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<String>,
}

impl RcvRules {
    pub fn tally_rules(&self) -> RcvResult<TallyRules> {
        let tiebreak_mode = match self.tiebreak_mode.as_str() {
            "useCandidateOrder" => TieBreakMode::UseCandidateOrder,
            "random" => {
                let seed = match self.random_seed.as_ref().map(|s| s.parse::<u32>()) {
                    Some(Result::Ok(x)) => x,
                    x => {
                        whatever!("The random tiebreak mode needs a numeric randomSeed, got {:?}", x)
                    }
                };
                TieBreakMode::Random(seed)
            }
            x => {
                whatever!("Cannot use tiebreak mode {:?} (currently not implemented)", x)
            }
        };
        Ok(TallyRules { tiebreak_mode })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RcvConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "fileSource")]
    pub file_source: FileSource,
    pub rules: Option<RcvRules>,
}

pub fn read_config(path: &str) -> RcvResult<RcvConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu {})
}

pub fn read_summary(path: &str) -> RcvResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_summary: {} categories", js["results"].as_array().map_or(0, |a| a.len()));
    Ok(js)
}

// A 1-based column index: a number, a string of digits, or spreadsheet letters ("A", "AB").
fn read_js_int(x: &JSValue) -> RcvResult<usize> {
    match x {
        JSValue::Number(n) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        JSValue::String(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => s
            .to_ascii_uppercase()
            .bytes()
            .try_fold(0usize, |acc, b| {
                acc.checked_mul(26)?.checked_add((b - b'A' + 1) as usize)
            })
            .context(ParsingJsonNumberSnafu {}),
        JSValue::String(s) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn column_indexes() {
        assert_eq!(read_js_int(&json!(3)).unwrap(), 3);
        assert_eq!(read_js_int(&json!("12")).unwrap(), 12);
        assert_eq!(read_js_int(&json!("B")).unwrap(), 2);
        assert_eq!(read_js_int(&json!("ab")).unwrap(), 28);
        assert!(read_js_int(&json!(true)).is_err());
        assert!(read_js_int(&json!("")).is_err());
        assert!(matches!(
            read_js_int(&json!("ZZZZZZZZZZZZZZZZZZ")),
            Err(RcvError::ParsingJsonNumber {})
        ));
    }

    #[test]
    fn parse_config_with_defaults() {
        let config: RcvConfig = serde_json::from_value(json!({
            "outputSettings": { "contestName": "Awards" },
            "fileSource": { "provider": "xlsx", "filePath": "awards.xlsx" }
        }))
        .unwrap();
        assert_eq!(config.rules, None);
        assert_eq!(config.file_source.first_vote_column_index().unwrap(), None);
        assert_eq!(config.output_settings.output_directory, None);
    }

    #[test]
    fn first_vote_column_is_one_based() {
        let fs: FileSource = serde_json::from_value(json!({
            "provider": "csv", "filePath": "a.csv", "firstVoteColumnIndex": "C"
        }))
        .unwrap();
        assert_eq!(fs.first_vote_column_index().unwrap(), Some(2));
        let zero: FileSource = serde_json::from_value(json!({
            "provider": "csv", "filePath": "a.csv", "firstVoteColumnIndex": 0
        }))
        .unwrap();
        assert!(zero.first_vote_column_index().is_err());
    }

    #[test]
    fn tiebreak_modes() {
        let rules = |mode: &str, seed: Option<&str>| RcvRules {
            tiebreak_mode: mode.to_string(),
            random_seed: seed.map(|s| s.to_string()),
        };
        assert_eq!(
            rules("useCandidateOrder", None).tally_rules().unwrap(),
            TallyRules::DEFAULT_RULES
        );
        assert_eq!(
            rules("random", Some("17")).tally_rules().unwrap().tiebreak_mode,
            TieBreakMode::Random(17)
        );
        assert!(rules("random", None).tally_rules().is_err());
        assert!(rules("stopCountingAndAsk", None).tally_rules().is_err());
    }
}
