use log::{debug, info, warn};

use runoff_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::rcv::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_forms;
mod io_xlsx;
pub mod report;

#[derive(Debug, Snafu)]
pub enum RcvError {
    #[snafu(display("Error opening CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook has no worksheet"))]
    EmptyExcel {},
    #[snafu(display("Worksheet {name} not found"))]
    MissingWorksheet { name: String },
    #[snafu(display("{path} has several worksheets, the worksheet name must be provided"))]
    TooManyWorksheets { path: String },
    #[snafu(display("Unexpected cell at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("{path} has no header row"))]
    EmptyInput { path: String },
    #[snafu(display(
        "The votes should start at column {first_vote_column}, but the header only has {width} columns"
    ))]
    MissingVoteColumns {
        first_vote_column: usize,
        width: usize,
    },
    #[snafu(display("Line {lineno}, column {column:?}: {content:?} is not a valid rank"))]
    InvalidRank {
        lineno: usize,
        column: String,
        content: String,
    },
    #[snafu(display("Invalid category in the input: {source}"))]
    InvalidCategory { source: VotingErrors },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a column index (number or column letters)"))]
    ParsingJsonNumber {},
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No input file: use --input or a configuration file"))]
    MissingInput {},
    #[snafu(display("Unknown input type {input_type:?} (expected csv or xlsx)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Difference detected between calculated summary and reference summary {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RcvResult<T> = Result<T, RcvError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Xlsx,
}

impl InputType {
    fn parse(s: &str) -> RcvResult<InputType> {
        match s {
            "csv" => Ok(InputType::Csv),
            "xlsx" | "excel" => Ok(InputType::Xlsx),
            x => UnknownInputTypeSnafu { input_type: x }.fail(),
        }
    }

    fn from_path(path: &str) -> InputType {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm") => {
                InputType::Xlsx
            }
            _ => InputType::Csv,
        }
    }
}

/// Everything needed to run one election, once the command line and the
/// configuration file have been merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionSettings {
    pub contest_name: String,
    pub input: String,
    pub input_type: InputType,
    pub excel_worksheet_name: Option<String>,
    /// 0-based index of the first column holding votes.
    pub first_vote_column: usize,
    pub rules: TallyRules,
    pub out: Option<String>,
    pub reference: Option<String>,
}

/// One category of the input, with the outcome of its runoff.
#[derive(Debug, Clone)]
pub struct Tabulated {
    pub category: Category,
    pub result: Result<CategoryResult, VotingErrors>,
}

// Resolves `path` against the directory of the configuration file.
fn resolve(root: &Path, path: &str) -> String {
    let p: PathBuf = root.join(path);
    p.display().to_string()
}

pub fn settings_from_args(args: &Args) -> RcvResult<ElectionSettings> {
    let config: Option<(RcvConfig, PathBuf)> = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            Some((config, root))
        }
        None => None,
    };

    let input: String = match (&args.input, &config) {
        (Some(i), _) => i.clone(),
        (None, Some((c, root))) => resolve(root, &c.file_source.file_path),
        (None, None) => return MissingInputSnafu {}.fail(),
    };

    let input_type = match (&args.input_type, &config) {
        (Some(t), _) => InputType::parse(t)?,
        (None, Some((c, _))) if args.input.is_none() => InputType::parse(&c.file_source.provider)?,
        _ => InputType::from_path(&input),
    };

    let excel_worksheet_name = args.excel_worksheet_name.clone().or_else(|| {
        config
            .as_ref()
            .and_then(|(c, _)| c.file_source.excel_worksheet_name.clone())
    });

    let first_vote_column: usize = match (args.first_vote_column, &config) {
        (Some(0), _) => {
            whatever!("--first-vote-column is 1-based and cannot be 0")
        }
        (Some(x), _) => x - 1,
        (None, Some((c, _))) => c.file_source.first_vote_column_index()?.unwrap_or(1),
        (None, None) => 1,
    };

    let rules: TallyRules = match (args.random_seed, &config) {
        (Some(seed), _) => TallyRules {
            tiebreak_mode: TieBreakMode::Random(seed),
        },
        (None, Some((c, _))) => match &c.rules {
            Some(r) => r.tally_rules()?,
            None => TallyRules::DEFAULT_RULES,
        },
        (None, None) => TallyRules::DEFAULT_RULES,
    };

    let contest_name = config
        .as_ref()
        .map(|(c, _)| c.output_settings.contest_name.clone())
        .unwrap_or_else(|| io_common::simplify_file_name(&input));

    let out = args.out.clone().or_else(|| {
        config.as_ref().and_then(|(c, root)| {
            c.output_settings.output_directory.as_ref().map(|dir| {
                let file = format!("{}_summary.json", contest_name.replace(' ', "_"));
                resolve(&root.join(dir), &file)
            })
        })
    });

    Ok(ElectionSettings {
        contest_name,
        input,
        input_type,
        excel_worksheet_name,
        first_vote_column,
        rules,
        out,
        reference: args.reference.clone(),
    })
}

fn read_categories(settings: &ElectionSettings) -> RcvResult<Vec<Category>> {
    info!(
        "Attempting to read {:?} file {:?}",
        settings.input_type, settings.input
    );
    let grid = match settings.input_type {
        InputType::Csv => io_csv::read_csv_grid(&settings.input)?,
        InputType::Xlsx => {
            io_xlsx::read_xlsx_grid(&settings.input, settings.excel_worksheet_name.as_deref())?
        }
    };
    debug!(
        "read_categories: header {:?}, {} rows",
        grid.header,
        grid.rows.len()
    );
    io_forms::read_categories(&grid, settings.first_vote_column)
}

fn write_summary(path: &str, summary: &str) -> RcvResult<()> {
    if path == "stdout" {
        println!("{}", summary);
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(WritingSummarySnafu { path })?;
        }
    }
    fs::write(path, summary).context(WritingSummarySnafu { path })?;
    info!("Summary written to {:?}", path);
    Ok(())
}

/// Reads the input, runs one runoff per category in input order and prints the report.
///
/// A category that cannot be tabulated is reported and skipped. The summary is
/// written and checked against the reference, when they are requested.
pub fn run_election(settings: &ElectionSettings) -> RcvResult<Vec<Tabulated>> {
    info!("settings: {:?}", settings);
    let categories = read_categories(settings)?;

    let mut tabulated: Vec<Tabulated> = Vec::new();
    for category in categories {
        let result = tabulate_category(&category, &settings.rules);
        if let Err(e) = &result {
            warn!("Skipping category {:?}: {}", category.title(), e);
        }
        let t = Tabulated { category, result };
        println!("{}", report::render_category(&t));
        tabulated.push(t);
    }

    let summary_js = report::summary_json(settings, &tabulated);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    if let Some(out) = &settings.out {
        write_summary(out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &settings.reference {
        let summary_ref: JSValue = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_str(),
                "\n",
            );
            return ReferenceMismatchSnafu { path: summary_p }.fail();
        }
        info!("The summary matches the reference {:?}", summary_p);
    }

    Ok(tabulated)
}
