use clap::Parser;

/// This is a ranked-choice tabulation program for form exports with several categories.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration describing the input file, the rules and the outputs.
    /// Flags given on the command line take precedence over it.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the outcome of an election in JSON format. If provided, rcvforms will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location. Setting this option overrides the output directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The form export holding the votes. Setting this option overrides the file that may be specified
    /// with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default, it is guessed from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. Required if the workbook has several.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default 2) The first column holding votes, starting at 1. The default skips the timestamp added by forms.
    #[clap(long, value_parser)]
    pub first_vote_column: Option<usize>,

    /// If specified, candidates with identical tallies are ordered by a hash derived from this seed
    /// instead of their order in the input.
    #[clap(long, value_parser)]
    pub random_seed: Option<u32>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
