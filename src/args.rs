use clap::Parser;

/// Renders poll results from tabular files into chart-ready pages.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON registry listing the datasets. For more information about the file format,
    /// read the documentation of the poll_results::manual module.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (dataset key, optional) The dataset to render, for example 'season1'. When not provided, the home page
    /// with the list of all the datasets is rendered.
    #[clap(short, long, value_parser)]
    pub dataset: Option<String>,

    /// (default 0) The index of the question to show, starting at 0.
    #[clap(short, long, value_parser, default_value_t = 0)]
    pub question: usize,

    /// (previous or next, optional) Moves one question from the --question index. The move stops at the
    /// first and the last questions.
    #[clap(long, value_parser = clap::builder::PossibleValuesParser::new(["previous", "next"]))]
    pub step: Option<String>,

    /// If passed as an argument, the statistics over all the questions of the dataset are added to the page.
    #[clap(long, takes_value = false)]
    pub stats: bool,

    /// (file path, 'stdout' or empty) If specified, the page will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a page in JSON format. If provided, pollres will
    /// check that the rendered page matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
