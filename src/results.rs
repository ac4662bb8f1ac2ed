use log::{debug, info, warn};

use poll_results::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use text_diff::print_diff;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;
pub mod page;

use crate::results::config_reader::*;
use crate::results::io_common::{season_title, simplify_file_name};
use crate::results::page::*;

#[derive(Debug, Snafu)]
pub enum ResultsError {
    #[snafu(display("Malformed input {path}: {reason}"))]
    MalformedInput { path: String, reason: String },
    #[snafu(display("Unknown dataset {key}"))]
    UnknownDataset { key: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Missing worksheet {worksheet} in {path}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive integer"))]
    ParsingJsonNumber {},
    #[snafu(display("Cannot find the directory of {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("Invalid registry: {reason}"))]
    InvalidRegistry { reason: String },
    #[snafu(display("Invalid nicknames for dataset {key}"))]
    InvalidNicknames { source: PollErrors, key: String },
    #[snafu(display("{source}"))]
    Poll { source: PollErrors },
    #[snafu(display("Error writing to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ResultsResult<T> = Result<T, ResultsError>;

/// One dataset, as loaded from its source.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Dataset {
    pub key: String,
    pub label: String,
    pub survey: Survey,
}

/// Loads a registered dataset from its file.
pub fn load_dataset(registry: &Registry, key: &str) -> ResultsResult<Dataset> {
    let ds = registry.get(key)?;
    info!(
        "Attempting to read dataset {} from {:?}",
        ds.key,
        simplify_file_name(&ds.path)
    );
    let survey = match ds.provider {
        InputProvider::Csv => io_csv::read_csv_dataset(&ds.path, &ds.names)?,
        InputProvider::Xlsx => {
            io_xlsx::read_xlsx_dataset(&ds.path, ds.excel_worksheet_name.as_deref(), &ds.names)?
        }
    };
    info!(
        "load_dataset: {}: {} questions, {} answers, {} respondents",
        ds.key,
        survey.questions.len(),
        survey.questions.iter().map(|q| q.answers.len()).sum::<usize>(),
        survey.respondents.len()
    );
    Ok(Dataset {
        key: ds.key.clone(),
        label: ds.label.clone(),
        survey,
    })
}

/// What to render.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PageRequest {
    pub config_path: String,
    pub dataset: Option<String>,
    pub question: usize,
    pub step: Option<Step>,
    pub statistics: bool,
}

/// Builds the page for a request.
///
/// A dataset that cannot be loaded is rendered as a message, so that the
/// rendering layer never has to deal with the failure.
pub fn build_page(
    registry: &Registry,
    request: &PageRequest,
    session: &mut ColorSession,
) -> ResultsResult<Page> {
    let key = match &request.dataset {
        None => return Ok(Page::Home(home_page(registry))),
        Some(key) => key,
    };

    let dataset = match load_dataset(registry, key) {
        Ok(ds) => ds,
        Err(
            e @ (ResultsError::UnknownDataset { .. }
            | ResultsError::MalformedInput { .. }
            | ResultsError::OpeningCsv { .. }
            | ResultsError::CsvLineParse { .. }
            | ResultsError::OpeningExcel { .. }
            | ResultsError::MissingWorksheet { .. }),
        ) => {
            warn!("build_page: {}", e);
            return Ok(Page::Message(MessagePage {
                title: page_title(registry, &season_title(key)),
                message: NO_DATA_MESSAGE.to_string(),
            }));
        }
        Err(e) => return Err(e),
    };

    session.switch_dataset(&dataset.key);

    let (question_index, figure) = if dataset.survey.questions.is_empty() {
        (0, None)
    } else {
        let idx = question_index_after(request.question, request.step, dataset.survey.questions.len())
            .context(PollSnafu {})?;
        let fig = build_figure(&dataset.survey.questions[idx], session, &registry.rules);
        (idx, Some(fig))
    };
    debug!("build_page: {}: question {}", dataset.key, question_index);

    let statistics = if request.statistics {
        Some(statistics_lines(&compute_survey_statistics(&dataset.survey)))
    } else {
        None
    };

    Ok(Page::Results(ResultsPage {
        title: page_title(registry, &dataset.label),
        dataset: dataset.key.clone(),
        question_index,
        questions: question_options(&dataset.survey.questions),
        figure,
        statistics,
    }))
}

/// Renders a page as pretty JSON, to the given output (stdout by default),
/// and checks it against a reference file if one is given.
pub fn render_page(
    request: &PageRequest,
    out: Option<String>,
    check_reference_path: Option<String>,
) -> ResultsResult<()> {
    let registry = read_registry(&request.config_path)?;
    let mut session = ColorSession::new(registry.palette.clone());
    let page = build_page(&registry, request, &mut session)?;

    let pretty_js = serde_json::to_string_pretty(&page).context(ParsingJsonSnafu {})?;

    match out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js),
        Some(out_path) => {
            info!("Writing page to {:?}", out_path);
            fs::write(out_path, &pretty_js).context(WritingOutputSnafu { path: out_path })?;
        }
    }

    // The reference page, if provided for comparison
    if let Some(reference_p) = check_reference_path {
        let reference = read_reference(&reference_p)?;
        let pretty_js_reference =
            serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
        if pretty_js_reference != pretty_js {
            warn!("Found differences with the reference string");
            print_diff(pretty_js_reference.as_str(), pretty_js.as_ref(), "\n");
            whatever!("Difference detected between the page and reference {}", reference_p)
        }
    }

    Ok(())
}

fn read_reference(path: &str) -> ResultsResult<serde_json::Value> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}
