// Primitives for reading CSV files.

use std::fs::File;
use std::io::Read;

use poll_results::builder::Builder;

use crate::results::*;

pub fn read_csv_dataset(path: &Path, names: &NameMap) -> ResultsResult<Survey> {
    let label = path.display().to_string();
    let file = File::open(path).context(OpeningCsvSnafu { path: &label })?;
    read_csv_questions(file, &label, names)
}

/// Reads the questions and the respondents from comma-separated content.
///
/// `label` only names the source in the errors and the logs.
pub fn read_csv_questions<R: Read>(
    input: R,
    label: &str,
    names: &NameMap,
) -> ResultsResult<Survey> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut records = rdr.into_records();

    let header: Vec<String> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineParseSnafu {
                path: label,
                lineno: 1usize,
            })?
            .iter()
            .map(|s| s.to_string())
            .collect(),
        None => {
            return MalformedInputSnafu {
                path: label,
                reason: "no header row",
            }
            .fail()
        }
    };
    debug!("read_csv_questions: {}: header: {:?}", label, header);

    let mut builder = Builder::new(&header).nicknames(names);
    let mut num_skipped: usize = 0;
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {
            path: label,
            lineno,
        })?;
        let fields: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        debug!("read_csv_questions: lineno: {:?} row: {:?}", lineno, &fields);
        if !builder.add_record(&fields) {
            num_skipped += 1;
        }
    }
    if num_skipped > 0 {
        warn!("read_csv_questions: {}: skipped {} rows", label, num_skipped);
    }
    Ok(builder.survey())
}
