use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use poll_results::builder::Builder;

use crate::results::{io_common::trim_trailing_empty, *};

/// Reads a survey export in the Excel format. The layout of the sheet is the
/// same as the layout of the CSV files.
pub fn read_xlsx_dataset(
    path: &Path,
    worksheet_name: Option<&str>,
    names: &NameMap,
) -> ResultsResult<Survey> {
    let label = path.display().to_string();
    let wrange = get_range(path, worksheet_name)?;

    let mut rows = wrange.rows();
    let header: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_text).collect(),
        None => {
            return MalformedInputSnafu {
                path: &label,
                reason: "empty worksheet",
            }
            .fail()
        }
    };
    debug!("read_xlsx_dataset: {}: header: {:?}", label, header);

    let mut builder = Builder::new(&header).nicknames(names);
    for (idx, row) in rows.enumerate() {
        let fields = trim_trailing_empty(row.iter().map(cell_text).collect());
        debug!("read_xlsx_dataset: idx: {:?} row: {:?}", idx, &fields);
        if fields.is_empty() {
            continue;
        }
        builder.add_record(&fields);
    }
    Ok(builder.survey())
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Empty => String::new(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        other => format!("{:?}", other),
    }
}

fn get_range(path: &Path, worksheet_name: Option<&str>) -> ResultsResult<Range<DataType>> {
    let label = path.display().to_string();
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &label, &worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path: &label })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet_name {
        workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu {
                path: &label,
                worksheet: name,
            })?
            .context(OpeningExcelSnafu { path: &label })
    } else {
        workbook
            .worksheet_range_at(0)
            .context(MalformedInputSnafu {
                path: &label,
                reason: "no worksheet",
            })?
            .context(OpeningExcelSnafu { path: &label })
    }
}
