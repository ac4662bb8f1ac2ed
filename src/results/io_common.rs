use std::path::Path;

/// The file name of a path, for the logs.
pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// A display title derived from a dataset key: `season3` becomes `Season 3`.
pub fn season_title(key: &str) -> String {
    let key = key.trim_matches('/');
    let digits_start = key
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(key.len());
    let (name, number) = key.split_at(digits_start);
    let mut chars = name.chars();
    let mut title: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if !number.is_empty() {
        if !title.is_empty() {
            title.push(' ');
        }
        title.push_str(number);
    }
    title
}

/// Drops the empty cells at the end of a spreadsheet row, so that a row
/// that was not filled up to the last question reads as a short row.
pub fn trim_trailing_empty(mut fields: Vec<String>) -> Vec<String> {
    while fields.last().map(|s| s.trim().is_empty()).unwrap_or(false) {
        fields.pop();
    }
    fields
}
