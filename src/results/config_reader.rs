use crate::results::*;

use poll_results::{NameMap, Nickname, Palette, PresentationRules};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct NicknameEntry {
    pub alias: String,
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSource {
    pub key: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub provider: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    pub nicknames: Option<Vec<NicknameEntry>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub title: Option<String>,
    #[serde(rename = "chartThreshold")]
    _chart_threshold: Option<JSValue>,
    #[serde(rename = "titleLineLength")]
    _title_line_length: Option<JSValue>,
    #[serde(rename = "paletteSize")]
    _palette_size: Option<JSValue>,
    pub palette: Option<Vec<String>>,
    pub datasets: Vec<DatasetSource>,
}

impl RegistryConfig {
    pub fn chart_threshold(&self) -> ResultsResult<usize> {
        read_js_int_or(
            &self._chart_threshold,
            PresentationRules::DEFAULT_RULES.chart_threshold,
        )
    }

    pub fn title_line_length(&self) -> ResultsResult<usize> {
        read_js_int_or(
            &self._title_line_length,
            PresentationRules::DEFAULT_RULES.title_line_length,
        )
    }

    pub fn palette_size(&self) -> ResultsResult<Option<usize>> {
        if self._palette_size.is_some() {
            read_js_int(&self._palette_size).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputProvider {
    Csv,
    Xlsx,
}

/// A dataset that passed validation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RegisteredDataset {
    pub key: String,
    pub label: String,
    pub path: PathBuf,
    pub provider: InputProvider,
    pub excel_worksheet_name: Option<String>,
    pub names: NameMap,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Registry {
    pub title: String,
    pub rules: PresentationRules,
    pub palette: Palette,
    pub datasets: Vec<RegisteredDataset>,
}

impl Registry {
    pub fn get(&self, key: &str) -> ResultsResult<&RegisteredDataset> {
        let key = key.trim_start_matches('/');
        self.datasets
            .iter()
            .find(|ds| ds.key == key)
            .context(UnknownDatasetSnafu { key })
    }
}

pub const DEFAULT_TITLE: &str = "Poll Results";

pub fn read_registry(path: &str) -> ResultsResult<Registry> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let root = Path::new(path)
        .parent()
        .context(MissingParentDirSnafu { path })?;
    parse_registry(&contents, root)
}

/// Parses and validates a registry. File paths are resolved against `root`.
pub fn parse_registry(contents: &str, root: &Path) -> ResultsResult<Registry> {
    let config: RegistryConfig = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    debug!("parse_registry: {:?}", config);

    let rules = PresentationRules {
        chart_threshold: config.chart_threshold()?,
        title_line_length: config.title_line_length()?,
    };
    if rules.title_line_length == 0 {
        return InvalidRegistrySnafu {
            reason: "titleLineLength must be positive",
        }
        .fail();
    }

    let palette = match &config.palette {
        Some(hexes) => Palette::from_hex(hexes).context(PollSnafu {})?,
        None => Palette::light24(),
    };
    let palette = match config.palette_size()? {
        Some(size) => palette.truncated(size).context(PollSnafu {})?,
        None => palette,
    };

    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut datasets: Vec<RegisteredDataset> = Vec::new();
    for source in config.datasets.iter() {
        datasets.push(validate_source(source, root, &mut seen_keys)?);
    }
    info!(
        "parse_registry: {} datasets: {:?}",
        datasets.len(),
        seen_keys
    );

    Ok(Registry {
        title: config
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        rules,
        palette,
        datasets,
    })
}

fn validate_source(
    source: &DatasetSource,
    root: &Path,
    seen_keys: &mut HashSet<String>,
) -> ResultsResult<RegisteredDataset> {
    let key = source.key.trim().trim_start_matches('/').to_string();
    if key.is_empty() {
        return InvalidRegistrySnafu {
            reason: format!("empty dataset key for {}", source.file_path),
        }
        .fail();
    }
    if !seen_keys.insert(key.clone()) {
        return InvalidRegistrySnafu {
            reason: format!("dataset {} is declared more than once", key),
        }
        .fail();
    }

    let provider = match source.provider.as_deref() {
        None | Some("csv") => InputProvider::Csv,
        Some("xlsx") => InputProvider::Xlsx,
        Some(x) => {
            return InvalidRegistrySnafu {
                reason: format!("dataset {}: unknown provider {:?}", key, x),
            }
            .fail()
        }
    };

    let nicknames: Vec<Nickname> = source
        .nicknames
        .iter()
        .flatten()
        .map(|n| Nickname {
            alias: n.alias.clone(),
            name: n.name.clone(),
        })
        .collect();
    let names = NameMap::from_nicknames(&nicknames).context(InvalidNicknamesSnafu { key: &key })?;

    let path: PathBuf = [root, Path::new(&source.file_path)].iter().collect();
    Ok(RegisteredDataset {
        label: source
            .label
            .clone()
            .unwrap_or_else(|| season_title(&key)),
        key,
        path,
        provider,
        excel_worksheet_name: source.excel_worksheet_name.clone(),
        names,
    })
}

fn read_js_int_or(x: &Option<JSValue>, default: usize) -> ResultsResult<usize> {
    match x {
        None => Ok(default),
        Some(_) => read_js_int(x),
    }
}

fn read_js_int(x: &Option<JSValue>) -> ResultsResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
