// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// One response given by one respondent to one question.
///
/// The answer does not own its question: `question` is the position of the
/// question in the dataset, which is also its header column minus two.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Answer {
    pub question: usize,
    pub text: String,
    /// The canonical name of the respondent, never empty.
    pub respondent: String,
}

/// A poll prompt, with all the answers in the order of the rows of the source.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    pub name: String,
    pub answers: Vec<Answer>,
}

/// The questions of a dataset and everyone who submitted a row, including
/// the respondents whose row holds no answer.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Survey {
    pub questions: Vec<Question>,
    /// Canonical names, in the order of their first row.
    pub respondents: Vec<String>,
}

impl Question {
    pub fn new(name: &str) -> Question {
        Question {
            name: name.trim().to_string(),
            answers: Vec::new(),
        }
    }
}

/// A correction from a raw respondent identifier to the name displayed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Nickname {
    pub alias: String,
    pub name: String,
}

/// The static mapping from raw respondent identifiers to canonical names
/// for one dataset.
///
/// It is validated at construction and never mutated afterwards.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct NameMap {
    names: HashMap<String, String>,
}

impl NameMap {
    pub fn empty() -> NameMap {
        NameMap::default()
    }

    /// Builds the mapping, rejecting any alias that is listed more than once.
    pub fn from_nicknames(nicknames: &[Nickname]) -> Result<NameMap, PollErrors> {
        let mut names: HashMap<String, String> = HashMap::new();
        for nick in nicknames {
            let alias = nick.alias.trim().to_string();
            let name = nick.name.trim().to_string();
            if let Some(previous) = names.get(&alias) {
                if *previous == name {
                    return Err(PollErrors::DuplicateNickname { alias });
                }
                return Err(PollErrors::ConflictingNickname {
                    alias,
                    first: previous.clone(),
                    second: name,
                });
            }
            names.insert(alias, name);
        }
        Ok(NameMap { names })
    }

    /// The canonical name for a raw identifier. Unknown identifiers are
    /// returned trimmed.
    pub fn normalize(&self, raw_name: &str) -> String {
        let trimmed = raw_name.trim();
        match self.names.get(trimmed) {
            Some(name) => name.clone(),
            None => trimmed.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ******** Colors *********

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses a hex triplet such as `#FD3216` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// The qualitative "Light24" palette.
const LIGHT24: [&str; 24] = [
    "#FD3216", "#00FE35", "#6A76FC", "#FED4C4", "#FE00CE", "#0DF9FF", "#F6F926", "#FF9616",
    "#479B55", "#EEA6FB", "#DC587D", "#D626FF", "#6E899C", "#00B5F7", "#B68E00", "#C9FBE5",
    "#FF0092", "#22FFA7", "#E3EE9E", "#86CE00", "#BC7196", "#7E7DCD", "#FC6955", "#E48F72",
];

/// A fixed, cyclic list of colors.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn light24() -> Palette {
        Palette {
            colors: LIGHT24.iter().filter_map(|h| Rgb::from_hex(h)).collect(),
        }
    }

    pub fn from_hex(hexes: &[String]) -> Result<Palette, PollErrors> {
        let mut colors = Vec::new();
        for h in hexes {
            let c = Rgb::from_hex(h).ok_or_else(|| PollErrors::InvalidColor { hex: h.clone() })?;
            colors.push(c);
        }
        if colors.is_empty() {
            return Err(PollErrors::EmptyPalette);
        }
        Ok(Palette { colors })
    }

    /// Only keeps the first `size` colors, so that colors cycle sooner.
    pub fn truncated(&self, size: usize) -> Result<Palette, PollErrors> {
        if size == 0 {
            return Err(PollErrors::EmptyPalette);
        }
        Ok(Palette {
            colors: self.colors.iter().take(size).cloned().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_of(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }
}

/// The color assignments of one page view.
///
/// A session is bound to a dataset. Switching to another dataset drops all the
/// assignments, so colors of one dataset never leak into the next one.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColorSession {
    palette: Palette,
    dataset: Option<String>,
    assigned: HashMap<String, Rgb>,
}

impl ColorSession {
    pub fn new(palette: Palette) -> ColorSession {
        ColorSession {
            palette,
            dataset: None,
            assigned: HashMap::new(),
        }
    }

    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    /// Binds the session to a dataset. The assignments are cleared when the
    /// dataset differs from the current one.
    pub fn switch_dataset(&mut self, key: &str) {
        if self.dataset.as_deref() != Some(key) {
            log::debug!(
                "switch_dataset: {:?} -> {:?}, dropping {} colors",
                self.dataset,
                key,
                self.assigned.len()
            );
            self.assigned.clear();
            self.dataset = Some(key.to_string());
        }
    }

    /// The color of an answer text, assigning the next palette slot if the text
    /// was not seen yet in this session.
    pub fn color_for(&mut self, text: &str) -> Rgb {
        if let Some(c) = self.assigned.get(text) {
            return *c;
        }
        let c = self.palette.color_of(self.assigned.len());
        self.assigned.insert(text.to_string(), c);
        c
    }

    pub fn num_assigned(&self) -> usize {
        self.assigned.len()
    }
}

// ******** Output data structures *********

/// The rollup of one distinct answer text for one question.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AggregatedAnswer {
    pub text: String,
    pub count: u64,
    /// In the order of the rows of the source.
    pub respondents: Vec<String>,
    pub color: Rgb,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RenderHint {
    Pie,
    Table,
}

/// Presentation policy exposed to the rendering layer. The core does not
/// enforce it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PresentationRules {
    /// Above this number of distinct answers, a table is preferred to a chart.
    pub chart_threshold: usize,
    pub title_line_length: usize,
}

impl PresentationRules {
    pub const DEFAULT_RULES: PresentationRules = PresentationRules {
        chart_threshold: 10,
        title_line_length: 65,
    };
}

/// A name and the number of times it was counted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Mention {
    pub name: String,
    pub count: u64,
}

/// A respondent answering with the name of another respondent.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairMention {
    pub respondent: String,
    pub answer: String,
    pub count: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StatisticsReport {
    pub most_mentioned: Mention,
    pub least_mentioned: Mention,
    pub most_self_votes: Option<Mention>,
    pub least_self_votes: Option<Mention>,
    pub most_voted_pair: Option<PairMention>,
}

/// The outcome of the statistics over a dataset.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Statistics {
    /// No question, or questions without any answer.
    NoData,
    /// Answers exist, but none of them names a respondent of the dataset.
    NoQualifyingVotes {
        most_mentioned: Mention,
        least_mentioned: Mention,
    },
    Report(StatisticsReport),
}

/// Errors in the configuration or the use of the library.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum PollErrors {
    DuplicateNickname {
        alias: String,
    },
    ConflictingNickname {
        alias: String,
        first: String,
        second: String,
    },
    InvalidColor {
        hex: String,
    },
    EmptyPalette,
    QuestionOutOfRange {
        index: usize,
        num_questions: usize,
    },
}

impl Error for PollErrors {}

impl Display for PollErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollErrors::DuplicateNickname { alias } => {
                write!(f, "nickname {:?} is listed more than once", alias)
            }
            PollErrors::ConflictingNickname {
                alias,
                first,
                second,
            } => write!(
                f,
                "nickname {:?} maps to both {:?} and {:?}",
                alias, first, second
            ),
            PollErrors::InvalidColor { hex } => write!(f, "invalid hex color {:?}", hex),
            PollErrors::EmptyPalette => write!(f, "the color palette is empty"),
            PollErrors::QuestionOutOfRange {
                index,
                num_questions,
            } => write!(
                f,
                "question {} does not exist ({} questions)",
                index, num_questions
            ),
        }
    }
}
