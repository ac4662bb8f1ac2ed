pub use crate::config::*;

use log::{debug, warn};

/// Number of leading columns that do not hold answers: an index or timestamp,
/// then the respondent.
pub const RESERVED_COLUMNS: usize = 2;

/// A builder for assembling questions from the rows of a table.
///
/// ```
/// pub use poll_results::builder::Builder;
/// # use poll_results::{NameMap, PollErrors};
///
/// let header: Vec<String> = ["t", "name", "Best cook?"].iter().map(|s| s.to_string()).collect();
/// let mut builder = Builder::new(&header).nicknames(&NameMap::empty());
///
/// builder.add_record(&["t".to_string(), "Alice".to_string(), "Bob".to_string()]);
///
/// let questions = builder.questions();
/// assert_eq!(questions[0].answers[0].respondent, "Alice");
/// # Ok::<(), PollErrors>(())
/// ```
pub struct Builder {
    pub(crate) _names: NameMap,
    pub(crate) _questions: Vec<Question>,
    pub(crate) _num_rows: usize,
    pub(crate) _respondents: Vec<String>,
}

impl Builder {
    /// Starts from the header row. The first two columns are ignored, every
    /// other column is one question.
    pub fn new(header: &[String]) -> Builder {
        let questions: Vec<Question> = header
            .iter()
            .skip(RESERVED_COLUMNS)
            .map(|name| Question::new(name))
            .collect();
        debug!("Builder::new: {} questions", questions.len());
        Builder {
            _names: NameMap::empty(),
            _questions: questions,
            _num_rows: 0,
            _respondents: Vec::new(),
        }
    }

    pub fn nicknames(self, names: &NameMap) -> Builder {
        Builder {
            _names: names.clone(),
            _questions: self._questions,
            _num_rows: self._num_rows,
            _respondents: self._respondents,
        }
    }

    pub fn num_questions(&self) -> usize {
        self._questions.len()
    }

    /// Adds a full data row, including the two leading columns.
    ///
    /// Returns false when the row was skipped because it has no respondent.
    pub fn add_record(&mut self, fields: &[String]) -> bool {
        match fields {
            [_, respondent, answers @ ..] => self.add_answers(respondent, answers),
            _ => {
                warn!(
                    "add_record: row {}: skipping row without a respondent column: {:?}",
                    self._num_rows + 1,
                    fields
                );
                self._num_rows += 1;
                false
            }
        }
    }

    /// Adds the answers of one respondent, in question order.
    ///
    /// A short row only fills the first questions: missing answers are not
    /// fabricated. Fields beyond the last question are dropped.
    pub fn add_answers(&mut self, raw_respondent: &str, answers: &[String]) -> bool {
        self._num_rows += 1;
        let respondent = self._names.normalize(raw_respondent);
        if respondent.is_empty() {
            warn!(
                "add_answers: row {}: skipping row with an empty respondent",
                self._num_rows
            );
            return false;
        }
        if !self._respondents.contains(&respondent) {
            self._respondents.push(respondent.clone());
        }
        if answers.len() > self._questions.len() {
            warn!(
                "add_answers: row {}: {} answers for {} questions, dropping the extra fields",
                self._num_rows,
                answers.len(),
                self._questions.len()
            );
        }
        if answers.len() < self._questions.len() {
            debug!(
                "add_answers: row {}: short row with {} answers",
                self._num_rows,
                answers.len()
            );
        }
        for (idx, (question, text)) in self._questions.iter_mut().zip(answers).enumerate() {
            question.answers.push(Answer {
                question: idx,
                text: text.trim().to_string(),
                respondent: respondent.clone(),
            });
        }
        true
    }

    pub fn questions(self) -> Vec<Question> {
        self._questions
    }

    /// The questions together with every accepted respondent.
    pub fn survey(self) -> Survey {
        Survey {
            questions: self._questions,
            respondents: self._respondents,
        }
    }
}
