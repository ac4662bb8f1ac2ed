// Payloads for the rendering layer.

use poll_results::*;
use serde::Serialize;

use crate::results::config_reader::Registry;

pub const NO_DATA_MESSAGE: &str = "No data available.";
pub const NO_ANSWERS_MESSAGE: &str = "No answers available.";
pub const NO_VOTES_MESSAGE: &str = "No answers naming a respondent available.";

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct DatasetLink {
    pub label: String,
    pub href: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct HomePage {
    pub title: String,
    pub links: Vec<DatasetLink>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct QuestionOption {
    pub label: String,
    pub value: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: u64,
    #[serde(rename = "hoverText")]
    pub hover_text: String,
    pub color: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Figure {
    pub title: String,
    pub renderer: String,
    pub slices: Vec<Slice>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct ResultsPage {
    pub title: String,
    pub dataset: String,
    #[serde(rename = "questionIndex")]
    pub question_index: usize,
    pub questions: Vec<QuestionOption>,
    pub figure: Option<Figure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct MessagePage {
    pub title: String,
    pub message: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum Page {
    Home(HomePage),
    Results(ResultsPage),
    Message(MessagePage),
}

pub fn home_page(registry: &Registry) -> HomePage {
    HomePage {
        title: registry.title.clone(),
        links: registry
            .datasets
            .iter()
            .map(|ds| DatasetLink {
                label: format!("Go to {}", ds.label),
                href: format!("/{}", ds.key),
            })
            .collect(),
    }
}

pub fn page_title(registry: &Registry, dataset_label: &str) -> String {
    format!("{} - {}", registry.title, dataset_label)
}

/// The chart of one question. Lines of the title are separated with `<br>`.
pub fn build_figure(
    question: &Question,
    session: &mut ColorSession,
    rules: &PresentationRules,
) -> Figure {
    let aggregated = aggregate(question, session);
    let renderer = match render_hint(&aggregated, rules.chart_threshold) {
        RenderHint::Pie => "pie",
        RenderHint::Table => "table",
    };
    Figure {
        title: wrap_title(&question.name, rules.title_line_length).replace('\n', "<br>"),
        renderer: renderer.to_string(),
        slices: aggregated
            .iter()
            .map(|agg| Slice {
                label: agg.text.clone(),
                value: agg.count,
                hover_text: agg.respondents.join(", "),
                color: agg.color.to_string(),
            })
            .collect(),
    }
}

pub fn question_options(questions: &[Question]) -> Vec<QuestionOption> {
    questions
        .iter()
        .enumerate()
        .map(|(idx, q)| QuestionOption {
            label: q.name.clone(),
            value: idx,
        })
        .collect()
}

/// The sentences of the statistics panel.
pub fn statistics_lines(stats: &Statistics) -> Vec<String> {
    let popularity = |most: &Mention, least: &Mention| {
        vec![
            format!("Most Popular: {} with {} mentions.", most.name, most.count),
            format!(
                "Least Popular: {} with {} mentions.",
                least.name, least.count
            ),
        ]
    };
    match stats {
        Statistics::NoData => vec![NO_ANSWERS_MESSAGE.to_string()],
        Statistics::NoQualifyingVotes {
            most_mentioned,
            least_mentioned,
        } => {
            let mut lines = popularity(most_mentioned, least_mentioned);
            lines.push(NO_VOTES_MESSAGE.to_string());
            lines
        }
        Statistics::Report(report) => {
            let mut lines = popularity(&report.most_mentioned, &report.least_mentioned);
            lines.push(match &report.most_self_votes {
                Some(m) => format!(
                    "Self-voter: {} voted for themself {} times.",
                    m.name, m.count
                ),
                None => "Self-voter: nobody voted for themself.".to_string(),
            });
            if let Some(m) = &report.least_self_votes {
                lines.push(format!(
                    "Selfless: {} voted for themself only {} time(s).",
                    m.name, m.count
                ));
            }
            lines.push(match &report.most_voted_pair {
                Some(p) => format!(
                    "Top pair: {} voted for {} {} times.",
                    p.respondent, p.answer, p.count
                ),
                None => "Top pair: nobody voted for someone else.".to_string(),
            });
            lines
        }
    }
}
