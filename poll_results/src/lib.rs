mod config;
mod counter;
use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;
use crate::counter::FrequencyMap;

pub mod builder;
pub mod manual;

/// Groups the answers of a question by answer text.
///
/// The result is sorted by answer text. The counts sum to the number of
/// answers, and the respondents keep the row order.
///
/// Colors come from the session: a text already seen in the session keeps its
/// color, and a new text gets the next palette slot, counting the colors the
/// session handed out so far. New texts are registered in sorted order, so on
/// a fresh session the color of an answer is the color at its rank among the
/// distinct answers of the question. After the first question, the colors
/// depend on the order in which the questions were viewed.
pub fn aggregate(question: &Question, session: &mut ColorSession) -> Vec<AggregatedAnswer> {
    let distinct: Vec<&str> = {
        let mut texts: Vec<&str> = question.answers.iter().map(|a| a.text.as_str()).collect();
        texts.sort();
        texts.dedup();
        texts
    };

    let mut res: Vec<AggregatedAnswer> = distinct
        .iter()
        .map(|text| AggregatedAnswer {
            text: text.to_string(),
            count: 0,
            respondents: Vec::new(),
            color: session.color_for(text),
        })
        .collect();

    let positions: HashMap<&str, usize> = distinct
        .iter()
        .enumerate()
        .map(|(idx, text)| (*text, idx))
        .collect();

    for answer in question.answers.iter() {
        if let Some(pos) = positions.get(answer.text.as_str()) {
            let agg = &mut res[*pos];
            agg.count += 1;
            agg.respondents.push(answer.respondent.clone());
        }
    }

    debug!(
        "aggregate: question {:?}: {} answers, {} distinct",
        question.name,
        question.answers.len(),
        res.len()
    );
    res
}

/// Chooses between a chart and a table for an aggregated question.
pub fn render_hint(aggregated: &[AggregatedAnswer], chart_threshold: usize) -> RenderHint {
    if aggregated.len() > chart_threshold {
        RenderHint::Table
    } else {
        RenderHint::Pie
    }
}

/// Computes the summary statistics over all the questions of a dataset.
///
/// The respondents are the ones who gave at least one answer. Use
/// [compute_survey_statistics] to also count the respondents whose rows hold
/// no answer.
///
/// Ties are broken by the order in which the names are first encountered,
/// walking the questions in order and the answers in row order.
pub fn compute_statistics(questions: &[Question]) -> Statistics {
    let respondents: HashSet<&str> = questions
        .iter()
        .flat_map(|q| q.answers.iter())
        .map(|a| a.respondent.as_str())
        .collect();
    statistics_with_respondents(questions, &respondents)
}

/// Computes the summary statistics of a survey. Every respondent who submitted
/// a row can be voted for, even without answering anything.
pub fn compute_survey_statistics(survey: &Survey) -> Statistics {
    let respondents: HashSet<&str> = survey.respondents.iter().map(|r| r.as_str()).collect();
    statistics_with_respondents(&survey.questions, &respondents)
}

fn statistics_with_respondents(questions: &[Question], respondents: &HashSet<&str>) -> Statistics {
    let mut mentions: FrequencyMap<String> = FrequencyMap::new();
    for answer in questions.iter().flat_map(|q| q.answers.iter()) {
        mentions.add(&answer.text);
    }

    let (most_mentioned, least_mentioned) = match (mentions.first(), mentions.last()) {
        (Some((m_name, m_count)), Some((l_name, l_count))) => (
            Mention {
                name: m_name,
                count: m_count,
            },
            Mention {
                name: l_name,
                count: l_count,
            },
        ),
        _ => {
            info!("compute_statistics: no answer in {} questions", questions.len());
            return Statistics::NoData;
        }
    };

    // Only the answers that name a respondent count as votes.
    let mut self_votes: FrequencyMap<String> = FrequencyMap::new();
    let mut pair_votes: FrequencyMap<(String, String)> = FrequencyMap::new();
    let mut num_votes: usize = 0;
    for answer in questions.iter().flat_map(|q| q.answers.iter()) {
        if !respondents.contains(answer.text.as_str()) {
            continue;
        }
        num_votes += 1;
        if answer.respondent == answer.text {
            self_votes.add(&answer.respondent);
        } else {
            pair_votes.add(&(answer.respondent.clone(), answer.text.clone()));
        }
    }

    debug!(
        "compute_statistics: {} votes for {} respondents",
        num_votes,
        respondents.len()
    );

    if num_votes == 0 {
        return Statistics::NoQualifyingVotes {
            most_mentioned,
            least_mentioned,
        };
    }

    let to_mention = |(name, count): (String, u64)| Mention { name, count };
    Statistics::Report(StatisticsReport {
        most_mentioned,
        least_mentioned,
        most_self_votes: self_votes.first().map(to_mention),
        least_self_votes: self_votes.last().map(to_mention),
        most_voted_pair: pair_votes
            .first()
            .map(|((respondent, answer), count)| PairMention {
                respondent,
                answer,
                count,
            }),
    })
}

/// Inserts line breaks between words so that no line is longer than
/// `max_line_length` characters. A word longer than the limit stays whole on
/// its own line.
pub fn wrap_title(text: &str, max_line_length: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_line_length {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// A move from one question to the next one.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Step {
    Previous,
    Next,
}

/// The question shown after a step, staying within the bounds.
pub fn question_index_after(
    current: usize,
    step: Option<Step>,
    num_questions: usize,
) -> Result<usize, PollErrors> {
    if current >= num_questions {
        return Err(PollErrors::QuestionOutOfRange {
            index: current,
            num_questions,
        });
    }
    let res = match step {
        Some(Step::Previous) if current > 0 => current - 1,
        Some(Step::Next) if current + 1 < num_questions => current + 1,
        _ => current,
    };
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::builder::Builder;
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    fn build(header: &[&str], rows: &[&[&str]]) -> Vec<Question> {
        let mut builder = Builder::new(&row(header));
        for r in rows {
            builder.add_record(&row(r));
        }
        builder.questions()
    }

    fn build_survey(header: &[&str], rows: &[&[&str]]) -> Survey {
        let mut builder = Builder::new(&row(header));
        for r in rows {
            builder.add_record(&row(r));
        }
        builder.survey()
    }

    fn session() -> ColorSession {
        let mut s = ColorSession::new(Palette::light24());
        s.switch_dataset("test");
        s
    }

    #[test]
    fn aggregate_example() {
        init();
        let questions = build(
            &["t", "name", "Q1", "Q2"],
            &[&["t", "Alice", "X", "Y"], &["t", "Bob", "X", "Z"]],
        );
        let mut s = session();
        let q1 = aggregate(&questions[0], &mut s);
        assert_eq!(q1.len(), 1);
        assert_eq!(q1[0].text, "X");
        assert_eq!(q1[0].count, 2);
        assert_eq!(q1[0].respondents, vec!["Alice", "Bob"]);

        let q2 = aggregate(&questions[1], &mut s);
        let summary: Vec<(&str, u64, Vec<String>)> = q2
            .iter()
            .map(|a| (a.text.as_str(), a.count, a.respondents.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Y", 1, vec!["Alice".to_string()]),
                ("Z", 1, vec!["Bob".to_string()])
            ]
        );
    }

    #[test]
    fn aggregate_counts_sum_to_answers() {
        let questions = build(
            &["t", "name", "Q1"],
            &[
                &["t", "A", "b"],
                &["t", "B", "a"],
                &["t", "C", "b"],
                &["t", "D", ""],
                &["t", "E", "c"],
            ],
        );
        let agg = aggregate(&questions[0], &mut session());
        let total: u64 = agg.iter().map(|a| a.count).sum();
        assert_eq!(total as usize, questions[0].answers.len());
        let texts: Vec<&str> = agg.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["", "a", "b", "c"]);
        assert_eq!(agg[2].respondents, vec!["A", "C"]);
    }

    #[test]
    fn colors_follow_sorted_rank() {
        let questions = build(
            &["t", "name", "Q1"],
            &[&["t", "A", "zed"], &["t", "B", "alpha"], &["t", "C", "mid"]],
        );
        let palette = Palette::light24();
        let agg = aggregate(&questions[0], &mut session());
        for (idx, a) in agg.iter().enumerate() {
            assert_eq!(a.color, palette.color_of(idx));
        }
        assert_eq!(agg[0].color.to_string(), "rgb(253, 50, 22)");
    }

    #[test]
    fn colors_are_stable_within_a_session() {
        let questions = build(
            &["t", "name", "Q1", "Q2"],
            &[&["t", "A", "x", "y"], &["t", "B", "w", "x"]],
        );
        let mut s = session();
        let first = aggregate(&questions[0], &mut s);
        let again = aggregate(&questions[0], &mut s);
        assert_eq!(first, again);
        let other = aggregate(&questions[1], &mut s);
        let x_first = first.iter().find(|a| a.text == "x").unwrap();
        let x_other = other.iter().find(|a| a.text == "x").unwrap();
        assert_eq!(x_first.color, x_other.color);
    }

    #[test]
    fn switching_dataset_resets_colors() {
        let season_a = build(&["t", "name", "Q1"], &[&["t", "A", "a1"], &["t", "B", "a2"]]);
        let season_b = build(&["t", "name", "Q1"], &[&["t", "A", "b1"]]);
        let palette = Palette::light24();
        let mut s = ColorSession::new(palette.clone());
        s.switch_dataset("season1");
        aggregate(&season_a[0], &mut s);
        assert_eq!(s.num_assigned(), 2);

        s.switch_dataset("season2");
        assert_eq!(s.num_assigned(), 0);
        let agg = aggregate(&season_b[0], &mut s);
        assert_eq!(agg[0].color, palette.color_of(0));

        // Staying on the same dataset keeps the assignments.
        s.switch_dataset("season2");
        assert_eq!(s.num_assigned(), 1);
    }

    #[test]
    fn palette_cycles() {
        let palette = Palette::light24().truncated(2).unwrap();
        let questions = build(
            &["t", "name", "Q1"],
            &[&["t", "A", "a"], &["t", "B", "b"], &["t", "C", "c"]],
        );
        let agg = aggregate(&questions[0], &mut ColorSession::new(palette.clone()));
        assert_eq!(agg[2].color, agg[0].color);
        assert_ne!(agg[1].color, agg[0].color);
        assert_eq!(
            Palette::light24().truncated(0),
            Err(PollErrors::EmptyPalette)
        );
    }

    #[test]
    fn render_hint_threshold() {
        let rows: Vec<Vec<String>> = (0..11)
            .map(|i| row(&["t", format!("R{}", i).as_str(), format!("A{}", i).as_str()]))
            .collect();
        let mut builder = Builder::new(&row(&["t", "name", "Q1"]));
        for r in rows.iter() {
            builder.add_record(r);
        }
        let questions = builder.questions();
        let agg = aggregate(&questions[0], &mut session());
        assert_eq!(render_hint(&agg, 10), RenderHint::Table);
        assert_eq!(render_hint(&agg, 11), RenderHint::Pie);
        assert_eq!(render_hint(&agg[..10], 10), RenderHint::Pie);
    }

    #[test]
    fn statistics_empty() {
        init();
        assert_eq!(compute_statistics(&[]), Statistics::NoData);
        let questions = build(&["t", "name", "Q1", "Q2"], &[]);
        assert_eq!(compute_statistics(&questions), Statistics::NoData);
    }

    #[test]
    fn statistics_without_votes() {
        let questions = build(
            &["t", "name", "Q1"],
            &[&["t", "Alice", "pizza"], &["t", "Bob", "pizza"], &["t", "Carl", "soup"]],
        );
        assert_eq!(
            compute_statistics(&questions),
            Statistics::NoQualifyingVotes {
                most_mentioned: Mention {
                    name: "pizza".to_string(),
                    count: 2
                },
                least_mentioned: Mention {
                    name: "soup".to_string(),
                    count: 1
                },
            }
        );
    }

    #[test]
    fn statistics_self_votes() {
        let questions = build(
            &["t", "name", "Q1", "Q2"],
            &[&["t", "Alice", "Alice", "Bob"], &["t", "Bob", "Bob", "Bob"]],
        );
        let report = match compute_statistics(&questions) {
            Statistics::Report(r) => r,
            x => panic!("unexpected statistics {:?}", x),
        };
        assert_eq!(
            report.most_self_votes,
            Some(Mention {
                name: "Bob".to_string(),
                count: 2
            })
        );
        assert_eq!(
            report.least_self_votes,
            Some(Mention {
                name: "Alice".to_string(),
                count: 1
            })
        );
        assert_eq!(
            report.most_mentioned,
            Mention {
                name: "Bob".to_string(),
                count: 3
            }
        );
        assert_eq!(
            report.most_voted_pair,
            Some(PairMention {
                respondent: "Alice".to_string(),
                answer: "Bob".to_string(),
                count: 1
            })
        );
    }

    #[test]
    fn statistics_tie_breaks() {
        // Alice and Bob both get 2 mentions, Alice is seen first.
        let questions = build(
            &["t", "name", "Q1", "Q2", "Q3"],
            &[
                &["t", "Alice", "Carl", "Alice", "x"],
                &["t", "Bob", "Alice", "Carl", "Bob"],
                &["t", "Carl", "Bob", "Carl", "y"],
            ],
        );
        let report = match compute_statistics(&questions) {
            Statistics::Report(r) => r,
            x => panic!("unexpected statistics {:?}", x),
        };
        assert_eq!(report.most_mentioned.name, "Carl");
        assert_eq!(report.most_mentioned.count, 3);
        // x and y are both mentioned once, y is the last one seen.
        assert_eq!(report.least_mentioned.name, "y");
        // Alice, Bob and Carl each voted once for themselves.
        assert_eq!(report.most_self_votes.unwrap().name, "Alice");
        assert_eq!(report.least_self_votes.unwrap().name, "Bob");
        let pair = report.most_voted_pair.unwrap();
        assert_eq!((pair.respondent.as_str(), pair.answer.as_str()), ("Alice", "Carl"));
    }

    #[test]
    fn statistics_without_self_votes() {
        let questions = build(
            &["t", "name", "Q1"],
            &[&["t", "Alice", "Bob"], &["t", "Bob", "Alice"], &["t", "Carl", "Bob"]],
        );
        let report = match compute_statistics(&questions) {
            Statistics::Report(r) => r,
            x => panic!("unexpected statistics {:?}", x),
        };
        assert_eq!(report.most_self_votes, None);
        assert_eq!(report.least_self_votes, None);
        assert_eq!(
            report.most_voted_pair,
            Some(PairMention {
                respondent: "Alice".to_string(),
                answer: "Bob".to_string(),
                count: 1
            })
        );
    }

    #[test]
    fn statistics_count_silent_respondents() {
        init();
        // Alice submitted a row without any answer and can still be voted for.
        let survey = build_survey(
            &["t", "name", "Q1"],
            &[&["t", "Alice"], &["t", "Bob", "Alice"]],
        );
        assert_eq!(survey.respondents, vec!["Alice", "Bob"]);
        match compute_survey_statistics(&survey) {
            Statistics::Report(report) => {
                assert_eq!(
                    report.most_voted_pair,
                    Some(PairMention {
                        respondent: "Bob".to_string(),
                        answer: "Alice".to_string(),
                        count: 1,
                    })
                );
                assert_eq!(report.most_self_votes, None);
            }
            other => panic!("expected a report, got {:?}", other),
        }
        // Only answering respondents are known from the questions alone.
        assert!(matches!(
            compute_statistics(&survey.questions),
            Statistics::NoQualifyingVotes { .. }
        ));
    }

    #[test]
    fn wrap_title_lines() {
        let text = "Who in the group would be the first to get lost on a hiking trip in the mountains during a storm?";
        let wrapped = wrap_title(text, 65);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 65, "line too long: {:?}", line);
        }
        assert_eq!(wrapped.replace('\n', " "), text);
        assert_eq!(wrap_title("short", 65), "short");
        assert_eq!(wrap_title("", 65), "");
    }

    #[test]
    fn wrap_title_long_word() {
        let wrapped = wrap_title("a supercalifragilistic b", 5);
        assert_eq!(wrapped, "a\nsupercalifragilistic\nb");
    }

    #[test]
    fn navigation_is_bounded() {
        assert_eq!(question_index_after(0, Some(Step::Previous), 3), Ok(0));
        assert_eq!(question_index_after(0, Some(Step::Next), 3), Ok(1));
        assert_eq!(question_index_after(2, Some(Step::Next), 3), Ok(2));
        assert_eq!(question_index_after(1, None, 3), Ok(1));
        assert_eq!(
            question_index_after(3, None, 3),
            Err(PollErrors::QuestionOutOfRange {
                index: 3,
                num_questions: 3
            })
        );
    }

    #[test]
    fn nickname_validation() {
        let nick = |a: &str, n: &str| Nickname {
            alias: a.to_string(),
            name: n.to_string(),
        };
        let names = NameMap::from_nicknames(&[nick("Min", "Minhyeok"), nick("Gojo", "Marco")]).unwrap();
        assert_eq!(names.normalize(" Min "), "Minhyeok");
        assert_eq!(names.normalize(" Liam "), "Liam");
        assert_eq!(
            NameMap::from_nicknames(&[nick("Min", "Minhyeok"), nick("Min", "Minhyeok")]),
            Err(PollErrors::DuplicateNickname {
                alias: "Min".to_string()
            })
        );
        assert!(matches!(
            NameMap::from_nicknames(&[nick("Min", "Minhyeok"), nick("Min ", "Mina")]),
            Err(PollErrors::ConflictingNickname { .. })
        ));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(
            Rgb::from_hex("#00B5F7"),
            Some(Rgb {
                r: 0,
                g: 181,
                b: 247
            })
        );
        assert_eq!(Rgb::from_hex("00B5F7"), Rgb::from_hex("#00B5F7"));
        assert_eq!(Rgb::from_hex("#00B5"), None);
        assert_eq!(Rgb::from_hex("#GGGGGG"), None);
        assert_eq!(Rgb::from_hex("#+F+F+F"), None);
        assert_eq!(Palette::light24().len(), 24);
        assert!(Palette::from_hex(&[]).is_err());
    }
}
