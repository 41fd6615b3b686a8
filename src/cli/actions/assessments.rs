use crate::{
    cli::{
        actions::context::{AppContext, print_json},
        globals::OutputFormat,
    },
    features::assessments::{
        client,
        types::{AnswerSubmission, GenerateTestRequest, RecordsPage, Statistics, TestRecord},
    },
    util::{Difficulty, Tone, format_date_time, format_score, format_time},
};
use anyhow::{Context, Result, anyhow, bail};
use clap::builder::styling::AnsiColor;
use serde_json::Value;
use std::{
    io::IsTerminal,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub enum Command {
    Generate(GenerateTestRequest),
    Show {
        id: String,
    },
    Submit {
        id: String,
        answers: Vec<AnswerSubmission>,
        answers_file: Option<PathBuf>,
    },
    Records(RecordsPage),
    Stats,
    Review {
        id: String,
    },
    Wrong {
        body: Value,
    },
}

/// Execute a test command.
/// # Errors
/// Returns an error if not logged in, the answers are malformed, or the request fails.
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    ctx.require_login()?;

    match command {
        Command::Generate(request) => {
            let test = client::generate_test(&ctx.api, &request).await?;
            print_json(&test)
        }
        Command::Show { id } => {
            let test = client::get_test(&ctx.api, &id).await?;
            print_json(&test)
        }
        Command::Submit {
            id,
            mut answers,
            answers_file,
        } => {
            if let Some(file) = answers_file {
                answers.extend(read_answers_file(&file).await?);
            }
            if answers.is_empty() {
                bail!("No answers given; use --answer QID=ANSWER or --answers-file");
            }
            let result = client::submit_test(&ctx.api, &id, answers).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&result),
                OutputFormat::Text => {
                    println!(
                        "Score {} ({}/{} correct){}",
                        format_score(result.score),
                        result.correct_count,
                        result.total_questions,
                        if result.passed { ", passed" } else { "" }
                    );
                    if let Some(review) = &result.review_test_id {
                        println!("Review test: {review}");
                    }
                    Ok(())
                }
            }
        }
        Command::Records(page) => {
            let records = client::test_records(&ctx.api, page).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&records),
                OutputFormat::Text => {
                    let color = std::io::stdout().is_terminal();
                    for record in &records {
                        println!("{}", record_line(record, color));
                    }
                    Ok(())
                }
            }
        }
        Command::Stats => {
            let statistics = client::statistics(&ctx.api).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&statistics),
                OutputFormat::Text => {
                    println!("{}", statistics_summary(&statistics));
                    for month in &statistics.learning_progress {
                        println!(
                            "  {}: {} tests, {} questions",
                            month.month, month.tests, month.total_questions
                        );
                    }
                    Ok(())
                }
            }
        }
        Command::Review { id } => {
            let review = client::generate_review_test(&ctx.api, &id).await?;
            print_json(&review)
        }
        Command::Wrong { body } => {
            let test = client::generate_wrong_test(&ctx.api, &body).await?;
            print_json(&test)
        }
    }
}

/// Parses a `QUESTION_ID=ANSWER` pair. The answer may contain `=`.
///
/// # Errors
/// Returns an error if the separator or the question id is missing.
pub fn parse_answer(raw: &str) -> Result<AnswerSubmission> {
    let (question_id, answer) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid answer `{raw}`, expected QUESTION_ID=ANSWER"))?;
    let question_id = question_id.trim();
    if question_id.is_empty() {
        bail!("Invalid answer `{raw}`, question id is empty");
    }
    Ok(AnswerSubmission {
        question_id: question_id.to_string(),
        answer: answer.trim().to_string(),
        time_spent: 0,
    })
}

async fn read_answers_file(file: &Path) -> Result<Vec<AnswerSubmission>> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid answers file {}", file.display()))
}

/// One tab-separated record: id, type, difficulty, score, status, start,
/// and the finish time of day (empty while unfinished).
fn record_line(record: &TestRecord, color: bool) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        record.id,
        record.test_type,
        difficulty_badge(&record.difficulty, color),
        format_score(record.score),
        record.status,
        format_date_time(Some(&record.started_at)),
        format_time(record.completed_at.as_deref())
    )
}

fn difficulty_badge(difficulty: &Difficulty, color: bool) -> String {
    if !color {
        return difficulty.label().to_string();
    }
    let style = tone_color(difficulty.tone()).on_default();
    format!("{style}{}{style:#}", difficulty.label())
}

const fn tone_color(tone: Tone) -> AnsiColor {
    match tone {
        Tone::Success => AnsiColor::Green,
        Tone::Warning => AnsiColor::Yellow,
        Tone::Danger => AnsiColor::Red,
        Tone::Info => AnsiColor::Blue,
    }
}

fn statistics_summary(statistics: &Statistics) -> String {
    format!(
        "{} tests, {} questions, correct rate {}, {} weak points",
        statistics.total_tests,
        statistics.total_questions,
        format_score(statistics.correct_rate),
        statistics.weak_points.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use temp_dir::TempDir;

    #[test]
    fn parse_answer_splits_on_first_separator() {
        let answer = parse_answer("q1 = a=b ").unwrap();
        assert_eq!(answer.question_id, "q1");
        assert_eq!(answer.answer, "a=b");
        assert_eq!(answer.time_spent, 0);

        assert_eq!(parse_answer("q2=").unwrap().answer, "");
        assert!(parse_answer("q3").is_err());
        assert!(parse_answer("=B").is_err());
    }

    #[tokio::test]
    async fn answers_file_is_json_list() -> Result<()> {
        let dir = TempDir::new()?;
        let file = dir.child("answers.json");
        std::fs::write(
            &file,
            json!([
                {"question_id": "q1", "answer": "B", "time_spent": 12},
                {"question_id": "q2", "answer": "went"}
            ])
            .to_string(),
        )?;

        let answers = read_answers_file(&file).await?;
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].time_spent, 12);
        assert_eq!(answers[1].time_spent, 0);

        std::fs::write(&file, "{\"q1\": \"B\"}")?;
        let err = read_answers_file(&file).await.unwrap_err();
        assert!(err.to_string().contains("Invalid answers file"));
        Ok(())
    }

    #[test]
    fn record_line_uses_labels() {
        let record = TestRecord {
            id: "t1".to_string(),
            test_type: "unit".to_string(),
            test_scope: Value::Null,
            total_questions: 10,
            correct_count: 8,
            score: 80.0,
            difficulty: Difficulty::Hard,
            status: "completed".to_string(),
            started_at: "2024-09-01T08:05:00".to_string(),
            completed_at: Some("2024-09-01T08:19:42".to_string()),
        };
        assert_eq!(
            record_line(&record, false),
            "t1\tunit\t困难\t80.0%\tcompleted\t2024-09-01 08:05\t08:19:42"
        );

        let unfinished = TestRecord {
            status: "in_progress".to_string(),
            completed_at: None,
            ..record
        };
        assert!(record_line(&unfinished, false).ends_with("in_progress\t2024-09-01 08:05\t"));
    }

    #[test]
    fn difficulty_badge_colors_by_tone() {
        assert_eq!(difficulty_badge(&Difficulty::Easy, false), "简单");

        let badge = difficulty_badge(&Difficulty::Hard, true);
        let red = AnsiColor::Red.on_default();
        assert_eq!(badge, format!("{red}困难{red:#}"));
        assert!(badge.starts_with("\u{1b}["));

        let other = difficulty_badge(&Difficulty::from("expert"), true);
        assert!(other.contains("expert"));
        assert_eq!(tone_color(Difficulty::Medium.tone()), AnsiColor::Yellow);
    }

    #[test]
    fn statistics_summary_formats_rate() {
        let statistics = Statistics {
            total_tests: 3,
            total_questions: 30,
            correct_rate: 72.345,
            weak_points: Vec::new(),
            learning_progress: Vec::new(),
        };
        assert_eq!(
            statistics_summary(&statistics),
            "3 tests, 30 questions, correct rate 72.3%, 0 weak points"
        );
    }
}
