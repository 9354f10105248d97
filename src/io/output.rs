use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::formatting::{
    emoji_or_fallback, formatter_for, rating_emoji, FormattingConfig, OutputFormatter,
};
use crate::rating::{Level, RiskRating};
use crate::summary::{AnswerAssessment, AssessmentSummary};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_summary(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_summary(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(summary)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_summary(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        self.write_header(summary)?;
        self.write_overview(summary)?;
        self.write_distribution(summary)?;
        self.write_matrix(summary)?;
        self.write_answers(summary)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "# Risk Assessment Report")?;
        writeln!(self.writer)?;
        if let Some(respondent) = &summary.respondent {
            writeln!(self.writer, "Respondent: {respondent}")?;
        }
        if let Some(date) = &summary.last_submission_date {
            writeln!(
                self.writer,
                "Submitted: {}",
                date.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_overview(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "## Overview")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value | Status |")?;
        writeln!(self.writer, "|--------|-------|--------|")?;

        self.write_overview_row(
            "Overall rating",
            &rating_text(summary.average_rating),
            rating_status(summary.average_rating),
        )?;
        self.write_overview_row(
            "Highest rating",
            &rating_text(summary.highest_rating),
            rating_status(summary.highest_rating),
        )?;
        if summary.residual_rating.is_some() {
            self.write_overview_row(
                "Residual rating",
                &rating_text(summary.residual_rating),
                rating_status(summary.residual_rating),
            )?;
        }
        self.write_overview_row(
            "Questions answered",
            &format!(
                "{} / {}",
                summary.answered_questions, summary.total_questions
            ),
            completion_status(summary.all_questions_answered),
        )?;
        self.write_overview_row(
            "Background section",
            if summary.background_completed {
                "complete"
            } else {
                "incomplete"
            },
            completion_status(summary.background_completed),
        )?;
        self.write_overview_row("Controls described", &summary.controls_count.to_string(), "-")?;
        self.write_overview_row(
            "Distinct ratings",
            &summary.distinct_ratings().to_string(),
            "-",
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_overview_row(&mut self, metric: &str, value: &str, status: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} | {status} |")?;
        Ok(())
    }

    fn write_distribution(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        if summary.answers.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Rating Distribution")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Rating | Answers |")?;
        writeln!(self.writer, "|--------|---------|")?;
        for rating in RiskRating::ALL.iter().rev() {
            writeln!(
                self.writer,
                "| {} | {} |",
                rating.label(),
                summary.distribution.count(*rating)
            )?;
        }
        writeln!(
            self.writer,
            "| Not Rated | {} |",
            summary.distribution.unrated_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_matrix(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        if summary.distribution.rated_count() == 0 {
            return Ok(());
        }

        writeln!(self.writer, "## Risk Matrix")?;
        writeln!(self.writer)?;
        write!(self.writer, "| Probability \\ Impact |")?;
        for impact in Level::ALL {
            write!(self.writer, " {} |", impact.label())?;
        }
        writeln!(self.writer)?;
        write!(self.writer, "|---|")?;
        for _ in Level::ALL {
            write!(self.writer, "---|")?;
        }
        writeln!(self.writer)?;

        // Highest probability on the top row, as the portal draws it.
        for probability in Level::ALL.iter().rev() {
            write!(self.writer, "| {} |", probability.label())?;
            for impact in Level::ALL {
                let cell = summary
                    .matrix_cells
                    .iter()
                    .find(|c| c.probability == *probability && c.impact == impact);
                match cell {
                    Some(cell) if cell.count > 0 => {
                        write!(self.writer, " {} ({}) |", cell.rating.label(), cell.count)?
                    }
                    Some(cell) => write!(self.writer, " {} |", cell.rating.label())?,
                    None => write!(self.writer, " - |")?,
                }
            }
            writeln!(self.writer)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_answers(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        if summary.answers.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Answers")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| # | Question | Answer | Probability | Impact | Rating | Residual |"
        )?;
        writeln!(
            self.writer,
            "|---|----------|--------|-------------|--------|--------|----------|"
        )?;
        for answer in &summary.answers {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} |",
                answer.position,
                answer.question,
                answer.answer.as_deref().unwrap_or("-"),
                level_text(answer.probability),
                level_text(answer.impact),
                rating_text(answer.rating),
                answer
                    .residual_rating
                    .map_or_else(|| "-".to_string(), |r| r.label().to_string()),
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    config: FormattingConfig,
    formatter: Box<dyn OutputFormatter>,
    top_answers: usize,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, config: FormattingConfig, top_answers: usize) -> Self {
        Self {
            writer,
            config,
            formatter: formatter_for(config),
            top_answers,
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_summary(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        self.print_header()?;
        self.print_summary(summary)?;
        self.print_ratings(summary)?;
        self.print_distribution(summary)?;
        self.print_top_answers(summary)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            self.formatter.heading("Risk Assessment Report")
        )?;
        writeln!(
            self.writer,
            "{}",
            self.formatter.heading("======================")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_summary(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        let prefix = emoji_or_fallback("\u{1f4ca} ", "", self.config);
        writeln!(
            self.writer,
            "{}{}",
            prefix,
            self.formatter.field("Summary:")
        )?;
        if let Some(respondent) = &summary.respondent {
            writeln!(self.writer, "  Respondent: {respondent}")?;
        }
        if let Some(date) = &summary.last_submission_date {
            writeln!(
                self.writer,
                "  Submitted: {}",
                date.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }

        let answered = format!(
            "{} / {}",
            summary.answered_questions, summary.total_questions
        );
        let answered = if summary.all_questions_answered {
            self.formatter.good(&answered)
        } else {
            self.formatter.warn(&answered)
        };
        writeln!(self.writer, "  Questions answered: {answered}")?;

        let background = if summary.background_completed {
            self.formatter.good("complete")
        } else {
            self.formatter.warn("incomplete")
        };
        writeln!(self.writer, "  Background section: {background}")?;
        writeln!(self.writer, "  Controls described: {}", summary.controls_count)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_ratings(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        let prefix = emoji_or_fallback("\u{1f3af} ", "", self.config);
        writeln!(
            self.writer,
            "{}{}",
            prefix,
            self.formatter.field("Ratings:")
        )?;

        let overall = self.formatter.rating(summary.average_rating);
        match summary.average_rating {
            Some(rating) => writeln!(
                self.writer,
                "  Overall: {} {}",
                overall,
                self.formatter.dim(&format!("({})", rating.guidance()))
            )?,
            None => writeln!(self.writer, "  Overall: {overall}")?,
        }
        writeln!(
            self.writer,
            "  Highest: {}",
            self.formatter.rating(summary.highest_rating)
        )?;
        if summary.residual_rating.is_some() {
            writeln!(
                self.writer,
                "  Residual: {}",
                self.formatter.rating(summary.residual_rating)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_distribution(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        if summary.answers.is_empty() {
            return Ok(());
        }

        let prefix = emoji_or_fallback("\u{1f4c8} ", "", self.config);
        writeln!(
            self.writer,
            "{}{}",
            prefix,
            self.formatter.field("Distribution:")
        )?;
        for rating in RiskRating::ALL.iter().rev() {
            let dot = emoji_or_fallback(rating_emoji(Some(*rating)), "-", self.config);
            writeln!(
                self.writer,
                "  {} {}: {}",
                dot,
                self.formatter.rating(Some(*rating)),
                summary.distribution.count(*rating)
            )?;
        }
        if summary.distribution.unrated_count > 0 {
            let dot = emoji_or_fallback(rating_emoji(None), "-", self.config);
            writeln!(
                self.writer,
                "  {} {}: {}",
                dot,
                self.formatter.rating(None),
                summary.distribution.unrated_count
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_top_answers(&mut self, summary: &AssessmentSummary) -> anyhow::Result<()> {
        if self.top_answers == 0 {
            return Ok(());
        }
        let mut rated: Vec<&AnswerAssessment> = summary
            .answers
            .iter()
            .filter(|a| a.rating.is_some())
            .collect();
        if rated.is_empty() {
            return Ok(());
        }
        rated.sort_by(|a, b| b.rating.cmp(&a.rating));

        let prefix = emoji_or_fallback("\u{26a0}\u{fe0f} ", "", self.config);
        writeln!(
            self.writer,
            "{}{}",
            prefix,
            self.formatter
                .field(&format!("Highest rated answers (top {}):", self.top_answers))
        )?;
        for (i, answer) in rated.iter().take(self.top_answers).enumerate() {
            writeln!(
                self.writer,
                "  {}. [{}] Q{}: {}",
                i + 1,
                self.formatter.rating(answer.rating),
                answer.position,
                answer.question
            )?;
        }
        Ok(())
    }
}

fn rating_text(rating: Option<RiskRating>) -> String {
    rating.map_or_else(|| "Not Rated".to_string(), |r| r.label().to_string())
}

fn level_text(level: Option<Level>) -> String {
    level.map_or_else(|| "-".to_string(), |l| l.label().to_string())
}

fn rating_status(rating: Option<RiskRating>) -> &'static str {
    match rating {
        Some(rating) => rating.guidance(),
        None => "No rating available",
    }
}

fn completion_status(complete: bool) -> &'static str {
    if complete {
        "\u{2705} Complete"
    } else {
        "\u{274c} Incomplete"
    }
}

pub fn create_writer(
    format: OutputFormat,
    config: FormattingConfig,
    top_answers: usize,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(
            std::io::stdout(),
            config,
            top_answers,
        )),
    }
}

/// Render a summary to a string, for writing to a file. Terminal output
/// is rendered without styling since it is not going to a terminal.
pub fn render_to_string(
    summary: &AssessmentSummary,
    format: OutputFormat,
    top_answers: usize,
) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Json => JsonWriter::new(&mut buffer).write_summary(summary)?,
        OutputFormat::Markdown => MarkdownWriter::new(&mut buffer).write_summary(summary)?,
        OutputFormat::Terminal => TerminalWriter::new(
            &mut buffer,
            FormattingConfig::plain(),
            top_answers,
        )
        .write_summary(summary)?,
    }
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AnswerRecord, AssessmentExport, SelectedOption};
    use crate::summary::summarize;
    use im::Vector;

    fn sample_summary() -> AssessmentSummary {
        let answers = vec![
            AnswerRecord {
                position: 1,
                question: "Access control".to_string(),
                selected_option: SelectedOption {
                    text: Some("Partially implemented".to_string()),
                    probability: Some("MEDIUM".to_string()),
                    impact: Some("HIGH".to_string()),
                    ..SelectedOption::default()
                },
            },
            AnswerRecord {
                position: 2,
                question: "Company size".to_string(),
                selected_option: SelectedOption {
                    text: Some("11-50".to_string()),
                    ..SelectedOption::default()
                },
            },
        ];
        summarize(&AssessmentExport {
            respondent: Some("Acme Ltd".to_string()),
            submitted_at: None,
            total_questions: 2,
            background_fields: 0,
            background_answered: 0,
            answers: Vector::from(answers),
        })
    }

    #[test]
    fn json_writer_emits_portal_fields() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_summary(&sample_summary())
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["averageRating"], "Severe");
        assert_eq!(value["totalQuestions"], 2);
        assert_eq!(value["distribution"]["unratedCount"], 1);
        assert_eq!(value["matrixCells"].as_array().unwrap().len(), 25);
    }

    #[test]
    fn markdown_writer_emits_all_sections() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_summary(&sample_summary())
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("# Risk Assessment Report"));
        assert!(output.contains("Respondent: Acme Ltd"));
        assert!(output.contains("## Overview"));
        assert!(output.contains("| Overall rating | Severe |"));
        assert!(output.contains("## Rating Distribution"));
        assert!(output.contains("| Not Rated | 1 |"));
        assert!(output.contains("## Risk Matrix"));
        assert!(output.contains("Severe (1)"));
        assert!(output.contains("## Answers"));
        assert!(output.contains("| 2 | Company size | 11-50 | - | - | Not Rated | - |"));
    }

    #[test]
    fn terminal_writer_plain_has_no_escape_codes() {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer, FormattingConfig::plain(), 5)
            .write_summary(&sample_summary())
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Risk Assessment Report"));
        assert!(output.contains("Questions answered: 2 / 2"));
        assert!(output.contains("Overall: Severe"));
        assert!(output.contains("Highest rated answers"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn render_to_string_round_trips_json() {
        let summary = sample_summary();
        let rendered = render_to_string(&summary, OutputFormat::Json, 5).unwrap();
        let parsed: AssessmentSummary = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, summary);
    }

    #[test]
    fn zero_top_answers_hides_the_section() {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer, FormattingConfig::plain(), 0)
            .write_summary(&sample_summary())
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(!output.contains("Highest rated answers"));
    }

    #[test]
    fn empty_summary_renders_without_detail_sections() {
        let summary = summarize(&AssessmentExport {
            respondent: None,
            submitted_at: None,
            total_questions: 0,
            background_fields: 0,
            background_answered: 0,
            answers: Vector::new(),
        });

        let rendered = render_to_string(&summary, OutputFormat::Markdown, 5).unwrap();
        assert!(rendered.contains("| Overall rating | Not Rated |"));
        assert!(!rendered.contains("## Rating Distribution"));
        assert!(!rendered.contains("## Answers"));
    }

    #[test]
    fn format_parses_from_config_strings() {
        assert_eq!(
            serde_json::from_str::<OutputFormat>("\"json\"").unwrap(),
            OutputFormat::Json
        );
        assert_eq!(
            serde_json::from_str::<OutputFormat>("\"terminal\"").unwrap(),
            OutputFormat::Terminal
        );
    }
}
