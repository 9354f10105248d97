//! Builds the respondent-level summary shared by the report and check
//! commands: completion stats, the averaged and worst-case ratings, and
//! the per-answer assessments behind them.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{AnswerRecord, AssessmentExport};
use crate::rating::{
    aggregate, highest, Level, MatrixBreakdown, MatrixCell, RatingDistribution, RiskRating,
};

/// Everything the renderers need about one assessment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent: Option<String>,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub background_completed: bool,
    pub all_questions_answered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_submission_date: Option<DateTime<Utc>>,
    /// Overall rating from averaging ordinal scores; absent when no
    /// answer produced a rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<RiskRating>,
    /// Worst single-answer rating; absent when no answer produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_rating: Option<RiskRating>,
    /// Average of the residual ratings, where residual levels exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_rating: Option<RiskRating>,
    /// Answers that describe a mitigating control.
    pub controls_count: usize,
    pub distribution: RatingDistribution,
    pub matrix_cells: Vector<MatrixCell>,
    pub answers: Vector<AnswerAssessment>,
}

impl AssessmentSummary {
    /// Background section filled in and every question answered.
    pub fn is_complete(&self) -> bool {
        self.background_completed && self.all_questions_answered
    }

    /// How many distinct ratings appear across the answers.
    pub fn distinct_ratings(&self) -> usize {
        self.distribution.distinct_ratings()
    }
}

/// One answer with its parsed levels and derived ratings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerAssessment {
    pub position: usize,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RiskRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_probability: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_impact: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_rating: Option<RiskRating>,
}

fn assess_answer(record: &AnswerRecord) -> AnswerAssessment {
    let option = &record.selected_option;
    AnswerAssessment {
        position: record.position,
        question: record.question.clone(),
        answer: option.text.clone(),
        probability: option.probability.as_deref().and_then(Level::parse),
        impact: option.impact.as_deref().and_then(Level::parse),
        rating: record.rating(),
        control_description: option.control_text().map(String::from),
        residual_probability: option
            .residual_probability
            .as_deref()
            .and_then(Level::parse),
        residual_impact: option.residual_impact.as_deref().and_then(Level::parse),
        residual_rating: record.residual_rating(),
    }
}

/// Summarize an export. Pure: malformed level labels become unrated
/// answers rather than errors, so this never fails.
pub fn summarize(export: &AssessmentExport) -> AssessmentSummary {
    let answers: Vector<AnswerAssessment> = export.answers.iter().map(assess_answer).collect();

    let mut distribution = RatingDistribution::default();
    let mut breakdown = MatrixBreakdown::default();
    let mut ratings = Vec::new();
    let mut residual_ratings = Vec::new();
    let mut controls_count = 0;

    for answer in &answers {
        distribution.record(answer.rating);
        if let Some(rating) = answer.rating {
            ratings.push(rating);
        }
        if let (Some(probability), Some(impact)) = (answer.probability, answer.impact) {
            breakdown.record(probability, impact);
        }
        if let Some(residual) = answer.residual_rating {
            residual_ratings.push(residual);
        }
        if answer.control_description.is_some() {
            controls_count += 1;
        }
    }

    AssessmentSummary {
        respondent: export.respondent.clone(),
        total_questions: export.total_questions,
        answered_questions: export.answers.len(),
        background_completed: export.background_answered >= export.background_fields,
        all_questions_answered: export.answers.len() >= export.total_questions,
        last_submission_date: export.submitted_at,
        average_rating: aggregate(&ratings),
        highest_rating: highest(&ratings),
        residual_rating: aggregate(&residual_ratings),
        controls_count,
        distribution,
        matrix_cells: breakdown.cells().collect(),
        answers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SelectedOption;

    fn rated_answer(position: usize, probability: &str, impact: &str) -> AnswerRecord {
        AnswerRecord {
            position,
            question: format!("Question {position}"),
            selected_option: SelectedOption {
                text: Some("Yes".to_string()),
                probability: Some(probability.to_string()),
                impact: Some(impact.to_string()),
                ..SelectedOption::default()
            },
        }
    }

    fn export_with_answers(answers: Vec<AnswerRecord>) -> AssessmentExport {
        AssessmentExport {
            respondent: Some("Acme Ltd".to_string()),
            submitted_at: None,
            total_questions: answers.len(),
            background_fields: 0,
            background_answered: 0,
            answers: Vector::from(answers),
        }
    }

    #[test]
    fn empty_export_has_no_ratings() {
        let export = AssessmentExport {
            respondent: None,
            submitted_at: None,
            total_questions: 0,
            background_fields: 0,
            background_answered: 0,
            answers: Vector::new(),
        };
        let summary = summarize(&export);

        assert_eq!(summary.average_rating, None);
        assert_eq!(summary.highest_rating, None);
        assert_eq!(summary.residual_rating, None);
        assert_eq!(summary.answered_questions, 0);
        assert!(summary.all_questions_answered);
        assert_eq!(summary.distribution.total(), 0);
    }

    #[test]
    fn averages_across_rated_answers() {
        // Severe (2) + Moderate (1) + Sustainable (0) -> mean 1.0 -> Moderate.
        let export = export_with_answers(vec![
            rated_answer(1, "HIGH", "MEDIUM"),
            rated_answer(2, "MEDIUM", "LOW"),
            rated_answer(3, "VERY_LOW", "VERY_LOW"),
        ]);
        let summary = summarize(&export);

        assert_eq!(summary.average_rating, Some(RiskRating::Moderate));
        assert_eq!(summary.highest_rating, Some(RiskRating::Severe));
        assert_eq!(summary.distribution.rated_count(), 3);
        assert_eq!(summary.distinct_ratings(), 3);
    }

    #[test]
    fn unrated_answers_are_counted_but_not_averaged() {
        let mut answers = vec![rated_answer(1, "VERY_HIGH", "VERY_HIGH")];
        answers.push(AnswerRecord {
            position: 2,
            question: "Company size".to_string(),
            selected_option: SelectedOption {
                text: Some("11-50".to_string()),
                ..SelectedOption::default()
            },
        });
        let export = export_with_answers(answers);
        let summary = summarize(&export);

        // The single Critical answer dominates; the background answer
        // neither dilutes the average nor errors.
        assert_eq!(summary.average_rating, Some(RiskRating::Critical));
        assert_eq!(summary.distribution.unrated_count, 1);
        assert_eq!(summary.distribution.total(), 2);
    }

    #[test]
    fn matrix_cells_match_rated_answers() {
        let export = export_with_answers(vec![
            rated_answer(1, "HIGH", "MEDIUM"),
            rated_answer(2, "HIGH", "MEDIUM"),
        ]);
        let summary = summarize(&export);

        let total: usize = summary.matrix_cells.iter().map(|c| c.count).sum();
        assert_eq!(total, summary.distribution.rated_count());
        assert_eq!(summary.matrix_cells.len(), 25);

        let cell = summary
            .matrix_cells
            .iter()
            .find(|c| c.probability == Level::High && c.impact == Level::Medium)
            .unwrap();
        assert_eq!(cell.count, 2);
        assert_eq!(cell.rating, RiskRating::Severe);
    }

    #[test]
    fn residual_levels_produce_a_residual_rating() {
        let mut answer = rated_answer(1, "VERY_HIGH", "VERY_HIGH");
        answer.selected_option.control_description = Some("Encrypt at rest".to_string());
        answer.selected_option.residual_probability = Some("LOW".to_string());
        answer.selected_option.residual_impact = Some("MEDIUM".to_string());

        let summary = summarize(&export_with_answers(vec![answer]));

        assert_eq!(summary.average_rating, Some(RiskRating::Critical));
        assert_eq!(summary.residual_rating, Some(RiskRating::Moderate));
        assert_eq!(summary.controls_count, 1);

        let assessed = &summary.answers[0];
        assert_eq!(assessed.residual_probability, Some(Level::Low));
        assert_eq!(assessed.residual_rating, Some(RiskRating::Moderate));
    }

    #[test]
    fn blank_control_descriptions_are_not_counted() {
        let mut answer = rated_answer(1, "LOW", "LOW");
        answer.selected_option.control_description = Some("   ".to_string());

        let summary = summarize(&export_with_answers(vec![answer]));

        assert_eq!(summary.controls_count, 0);
        assert_eq!(summary.answers[0].control_description, None);
    }

    #[test]
    fn completion_flags_track_counts() {
        let mut export = export_with_answers(vec![rated_answer(1, "LOW", "LOW")]);
        export.total_questions = 3;
        export.background_fields = 2;
        export.background_answered = 1;

        let summary = summarize(&export);
        assert!(!summary.all_questions_answered);
        assert!(!summary.background_completed);
        assert!(!summary.is_complete());
        assert_eq!(summary.answered_questions, 1);
    }

    #[test]
    fn summary_serializes_portal_field_names() {
        let export = export_with_answers(vec![rated_answer(1, "MEDIUM", "MEDIUM")]);
        let summary = summarize(&export);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalQuestions"], 1);
        assert_eq!(json["answeredQuestions"], 1);
        assert_eq!(json["allQuestionsAnswered"], true);
        assert_eq!(json["backgroundCompleted"], true);
        assert_eq!(json["averageRating"], "Moderate");
        assert!(json.get("lastSubmissionDate").is_none());
    }
}
