//! Data model for assessment exports, the JSON files produced by the
//! questionnaire portal. Field names stay camelCase on the wire.

pub mod errors;

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::rating::{rate_answer, RiskRating};

/// One respondent's exported assessment: completion counts plus every
/// submitted answer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Questions in the questionnaire, answered or not.
    pub total_questions: usize,
    /// Fields in the background section; zero when the questionnaire
    /// has no background section.
    #[serde(default)]
    pub background_fields: usize,
    #[serde(default)]
    pub background_answered: usize,
    #[serde(default)]
    pub answers: Vector<AnswerRecord>,
}

impl AssessmentExport {
    /// Internal consistency checks on the exported counts. Returns a
    /// description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.answers.len() > self.total_questions {
            return Err(format!(
                "{} answers recorded for {} questions",
                self.answers.len(),
                self.total_questions
            ));
        }
        if self.background_answered > self.background_fields {
            return Err(format!(
                "{} background answers recorded for {} background fields",
                self.background_answered, self.background_fields
            ));
        }
        Ok(())
    }
}

/// A single answered question and the option the respondent chose.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    /// One-based position of the question in the questionnaire.
    pub position: usize,
    pub question: String,
    #[serde(default)]
    pub selected_option: SelectedOption,
}

impl AnswerRecord {
    /// Rating implied by the selected option's levels, if both parse.
    pub fn rating(&self) -> Option<RiskRating> {
        rate_answer(
            self.selected_option.probability.as_deref(),
            self.selected_option.impact.as_deref(),
        )
    }

    /// Rating after controls, from the residual levels, if both parse.
    pub fn residual_rating(&self) -> Option<RiskRating> {
        rate_answer(
            self.selected_option.residual_probability.as_deref(),
            self.selected_option.residual_impact.as_deref(),
        )
    }
}

/// The chosen answer option as stored: free-form text plus the level
/// labels the portal attached to it. Every field is optional because
/// background questions carry no risk metadata at all.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_probability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_impact: Option<String>,
}

impl SelectedOption {
    /// The described mitigating control, trimmed; `None` when absent or
    /// blank. Blank text counts as no control.
    pub fn control_text(&self) -> Option<&str> {
        self.control_description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option_with_levels(probability: &str, impact: &str) -> SelectedOption {
        SelectedOption {
            probability: Some(probability.to_string()),
            impact: Some(impact.to_string()),
            ..SelectedOption::default()
        }
    }

    #[test]
    fn answer_rating_uses_stored_levels() {
        let answer = AnswerRecord {
            position: 1,
            question: "Data retention".to_string(),
            selected_option: option_with_levels("HIGH", "VERY_HIGH"),
        };
        assert_eq!(answer.rating(), Some(RiskRating::Critical));
        assert_eq!(answer.residual_rating(), None);
    }

    #[test]
    fn background_answer_is_unrated() {
        let answer = AnswerRecord {
            position: 1,
            question: "Organisation name".to_string(),
            selected_option: SelectedOption {
                text: Some("Acme".to_string()),
                ..SelectedOption::default()
            },
        };
        assert_eq!(answer.rating(), None);
    }

    #[test]
    fn control_text_ignores_blank_descriptions() {
        let mut option = SelectedOption::default();
        assert_eq!(option.control_text(), None);

        option.control_description = Some("   ".to_string());
        assert_eq!(option.control_text(), None);

        option.control_description = Some("  Quarterly access review  ".to_string());
        assert_eq!(option.control_text(), Some("Quarterly access review"));
    }

    #[test]
    fn validate_rejects_more_answers_than_questions() {
        let export = AssessmentExport {
            respondent: None,
            submitted_at: None,
            total_questions: 1,
            background_fields: 0,
            background_answered: 0,
            answers: Vector::from(vec![
                AnswerRecord {
                    position: 1,
                    question: "a".to_string(),
                    selected_option: SelectedOption::default(),
                },
                AnswerRecord {
                    position: 2,
                    question: "b".to_string(),
                    selected_option: SelectedOption::default(),
                },
            ]),
        };
        assert!(export.validate().is_err());
    }

    #[test]
    fn validate_rejects_excess_background_answers() {
        let export = AssessmentExport {
            respondent: None,
            submitted_at: None,
            total_questions: 0,
            background_fields: 2,
            background_answered: 3,
            answers: Vector::new(),
        };
        assert!(export.validate().is_err());
    }

    #[test]
    fn export_parses_camel_case_fields() {
        let json = r#"{
            "respondent": "Acme Ltd",
            "totalQuestions": 2,
            "backgroundFields": 1,
            "backgroundAnswered": 1,
            "answers": [
                {
                    "position": 1,
                    "question": "Access control",
                    "selectedOption": {
                        "text": "Partially implemented",
                        "probability": "MEDIUM",
                        "impact": "HIGH"
                    }
                }
            ]
        }"#;
        let export: AssessmentExport = serde_json::from_str(json).unwrap();
        assert_eq!(export.respondent.as_deref(), Some("Acme Ltd"));
        assert_eq!(export.total_questions, 2);
        assert_eq!(export.answers.len(), 1);
        assert_eq!(export.answers[0].rating(), Some(RiskRating::Severe));
    }
}
