// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod rating;
pub mod summary;

// Re-export commonly used types
pub use crate::core::{AnswerRecord, AssessmentExport, SelectedOption};

pub use crate::rating::{
    aggregate, highest, rate, rate_answer, Level, MatrixBreakdown, MatrixCell, RatingDistribution,
    RiskRating,
};

pub use crate::summary::{summarize, AnswerAssessment, AssessmentSummary};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
