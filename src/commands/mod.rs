//! CLI command implementations for riskmap operations.
//!
//! Each submodule handles one command:
//! - **report**: Summarize an assessment export in the requested format
//! - **check**: Gate an export on rating and completion thresholds
//! - **init**: Initialize a new riskmap configuration file

pub mod check;
pub mod init;
pub mod report;

pub use check::{check_export, CheckOptions};
pub use init::init_config;
pub use report::{report_export, ReportOptions};

use crate::formatting::{ColorMode, EmojiMode, FormattingConfig};

pub(crate) fn formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::new(ColorMode::Never, EmojiMode::Never)
    } else {
        FormattingConfig::from_env()
    }
}
