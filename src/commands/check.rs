use std::path::PathBuf;

use anyhow::Context;

use crate::cli;
use crate::config::{self, RiskmapConfig, CONFIG_FILE_NAME};
use crate::core::errors::Error;
use crate::formatting::{ColoredFormatter, OutputFormatter};
use crate::io;
use crate::rating::RiskRating;
use crate::summary::{summarize, AssessmentSummary};

pub struct CheckOptions {
    pub export: PathBuf,
    pub fail_on: Option<cli::Rating>,
    pub require_complete: bool,
    pub allow_incomplete: bool,
    pub plain: bool,
}

/// Gate applied when neither the flag nor the config names one.
const DEFAULT_FAIL_ON: RiskRating = RiskRating::Severe;

struct GateCheck {
    label: String,
    passed: bool,
}

pub fn check_export(options: CheckOptions) -> anyhow::Result<()> {
    let config = config::get_config();
    let formatting = super::formatting_config(options.plain);
    let formatter = ColoredFormatter::new(formatting);

    let export = io::load_export(&options.export)
        .with_context(|| format!("failed to load {}", options.export.display()))?;
    let summary = summarize(&export);

    let fail_on = resolve_fail_on(options.fail_on, config)?;
    let require_complete = resolve_require_complete(&options, config);

    println!(
        "Overall rating: {}",
        formatter.rating(summary.average_rating)
    );

    let checks = evaluate_gates(&summary, fail_on, require_complete);
    for check in &checks {
        let mark = if check.passed {
            formatter.good("\u{2713}")
        } else {
            formatter.bad("\u{2717}")
        };
        println!("{} {}", mark, check.label);
    }

    let failed = checks.iter().filter(|c| !c.passed).count();
    if failed == 0 {
        println!(
            "{} Check: {}",
            formatter.good("\u{2713}"),
            formatter.good("PASS")
        );
        Ok(())
    } else {
        println!(
            "{} Check: {}",
            formatter.bad("\u{2717}"),
            formatter.bad("FAIL")
        );
        anyhow::bail!("check failed: {} of {} gates", failed, checks.len())
    }
}

fn evaluate_gates(
    summary: &AssessmentSummary,
    fail_on: RiskRating,
    require_complete: bool,
) -> Vec<GateCheck> {
    let mut checks = Vec::new();

    // An assessment with no rated answers has no rating to gate;
    // completeness gates are what catch missing answers.
    let rating_check = match summary.average_rating {
        Some(rating) if rating >= fail_on => GateCheck {
            label: format!("overall rating {rating} is at or above {fail_on}"),
            passed: false,
        },
        Some(rating) => GateCheck {
            label: format!("overall rating {rating} is below {fail_on}"),
            passed: true,
        },
        None => GateCheck {
            label: "no rated answers to gate".to_string(),
            passed: true,
        },
    };
    checks.push(rating_check);

    if require_complete {
        checks.push(GateCheck {
            label: format!(
                "{} of {} questions answered",
                summary.answered_questions, summary.total_questions
            ),
            passed: summary.all_questions_answered,
        });
        checks.push(GateCheck {
            label: if summary.background_completed {
                "background section complete".to_string()
            } else {
                "background section incomplete".to_string()
            },
            passed: summary.background_completed,
        });
    }

    checks
}

fn resolve_fail_on(
    flag: Option<cli::Rating>,
    config: &RiskmapConfig,
) -> Result<RiskRating, Error> {
    if let Some(rating) = flag {
        return Ok(rating.into());
    }
    match &config.check.fail_on {
        Some(text) => RiskRating::parse(text).ok_or_else(|| {
            Error::Configuration(format!(
                "unknown fail_on rating '{text}' in {CONFIG_FILE_NAME}"
            ))
        }),
        None => Ok(DEFAULT_FAIL_ON),
    }
}

fn resolve_require_complete(options: &CheckOptions, config: &RiskmapConfig) -> bool {
    if options.require_complete {
        true
    } else if options.allow_incomplete {
        false
    } else {
        config.check.require_complete
    }
}
