use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riskmap")]
#[command(about = "Risk rating and reporting for assessment exports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize an assessment export
    Report {
        /// Path to the export file
        export: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show only the top N highest rated answers
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Plain output without colors or emoji
        #[arg(long)]
        plain: bool,
    },

    /// Check an export against rating and completion gates
    Check {
        /// Path to the export file
        export: PathBuf,

        /// Fail when the overall rating reaches this level (default: severe)
        #[arg(long = "fail-on", value_enum)]
        fail_on: Option<Rating>,

        /// Fail when questions or the background section are unanswered
        #[arg(long = "require-complete")]
        require_complete: bool,

        /// Pass even when the assessment is incomplete
        #[arg(long = "allow-incomplete", conflicts_with = "require_complete")]
        allow_incomplete: bool,

        /// Plain output without colors or emoji
        #[arg(long)]
        plain: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Rating {
    Sustainable,
    Moderate,
    Severe,
    Critical,
}

impl From<Rating> for crate::rating::RiskRating {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Sustainable => crate::rating::RiskRating::Sustainable,
            Rating::Moderate => crate::rating::RiskRating::Moderate,
            Rating::Severe => crate::rating::RiskRating::Severe,
            Rating::Critical => crate::rating::RiskRating::Critical,
        }
    }
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_with_format_and_output() {
        let cli = Cli::try_parse_from([
            "riskmap", "report", "export.json", "--format", "json", "--output", "out.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Report {
                export,
                format,
                output,
                top,
                plain,
            } => {
                assert_eq!(export, PathBuf::from("export.json"));
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(top, None);
                assert!(!plain);
            }
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn parses_check_with_fail_on() {
        let cli =
            Cli::try_parse_from(["riskmap", "check", "export.json", "--fail-on", "severe"])
                .unwrap();

        match cli.command {
            Commands::Check { fail_on, .. } => {
                assert_eq!(fail_on, Some(Rating::Severe));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn rejects_unknown_fail_on_value() {
        let result =
            Cli::try_parse_from(["riskmap", "check", "export.json", "--fail-on", "fatal"]);
        assert!(result.is_err());
    }

    #[test]
    fn completion_flags_conflict() {
        let result = Cli::try_parse_from([
            "riskmap",
            "check",
            "export.json",
            "--require-complete",
            "--allow-incomplete",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_init_force() {
        let cli = Cli::try_parse_from(["riskmap", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn cli_rating_maps_to_domain_rating() {
        use crate::rating::RiskRating;
        assert_eq!(RiskRating::from(Rating::Sustainable), RiskRating::Sustainable);
        assert_eq!(RiskRating::from(Rating::Critical), RiskRating::Critical);
    }
}
