use anyhow::Result;
use riskmap::cli::{self, Commands};
use riskmap::commands::{check_export, init_config, report_export, CheckOptions, ReportOptions};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::parse_args();
    match cli.command {
        Commands::Report {
            export,
            format,
            output,
            top,
            plain,
        } => report_export(ReportOptions {
            export,
            format,
            output,
            top,
            plain,
        }),
        Commands::Check {
            export,
            fail_on,
            require_complete,
            allow_incomplete,
            plain,
        } => check_export(CheckOptions {
            export,
            fail_on,
            require_complete,
            allow_incomplete,
            plain,
        }),
        Commands::Init { force } => init_config(force),
    }
}
