use std::path::PathBuf;

use anyhow::Context;

use crate::cli;
use crate::config::{self, RiskmapConfig};
use crate::io;
use crate::io::output::{create_writer, render_to_string, OutputFormat};
use crate::summary::summarize;

pub struct ReportOptions {
    pub export: PathBuf,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub plain: bool,
}

pub fn report_export(options: ReportOptions) -> anyhow::Result<()> {
    let config = config::get_config();
    let formatting = super::formatting_config(options.plain);

    let export = io::load_export(&options.export)
        .with_context(|| format!("failed to load {}", options.export.display()))?;
    log::debug!(
        "Loaded export with {} answers from {}",
        export.answers.len(),
        options.export.display()
    );
    let summary = summarize(&export);

    let format = resolve_format(options.format, config);
    let top_answers = options.top.unwrap_or(config.report.top_answers);

    match options.output {
        Some(path) => {
            let rendered = render_to_string(&summary, format, top_answers)?;
            io::write_file(&path, &rendered)?;
            log::info!("Report written to {}", path.display());
        }
        None => {
            create_writer(format, formatting, top_answers).write_summary(&summary)?;
        }
    }
    Ok(())
}

fn resolve_format(format: Option<cli::OutputFormat>, config: &RiskmapConfig) -> OutputFormat {
    match format {
        Some(format) => format.into(),
        None => config.output.default_format.unwrap_or_default(),
    }
}
