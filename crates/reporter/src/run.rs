use std::io::Write;

use analysis::{
    average_close_time_by_label, filter_issues, label_activity, monthly_histogram, summary,
    top_closers,
};
use anyhow::{Context, Result};
use common::{AppConfig, AppError};
use normalizer::{IssueSource, IssueTable};
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, Command};
use crate::render;

/// Loads configuration and the issue export, then writes the requested
/// report to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let config =
        AppConfig::load_from_path(&cli.config_dir, &cli.overrides()).map_err(AppError::from)?;
    let source = IssueSource::from_config(&config);
    let table = source.load().map_err(AppError::ingest)?;
    info!(
        path = %source.path().display(),
        issues = table.len(),
        command = ?cli.command,
        "issue table ready"
    );

    if table.is_empty() && !matches!(cli.command, Command::Export { .. }) {
        return nothing_to_report(cli, out, "No issues found to analyze.");
    }

    report(cli, &config, &table, out)
}

fn report<W: Write>(
    cli: &Cli,
    config: &AppConfig,
    table: &IssueTable,
    out: &mut W,
) -> Result<()> {
    match &cli.command {
        Command::Summary => {
            let result = summary(table, config.user.as_deref(), &config.report);
            if cli.json {
                return emit_json(out, &result);
            }
            render::summary(out, &result)?;
        }
        Command::Closers { top } => {
            let result = top_closers(table, *top);
            if cli.json {
                return emit_json(out, &result);
            }
            render::counts(out, "Top closing users", &result)?;
        }
        Command::Months => {
            let result = monthly_histogram(table);
            if cli.json {
                return emit_json(out, &result);
            }
            render::months(out, &result)?;
        }
        Command::CloseTime => {
            let result = average_close_time_by_label(table);
            if cli.json {
                return emit_json(out, &result);
            }
            render::close_times(out, &result)?;
        }
        Command::Labels => {
            let rows = filter_issues(table, config.label.as_deref(), config.creator.as_deref());
            if rows.is_empty() {
                return nothing_to_report(
                    cli,
                    out,
                    "No issues found for the specified label and/or creator.",
                );
            }
            let result = label_activity(&rows);
            if cli.json {
                return emit_json(out, &result);
            }
            render::activity(out, &result)?;
        }
        Command::Export { explode } => {
            let fingerprint = table.fingerprint()?;
            info!(%fingerprint, "exporting normalized table");
            if *explode {
                emit_json(out, &table.explode_labels())?;
            } else {
                emit_json(out, table)?;
            }
        }
    }
    Ok(())
}

/// JSON consumers get `null`; everyone else gets the message.
fn nothing_to_report<W: Write>(cli: &Cli, out: &mut W, message: &str) -> Result<()> {
    if cli.json {
        writeln!(out, "null")?;
    } else {
        writeln!(out, "{message}")?;
    }
    Ok(())
}

fn emit_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}
