use serde::Serialize;

use crate::cli::options::OutputFormat;
use crate::provider::SkippedStep;
use crate::reconcile::{Action, ReconcileReport, ResourceOutcome};
use crate::types::QueryResult;

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_installed(name: &str, installed: bool, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{installed}"),
        OutputFormat::Json => print_json(&serde_json::json!({
            "name": name,
            "installed": installed,
        }))?,
    }
    Ok(())
}

pub fn print_query(
    name: &str,
    result: Option<&QueryResult>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match (format, result) {
        (OutputFormat::Text, Some(result)) => println!("{result}"),
        (OutputFormat::Text, None) => println!("{name}: not found"),
        (OutputFormat::Json, result) => print_json(&result)?,
    }
    Ok(())
}

pub fn print_latest(
    name: &str,
    latest: Result<Option<&str>, &SkippedStep>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => match latest {
            Ok(Some(version)) => println!("{version}"),
            Ok(None) => println!("{name}: not found"),
            Err(step) => println!("{name}: not found ({})", step.diagnostic.trim()),
        },
        OutputFormat::Json => print_json(&serde_json::json!({
            "name": name,
            "latest": latest.ok().flatten(),
            "skipped": latest.err(),
        }))?,
    }
    Ok(())
}

pub fn print_list(list: &[QueryResult], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for entry in list {
                println!("{} {}", entry.name, entry.version);
            }
        }
        OutputFormat::Json => print_json(list)?,
    }
    Ok(())
}

pub fn print_skipped(step: &SkippedStep, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => eprintln!("warning: {step}"),
        OutputFormat::Json => print_json(step)?,
    }
    Ok(())
}

fn action_label(action: &Action) -> String {
    match action {
        Action::None => "ok".to_string(),
        Action::Install { identifier } => format!("install {identifier}"),
        Action::Uninstall => "uninstall".to_string(),
    }
}

fn print_report_text(report: &ReconcileReport) {
    let status = if report.changed { "changed" } else { "ok" };
    println!(
        "{}: {} [{} -> {}] {}",
        report.name,
        status,
        report.before,
        report.desired,
        action_label(&report.action)
    );
    println!("  {}", report.msg);
    for step in &report.skipped {
        println!("  skipped: {step}");
    }
}

pub fn print_report(report: &ReconcileReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_report_text(report),
        OutputFormat::Json => print_json(report)?,
    }
    Ok(())
}

#[derive(Serialize)]
struct OutcomeView<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a ReconcileReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Print a batch and summarise it; returns the number of failed resources
pub fn print_outcomes(outcomes: &[ResourceOutcome], format: OutputFormat) -> anyhow::Result<usize> {
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let changed = outcomes
        .iter()
        .filter(|o| matches!(&o.result, Ok(report) if report.changed))
        .count();

    match format {
        OutputFormat::Text => {
            for outcome in outcomes {
                match &outcome.result {
                    Ok(report) => print_report_text(report),
                    Err(err) => println!("{}: failed\n  {err}", outcome.name),
                }
            }
            println!();
            println!(
                "{} resources: {} changed, {} failed",
                outcomes.len(),
                changed,
                failed
            );
        }
        OutputFormat::Json => {
            let views: Vec<OutcomeView<'_>> = outcomes
                .iter()
                .map(|outcome| OutcomeView {
                    name: &outcome.name,
                    report: outcome.result.as_ref().ok(),
                    error: outcome.result.as_ref().err().map(ToString::to_string),
                })
                .collect();
            print_json(&views)?;
        }
    }

    Ok(failed)
}
