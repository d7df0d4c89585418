mod io;
mod logging;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use retirement_core::model::PlanInput;
use retirement_docs::anomaly::{self, AnomalyThresholds};
use retirement_docs::checklist::{self, ChecklistResult};
use retirement_docs::extraction;
use retirement_docs::model::{ExtractedDocument, IncomeComponents, Payments, TaxYearRecord};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "retirement")]
#[command(about = "Runs the retirement planning simulation engine from the command line")]
struct Cli {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the year-by-year simulation for a PlanInput file (JSON or TOML).
    Simulate {
        /// Path to a JSON or TOML file conforming to PlanInput.
        plan: PathBuf,
        /// Write the resulting PlanResult JSON here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute one year's tax liability for a TaxYearRecord file (JSON or TOML).
    Tax {
        /// Path to a JSON or TOML file conforming to TaxYearRecord.
        record: PathBuf,
    },
    /// Extract a directory of tax-document text files, then run anomaly
    /// detection and checklist generation against the current tax year.
    Docs {
        /// Directory of this year's extracted document text (one file per document).
        documents: PathBuf,
        /// Calendar tax year the documents belong to.
        tax_year: i32,
        /// TaxYearRecord file (JSON or TOML) for this tax year.
        current_record: PathBuf,
        /// TaxYearRecord file (JSON or TOML) for the prior tax year.
        #[arg(long)]
        prior_record: Option<PathBuf>,
        /// Directory of the prior year's extracted document text.
        #[arg(long)]
        prior_documents: Option<PathBuf>,
        /// TaxYearRecord file (JSON or TOML) from two years ago, for pattern-break detection.
        #[arg(long)]
        two_years_ago_record: Option<PathBuf>,
        /// PlanInput file (JSON or TOML), to source accounts/income streams for the checklist.
        #[arg(long)]
        plan: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    match cli.command {
        Command::Simulate { plan, output } => run_simulate(&plan, output.as_deref()),
        Command::Tax { record } => run_tax(&record),
        Command::Docs {
            documents,
            tax_year,
            current_record,
            prior_record,
            prior_documents,
            two_years_ago_record,
            plan,
        } => run_docs(
            &documents,
            tax_year,
            &current_record,
            prior_record.as_deref(),
            prior_documents.as_deref(),
            two_years_ago_record.as_deref(),
            plan.as_deref(),
        ),
    }
}

fn run_simulate(plan_path: &Path, output_path: Option<&Path>) -> Result<()> {
    let plan: PlanInput = io::load(plan_path)?;

    let result = retirement_core::simulate(&plan)?;
    let rendered = serde_json::to_string_pretty(&result)?;

    match output_path {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("writing result to {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote simulation result");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn run_tax(record_path: &Path) -> Result<()> {
    let record: TaxYearRecord = io::load(record_path)?;

    let result = retirement_docs::tax_computation::compute_tax_year(&record);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocsReport {
    documents: Vec<ExtractedDocument>,
    aggregated_income: IncomeComponents,
    aggregated_payments: Payments,
    anomalies: Vec<anomaly::Anomaly>,
    checklist: Option<ChecklistResult>,
}

#[allow(clippy::too_many_arguments)]
fn run_docs(
    documents_dir: &Path,
    tax_year: i32,
    current_record_path: &Path,
    prior_record_path: Option<&Path>,
    prior_documents_dir: Option<&Path>,
    two_years_ago_record_path: Option<&Path>,
    plan_path: Option<&Path>,
) -> Result<()> {
    let current_record: TaxYearRecord = io::load(current_record_path)?;
    let documents = read_documents(documents_dir, tax_year)?;
    let (aggregated_income, aggregated_payments) = extraction::aggregate(&documents);

    let prior_record: Option<TaxYearRecord> = prior_record_path.map(io::load).transpose()?;
    let prior_documents = match prior_documents_dir {
        Some(dir) => read_documents(dir, tax_year - 1)?,
        None => Vec::new(),
    };
    let two_years_ago_record: Option<TaxYearRecord> =
        two_years_ago_record_path.map(io::load).transpose()?;

    let thresholds = AnomalyThresholds::default();
    let anomalies = anomaly::detect_anomalies(
        &current_record,
        &documents,
        prior_record
            .as_ref()
            .map(|r| (r, prior_documents.as_slice())),
        two_years_ago_record.as_ref(),
        &thresholds,
    );

    let checklist = match (&prior_record, plan_path) {
        (Some(prior), Some(plan_path)) => {
            let plan: PlanInput = io::load(plan_path)?;
            Some(checklist::generate_checklist(
                tax_year,
                prior,
                &current_record,
                &prior_documents,
                &documents,
                &plan.accounts,
                &plan.income_streams,
            ))
        }
        _ => {
            tracing::warn!("skipping checklist generation: requires both --prior-record and --plan");
            None
        }
    };

    let report = DocsReport {
        documents,
        aggregated_income,
        aggregated_payments,
        anomalies,
        checklist,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn read_documents(dir: &Path, tax_year: i32) -> Result<Vec<ExtractedDocument>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading document directory {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("listing document directory {}", dir.display()))?;
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let text =
            fs::read_to_string(&path).with_context(|| format!("reading document {}", path.display()))?;
        match extraction::extract_document(&text, tax_year) {
            Some(doc) => documents.push(doc),
            None => tracing::warn!(path = %path.display(), "no form template matched this document"),
        }
    }
    Ok(documents)
}
