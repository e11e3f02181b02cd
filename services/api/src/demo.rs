use crate::infra::{parse_answers, InMemoryCandidateRepository, WebhookNotifier};
use chrono::Utc;
use clap::Args;
use fitscore::assessment::{
    aggregate, compute_fit, AnswerSet, CandidateCsvImporter, CandidateRow, CandidateService,
    CandidateSubmission, Dimension, ScoreRecord, TierDistribution, ALL_TIERS,
};
use fitscore::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_WEBHOOK: &str = "https://hooks.example.com/fitscore-demo";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Ten comma separated ratings in form order (3 performance, 4 energy, 3 culture)
    #[arg(long, value_parser = parse_answers)]
    pub(crate) answers: AnswerSet,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// CSV export of candidate answers
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only list candidates in this fit class (e.g. "Highest Fit"); defaults to all
    #[arg(long)]
    pub(crate) class: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only list candidates in this fit class; defaults to all
    #[arg(long)]
    pub(crate) class: Option<String>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let record = compute_fit(&args.answers);
    render_score(&record);
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs { csv, class } = args;
    let filter = class.unwrap_or_else(|| ALL_TIERS.to_string());

    let records = CandidateCsvImporter::from_path(&csv, Utc::now())?;
    let rows: Vec<CandidateRow> = records.iter().map(|record| record.row()).collect();
    let aggregation = aggregate(&rows, &filter);

    println!("Candidate report for {}", csv.display());
    render_dashboard(&filter, &aggregation.distribution, &aggregation.filtered);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let filter = args.class.unwrap_or_else(|| ALL_TIERS.to_string());

    println!("FitScore demo");
    let repository = Arc::new(InMemoryCandidateRepository::default());
    let notifier = Arc::new(WebhookNotifier::new(Some(DEMO_WEBHOOK.to_string())));
    let service = CandidateService::new(repository, notifier.clone());

    for submission in demo_submissions() {
        let record = service.submit(submission)?;
        println!(
            "- Submitted {} as {} -> {:.2} ({})",
            record.name, record.id, record.score.score, record.score.class
        );
    }

    println!(
        "- {} submission notifications queued for {DEMO_WEBHOOK}",
        notifier.events().len()
    );

    let dashboard = service.dashboard(&filter)?;
    println!();
    render_dashboard(
        &dashboard.filter,
        &dashboard.distribution,
        &dashboard.candidates,
    );
    Ok(())
}

fn render_score(record: &ScoreRecord) {
    println!("FitScore: {:.2}", record.score);
    println!("Class: {}", record.class);
    let percentages = record.breakdown.display_percentages();
    for (dimension, pct) in Dimension::ordered().into_iter().zip(percentages) {
        println!(
            "  {:<12} {:>6.2}  {}",
            dimension.label(),
            record.breakdown.get(dimension),
            progress_bar(pct)
        );
    }
}

fn render_dashboard(filter: &str, distribution: &TierDistribution, rows: &[CandidateRow]) {
    println!("Distribution ({} candidates)", distribution.total);
    for share in distribution.shares() {
        println!(
            "  - {:<16} {:>3} ({}%)",
            share.tier.label(),
            share.count,
            share.share_pct
        );
    }

    println!("Candidates (filter: {filter})");
    if rows.is_empty() {
        println!("  (none)");
        return;
    }
    for row in rows {
        println!("  - {}", format_row(row));
    }
}

fn format_row(row: &CandidateRow) -> String {
    let breakdown: Vec<String> = Dimension::ordered()
        .into_iter()
        .zip(row.breakdown.display_percentages())
        .map(|(dimension, pct)| format!("{} {pct}%", dimension.key()))
        .collect();
    format!(
        "{} <{}> {:.2} {} | {}",
        row.name,
        row.email,
        row.score,
        row.class,
        breakdown.join(" ")
    )
}

fn progress_bar(pct: u8) -> String {
    let filled = usize::from(pct) / 5;
    format!("[{}{}] {pct}%", "#".repeat(filled), ".".repeat(20 - filled))
}

fn demo_submissions() -> Vec<CandidateSubmission> {
    [
        ("Ana Souza", "ana@example.com", [5, 5, 5, 5, 5, 5, 5, 5, 5, 5]),
        ("Bruno Lima", "bruno@example.com", [4, 4, 4, 5, 5, 5, 5, 4, 4, 3]),
        ("Carla Dias", "carla@example.com", [4, 4, 4, 3, 3, 3, 3, 3, 3, 3]),
        ("Diego Rocha", "diego@example.com", [2, 2, 2, 3, 3, 3, 3, 3, 3, 3]),
        ("Elisa Prado", "elisa@example.com", [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
    ]
    .into_iter()
    .map(|(name, email, ratings)| CandidateSubmission {
        name: name.to_string(),
        email: email.to_string(),
        answers: AnswerSet::from_ratings(ratings),
    })
    .collect()
}
