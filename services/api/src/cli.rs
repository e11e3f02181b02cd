use crate::demo::{run_demo, run_report, run_score, DemoArgs, ReportArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fitscore::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FitScore",
    about = "Score candidate assessments and review the candidate pipeline",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single set of ten answers and print the breakdown
    Score(ScoreArgs),
    /// Summarise a CSV export of candidates by fit class
    Report(ReportArgs),
    /// Run an end-to-end demo: submit sample candidates and print the dashboard
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
