use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use haggis::models::{LocalReport, RepositoryReport, ScanResult};
use haggis::{scan_local, Config, Error, GitHubClient, LocalConfig, OrgScanner, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "haggis")]
#[command(version)]
#[command(about = "Search GitHub repositories for CODEOWNERS files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show CODEOWNERS entries for an organization, a repository or a local file
    Codeowners(CodeownersArgs),
}

#[derive(clap::Args, Debug)]
struct CodeownersArgs {
    /// GitHub organization to scan (omit to read a local file)
    #[arg(short, long)]
    org: Option<String>,

    /// Single repository within the organization
    #[arg(short, long)]
    repo: Option<String>,

    /// Branch to read instead of each repository's default branch
    #[arg(short, long)]
    branch: Option<String>,

    /// Local CODEOWNERS file (local mode only)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

const DEFAULT_LOG_FILTER: &str = "haggis=info,reqwest=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env first so RUST_LOG from it reaches the filter
    dotenvy::dotenv().ok();

    // Logs go to stderr, CODEOWNERS content to stdout
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Codeowners(args) => run_codeowners(args).await,
    }
}

/// A valid `RUST_LOG` replaces the defaults entirely.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

async fn run_codeowners(args: CodeownersArgs) -> anyhow::Result<()> {
    let Some(org) = args.org.as_deref() else {
        if args.repo.is_some() {
            return Err(Error::Usage("--repo requires --org".to_string()).into());
        }
        let config = LocalConfig::new(args.file.clone(), args.branch.as_deref(), args.verbose);
        let report = scan_local(&config)?;
        return output_local(&report, args.format);
    };

    if args.file.is_some() {
        return Err(Error::Usage("--file cannot be combined with --org".to_string()).into());
    }

    let show_progress = args.format == Format::Text && std::io::stderr().is_terminal();
    let config = ScanConfig::new(org, args.repo.as_deref(), args.branch.as_deref(), args.verbose)?
        .with_progress(show_progress);

    let github = GitHubClient::new(&Config::from_env()?)?;
    let scanner = OrgScanner::new(github);

    let result = if config.repository.is_some() {
        scanner.scan_repository(&config).await?
    } else {
        scanner.scan(&config).await?
    };

    output_scan(&result, args.format)
}

fn output_scan(result: &ScanResult, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(result)?),
        Format::Text => {
            print!("{}", format_scan(result));
            eprint!("{}", format_failures(result));
        }
    }
    Ok(())
}

fn output_local(report: &LocalReport, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Text => print!("{}", format_local(report)),
    }
    Ok(())
}

fn format_scan(result: &ScanResult) -> String {
    let mut output = String::new();

    for report in result.found() {
        output.push_str(&format_repository(report));
        output.push('\n');
    }

    output
}

fn format_failures(result: &ScanResult) -> String {
    let failures: Vec<_> = result.errors().collect();
    if failures.is_empty() {
        return String::new();
    }

    let mut output = format!(
        "{} of {} repositories could not be checked:\n",
        failures.len(),
        result.repositories.len()
    );
    for report in failures {
        output.push_str(&format!(
            "  {}: {}\n",
            report.repository,
            report.outcome.reason().unwrap_or("unknown error")
        ));
    }
    output
}

fn format_repository(report: &RepositoryReport) -> String {
    let mut output = format!(
        "CODEOWNERS file found in repository '{}' (branch: {}):\n",
        report.repository,
        report.branch.as_deref().unwrap_or("?")
    );
    if let Some(document) = report.outcome.document() {
        for line in document.filtered_lines() {
            output.push_str(line);
            output.push('\n');
        }
    }
    output
}

fn format_local(report: &LocalReport) -> String {
    let mut output = match &report.branch {
        Some(branch) => format!(
            "CODEOWNERS File: {} (branch: {})\n",
            report.path.display(),
            branch
        ),
        None => format!("CODEOWNERS File: {}\n", report.path.display()),
    };
    for line in report.document.filtered_lines() {
        output.push_str(line);
        output.push('\n');
    }
    output
}
