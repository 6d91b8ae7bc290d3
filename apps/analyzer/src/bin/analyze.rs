//! Command-line client for a running analyzer server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use analyzer::client::{http::DEFAULT_SERVER_URL, AnalyzerForm, HttpTransport};

#[derive(Parser)]
#[command(name = "analyze")]
#[command(about = "Score a resume against a job description")]
struct Cli {
    #[command(flatten)]
    resume: ResumeInput,

    #[command(flatten)]
    job: JobInput,

    /// Base URL of the analyzer server
    #[arg(long, env = "ANALYZER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ResumeInput {
    /// Resume file (plain text)
    #[arg(short, long)]
    resume: Option<PathBuf>,

    /// Resume content given inline
    #[arg(long)]
    resume_text: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct JobInput {
    /// Job description file (plain text)
    #[arg(short, long)]
    job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    job_text: Option<String>,
}

fn read_input(path: Option<&PathBuf>, inline: Option<&String>) -> Result<String> {
    match (path, inline) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, Some(text)) => Ok(text.clone()),
        (None, None) => Ok(String::new()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("analyzer={level}"))))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let resume_text = read_input(cli.resume.resume.as_ref(), cli.resume.resume_text.as_ref())?;
    let job_description = read_input(cli.job.job.as_ref(), cli.job.job_text.as_ref())?;

    let mut form = AnalyzerForm::new(resume_text, job_description);
    form.submit(&HttpTransport::new(&cli.server)).await;

    print!("{}", form.render());

    // The error is already part of the rendered view.
    if form.error().is_some() {
        std::process::exit(1);
    }

    Ok(())
}
