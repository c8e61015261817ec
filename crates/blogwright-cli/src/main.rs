mod render;

use anyhow::{Context, Result};
use blogwright_agents::{AgentContext, Pipeline, ResearchOutput, Topic};
use blogwright_core::{AgentError, Outcome, TelemetryOptions, init_telemetry, metrics};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "blogwright",
    version,
    about = "Generate technical blog posts with a three-stage agent pipeline"
)]
struct Cli {
    /// Emit logs as newline-delimited JSON on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single blog topic.
    Topic,
    /// Research a topic and print the research bundle.
    Research(ResearchArgs),
    /// Write a post from a research bundle.
    Write(WriteArgs),
    /// Run the whole pipeline.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct ResearchArgs {
    /// Topic to research.
    #[arg(long)]
    topic: String,
}

#[derive(Args, Debug)]
struct WriteArgs {
    /// Research bundle JSON file, or `-` for stdin.
    #[arg(long)]
    research: PathBuf,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Skip topic generation and write about this topic instead.
    #[arg(long)]
    topic: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryOptions::from_env();
    telemetry.json |= cli.log_json;
    telemetry.with_ansi &= std::io::stderr().is_terminal();
    init_telemetry(telemetry)?;
    metrics::init_metrics_from_env("blogwright-cli");

    let context = AgentContext::from_env()?;

    let rt = Runtime::new()?;
    rt.block_on(async move {
        match cli.command {
            Command::Topic => topic_command(context).await,
            Command::Research(args) => research_command(context, args).await,
            Command::Write(args) => write_command(context, args).await,
            Command::Run(args) => run_command(context, args).await,
        }
    })
}

async fn topic_command(context: AgentContext) -> Result<ExitCode> {
    let pipeline = Pipeline::new(context);
    print_outcome(pipeline.topic_agent().generate_topic().await)
}

async fn research_command(context: AgentContext, args: ResearchArgs) -> Result<ExitCode> {
    let pipeline = Pipeline::new(context);
    let topic = Topic::new(args.topic);
    print_outcome(pipeline.research_agent().research(&topic).await)
}

async fn write_command(context: AgentContext, args: WriteArgs) -> Result<ExitCode> {
    let research = load_research(&args.research)?;
    info!(title = %research.blog_title, "writing post from research bundle");

    let pipeline = Pipeline::new(context);
    print_outcome(pipeline.scriptwriter_agent().write_script(&research).await)
}

async fn run_command(context: AgentContext, args: RunArgs) -> Result<ExitCode> {
    let seed = args.topic.map(Topic::new);
    let result = Pipeline::new(context).run_with_report(seed).await;

    match args.format {
        OutputFormat::Json => print_outcome(result),
        OutputFormat::Markdown => match result {
            Ok(report) => {
                let date = report.started_at.date_naive();
                let document = render::render_post(&report.research, &report.post, date)
                    .context("failed to render post front matter")?;
                print!("{document}");
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{} failed: {err}", err.stage().agent_name());
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

fn print_outcome<T: Serialize>(result: Result<T, AgentError>) -> Result<ExitCode> {
    let outcome = Outcome::from(result);
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_research(path: &Path) -> Result<ResearchOutput> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read research bundle from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    parse_research_input(&raw)
}

/// Accepts either a bare research bundle or the `{"success":true,"data":…}`
/// envelope printed by `blogwright research`.
fn parse_research_input(raw: &str) -> Result<ResearchOutput> {
    if let Ok(Outcome::Success(research)) = serde_json::from_str::<Outcome<ResearchOutput>>(raw) {
        return Ok(research);
    }
    serde_json::from_str(raw).context("research input is not a valid research bundle")
}
