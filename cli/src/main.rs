//! CLI entrypoint for proposal-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;
mod documents;
mod problem_file;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use commands::{Cli, Command, EvalArgs, ProblemArgs, RunArgs};
use problem_file::ProblemFile;
use proposal_application::{
    AgentParams, EvaluateProposalUseCase, RunEventLogger, RunJudge, RunProposalInput,
    RunProposalOutput, RunProposalUseCase, SearchToolset,
};
use proposal_infrastructure::{
    ConfigLoader, FileConfig, GeminiClient, GoogleWebSearchClient, HtmlPageScraper,
    InMemoryActionStore, InMemoryDocumentIndex, JsonlRunEventLogger,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = if cli.no_config {
        FileConfig::default()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };

    match cli.command {
        Command::Run(args) => run(args, config).await,
        Command::Eval(args) => eval(args, config).await,
        Command::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// Initialize logging based on verbosity level. `RUST_LOG` wins when set.
///
/// The returned guard must live until exit so buffered file logs are
/// flushed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("environment variable {} is not set", name))
}

/// Everything a run needs, wired from the config and the problem arguments.
struct Wiring {
    params: AgentParams,
    input: RunProposalInput,
    llm: Arc<GeminiClient>,
    toolset: Arc<SearchToolset>,
    event_logger: Option<Arc<dyn RunEventLogger>>,
}

async fn wire(target: ProblemArgs, config: &FileConfig) -> Result<Wiring> {
    let mut params = config
        .to_agent_params()
        .context("invalid configuration")?;
    if let Some(max) = target.max_iterations {
        params = params.with_max_iterations(max);
    }

    let input = ProblemFile::load(&target.problem)?.into_input()?;
    let problem_id = input.problem.id.clone();

    // === Dependency Injection ===
    let llm = Arc::new(
        GeminiClient::new(
            require_env(&config.llm.api_key_env)?,
            Duration::from_secs(config.llm.timeout_seconds),
        )?
        .with_endpoint(&config.llm.endpoint)
        .with_embedding_dimensions(config.llm.embedding_dimensions),
    );

    let mut toolset = SearchToolset::new()
        .with_web_results(params.web_results)
        .with_top_k(params.document_top_k)
        .with_max_page_chars(config.search.max_page_chars);

    match (
        std::env::var(&config.search.api_key_env),
        std::env::var(&config.search.engine_id_env),
    ) {
        (Ok(key), Ok(engine_id)) => {
            let timeout = Duration::from_secs(config.search.timeout_seconds);
            let index = GoogleWebSearchClient::new(key, engine_id, timeout)?
                .with_endpoint(&config.search.endpoint);
            let scraper =
                HtmlPageScraper::new(timeout)?.with_max_chars(config.search.max_page_chars);
            toolset = toolset.with_web(Arc::new(index), Arc::new(scraper));
        }
        _ => warn!(
            "Web search disabled: set {} and {}",
            config.search.api_key_env, config.search.engine_id_env
        ),
    }

    if let Some(dir) = &target.documents {
        let index = Arc::new(InMemoryDocumentIndex::new());
        documents::index_directory(
            &index,
            llm.as_ref(),
            &params.models.embedding,
            &problem_id,
            dir,
        )
        .await?;
        toolset = toolset.with_documents(index, llm.clone(), params.models.embedding.clone());
    } else if input.job.enable_internal_search {
        warn!("Internal search is enabled but no --documents directory was given");
    }

    let event_log = target.event_log.or_else(|| config.logging.event_log.clone());
    let event_logger: Option<Arc<dyn RunEventLogger>> = match event_log {
        Some(path) => Some(Arc::new(JsonlRunEventLogger::new(&path).with_context(
            || format!("failed to open event log {}", path.display()),
        )?)),
        None => None,
    };

    Ok(Wiring {
        params,
        input,
        llm,
        toolset: Arc::new(toolset),
        event_logger,
    })
}

/// Cancels `token` on ctrl-c.
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling run");
            token.cancel();
        }
    });
}

fn write_or_print(path: Option<&Path>, content: &str, what: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("{} written to {}", what, path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

async fn run(args: RunArgs, config: FileConfig) -> Result<()> {
    let wiring = wire(args.target, &config).await?;

    let store = Arc::new(InMemoryActionStore::new());
    let token = CancellationToken::new();
    let mut use_case =
        RunProposalUseCase::new(wiring.llm, wiring.toolset, store, &wiring.params)?
            .with_cancellation(token.clone());
    if let Some(logger) = wiring.event_logger {
        use_case = use_case.with_event_logger(logger);
    }
    cancel_on_interrupt(token);

    let output = use_case.execute(wiring.input).await?;
    log_summary(&output);

    write_or_print(args.output.as_deref(), &output.content, "Proposal")
}

async fn eval(args: EvalArgs, config: FileConfig) -> Result<()> {
    let wiring = wire(args.target, &config).await?;

    let judge = RunJudge::new(wiring.llm.clone(), wiring.params.models.decision.clone())
        .with_rounds(usize::from(args.judge_rounds));
    let token = CancellationToken::new();
    let mut use_case: EvaluateProposalUseCase<_, _, InMemoryActionStore> =
        EvaluateProposalUseCase::new(wiring.llm, wiring.toolset, wiring.params)
            .with_judge(judge)
            .with_cancellation(token.clone());
    if let Some(logger) = wiring.event_logger {
        use_case = use_case.with_event_logger(logger);
    }
    cancel_on_interrupt(token);

    let report = use_case
        .execute(wiring.input, usize::from(args.runs))
        .await?;
    if report.failed_runs() > 0 {
        warn!(
            "{} of {} runs failed",
            report.failed_runs(),
            report.runs.len()
        );
    }

    let json = serde_json::to_string_pretty(&report)?;
    write_or_print(args.output.as_deref(), &json, "Evaluation report")
}

fn log_summary(output: &RunProposalOutput) {
    info!("Goal: {}", output.goal);
    for (step, record) in output.records.iter().enumerate() {
        info!(
            "Step {}: {} ({} chars)",
            step + 1,
            record.kind,
            record.output().chars().count()
        );
    }
    info!(
        "Stopped after {} iterations: {}",
        output.iterations, output.stop_reason
    );
    if output.content.trim().is_empty() {
        warn!("The run finished without proposal content");
    }
}
