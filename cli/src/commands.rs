//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for proposal-agent
#[derive(Parser, Debug)]
#[command(name = "proposal-agent")]
#[command(author, version, about = "Autonomous proposal-writing agent")]
#[command(long_about = r#"
proposal-agent drafts a proposal for a problem by looping over
plan / search / analyze / write / review actions chosen by a model,
until the model is done or the iteration ceiling is reached.

Configuration files are loaded from (in priority order):
1. PROPOSAL_* environment variables (e.g. PROPOSAL_AGENT__MAX_ITERATIONS=5)
2. --config <path>                            Explicit config file
3. ./proposal-agent.toml                      Project-level config
4. ~/.config/proposal-agent/config.toml       Global config

Example:
  proposal-agent run problem.toml --output proposal.md
  proposal-agent -v run problem.toml --documents ./docs --event-log run.jsonl
  proposal-agent eval problem.toml --runs 3 --output eval.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the agent on a problem file
    Run(RunArgs),
    /// Run the agent several times on a problem and judge every run
    Eval(EvalArgs),
    /// Print the effective configuration as TOML and exit
    Config,
}

/// Arguments shared by `run` and `eval`
#[derive(Args, Debug)]
pub struct ProblemArgs {
    /// Problem file (TOML)
    pub problem: PathBuf,

    /// Directory of .txt/.md documents to enable internal search over
    #[arg(long, value_name = "DIR")]
    pub documents: Option<PathBuf>,

    /// Append structured run events (JSONL) to this file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Override agent.max_iterations
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: ProblemArgs,

    /// Write the final proposal here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    #[command(flatten)]
    pub target: ProblemArgs,

    /// Number of independent runs
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub runs: u16,

    /// Judge calls per run; their scores are averaged
    #[arg(long, value_name = "N", default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub judge_rounds: u16,

    /// Write the JSON report here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
