//! refgate CLI — driving adapter for the refgate matcher.
//!
//! Subcommands:
//! - `eval <config> [--event E] [--ref R] [--explain]` — evaluate a rule, exit 0 on match, 1 otherwise
//! - `check <config>` — validate a rule config compiles
//! - `classify [ref]` — print the kind and name of a ref
//!
//! Omitted `--event`/`--ref` values fall back to `GITHUB_EVENT_NAME`/`GITHUB_REF`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use refgate::{classify, MatchTrace, RuleConfig, RuleSet, TriggerContext};
use tracing_subscriber::EnvFilter;

/// Exit code when the rule does not match.
const EXIT_NO_MATCH: u8 = 1;
/// Exit code for unreadable files, malformed configs and invalid patterns.
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(
    name = "refgate",
    about = "Gate CI steps on trigger events and branch/tag patterns",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log every match decision (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a rule config against an event and ref
    Eval {
        /// Rule config file (.yaml, .yml or .json)
        config: PathBuf,
        /// Trigger event name [default: $GITHUB_EVENT_NAME]
        #[arg(long)]
        event: Option<String>,
        /// Raw git ref [default: $GITHUB_REF]
        #[arg(long = "ref")]
        git_ref: Option<String>,
        /// Print which step decided the result
        #[arg(long)]
        explain: bool,
    },
    /// Validate that a rule config loads and compiles
    Check {
        /// Rule config file (.yaml, .yml or .json)
        config: PathBuf,
    },
    /// Print the kind and bare name of a ref
    Classify {
        /// Raw git ref [default: $GITHUB_REF]
        git_ref: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Eval {
            config,
            event,
            git_ref,
            explain,
        } => {
            let matched = cmd_eval(&config, event, git_ref, explain, cli.format)?;
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_NO_MATCH)
            })
        }
        Command::Check { config } => cmd_check(&config).map(|()| ExitCode::SUCCESS),
        Command::Classify { git_ref } => {
            cmd_classify(git_ref, cli.format).map(|()| ExitCode::SUCCESS)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_eval(
    config: &Path,
    event: Option<String>,
    git_ref: Option<String>,
    explain: bool,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let rules = load_rules(config)?;
    let ctx = resolve_context(TriggerContext::from_env(), event, git_ref);
    tracing::info!(rule = %rules, event = ctx.event_name(), git_ref = ctx.git_ref(), "evaluating");

    let trace = rules.match_with_trace(ctx.event_name(), ctx.git_ref());
    match format {
        OutputFormat::Json => println!("{}", trace_json(&trace)),
        OutputFormat::Text if explain => println!("{trace}"),
        OutputFormat::Text => println!("{}", trace.matched),
    }

    Ok(trace.matched)
}

fn cmd_check(config: &Path) -> anyhow::Result<()> {
    let rules = load_rules(config)?;
    println!("Config valid: {rules}");
    Ok(())
}

fn cmd_classify(git_ref: Option<String>, format: OutputFormat) -> anyhow::Result<()> {
    let raw = git_ref.unwrap_or_else(|| TriggerContext::from_env().git_ref().to_owned());
    let reference = classify(raw.as_str());
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&reference)?),
        OutputFormat::Text => println!("{}\t{}", reference.kind(), reference.name()),
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Context resolution (composition root)
// ═══════════════════════════════════════════════════════════════════════════════

/// Explicit arguments win over the ambient CI values.
fn resolve_context(
    ambient: TriggerContext,
    event: Option<String>,
    git_ref: Option<String>,
) -> TriggerContext {
    let mut ctx = ambient;
    if let Some(event) = event {
        ctx = ctx.with_event_name(event);
    }
    if let Some(git_ref) = git_ref {
        ctx = ctx.with_ref(git_ref);
    }
    ctx
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_config(path: &Path) -> anyhow::Result<RuleConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read \"{}\"", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        RuleConfig::from_json(&content)
    } else {
        // Default to YAML (handles .yaml and .yml)
        RuleConfig::from_yaml(&content)
    };
    config.with_context(|| format!("failed to parse \"{}\"", path.display()))
}

fn load_rules(path: &Path) -> anyhow::Result<RuleSet> {
    let rules = load_config(path)?
        .compile()
        .with_context(|| format!("config \"{}\" is invalid", path.display()))?;
    tracing::debug!(path = %path.display(), rule = %rules, "loaded rule");
    Ok(rules)
}

// ═══════════════════════════════════════════════════════════════════════════════
// JSON output
// ═══════════════════════════════════════════════════════════════════════════════

fn trace_json(trace: &MatchTrace) -> serde_json::Value {
    serde_json::json!({
        "matched": trace.matched,
        "event": trace.event,
        "ref": trace.reference,
        "decision": trace.decision.to_string(),
    })
}
