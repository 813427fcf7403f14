//! CLI entrypoint for triad
//!
//! This is the main binary that wires together all layers using
//! dependency injection: the backend is selected once from configuration
//! and injected into the solve use case.

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use triad_application::{BehaviorConfig, ModelBackend, RunSolveUseCase, SolveInput};
use triad_domain::Question;
use triad_infrastructure::{
    BackendMode, ConfigLoader, FixtureBackend, JsonlSolveLogger, OpenAiBackend,
    OpenAiBackendConfig,
};
use triad_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SolveRepl};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("config error: {e}"))?
    };
    for issue in config.validate() {
        warn!("{}", issue);
    }

    // === Dependency Injection ===
    // Resolve the backend once; nothing switches backends mid-run.
    let mode = match &cli.backend {
        Some(s) => s.parse::<BackendMode>().map_err(|e| anyhow!(e))?,
        None => config
            .backend
            .parse_mode()
            .unwrap_or(BackendMode::Fixture),
    };

    let backend: Arc<dyn ModelBackend> = match mode {
        BackendMode::Fixture => {
            info!("Using the offline fixture backend");
            Arc::new(FixtureBackend::new())
        }
        BackendMode::OpenAi => {
            let model = cli
                .model
                .clone()
                .unwrap_or_else(|| config.backend.model.clone());
            info!("Using the live backend with model {}", model);
            Arc::new(OpenAiBackend::new(OpenAiBackendConfig {
                base_url: config.backend.base_url.clone(),
                api_key_env: config.backend.api_key_env.clone(),
                api_key: config.backend.api_key.clone(),
                model,
                timeout: Duration::from_secs(config.backend.timeout_secs.max(1)),
                max_tokens: config.backend.max_tokens,
            })?)
        }
    };

    let mut use_case = RunSolveUseCase::new(backend);
    if let Some(path) = &config.logging.audit_log
        && let Some(logger) = JsonlSolveLogger::new(path)
    {
        info!("Audit log: {}", logger.path().display());
        use_case = use_case.with_solve_logger(Arc::new(logger));
    }

    let behavior = BehaviorConfig::with_max_retries(config.solve.max_retries);

    // REPL mode
    if cli.repl {
        let mut repl = SolveRepl::new(use_case, behavior).with_progress(!cli.quiet);
        if let Some(output) = cli.output {
            repl = repl.with_output(output);
        }
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --repl for interactive mode."),
    };
    let question = Question::try_new(question).map_err(|e| anyhow!(e))?;

    if !cli.quiet {
        println!();
        println!("Question: {}", question);
        println!();
    }

    let input = SolveInput::new(question).with_behavior(behavior);

    // Execute with or without progress reporting
    let outcome = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    // Output results
    let output = cli
        .output
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));
    let rendered = match output {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Answer => ConsoleFormatter::format_answer_only(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{}", rendered);

    Ok(())
}
