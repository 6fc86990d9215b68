//! CLI entrypoint for notegpt
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use notegpt_application::{
    DocumentSink, NoSessionLogger, SessionEnd, SessionLogger, StreamSessionUseCase,
};
use notegpt_domain::Message;
use notegpt_infrastructure::{
    ConfigCredentialProvider, ConfigLoader, FileDocumentSink, JsonlSessionLogger,
    ReqwestTransport,
};
use notegpt_presentation::{Cli, ConsoleFormatter, ConsoleNotifier, ProgressReporter};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
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
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(document) = cli.document.clone() else {
        bail!("A document path is required. See --help.");
    };

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .context("Failed to load configuration")?;

    info!("Starting notegpt for {}", document.display());

    let mut settings = config.to_completion_settings();
    if let Some(model) = &cli.model {
        settings = settings.with_model(model.as_str());
    }

    // === Dependency Injection ===
    let transport = Arc::new(
        ReqwestTransport::new(Duration::from_secs(config.api.connect_timeout_seconds))
            .context("Failed to create HTTP client")?,
    );
    let sink = Arc::new(FileDocumentSink::new(&document));
    let credentials = Arc::new(ConfigCredentialProvider::from_config(&config.api));

    let logger: Arc<dyn SessionLogger> = match &config.logging.transcript {
        Some(path) => match JsonlSessionLogger::new(path) {
            Some(logger) => {
                info!("Writing session transcript to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoSessionLogger),
        },
        None => Arc::new(NoSessionLogger),
    };

    // Without --prompt the note itself is the question
    let user_prompt = match &cli.prompt {
        Some(prompt) => prompt.clone(),
        None => match sink.read_all().await {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {}", document.display(), e);
                String::new()
            }
        },
    };
    let messages = vec![
        Message::system(cli.system_prompt()),
        Message::user(user_prompt),
    ];

    let mut use_case =
        StreamSessionUseCase::new(transport, sink, credentials, Arc::new(ConsoleNotifier), settings)
            .with_logger(logger);
    if !cli.quiet {
        use_case = use_case.with_observer(Arc::new(ProgressReporter::new()));
    }

    let report = use_case.start(messages).await?;

    if !cli.quiet {
        println!("{}", ConsoleFormatter::format(&report));
    }

    Ok(match report.end {
        SessionEnd::Completed => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
