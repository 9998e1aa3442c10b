// # whimsyd - whimsy name runner
//
// Thin integration layer over whimsy-core. All naming and state logic lives
// in the library; this binary only:
// 1. Reads configuration from environment variables
// 2. Loads and validates the JSON manifest
// 3. Builds the state store and the engine
// 4. Runs one command and prints the result as JSON
//
// ## Configuration
//
// - `WHIMSY_MANIFEST`: Path to the JSON manifest (required)
// - `WHIMSY_STATE_PATH`: State file path; overrides the manifest's state store
// - `WHIMSY_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Commands
//
// - `apply` (default): reconcile the manifest against persisted state
// - `show`: print the persisted names of declared resources
// - `destroy`: discard every persisted name
//
// ## Example
//
// ```bash
// export WHIMSY_MANIFEST=/etc/whimsy/manifest.json
// export WHIMSY_STATE_PATH=/var/lib/whimsy/state.json
//
// whimsyd apply
// ```

use anyhow::{Context, Result};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use whimsy_core::engine::EngineEvent;
use whimsy_core::{
    Catalog, CatalogSource, NameEngine, ResourceRegistry, StateStoreConfig, WhimsyConfig,
};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean exit
/// - 1: Configuration or startup error
/// - 2: Runtime error
#[derive(Debug, Clone, Copy)]
enum WhimsyExitCode {
    /// Command completed
    Clean = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error, including resources that failed to apply
    RuntimeError = 2,
}

impl From<WhimsyExitCode> for ExitCode {
    fn from(code: WhimsyExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Command selected by the first CLI argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Apply,
    Show,
    Destroy,
}

impl Command {
    fn parse(arg: Option<&str>) -> Result<Self> {
        match arg {
            None | Some("apply") => Ok(Command::Apply),
            Some("show") => Ok(Command::Show),
            Some("destroy") => Ok(Command::Destroy),
            Some(other) => anyhow::bail!(
                "Unknown command '{}'. Valid commands: apply, show, destroy",
                other
            ),
        }
    }
}

/// Application configuration
struct Config {
    command: Command,
    manifest_path: String,
    state_path: Option<String>,
    log_level: String,
}

impl Config {
    /// Load configuration from the environment and CLI arguments
    fn from_env() -> Result<Self> {
        let arg = env::args().nth(1);
        Ok(Self {
            command: Command::parse(arg.as_deref())?,
            manifest_path: env::var("WHIMSY_MANIFEST").context(
                "WHIMSY_MANIFEST is required. \
                Set it via: export WHIMSY_MANIFEST=/etc/whimsy/manifest.json",
            )?,
            state_path: env::var("WHIMSY_STATE_PATH").ok(),
            log_level: env::var("WHIMSY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.manifest_path.is_empty() {
            anyhow::bail!("WHIMSY_MANIFEST cannot be empty");
        }

        if let Some(ref path) = self.state_path {
            if path.is_empty() {
                anyhow::bail!("WHIMSY_STATE_PATH cannot be empty when set");
            }

            if let Some(parent) = std::path::Path::new(path).parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                anyhow::bail!(
                    "WHIMSY_STATE_PATH parent directory does not exist: {}. \
                    Create it first: mkdir -p {}",
                    parent.display(),
                    parent.display()
                );
            }
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "WHIMSY_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Read and validate the manifest, applying the state path override
    fn load_manifest(&self) -> Result<WhimsyConfig> {
        let raw = std::fs::read_to_string(&self.manifest_path)
            .with_context(|| format!("Failed to read manifest {}", self.manifest_path))?;
        let mut manifest = WhimsyConfig::from_json(&raw)
            .with_context(|| format!("Invalid manifest {}", self.manifest_path))?;

        if let Some(ref path) = self.state_path {
            manifest.state_store = StateStoreConfig::File { path: path.clone() };
        }

        manifest.validate()?;
        Ok(manifest)
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return WhimsyExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return WhimsyExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr; stdout carries the JSON result
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return WhimsyExitCode::ConfigError.into();
    }

    if let Err(e) = Catalog::global().validate() {
        error!("Word catalog is invalid: {}", e);
        return WhimsyExitCode::ConfigError.into();
    }

    let manifest = match config.load_manifest() {
        Ok(manifest) => manifest,
        Err(e) => {
            error!("{:#}", e);
            return WhimsyExitCode::ConfigError.into();
        }
    };

    info!(
        "Manifest loaded: {} resource(s), {} lookup(s)",
        manifest.resources.len(),
        manifest.lookups.len()
    );

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return WhimsyExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(config.command, manifest).await {
            Ok(code) => code,
            Err(e) => {
                error!("{:#}", e);
                WhimsyExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Run one command against the manifest
async fn run(command: Command, manifest: WhimsyConfig) -> Result<WhimsyExitCode> {
    let registry = ResourceRegistry::with_builtins();
    let state_store = registry
        .create_state_store(&manifest.state_store)
        .await
        .context("Failed to open state store")?;

    let (engine, mut events) = NameEngine::new(
        Box::new(CatalogSource::builtin()),
        state_store,
        manifest.engine.clone(),
    )?;

    info!(
        "Running {:?} with {} name source",
        command,
        engine.source_name()
    );

    let (output, code) = match command {
        Command::Apply => {
            let report = engine.reconcile(&manifest, &registry).await?;
            let code = if report.has_failures() {
                warn!("{} resource(s) failed", report.failures());
                WhimsyExitCode::RuntimeError
            } else {
                WhimsyExitCode::Clean
            };
            (serde_json::to_value(&report)?, code)
        }
        Command::Show => {
            let mut resources = Vec::new();
            for resource in &manifest.resources {
                let address = resource.address();
                let entity = engine.read(&address).await?;
                resources.push(serde_json::json!({
                    "address": address,
                    "id": entity.as_ref().map(|e| e.id().to_string()),
                    "name": entity.as_ref().map(|e| e.name().to_string()),
                }));
            }
            (serde_json::json!({ "resources": resources }), WhimsyExitCode::Clean)
        }
        Command::Destroy => {
            let destroyed = engine.destroy_all().await?;
            engine.flush().await?;
            let resources: Vec<_> = destroyed
                .iter()
                .map(|(address, entity)| {
                    serde_json::json!({ "address": address, "name": entity.name() })
                })
                .collect();
            (serde_json::json!({ "destroyed": resources }), WhimsyExitCode::Clean)
        }
    };

    drop(engine);
    while let Some(event) = events.recv().await {
        log_event(&event);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

fn log_event(event: &EngineEvent) {
    match event {
        EngineEvent::Failed { address, error } => warn!("event: {} failed: {}", address, error),
        other => tracing::debug!("event: {:?}", other),
    }
}
