pub mod app;
pub mod config;
pub mod document;
pub mod errors;
pub mod format;
pub mod hotkeys;
pub mod log_retention;
pub mod logging;
pub mod runtime;
pub mod sections;
pub mod tui;
pub mod types;
pub mod view;

use clap::{error::ErrorKind, Parser};
use config::{load_config, AppConfig, CliOverrides};
use document::{bundled_document_text, document_fingerprint, parse_document};
use errors::DashboardError;
use logging::{log_event, structured_fallback_line, JsonlLogger, LogEvent};
use runtime::ProductionRuntime;
use serde_json::json;
use types::Tab;
use view::Dashboard;

#[derive(Debug, Clone, Parser)]
#[command(name = "fraud-dashboard")]
#[command(about = "Tabbed terminal dashboard for fraud-detection pipeline results")]
pub struct Cli {
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
    #[arg(long)]
    pub document: Option<std::path::PathBuf>,
    #[arg(long, value_name = "TAB")]
    pub snapshot: Option<String>,
    #[arg(long, default_value_t = false)]
    pub validate_only: bool,
    #[arg(long)]
    pub width: Option<u16>,
    #[arg(long)]
    pub height: Option<u16>,
}

/// A document as loaded, before it is mounted.
pub struct LoadedDocument {
    pub source: String,
    pub fingerprint: String,
    pub document: document::ResultsDocument,
}

pub fn run() -> Result<i32, DashboardError> {
    let args = std::env::args_os().collect::<Vec<_>>();
    let cwd = std::env::current_dir().map_err(|e| DashboardError::Io(e.to_string()))?;
    let runtime = ProductionRuntime::new();
    run_with_runtime(&args, &cwd, &runtime)
}

pub fn run_with_runtime(
    args: &[std::ffi::OsString],
    cwd: &std::path::Path,
    runtime: &ProductionRuntime,
) -> Result<i32, DashboardError> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{error}");
                return Ok(0);
            }
            _ => return Err(DashboardError::Cli(error.to_string())),
        },
    };

    // Reject a bad tab before touching the document.
    let snapshot_tab = cli.snapshot.as_deref().map(Tab::parse).transpose()?;

    let overrides = CliOverrides {
        config_path: cli.config.clone(),
        document_path: cli.document.clone(),
        width: cli.width,
        height: cli.height,
    };
    let cfg = load_config(&overrides, cwd, runtime.file_system.as_ref())?;
    let logger = JsonlLogger::from_config(&cfg.logging);

    let loaded = load_document(&cfg, runtime)?;
    let mut dashboard = match Dashboard::mount(loaded.document) {
        Ok(dashboard) => dashboard,
        Err(error) => {
            log_event(
                logger.as_ref(),
                &LogEvent::warn(
                    "document_rejected",
                    json!({"source": loaded.source, "error": error.to_string()}),
                ),
            );
            return Err(error);
        }
    };

    log_event(
        logger.as_ref(),
        &LogEvent::info(
            "document_loaded",
            json!({
                "source": loaded.source,
                "fingerprint": loaded.fingerprint,
                "models": dashboard.document().models.len(),
                "features": dashboard.document().feature_importance.len(),
                "agents": dashboard.document().agents.len(),
            }),
        ),
    );
    for warning in &dashboard.report().warnings {
        log_event(
            logger.as_ref(),
            &LogEvent::warn("consistency_warning", json!({"detail": warning.to_string()})),
        );
    }

    if cli.validate_only {
        let doc = dashboard.document();
        runtime.terminal.write_line(&format!(
            "document ok: models={} features={} agents={} warnings={}",
            doc.models.len(),
            doc.feature_importance.len(),
            doc.agents.len(),
            dashboard.report().warnings.len()
        ))?;
        for warning in &dashboard.report().warnings {
            runtime
                .terminal
                .write_line(&format!("warning: {warning}"))?;
        }
        return Ok(0);
    }

    if let Some(tab) = snapshot_tab {
        dashboard.select(tab);
        let frame = dashboard.render(cfg.render.width, cfg.render.height)?;
        runtime.terminal.draw(&frame)?;
        log_event(
            logger.as_ref(),
            &LogEvent::info("snapshot_rendered", json!({"tab": tab.as_str()})),
        );
        return Ok(0);
    }

    if runtime.terminal.stdin_is_tty() {
        log_event(
            logger.as_ref(),
            &LogEvent::info("session_started", json!({"tab": dashboard.active_tab().as_str()})),
        );
        app::run_interactive(&mut dashboard, logger.as_ref())?;
        log_event(
            logger.as_ref(),
            &LogEvent::info("session_ended", json!({"tab": dashboard.active_tab().as_str()})),
        );
        return Ok(0);
    }

    let frame = dashboard.render(cfg.render.width, cfg.render.height)?;
    runtime.terminal.draw(&frame)?;
    runtime.terminal.write_line(&structured_fallback_line(
        dashboard.active_tab().as_str(),
        "rendered",
        &format!("non-interactive terminal; fingerprint={}", loaded.fingerprint),
    ))?;
    Ok(0)
}

pub fn load_document(
    cfg: &AppConfig,
    runtime: &ProductionRuntime,
) -> Result<LoadedDocument, DashboardError> {
    let (source, text) = match &cfg.document.path {
        Some(path) => (
            path.display().to_string(),
            runtime.file_system.read_to_string(path)?,
        ),
        None => ("bundled".to_string(), bundled_document_text().to_string()),
    };
    let document = parse_document(&text)?;
    Ok(LoadedDocument {
        source,
        fingerprint: document_fingerprint(&text),
        document,
    })
}
