//! Command handler modules for qz-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod document;
pub mod edit;

use anyhow::{Context as _, Result};
use qz_config::{LoadedConfig, UnusedKeyPolicy, DEFAULT_LOG_FILTER};
use qz_editor::{EditorSettings, Notification};
use qz_schemas::QuizDocument;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loaded configuration plus the settings derived from it.
pub struct Context {
    pub config: LoadedConfig,
    pub settings: EditorSettings,
}

impl Context {
    /// Load layered config, start tracing, check for unread keys.
    pub fn load(config_paths: &[PathBuf], strict_config: bool) -> Result<Self> {
        let config = if config_paths.is_empty() {
            LoadedConfig::empty()?
        } else {
            qz_config::load_layered_yaml(config_paths)?
        };

        init_tracing(config.log_filter());
        debug!(
            layers = config.layers,
            config_hash = %config.config_hash,
            "config loaded"
        );

        let policy = if strict_config {
            UnusedKeyPolicy::Fail
        } else {
            UnusedKeyPolicy::Warn
        };
        let report = qz_config::report_unused_keys(&config.config_json, policy)?;
        if !report.is_clean() {
            warn!(unused = ?report.unused_leaf_pointers, "config has keys nothing reads");
        }

        let settings = EditorSettings::from_config_json(&config.config_json)
            .context("invalid editor settings in config")?;
        Ok(Self { config, settings })
    }
}

/// `RUST_LOG` wins, then `/log/filter`, then `info`. Logs go to stderr so
/// stdout stays machine-readable.
fn init_tracing(config_filter: Option<&str>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        config_filter.unwrap_or(DEFAULT_LOG_FILTER).into()
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Read a UTF-8 text file. A leading BOM is kept; the editor strips it.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read failed: {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("{} must be UTF-8 text", path.display()))
}

pub fn read_document(path: &Path) -> Result<QuizDocument> {
    let raw = read_text(path)?;
    qz_editor::parse_document(&raw)
        .with_context(|| format!("{} is not a valid quiz document", path.display()))
}

/// Write `text`, creating parent directories as needed.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create dir failed: {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("write failed: {}", path.display()))
}

pub fn print_notifications(notes: Vec<Notification>) {
    for n in notes {
        println!("notification {n}");
    }
}
