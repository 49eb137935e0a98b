use anyhow::{anyhow, Context, Result};
use serde_json::Value;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "quiz.json";
pub const DEFAULT_EXPORT_INDENT: usize = 2;
pub const DEFAULT_EXAM_ID_PREFIX: &str = "e";
pub const DEFAULT_SUCCESS_MS: u64 = 3000;
pub const DEFAULT_IMPORT_ERROR_MS: u64 = 4000;
pub const DEFAULT_FILE_ERROR_MS: u64 = 3000;

/// Config pointers read by [`EditorSettings::from_config_json`].
pub const SETTINGS_POINTERS: &[&str] = &[
    "/export/file_name",
    "/export/indent",
    "/exam/id_prefix",
    "/notifications/success_ms",
    "/notifications/import_error_ms",
    "/notifications/file_error_ms",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    pub export_file_name: String,
    pub export_indent: usize,
    /// Auto-assigned exam ids are `<prefix><n>`.
    pub exam_id_prefix: String,
    pub success_ms: u64,
    pub import_error_ms: u64,
    pub file_error_ms: u64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            export_indent: DEFAULT_EXPORT_INDENT,
            exam_id_prefix: DEFAULT_EXAM_ID_PREFIX.to_string(),
            success_ms: DEFAULT_SUCCESS_MS,
            import_error_ms: DEFAULT_IMPORT_ERROR_MS,
            file_error_ms: DEFAULT_FILE_ERROR_MS,
        }
    }
}

impl EditorSettings {
    /// Build from canonical config JSON (produced by qz-config).
    ///
    /// Every field is optional and falls back to its default. Present fields
    /// must have the right type.
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let d = Self::default();

        let export_file_name = opt_str(cfg, "/export/file_name")?
            .unwrap_or(d.export_file_name);
        if export_file_name.trim().is_empty()
            || export_file_name.contains(['/', '\\'])
        {
            return Err(anyhow!(
                "export.file_name must be a bare file name (got '{export_file_name}')"
            ));
        }

        let export_indent = opt_u64(cfg, "/export/indent")?
            .map(|n| n as usize)
            .unwrap_or(d.export_indent);
        if export_indent > 8 {
            return Err(anyhow!("export.indent out of bounds (0..=8): {export_indent}"));
        }

        let exam_id_prefix = opt_str(cfg, "/exam/id_prefix")?.unwrap_or(d.exam_id_prefix);

        Ok(Self {
            export_file_name,
            export_indent,
            exam_id_prefix,
            success_ms: opt_u64(cfg, "/notifications/success_ms")?.unwrap_or(d.success_ms),
            import_error_ms: opt_u64(cfg, "/notifications/import_error_ms")?
                .unwrap_or(d.import_error_ms),
            file_error_ms: opt_u64(cfg, "/notifications/file_error_ms")?
                .unwrap_or(d.file_error_ms),
        })
    }
}

fn opt_str(cfg: &Value, ptr: &str) -> Result<Option<String>> {
    match cfg.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .with_context(|| format!("config {ptr} must be a string")),
    }
}

fn opt_u64(cfg: &Value, ptr: &str) -> Result<Option<u64>> {
    match cfg.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .with_context(|| format!("config {ptr} must be a non-negative integer")),
    }
}
