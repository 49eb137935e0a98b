//! Read-mostly document commands: `init`, `show`, `validate`, `export`.

use anyhow::{bail, Context as _, Result};
use qz_editor::{Editor, Severity};
use qz_schemas::QuizDocument;
use std::path::Path;
use tracing::info;

use super::{read_document, write_text, Context};

/// Execute `qz init`.
pub fn init(ctx: &Context, out: &Path, id: String, summary: String, force: bool) -> Result<()> {
    if out.exists() && !force {
        bail!(
            "REFUSING INIT: {} already exists. Re-run with --force to overwrite",
            out.display()
        );
    }
    let editor = Editor::new(QuizDocument::new(id, summary), ctx.settings.clone());
    let text = editor.export_json().context("serialize document failed")?;
    write_text(out, &text)?;
    info!(path = %out.display(), "document initialised");
    println!("init_ok=true path={}", out.display());
    Ok(())
}

/// Execute `qz show`.
pub fn show(doc: &Path) -> Result<()> {
    let doc = read_document(doc)?;
    for line in qz_editor::render_document(&doc) {
        println!("{line}");
    }
    Ok(())
}

/// Execute `qz validate`. Findings are printed one per line; `--strict` turns
/// any finding into a failure.
pub fn validate(path: &Path, strict: bool) -> Result<()> {
    let doc = read_document(path)?;
    let findings = qz_editor::lint_document(&doc);
    for f in &findings {
        println!("{f}");
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = findings.len() - errors;
    println!(
        "validate_ok={} findings={} errors={errors} warnings={warnings}",
        findings.is_empty(),
        findings.len()
    );

    if strict && !findings.is_empty() {
        bail!(
            "VALIDATE_FAILED: {} finding(s) in {}",
            findings.len(),
            path.display()
        );
    }
    Ok(())
}

/// Execute `qz export`: write `<out_dir>/<export.file_name>`.
pub fn export(ctx: &Context, doc: &Path, out_dir: &Path) -> Result<()> {
    let editor = Editor::new(read_document(doc)?, ctx.settings.clone());
    let text = editor.export_json().context("serialize document failed")?;
    let out = out_dir.join(&ctx.settings.export_file_name);
    write_text(&out, &text)?;
    info!(path = %out.display(), bytes = text.len(), "document exported");
    println!("export_ok=true path={}", out.display());
    Ok(())
}
