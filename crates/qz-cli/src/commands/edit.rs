//! Commands that drive the editor: `import` and `apply`.

use anyhow::{bail, Context as _, Result};
use qz_editor::{Editor, EditorCommand};
use qz_schemas::QuizDocument;
use std::path::Path;
use tracing::{info, warn};

use super::{print_notifications, read_document, read_text, write_text, Context};

/// Execute `qz import`: upload `from` into the import dialog and confirm it.
pub fn import(ctx: &Context, from: &Path, out: &Path) -> Result<()> {
    let contents = read_text(from)?;
    let mut editor = Editor::new(QuizDocument::default(), ctx.settings.clone());

    let result = editor
        .apply(EditorCommand::OpenImport)
        .and_then(|_| editor.apply(EditorCommand::LoadImportFile { contents }))
        .and_then(|_| editor.apply(EditorCommand::ConfirmImport));
    print_notifications(editor.drain_notifications());
    if let Err(e) = result {
        bail!("IMPORT_FAILED {}: {e}", from.display());
    }

    let text = editor.export_json().context("serialize document failed")?;
    write_text(out, &text)?;
    let doc = editor.document();
    info!(path = %out.display(), config_hash = %ctx.config.config_hash, "import written");
    println!(
        "import_ok=true path={} questions={} exam={}",
        out.display(),
        doc.questions.len(),
        doc.exam.len()
    );
    Ok(())
}

/// Execute `qz apply`: replay a command script through the editor and write
/// the resulting document.
pub fn apply(ctx: &Context, doc: &Path, script: &Path, out: &Path, keep_going: bool) -> Result<()> {
    let commands: Vec<EditorCommand> = serde_json::from_str(&read_text(script)?)
        .with_context(|| format!("{} must hold a JSON array of editor commands", script.display()))?;
    let mut editor = Editor::new(read_document(doc)?, ctx.settings.clone());

    let mut failed = 0usize;
    for (i, cmd) in commands.into_iter().enumerate() {
        let result = editor.apply(cmd);
        print_notifications(editor.drain_notifications());
        if let Err(e) = result {
            failed += 1;
            println!("command_failed index={i} error={e}");
            if !keep_going {
                bail!("APPLY_FAILED at command {i}: {e}");
            }
        }
    }

    if editor.mode().has_open_draft() {
        warn!(mode = ?editor.mode(), "script ended with a draft open; draft discarded");
    }

    let text = editor.export_json().context("serialize document failed")?;
    write_text(out, &text)?;
    info!(
        path = %out.display(),
        failed,
        config_hash = %ctx.config.config_hash,
        "script applied"
    );
    println!("apply_ok=true failed={failed} path={}", out.display());
    Ok(())
}
