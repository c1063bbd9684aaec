use std::fs;
use std::io::Write;
use std::process::Command;

use anyhow::{bail, Context};

const FALLBACK_EDITOR: &str = "vi";

/// Resolves the editor command line from `$VISUAL`, then `$EDITOR`.
pub fn editor_command(visual: Option<String>, editor: Option<String>) -> Vec<String> {
    let chosen = [visual, editor]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
    chosen.split_whitespace().map(str::to_string).collect()
}

/// Opens `html` in the user's editor and returns the saved content.
pub fn edit_document(html: &str) -> anyhow::Result<String> {
    let command = editor_command(
        std::env::var("VISUAL").ok(),
        std::env::var("EDITOR").ok(),
    );
    run_editor(&command, html)
}

pub fn run_editor(command: &[String], html: &str) -> anyhow::Result<String> {
    let Some((program, args)) = command.split_first() else {
        bail!("no editor configured");
    };

    let mut file = tempfile::Builder::new()
        .prefix("tailor-")
        .suffix(".html")
        .tempfile()
        .context("failed to create edit buffer")?;
    file.write_all(html.as_bytes())?;
    file.flush()?;

    let status = Command::new(program)
        .args(args)
        .arg(file.path())
        .status()
        .with_context(|| format!("failed to launch editor {program}"))?;
    if !status.success() {
        bail!("editor {program} exited with {status}");
    }

    fs::read_to_string(file.path()).context("failed to read edited document")
}
