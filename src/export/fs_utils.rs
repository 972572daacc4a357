// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Ask a y/N question on stdout; anything but "y"/"yes" (or a closed stdin) is a no.
fn confirm(question: &str) -> AppResult<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    let read = io::stdin().lock().read_line(&mut answer)?;
    if read == 0 {
        return Ok(false);
    }

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Gate for every file this tool writes (exports, backups).
///
/// A missing target is always fine; an existing one needs `force` or an
/// explicit confirmation, otherwise the command stops with an export error.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() {
        return Ok(());
    }
    if force {
        info(format!("Overwriting '{}' (--force).", path.display()));
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    if confirm("Overwrite?")? {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "'{}' left untouched (use --force to overwrite)",
            path.display()
        )))
    }
}
