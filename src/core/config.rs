use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", content);
        Ok(())
    }

    /// Open the config file in `editor`, falling back to $EDITOR / $VISUAL and
    /// then to the platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<String> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let candidates: Vec<String> = match editor {
            Some(e) if e != default_editor => vec![e.to_string(), default_editor],
            _ => vec![default_editor],
        };

        for ed in &candidates {
            if let Ok(status) = Command::new(ed).arg(path).status()
                && status.success()
            {
                return Ok(ed.clone());
            }
        }

        Err(AppError::Config(format!(
            "Failed to edit configuration file with: {}",
            candidates.join(", ")
        )))
    }
}
