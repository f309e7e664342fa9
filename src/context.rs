//! The persisted default data directory.
//!
//! Retyping `--data-dir` on every invocation gets old fast, so the prompt
//! remembers the last one here, as a bit of JSON under `~/.cache/minisql/`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug)]
pub struct Context {
    pub data_dir: PathBuf,
}

impl Context {
    /// The saved context, or None when none was ever stored.
    pub fn load() -> Result<Option<Context>, crate::Error> {
        let path = context_file()?;
        if !path.is_file() {
            return Ok(None);
        }

        let context = serde_json::from_reader(fs::File::open(path)?)?;

        Ok(Some(context))
    }

    pub fn store(&self) -> Result<(), crate::Error> {
        fs::write(context_file()?, serde_json::to_string(self)?)?;

        Ok(())
    }
}

fn context_file() -> Result<PathBuf, crate::Error> {
    let home = std::env::var("HOME")?;

    let mut path = PathBuf::from(home);
    path.push(".cache");
    path.push("minisql");

    fs::create_dir_all(&path)?;

    path.push("context.json");

    Ok(path)
}
