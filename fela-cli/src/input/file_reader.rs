//! File reading utilities

use super::InputSource;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a file or stdin as UTF-8 text
    pub fn read_source(source: &InputSource) -> Result<String> {
        match source {
            InputSource::File(path) => Self::read_text(path),
            InputSource::Stdin => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read standard input")?;
                Ok(buffer)
            }
        }
    }

    /// Read a pre-split file: one sentence per non-blank line
    pub fn read_lines(path: &Path) -> Result<Vec<String>> {
        let content = Self::read_text(path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Read and decode a JSON file
    pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = Self::read_text(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in file: {}", path.display()))
    }
}
