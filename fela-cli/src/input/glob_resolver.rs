//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::fmt;
use std::path::PathBuf;

/// Where one input comes from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum InputSource {
    /// Standard input, written as `-`
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Parse a single argument without glob expansion
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve file patterns to inputs; `-` stands for stdin and is kept as is
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<InputSource>> {
    let mut inputs = Vec::new();
    let mut stdin = false;

    for pattern in patterns {
        if pattern == "-" {
            stdin = true;
            continue;
        }

        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;
        for path_result in paths {
            let path = path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;
            if path.is_file() {
                inputs.push(InputSource::File(path));
            }
        }
    }

    // Remove duplicates and sort
    inputs.sort();
    inputs.dedup();
    if stdin {
        inputs.insert(0, InputSource::Stdin);
    }

    if inputs.is_empty() {
        anyhow::bail!("No files found matching the provided patterns");
    }

    Ok(inputs)
}
