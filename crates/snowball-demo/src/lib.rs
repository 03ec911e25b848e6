//! Shared fixtures and start-up for the demo binaries.

use std::path::PathBuf;

use clap::Parser;
use snowball::{Session, SessionConfig, SnowballError};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Command line accepted by every demo binary.
#[derive(Parser, Debug)]
#[command(about = "snowball fixture program")]
pub struct DemoArgs {
    /// YAML session configuration; build defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Installs the fmt subscriber filtered by `RUST_LOG`, parses the command
/// line, and builds the session.
pub fn start() -> Result<Session, SnowballError> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    let args = DemoArgs::parse();
    let config = match &args.config {
        Some(path) => SessionConfig::from_path(path)?,
        None => SessionConfig::default(),
    };
    debug!(?config, "demo session configured");
    Ok(Session::with_config(config))
}

/// Factorial with the base case `factorial(0) == 0`.
pub fn factorial(number: u32) -> u32 {
    if number <= 1 {
        number
    } else {
        factorial(number - 1) * number
    }
}

/// Fills every slot of `values` with `i32::MAX`.
pub fn fill_vec(values: &mut [i32]) {
    for value in values.iter_mut() {
        *value = i32::MAX;
    }
}

/// Returns whether every slot holds `i32::MAX`.
pub fn verify_vec(values: &[i32]) -> bool {
    values.iter().all(|value| *value == i32::MAX)
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("index {index} out of range for {len} strings")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Buffer of reversed strings.
#[derive(Debug, Default)]
pub struct StringFactory {
    buf: Vec<String>,
}

impl StringFactory {
    pub fn append(&mut self, text: &str) -> bool {
        self.buf.push(text.chars().rev().collect());
        true
    }

    pub fn at(&mut self, index: usize) -> Result<String, OutOfRange> {
        self.buf.get(index).cloned().ok_or(OutOfRange {
            index,
            len: self.buf.len(),
        })
    }

    pub fn invert(&mut self) {
        self.buf.reverse();
    }
}

/// Object fixture with a setter returning itself and a getter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Member {
    pub member: i32,
}

impl Member {
    pub fn set(&mut self, value: i32) -> Member {
        self.member = value;
        self.clone()
    }

    pub fn get(&self) -> i32 {
        self.member
    }
}
