//! Session configuration: stack dumps, colour, and the abort policy.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SnowballError;

/// Exit status used by the terminating abort policy.
pub const DEFAULT_EXIT_STATUS: i32 = 6;

fn default_exit_status() -> i32 {
    DEFAULT_EXIT_STATUS
}

/// What a failed fatal assertion does once it has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AbortPolicy {
    /// End the process immediately with `status`, skipping destructors.
    Terminate {
        /// Process exit status.
        #[serde(default = "default_exit_status")]
        status: i32,
    },
    /// Return [`SnowballError::Assertion`] to the caller.
    Raise,
}

impl AbortPolicy {
    /// Policy compiled in as the default for this build.
    ///
    /// Builds with the `raise` feature raise; every other build terminates
    /// with [`DEFAULT_EXIT_STATUS`].
    pub const fn build_default() -> Self {
        if cfg!(feature = "raise") {
            AbortPolicy::Raise
        } else {
            AbortPolicy::Terminate {
                status: DEFAULT_EXIT_STATUS,
            }
        }
    }
}

impl Default for AbortPolicy {
    fn default() -> Self {
        Self::build_default()
    }
}

/// Configuration fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Dump the call stack after every failed assertion.
    #[serde(default = "SessionConfig::default_print_stack")]
    pub print_stack: bool,
    /// Wrap console markers in ANSI colour sequences.
    #[serde(default = "SessionConfig::default_color")]
    pub color: bool,
    /// Behaviour of failed fatal assertions.
    #[serde(default)]
    pub abort: AbortPolicy,
}

impl SessionConfig {
    const fn default_print_stack() -> bool {
        true
    }

    const fn default_color() -> bool {
        true
    }

    /// Configuration that raises on fatal failures and prints no stack.
    ///
    /// Suited to embedding the engine inside another runner.
    pub fn embedded() -> Self {
        Self {
            print_stack: false,
            color: false,
            abort: AbortPolicy::Raise,
        }
    }

    /// Decodes a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, SnowballError> {
        serde_yaml::from_str(text).map_err(|err| SnowballError::Config {
            reason: err.to_string(),
        })
    }

    /// Reads and decodes a YAML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnowballError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| SnowballError::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::from_yaml_str(&text)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            print_stack: Self::default_print_stack(),
            color: Self::default_color(),
            abort: AbortPolicy::default(),
        }
    }
}
