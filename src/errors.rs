// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnsibleError {
    /// Validation failed; nothing was spawned.
    #[error("Ansible execution was mis-configured: {}", .reason.join(", "))]
    Configuration { reason: Vec<String> },

    /// The OS could not start the external program.
    #[error("failed to launch '{program}': {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external program ran and exited non-zero.
    #[error("Process closed with code={code}")]
    ProcessExit { code: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Job file error: {0}")]
    JobFile(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnsibleError {
    /// Validation messages, when this is a configuration failure.
    pub fn reason(&self) -> Option<&[String]> {
        match self {
            AnsibleError::Configuration { reason } => Some(reason),
            _ => None,
        }
    }

    /// Exit code of the external program, when it exited non-zero.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            AnsibleError::ProcessExit { code } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnsibleError>;
