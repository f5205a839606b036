// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::job::Job;
use crate::config::model::JobFile;
use crate::errors::Result;
use crate::exec::ExecOptions;

/// Load a job file and return the raw `JobFile`.
///
/// This only performs TOML deserialization; use [`load_job`] to also turn it
/// into a runnable [`Job`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<JobFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let file: JobFile = toml::from_str(&contents)?;

    Ok(file)
}

/// Load a job file and convert it into a command plus its run-time options.
///
/// Mandatory command fields are not checked here; they surface as a
/// configuration error when the job is executed.
pub fn load_job(path: impl AsRef<Path>) -> Result<(Job, ExecOptions)> {
    let path = path.as_ref();
    let file = load_from_path(path)?;
    let (job, options) = file.into_job()?;
    debug!(path = %path.display(), command = job.command_name(), "loaded job file");
    Ok((job, options))
}
