// src/config/job.rs

use std::future::Future;

use crate::command::{AdHoc, AnsibleCommand, Playbook};
use crate::config::model::JobFile;
use crate::errors::{AnsibleError, Result};
use crate::exec::{ExecOptions, ProcessRunner};

/// A configured command of either kind.
#[derive(Debug, Clone)]
pub enum Job {
    AdHoc(AdHoc),
    Playbook(Playbook),
}

impl Job {
    pub fn command_name(&self) -> &'static str {
        match self {
            Job::AdHoc(cmd) => cmd.command_name(),
            Job::Playbook(cmd) => cmd.command_name(),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        match self {
            Job::AdHoc(cmd) => cmd.validate(),
            Job::Playbook(cmd) => cmd.validate(),
        }
    }

    pub fn compile_params(&self) -> Vec<String> {
        match self {
            Job::AdHoc(cmd) => cmd.compile_params(),
            Job::Playbook(cmd) => cmd.compile_params(),
        }
    }

    pub fn exec_with<'a, R>(
        &'a self,
        runner: &'a R,
        options: ExecOptions,
    ) -> impl Future<Output = Result<()>> + Send + 'a
    where
        R: ProcessRunner + ?Sized,
    {
        let prepared = match self {
            Job::AdHoc(cmd) => cmd.prepare(options),
            Job::Playbook(cmd) => cmd.prepare(options),
        };
        async move { runner.run(prepared?).await }
    }
}

impl From<AdHoc> for Job {
    fn from(cmd: AdHoc) -> Self {
        Job::AdHoc(cmd)
    }
}

impl From<Playbook> for Job {
    fn from(cmd: Playbook) -> Self {
        Job::Playbook(cmd)
    }
}

impl JobFile {
    /// Split into the configured command and its run-time options.
    pub fn into_job(self) -> Result<(Job, ExecOptions)> {
        let job = match (self.adhoc, self.playbook) {
            (Some(adhoc), None) => Job::AdHoc(adhoc.into()),
            (None, Some(playbook)) => Job::Playbook(playbook.into()),
            (None, None) => {
                return Err(AnsibleError::JobFile(
                    "job file must contain an [adhoc] or a [playbook] section".to_string(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(AnsibleError::JobFile(
                    "job file must not contain both [adhoc] and [playbook] sections".to_string(),
                ));
            }
        };
        Ok((job, self.options))
    }
}
