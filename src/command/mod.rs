// src/command/mod.rs

//! Fluent builders for the two external programs.
//!
//! Each variant ([`AdHoc`], [`Playbook`]) owns its own configuration plus a
//! [`CommonConfig`] holding the flags both programs understand. The shared
//! behaviour (common setters, common-suffix compilation, validation and
//! execution) lives on the [`AnsibleCommand`] trait so the variants compose it
//! instead of inheriting it.

pub mod adhoc;
pub mod args;
pub mod playbook;

use std::future::Future;

use tracing::warn;

use crate::errors::{AnsibleError, Result};
use crate::exec::{ExecOptions, Invocation, ProcessRunner, TokioProcessRunner};

pub use adhoc::AdHoc;
pub use args::format_module_args;
pub use playbook::Playbook;

static DEFAULT_RUNNER: TokioProcessRunner = TokioProcessRunner;

/// Flags shared by both programs, compiled after the variant-specific part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonConfig {
    pub forks: Option<u32>,
    pub user: Option<String>,
    pub inventory: Option<String>,
    pub limit: Option<String>,
    pub private_key: Option<String>,
    pub su: Option<String>,
    pub verbose: Option<String>,
    pub sudo: bool,
}

impl CommonConfig {
    /// Append the common suffix in its fixed order:
    /// `-f, -u, -i, -l, --private-key, -U, -<verbose>, -s`.
    pub fn compile_suffix(&self, params: &mut Vec<String>) {
        let forks = self.forks.filter(|f| *f > 0).map(|f| f.to_string());
        push_flag(params, "-f", forks.as_deref());
        push_flag(params, "-u", self.user.as_deref());
        push_flag(params, "-i", self.inventory.as_deref());
        push_flag(params, "-l", self.limit.as_deref());
        push_flag(params, "--private-key", self.private_key.as_deref());
        push_flag(params, "-U", self.su.as_deref());

        if let Some(level) = self.verbose.as_deref().filter(|l| !l.is_empty()) {
            params.push(format!("-{level}"));
        }

        if self.sudo {
            params.push("-s".to_string());
        }
    }
}

/// Push `flag value` when the value is set and non-empty.
fn push_flag(params: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push(flag.to_string());
        params.push(value.to_string());
    }
}

/// Record `message` when a mandatory field is missing.
pub(crate) fn require(errors: &mut Vec<String>, value: Option<&str>, message: &str) {
    if value.is_none() {
        errors.push(message.to_string());
    }
}

/// Shared capability of every command builder.
pub trait AnsibleCommand {
    /// Executable name of the external program.
    fn command_name(&self) -> &'static str;

    fn common(&self) -> &CommonConfig;

    fn common_mut(&mut self) -> &mut CommonConfig;

    /// Missing-field messages; empty means the command can run.
    fn validate(&self) -> Vec<String>;

    /// Ordered argument vector: variant part, then the common suffix.
    fn compile_params(&self) -> Vec<String>;

    fn forks(mut self, forks: u32) -> Self
    where
        Self: Sized,
    {
        self.common_mut().forks = Some(forks);
        self
    }

    fn user(mut self, user: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().user = Some(user.into());
        self
    }

    fn inventory(mut self, inventory: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().inventory = Some(inventory.into());
        self
    }

    fn limit(mut self, limit: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().limit = Some(limit.into());
        self
    }

    fn private_key(mut self, private_key: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().private_key = Some(private_key.into());
        self
    }

    fn su(mut self, su: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().su = Some(su.into());
        self
    }

    /// Verbosity as repeated `v`s, e.g. `"vvv"`; passed through verbatim.
    fn verbose(mut self, level: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().verbose = Some(level.into());
        self
    }

    fn as_sudo(mut self) -> Self
    where
        Self: Sized,
    {
        self.common_mut().sudo = true;
        self
    }

    /// Validate and resolve into an [`Invocation`] without spawning anything.
    fn prepare(&self, options: ExecOptions) -> Result<Invocation> {
        let reason = self.validate();
        if !reason.is_empty() {
            warn!(command = self.command_name(), ?reason, "refusing to run mis-configured command");
            return Err(AnsibleError::Configuration { reason });
        }
        Ok(Invocation::new(self.command_name(), self.compile_params(), options))
    }

    /// Run through the given runner.
    ///
    /// Validation happens before the returned future is polled, so a
    /// mis-configured command never reaches the runner.
    fn exec_with<R>(&self, runner: &R, options: ExecOptions) -> impl Future<Output = Result<()>> + Send
    where
        R: ProcessRunner + ?Sized,
    {
        let prepared = self.prepare(options);
        async move { runner.run(prepared?).await }
    }

    /// Run as a real OS process.
    fn exec(&self, options: ExecOptions) -> impl Future<Output = Result<()>> + Send {
        self.exec_with(&DEFAULT_RUNNER, options)
    }
}
