// src/lib.rs

//! Fluent builders for `ansible` / `ansible-playbook` invocations and a
//! runner that manages the subprocess, streams its output and reports the
//! exit code.
//!
//! ```no_run
//! use ansible_cmd::{AnsibleCommand, ExecOptions, Playbook};
//! use serde_json::json;
//!
//! # async fn demo() -> ansible_cmd::Result<()> {
//! Playbook::new()
//!     .playbook("site")
//!     .variables(json!({"release": "1.2.3"}))
//!     .tags(["web", "db"])
//!     .inventory("hosts.ini")
//!     .exec(ExecOptions::new().cwd("deploy"))
//!     .await
//! # }
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;

use std::io::Write;

use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::{CliArgs, CliCommand};
use crate::config::{Job, load_job};
use crate::exec::{OutputEvent, StreamKind};

pub use crate::command::{AdHoc, AnsibleCommand, CommonConfig, Playbook};
pub use crate::errors::{AnsibleError, Result};
pub use crate::exec::{ExecOptions, Invocation, ProcessRunner, TokioProcessRunner};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - building the command from CLI flags or a job file
/// - dry-run output
/// - execution, forwarding streamed output to our own stdout/stderr
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let (job, mut options, dry_run) = match args.command {
        CliCommand::Adhoc(adhoc) => adhoc.into_job(),
        CliCommand::Playbook(playbook) => playbook.into_job(),
        CliCommand::Run(run) => {
            let (job, options) = load_job(&run.job_file)?;
            (job, options, run.dry_run)
        }
    };

    if dry_run {
        print_dry_run(&job)?;
        return Ok(());
    }

    let printer = if options.debug && !options.detached {
        let (tx, rx) = mpsc::unbounded_channel();
        options.output = Some(tx);
        Some(tokio::spawn(forward_output(rx)))
    } else {
        None
    };

    let result = job.exec_with(&TokioProcessRunner, options).await;

    // The sender was dropped with the invocation, so the printer drains and ends.
    if let Some(printer) = printer {
        printer.await?;
    }

    result.map_err(anyhow::Error::from)
}

/// Validate and print the command line without executing it.
fn print_dry_run(job: &Job) -> anyhow::Result<()> {
    let reason = job.validate();
    if !reason.is_empty() {
        return Err(AnsibleError::Configuration { reason }.into());
    }

    let mut line = vec![job.command_name().to_string()];
    line.extend(job.compile_params());
    println!("{}", line.join(" "));

    debug!("dry-run complete (no execution)");
    Ok(())
}

async fn forward_output(mut rx: mpsc::UnboundedReceiver<OutputEvent>) {
    while let Some(event) = rx.recv().await {
        let written = match event.stream {
            StreamKind::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(&event.data).and_then(|_| out.flush())
            }
            StreamKind::Stderr => {
                let mut err = std::io::stderr().lock();
                err.write_all(&event.data).and_then(|_| err.flush())
            }
        };
        if let Err(e) = written {
            debug!(error = %e, "failed forwarding child output");
        }
    }
}
