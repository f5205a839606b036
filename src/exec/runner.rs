// src/exec/runner.rs

//! Process runner abstraction and the Tokio-backed implementation.
//!
//! Builders talk to a `ProcessRunner` instead of spawning directly, which
//! lets tests substitute a runner that records invocations and never starts
//! a real process.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::{Duration, timeout};
use tracing::{debug, info, warn};

use crate::errors::{AnsibleError, Result};
use crate::exec::options::{Invocation, OutputEvent, OutputSender, StreamKind};

const READ_CHUNK: usize = 8 * 1024;

/// How long a pump may keep draining after the child has exited.
const DRAIN_GRACE: Duration = Duration::from_millis(200);

/// Launches one external process per call and settles when it exits.
///
/// Implementations must resolve `Ok(())` on exit code 0, fail with
/// [`AnsibleError::ProcessExit`] on any other code and with
/// [`AnsibleError::ProcessLaunch`] when the program cannot be started.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: Invocation) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Runner that spawns real OS processes via `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl ProcessRunner for TokioProcessRunner {
    fn run(&self, invocation: Invocation) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(run_invocation(invocation))
    }
}

async fn run_invocation(invocation: Invocation) -> Result<()> {
    let streaming = invocation.streams_output();
    let Invocation {
        program,
        args,
        env,
        cwd,
        debug,
        detached,
        output,
    } = invocation;

    info!(program = %program, args = ?args, cwd = ?cwd, detached, "starting process");

    let mut std_cmd = std::process::Command::new(&program);
    std_cmd.args(&args).env_clear().envs(&env);
    if let Some(dir) = &cwd {
        std_cmd.current_dir(dir);
    }

    if detached {
        std_cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            std_cmd.process_group(0);
        }
    } else if streaming {
        std_cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    }

    let mut child = Command::from(std_cmd)
        .spawn()
        .map_err(|source| AnsibleError::ProcessLaunch {
            program: program.clone(),
            source,
        })?;

    let stdout_pump = tokio::spawn(pump(StreamKind::Stdout, child.stdout.take(), output.clone()));
    let stderr_pump = tokio::spawn(pump(StreamKind::Stderr, child.stderr.take(), output));

    // Settle on exit, not on pipe EOF: a descendant may keep the pipes open.
    let status = child.wait().await;
    tokio::join!(finish_pump(stdout_pump), finish_pump(stderr_pump));
    let status = status?;

    let code = status.code().unwrap_or(-1);
    if debug {
        info!(program = %program, exit_code = code, "Exit. Code={code}");
    } else {
        debug!(program = %program, exit_code = code, "process exited");
    }

    if status.success() {
        Ok(())
    } else {
        Err(AnsibleError::ProcessExit { code })
    }
}

/// Give a pump `DRAIN_GRACE` to flush what is already buffered, then stop it.
///
/// The handle is awaited after `abort`, so no chunk can be sent once this
/// returns.
async fn finish_pump(mut handle: JoinHandle<()>) {
    if timeout(DRAIN_GRACE, &mut handle).await.is_err() {
        debug!("output pipe still open after exit; stopping reader");
        handle.abort();
        let _ = handle.await;
    }
}

/// Forward raw chunks from one child stream until EOF.
async fn pump<R>(stream: StreamKind, reader: Option<R>, sink: Option<OutputSender>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(mut reader) = reader else {
        return;
    };

    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let data = buf[..n].to_vec();
                debug!(%stream, "{}", String::from_utf8_lossy(&data));
                if let Some(tx) = &sink {
                    // A dropped receiver only means nobody is listening.
                    let _ = tx.send(OutputEvent { stream, data });
                }
            }
            Err(e) => {
                warn!(%stream, error = %e, "failed reading child output");
                break;
            }
        }
    }
}
