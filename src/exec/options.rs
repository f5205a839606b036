// src/exec/options.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use tokio::sync::mpsc;

/// Environment variable that switches off Python's own output buffering in
/// the invoked program.
pub const UNBUFFERED_ENV: &str = "PYTHONUNBUFFERED";

/// Which standard stream a chunk of output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// One chunk of data read from the child's stdout or stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEvent {
    pub stream: StreamKind,
    pub data: Vec<u8>,
}

pub type OutputSender = mpsc::UnboundedSender<OutputEvent>;

/// Run-time options for a single `exec`.
///
/// ```toml
/// [options]
/// debug = true
/// buffered = false
/// cwd = "deploy"
///
/// [options.env]
/// ANSIBLE_HOST_KEY_CHECKING = "False"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecOptions {
    /// Stream stdout/stderr chunks and log the exit code.
    pub debug: bool,

    /// Silence all three standard streams; nothing is ever streamed.
    pub detached: bool,

    /// Leave the program's own output buffering alone.
    pub buffered: bool,

    /// Extra environment, applied over `PATH` and `PYTHONUNBUFFERED`.
    pub env: BTreeMap<String, String>,

    /// Working directory; `None` inherits the caller's.
    pub cwd: Option<PathBuf>,

    /// Where streamed chunks go when `debug` is set.
    #[serde(skip)]
    pub output: Option<OutputSender>,
}

impl ExecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn detached(mut self, detached: bool) -> Self {
        self.detached = detached;
        self
    }

    pub fn buffered(mut self, buffered: bool) -> Self {
        self.buffered = buffered;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn output(mut self, tx: OutputSender) -> Self {
        self.output = Some(tx);
        self
    }
}

/// Everything needed to launch the external program once.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// The complete child environment; nothing else is inherited.
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
    pub debug: bool,
    pub detached: bool,
    pub output: Option<OutputSender>,
}

impl Invocation {
    /// Build an invocation, merging the host `PATH`, the unbuffered-mode
    /// variable and the caller's environment (caller keys win).
    pub fn new(program: impl Into<String>, args: Vec<String>, options: ExecOptions) -> Self {
        let ExecOptions {
            debug,
            detached,
            buffered,
            env: extra_env,
            cwd,
            output,
        } = options;

        let mut env = BTreeMap::new();
        if let Ok(path) = std::env::var("PATH") {
            env.insert("PATH".to_string(), path);
        }
        let unbuffered = if buffered { "" } else { "1" };
        env.insert(UNBUFFERED_ENV.to_string(), unbuffered.to_string());
        env.extend(extra_env);

        Self {
            program: program.into(),
            args,
            env,
            cwd,
            debug,
            detached,
            output,
        }
    }

    /// Whether output chunks should be piped and surfaced.
    pub fn streams_output(&self) -> bool {
        self.debug && !self.detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbuffered_by_default() {
        let inv = Invocation::new("ansible", vec![], ExecOptions::default());
        assert_eq!(inv.env.get(UNBUFFERED_ENV).map(String::as_str), Some("1"));
    }

    #[test]
    fn buffered_sets_empty_value() {
        let inv = Invocation::new("ansible", vec![], ExecOptions::new().buffered(true));
        assert_eq!(inv.env.get(UNBUFFERED_ENV).map(String::as_str), Some(""));
    }

    #[test]
    fn caller_env_wins() {
        let inv = Invocation::new(
            "ansible",
            vec![],
            ExecOptions::new()
                .env(UNBUFFERED_ENV, "0")
                .env("PATH", "/opt/bin")
                .env("FOO", "bar"),
        );
        assert_eq!(inv.env.get(UNBUFFERED_ENV).map(String::as_str), Some("0"));
        assert_eq!(inv.env.get("PATH").map(String::as_str), Some("/opt/bin"));
        assert_eq!(inv.env.get("FOO").map(String::as_str), Some("bar"));
    }

    #[test]
    fn host_path_is_propagated() {
        let inv = Invocation::new("ansible", vec![], ExecOptions::default());
        assert_eq!(inv.env.get("PATH").cloned(), std::env::var("PATH").ok());
    }

    #[test]
    fn detached_never_streams() {
        let inv = Invocation::new(
            "ansible",
            vec![],
            ExecOptions::new().debug(true).detached(true),
        );
        assert!(!inv.streams_output());
    }

    #[test]
    fn options_parse_from_toml() {
        let opts: ExecOptions = toml::from_str(
            r#"
debug = true
cwd = "deploy"
[env]
FOO = "bar"
"#,
        )
        .unwrap();
        assert!(opts.debug);
        assert!(!opts.buffered);
        assert_eq!(opts.cwd, Some(PathBuf::from("deploy")));
        assert_eq!(opts.env.get("FOO").map(String::as_str), Some("bar"));
        assert!(opts.output.is_none());
    }
}
