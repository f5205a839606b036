// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::command::{AdHoc, AnsibleCommand, Playbook};
use crate::config::Job;
use crate::exec::ExecOptions;

/// Command-line arguments for `ansible-cmd`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ansible-cmd",
    version,
    about = "Build and run ansible / ansible-playbook invocations.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ANSIBLE_CMD_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run a single module against a host pattern.
    Adhoc(AdHocArgs),
    /// Run a playbook.
    Playbook(PlaybookArgs),
    /// Run the job described by a TOML file.
    Run(RunFileArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AdHocArgs {
    /// Host pattern to target.
    pub hosts: String,

    /// Module to run.
    #[arg(short, long)]
    pub module: String,

    /// Freeform module argument, passed before any `--arg` pairs.
    #[arg(short = 'a', long = "args", value_name = "FREEFORM")]
    pub freeform: Option<String>,

    /// Structured module argument; may be repeated.
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub arg: Vec<(String, String)>,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PlaybookArgs {
    /// Playbook name without the `.yml` extension.
    pub playbook: String,

    /// Extra variables as a JSON document.
    #[arg(short = 'e', long, value_name = "JSON", value_parser = parse_json)]
    pub extra_vars: Option<serde_json::Value>,

    #[arg(long)]
    pub ask_pass: bool,

    #[arg(long)]
    pub ask_sudo_pass: bool,

    /// Only run plays and tasks tagged with these values.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Skip plays and tasks tagged with these values.
    #[arg(long, value_delimiter = ',')]
    pub skip_tags: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Clone, Args)]
pub struct RunFileArgs {
    /// Path to the job file (TOML).
    #[arg(value_name = "PATH")]
    pub job_file: PathBuf,

    /// Validate and print the command line, but don't execute it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Flags both programs understand.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    #[arg(short, long)]
    pub forks: Option<u32>,

    #[arg(short, long)]
    pub user: Option<String>,

    #[arg(short, long)]
    pub inventory: Option<String>,

    #[arg(short, long)]
    pub limit: Option<String>,

    #[arg(long, value_name = "PATH")]
    pub private_key: Option<String>,

    #[arg(short = 'U', long)]
    pub su: Option<String>,

    /// Verbosity as repeated v's, e.g. `vvv`.
    #[arg(long, value_name = "LEVEL")]
    pub verbose: Option<String>,

    #[arg(short, long)]
    pub sudo: bool,
}

/// Run-time options.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Stream the program's output and log its exit code.
    #[arg(long)]
    pub debug: bool,

    /// Silence all standard streams of the program.
    #[arg(long)]
    pub detached: bool,

    /// Keep the program's own output buffering.
    #[arg(long)]
    pub buffered: bool,

    /// Working directory for the program.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Extra environment variable; may be repeated.
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub env: Vec<(String, String)>,

    /// Validate and print the command line, but don't execute it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CommonArgs {
    fn apply<C: AnsibleCommand>(self, mut cmd: C) -> C {
        if let Some(forks) = self.forks {
            cmd = cmd.forks(forks);
        }
        if let Some(user) = self.user {
            cmd = cmd.user(user);
        }
        if let Some(inventory) = self.inventory {
            cmd = cmd.inventory(inventory);
        }
        if let Some(limit) = self.limit {
            cmd = cmd.limit(limit);
        }
        if let Some(private_key) = self.private_key {
            cmd = cmd.private_key(private_key);
        }
        if let Some(su) = self.su {
            cmd = cmd.su(su);
        }
        if let Some(verbose) = self.verbose {
            cmd = cmd.verbose(verbose);
        }
        if self.sudo {
            cmd = cmd.as_sudo();
        }
        cmd
    }
}

impl From<RunArgs> for ExecOptions {
    fn from(run: RunArgs) -> Self {
        ExecOptions {
            debug: run.debug,
            detached: run.detached,
            buffered: run.buffered,
            env: run.env.into_iter().collect(),
            cwd: run.cwd,
            output: None,
        }
    }
}

impl AdHocArgs {
    /// Build the command, its options and the dry-run flag.
    pub fn into_job(self) -> (Job, ExecOptions, bool) {
        let mut cmd = AdHoc::new().hosts(self.hosts).module(self.module);
        if !self.arg.is_empty() {
            cmd = cmd.args(self.arg);
        }
        if let Some(freeform) = self.freeform {
            cmd = cmd.freeform(freeform);
        }
        let cmd = self.common.apply(cmd);
        let dry_run = self.run.dry_run;
        (Job::AdHoc(cmd), self.run.into(), dry_run)
    }
}

impl PlaybookArgs {
    /// Build the command, its options and the dry-run flag.
    pub fn into_job(self) -> (Job, ExecOptions, bool) {
        let mut cmd = Playbook::new()
            .playbook(self.playbook)
            .tags(self.tags)
            .skip_tags(self.skip_tags);
        if let Some(vars) = self.extra_vars {
            cmd = cmd.variables(vars);
        }
        if self.ask_pass {
            cmd = cmd.ask_pass();
        }
        if self.ask_sudo_pass {
            cmd = cmd.ask_sudo_pass();
        }
        let cmd = self.common.apply(cmd);
        let dry_run = self.run.dry_run;
        (Job::Playbook(cmd), self.run.into(), dry_run)
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_json(s: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn adhoc_arguments_build_command() {
        let args = parse_from(&[
            "ansible-cmd", "adhoc", "local", "-m", "shell", "-a", "echo hi", "--arg", "chdir=/tmp",
            "-f", "5", "--sudo", "--buffered", "--env", "FOO=bar",
        ]);
        let CliCommand::Adhoc(adhoc) = args.command else {
            panic!("expected adhoc subcommand");
        };
        let (job, options, dry_run) = adhoc.into_job();
        assert!(!dry_run);
        assert!(options.buffered);
        assert_eq!(options.env.get("FOO").map(String::as_str), Some("bar"));
        assert_eq!(
            job.compile_params(),
            vec!["local", "-m", "shell", "-a", "echo hi chdir=/tmp", "-f", "5", "-s"]
        );
    }

    #[test]
    fn playbook_arguments_build_command() {
        let args = parse_from(&[
            "ansible-cmd", "playbook", "site", "-e", r#"{"foo":"bar"}"#, "--tags", "a,b",
            "--verbose", "vv", "--dry-run",
        ]);
        let CliCommand::Playbook(pb) = args.command else {
            panic!("expected playbook subcommand");
        };
        let (job, _options, dry_run) = pb.into_job();
        assert!(dry_run);
        assert_eq!(
            job.compile_params(),
            vec!["site.yml", "-e", r#"{"foo":"bar"}"#, "--tags=a,b", "-vv"]
        );
    }

    #[test]
    fn key_val_requires_equals() {
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
        assert_eq!(parse_key_val("a=b=c"), Ok(("a".into(), "b=c".into())));
    }
}
