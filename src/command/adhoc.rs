// src/command/adhoc.rs

use serde_json::{Map, Value};

use crate::command::args::format_module_args;
use crate::command::{require, AnsibleCommand, CommonConfig};

/// Single-module invocation against a host pattern (`ansible`).
///
/// ```no_run
/// use ansible_cmd::{AdHoc, AnsibleCommand, ExecOptions};
///
/// # async fn demo() -> ansible_cmd::Result<()> {
/// AdHoc::new()
///     .hosts("local")
///     .module("shell")
///     .freeform("echo 'hello'")
///     .exec(ExecOptions::default())
///     .await
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdHoc {
    common: CommonConfig,
    hosts: Option<String>,
    module: Option<String>,
    args: Map<String, Value>,
    freeform: Option<String>,
}

impl AdHoc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hosts(mut self, hosts: impl Into<String>) -> Self {
        self.hosts = Some(hosts.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Structured `key=value` module arguments. Replaces any earlier set.
    pub fn args<I, K, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.args = args
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Unparsed argument string, emitted ahead of the structured pairs.
    pub fn freeform(mut self, freeform: impl Into<String>) -> Self {
        self.freeform = Some(freeform.into());
        self
    }
}

impl AnsibleCommand for AdHoc {
    fn command_name(&self) -> &'static str {
        "ansible"
    }

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonConfig {
        &mut self.common
    }

    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, self.hosts.as_deref(), "\"hosts\" must be specified");
        require(&mut errors, self.module.as_deref(), "\"module\" must be specified");
        errors
    }

    fn compile_params(&self) -> Vec<String> {
        let mut params = vec![
            self.hosts.clone().unwrap_or_default(),
            "-m".to_string(),
            self.module.clone().unwrap_or_default(),
        ];

        if let Some(formatted) = format_module_args(&self.args, self.freeform.as_deref()) {
            params.push("-a".to_string());
            params.push(formatted);
        }

        self.common().compile_suffix(&mut params);
        params
    }
}
