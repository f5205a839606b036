// src/config/model.rs

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::command::{AdHoc, AnsibleCommand, Playbook};
use crate::exec::ExecOptions;

/// A job file describing one invocation.
///
/// ```toml
/// [options]
/// debug = true
///
/// [playbook]
/// playbook = "site"
/// tags = ["web", "db"]
/// forks = 10
///
/// [playbook.variables]
/// release = "1.2.3"
/// ```
///
/// Exactly one of `[adhoc]` / `[playbook]` must be present; that is checked
/// when converting into a [`Job`](crate::config::Job).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    #[serde(default)]
    pub options: ExecOptions,

    #[serde(default)]
    pub adhoc: Option<AdHocSection>,

    #[serde(default)]
    pub playbook: Option<PlaybookSection>,
}

/// Keys shared by `[adhoc]` and `[playbook]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommonSection {
    pub forks: Option<u32>,
    pub user: Option<String>,
    pub inventory: Option<String>,
    pub limit: Option<String>,
    pub private_key: Option<String>,
    pub su: Option<String>,
    pub verbose: Option<String>,
    #[serde(default)]
    pub sudo: bool,
}

impl CommonSection {
    /// Apply every key that is present onto a builder.
    pub fn apply<C: AnsibleCommand>(self, mut cmd: C) -> C {
        let common = cmd.common_mut();
        common.forks = self.forks;
        common.user = self.user;
        common.inventory = self.inventory;
        common.limit = self.limit;
        common.private_key = self.private_key;
        common.su = self.su;
        common.verbose = self.verbose;
        common.sudo = self.sudo;
        cmd
    }
}

/// `[adhoc]` section.
///
/// `hosts` and `module` are optional here so that a missing one is reported
/// through the usual validation messages at exec time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdHocSection {
    pub hosts: Option<String>,
    pub module: Option<String>,
    pub freeform: Option<String>,

    #[serde(default)]
    pub args: Map<String, Value>,

    #[serde(flatten)]
    pub common: CommonSection,
}

impl From<AdHocSection> for AdHoc {
    fn from(section: AdHocSection) -> Self {
        let mut cmd = AdHoc::new().args(section.args);
        if let Some(hosts) = section.hosts {
            cmd = cmd.hosts(hosts);
        }
        if let Some(module) = section.module {
            cmd = cmd.module(module);
        }
        if let Some(freeform) = section.freeform {
            cmd = cmd.freeform(freeform);
        }
        section.common.apply(cmd)
    }
}

/// `[playbook]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaybookSection {
    pub playbook: Option<String>,
    pub variables: Option<Value>,

    #[serde(default)]
    pub ask_pass: bool,

    #[serde(default)]
    pub ask_sudo_pass: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub skip_tags: Vec<String>,

    #[serde(flatten)]
    pub common: CommonSection,
}

impl From<PlaybookSection> for Playbook {
    fn from(section: PlaybookSection) -> Self {
        let mut cmd = Playbook::new()
            .tags(section.tags)
            .skip_tags(section.skip_tags);
        if let Some(playbook) = section.playbook {
            cmd = cmd.playbook(playbook);
        }
        if let Some(variables) = section.variables {
            cmd = cmd.variables(variables);
        }
        if section.ask_pass {
            cmd = cmd.ask_pass();
        }
        if section.ask_sudo_pass {
            cmd = cmd.ask_sudo_pass();
        }
        section.common.apply(cmd)
    }
}
