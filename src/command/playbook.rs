// src/command/playbook.rs

use serde_json::Value;

use crate::command::{require, AnsibleCommand, CommonConfig};

/// Multi-step invocation driven by a playbook file (`ansible-playbook`).
#[derive(Debug, Clone, Default)]
pub struct Playbook {
    common: CommonConfig,
    playbook: Option<String>,
    variables: Option<Value>,
    ask_pass: bool,
    ask_sudo_pass: bool,
    tags: Vec<String>,
    skip_tags: Vec<String>,
}

impl Playbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Playbook base name; `.yml` is appended when compiling.
    pub fn playbook(mut self, playbook: impl Into<String>) -> Self {
        self.playbook = Some(playbook.into());
        self
    }

    /// Extra variables, passed as compact JSON with `-e`. `null` counts as unset.
    pub fn variables(mut self, variables: impl Into<Value>) -> Self {
        self.variables = Some(variables.into());
        self
    }

    pub fn ask_pass(mut self) -> Self {
        self.ask_pass = true;
        self
    }

    pub fn ask_sudo_pass(mut self) -> Self {
        self.ask_sudo_pass = true;
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn skip_tags<I, S>(mut self, skip_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_tags = skip_tags.into_iter().map(Into::into).collect();
        self
    }
}

impl AnsibleCommand for Playbook {
    fn command_name(&self) -> &'static str {
        "ansible-playbook"
    }

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonConfig {
        &mut self.common
    }

    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, self.playbook.as_deref(), "'playbook' must be specified");
        errors
    }

    fn compile_params(&self) -> Vec<String> {
        let mut params = vec![format!("{}.yml", self.playbook.as_deref().unwrap_or_default())];

        if let Some(variables) = self.variables.as_ref().filter(|v| !v.is_null()) {
            params.push("-e".to_string());
            params.push(variables.to_string());
        }

        if self.ask_pass {
            params.push("--ask-pass".to_string());
        }

        if self.ask_sudo_pass {
            params.push("--ask-sudo-pass".to_string());
        }

        if !self.tags.is_empty() {
            params.push(format!("--tags={}", self.tags.join(",")));
        }

        if !self.skip_tags.is_empty() {
            params.push(format!("--skip-tags={}", self.skip_tags.join(",")));
        }

        self.common().compile_suffix(&mut params);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_playbook_is_reported() {
        assert_eq!(Playbook::new().validate(), vec!["'playbook' must be specified"]);
    }

    #[test]
    fn variables_keep_insertion_order() {
        let cmd = Playbook::new()
            .playbook("site")
            .variables(json!({"zeta": 1, "alpha": {"bar": ["shu"]}}));
        assert_eq!(
            cmd.compile_params(),
            vec!["site.yml", "-e", r#"{"zeta":1,"alpha":{"bar":["shu"]}}"#]
        );
    }

    #[test]
    fn playbook_specific_flags_in_order() {
        let cmd = Playbook::new()
            .playbook("site")
            .skip_tags(["slow"])
            .tags(vec!["web".to_string(), "db".to_string()])
            .ask_sudo_pass()
            .ask_pass()
            .as_sudo();
        assert_eq!(
            cmd.compile_params(),
            vec![
                "site.yml",
                "--ask-pass",
                "--ask-sudo-pass",
                "--tags=web,db",
                "--skip-tags=slow",
                "-s",
            ]
        );
    }

    #[test]
    fn null_variables_are_omitted() {
        let cmd = Playbook::new().playbook("t").variables(Value::Null);
        assert_eq!(cmd.compile_params(), vec!["t.yml"]);
    }

    #[test]
    fn empty_tag_list_is_omitted() {
        let cmd = Playbook::new().playbook("site").tags(Vec::<String>::new());
        assert_eq!(cmd.compile_params(), vec!["site.yml"]);
    }
}
