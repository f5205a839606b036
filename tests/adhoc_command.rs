// tests/adhoc_command.rs

use std::error::Error;

use ansible_cmd::errors::AnsibleError;
use ansible_cmd::{AdHoc, AnsibleCommand, ExecOptions};
use ansible_cmd_test_utils::{FakeRunner, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

fn hello() -> AdHoc {
    AdHoc::new()
        .module("shell")
        .hosts("local")
        .freeform("echo 'hello'")
}

#[tokio::test]
async fn freeform_arg_translates_to_ansible_command() -> TestResult {
    init_tracing();
    let runner = FakeRunner::new();

    hello().exec_with(&runner, ExecOptions::default()).await?;

    let inv = runner.only_invocation();
    assert_eq!(inv.program, "ansible");
    assert_eq!(inv.args, vec!["local", "-m", "shell", "-a", "echo 'hello'"]);
    Ok(())
}

#[tokio::test]
async fn missing_hosts_is_rejected_without_spawning() {
    let runner = FakeRunner::new();
    let cmd = AdHoc::new().module("shell").freeform("echo 'hello'");

    let err = cmd
        .exec_with(&runner, ExecOptions::default())
        .await
        .expect_err("must be rejected");

    match err {
        AnsibleError::Configuration { reason } => {
            assert_eq!(reason, vec!["\"hosts\" must be specified"]);
        }
        other => panic!("Expected Configuration error, got: {:?}", other),
    }
    assert_eq!(runner.spawn_count(), 0);
}

#[tokio::test]
async fn missing_module_is_rejected_without_spawning() {
    let runner = FakeRunner::new();
    let cmd = AdHoc::new().hosts("local").freeform("echo 'hello'");

    let err = cmd
        .exec_with(&runner, ExecOptions::default())
        .await
        .expect_err("must be rejected");

    assert_eq!(err.reason(), Some(&["\"module\" must be specified".to_string()][..]));
    assert_eq!(runner.spawn_count(), 0);
}

#[tokio::test]
async fn missing_both_fields_reports_one_message_each() {
    let runner = FakeRunner::new();

    let err = AdHoc::new()
        .exec_with(&runner, ExecOptions::default())
        .await
        .expect_err("must be rejected");

    assert_eq!(err.reason().map(<[String]>::len), Some(2));
    assert_eq!(runner.spawn_count(), 0);
}

#[test]
fn forks_flag_follows_module_args() {
    assert_eq!(
        hello().forks(10).compile_params(),
        vec!["local", "-m", "shell", "-a", "echo 'hello'", "-f", "10"]
    );
}

#[test]
fn verbose_flag_is_inserted_verbatim() {
    assert_eq!(
        hello().verbose("vvv").compile_params(),
        vec!["local", "-m", "shell", "-a", "echo 'hello'", "-vvv"]
    );
}

#[test]
fn user_flag() {
    assert_eq!(
        hello().user("root").compile_params(),
        vec!["local", "-m", "shell", "-a", "echo 'hello'", "-u", "root"]
    );
}

#[test]
fn sudo_flag() {
    assert_eq!(
        hello().as_sudo().compile_params(),
        vec!["local", "-m", "shell", "-a", "echo 'hello'", "-s"]
    );
}

#[test]
fn su_flag() {
    assert_eq!(
        hello().su("root").compile_params(),
        vec!["local", "-m", "shell", "-a", "echo 'hello'", "-U", "root"]
    );
}

#[test]
fn inventory_flag() {
    assert_eq!(
        hello().inventory("/etc/my/hosts").compile_params(),
        vec!["local", "-m", "shell", "-a", "echo 'hello'", "-i", "/etc/my/hosts"]
    );
}

#[test]
fn limit_and_private_key_flags() {
    assert_eq!(
        hello().private_key("/keys/id_rsa").limit("web*").compile_params(),
        vec![
            "local", "-m", "shell", "-a", "echo 'hello'", "-l", "web*", "--private-key",
            "/keys/id_rsa",
        ]
    );
}

#[test]
fn structured_args_follow_freeform() {
    let cmd = AdHoc::new()
        .hosts("all")
        .module("command")
        .args([("chdir", "/srv"), ("creates", "done.txt")])
        .freeform("make install");
    assert_eq!(
        cmd.compile_params(),
        vec!["all", "-m", "command", "-a", "make install chdir=/srv creates=done.txt"]
    );
}

#[test]
fn no_module_args_means_no_a_flag() {
    let params = AdHoc::new().hosts("all").module("ping").compile_params();
    assert_eq!(params, vec!["all", "-m", "ping"]);
}

#[tokio::test]
async fn non_zero_exit_is_reported_with_code() {
    let runner = FakeRunner::new().with_exit_code(1);

    let err = hello()
        .exec_with(&runner, ExecOptions::default())
        .await
        .expect_err("must fail");

    assert!(matches!(err, AnsibleError::ProcessExit { code: 1 }));
    assert_eq!(runner.spawn_count(), 1);
}
