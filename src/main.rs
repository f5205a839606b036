// src/main.rs

use ansible_cmd::{AnsibleError, cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("ansible-cmd error: {err:?}");
        let code = err
            .downcast_ref::<AnsibleError>()
            .and_then(AnsibleError::exit_code)
            .filter(|code| *code > 0)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
