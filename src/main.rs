// src/main.rs

use gowatch::{cli, config, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("gowatch error: {err:?}");
        std::process::exit(2);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    let cfg = config::resolve(&args)?;
    logging::init_logging(args.log_level, cfg.verbose())?;
    run(cfg, args.dry_run).await?;
    Ok(())
}
