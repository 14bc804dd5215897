use std::env;
use std::error::Error;
use std::process;

use ledger_core::{run, run_async};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run_app() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run_app() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [path] => run(path, std::io::stdout()).map_err(|e| e.to_string().into()),
        [flag, path] if flag == "--async" => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_async(path.clone(), std::io::stdout()))
        }
        _ => Err("Usage: ledger-core [--async] commands.csv".into()),
    }
}
