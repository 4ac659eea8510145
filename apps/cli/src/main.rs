mod commands;
mod config;
mod main_lib;

use commands::parse_command;
use config::Config;
use main_lib::{apply, build_presenter, init_tracing, spawn_printers};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is loaded first so the log format and config warnings both apply.
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env();
    let presenter = build_presenter(&config);
    let printers = spawn_printers(&presenter);

    tracing::info!("Ready. Commands: amount <text>, currency <code>, mode fiat|crypto, preview <eth>, dismiss, quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };
        match apply(&presenter, command) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => tracing::warn!("{}", e),
        }
    }

    for printer in printers {
        printer.abort();
    }
    Ok(())
}
