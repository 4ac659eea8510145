//! Line commands read from stdin.

use std::str::FromStr;

use anyhow::{anyhow, bail};
use ethwallet_core::InputMode;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Raw amount text, passed through unparsed
    Amount(String),
    Currency(String),
    Mode(InputMode),
    /// ETH amount to value in every preview currency
    Preview(Decimal),
    Dismiss,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "amount" => Command::Amount(arg.to_string()),
        "currency" if !arg.is_empty() => Command::Currency(arg.to_string()),
        "currency" => bail!("Usage: currency <EUR|USD|GBP>"),
        "mode" => Command::Mode(parse_mode(arg)?),
        "preview" => Command::Preview(
            Decimal::from_str(arg).map_err(|_| anyhow!("Invalid ETH amount '{}'", arg))?,
        ),
        "dismiss" => Command::Dismiss,
        "quit" | "exit" => Command::Quit,
        other => bail!("Unknown command '{}'", other),
    };
    Ok(Some(command))
}

fn parse_mode(arg: &str) -> anyhow::Result<InputMode> {
    match arg.to_ascii_lowercase().as_str() {
        "fiat" => Ok(InputMode::FiatToCrypto),
        "crypto" => Ok(InputMode::CryptoOnly),
        _ => bail!("Usage: mode fiat|crypto"),
    }
}
