//! Policy Cache - replay tool
//!
//! Reads cache commands from stdin and applies them to one cache instance,
//! printing lookups, `DISCARD: <key>` lines and statistics on stdout.
//!
//! # Commands
//! - `put <key> <value>` - store a value (the rest of the line is the value)
//! - `get <key>` - print the value or `None`
//! - `print` - print the current contents, next victim first
//! - `stats` - print statistics as JSON

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use policy_cache::{policy, CachePolicy, Config, DynCache};

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Put { key: String, value: String },
    Get { key: String },
    Print,
    Stats,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match verb.to_ascii_lowercase().as_str() {
        "put" => {
            let (key, value) = rest.split_once(char::is_whitespace)?;
            Some(Command::Put {
                key: key.to_string(),
                value: value.trim().to_string(),
            })
        }
        "get" if !rest.is_empty() && !rest.contains(char::is_whitespace) => Some(Command::Get {
            key: rest.to_string(),
        }),
        "print" if rest.is_empty() => Some(Command::Print),
        "stats" if rest.is_empty() => Some(Command::Stats),
        _ => None,
    }
}

fn print_cache(cache: &DynCache<String, String>) {
    println!("Current cache:");
    for (key, value) in cache.snapshot() {
        println!("{}: {}", key, value);
    }
}

fn print_stats(cache: &DynCache<String, String>) -> Result<()> {
    let json = serde_json::to_string(&cache.stats()).context("Failed to serialize stats")?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries command output
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load cache configuration")?;
    info!(
        "Configuration loaded: policy={}, capacity={}",
        config.policy, config.capacity
    );

    let mut cache: DynCache<String, String> =
        policy::from_config(&config).context("Failed to build cache")?;

    let stdin = io::stdin();
    for (number, line) in stdin.lock().lines().enumerate() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        match parse_command(&line) {
            Some(Command::Put { key, value }) => cache.put(key, value),
            Some(Command::Get { key }) => match cache.get(&key) {
                Some(value) => println!("{}", value),
                None => println!("None"),
            },
            Some(Command::Print) => print_cache(&cache),
            Some(Command::Stats) => print_stats(&cache)?,
            None => warn!("Skipping unrecognized command on line {}: {}", number + 1, line),
        }
    }

    print_stats(&cache)?;
    info!("Replay complete");
    Ok(())
}
