use std::env;
use std::path::Path;

use crate::config::{load_config, ConfigError, GeneratorConfig, CONFIG_ENV_VAR};
use crate::export::{
    preview_table, save_dataset, OutputFormat, DEFAULT_OUTPUT_PATH, DEFAULT_PREVIEW_ROWS,
};
use crate::generator::{generate, Record, DEFAULT_ROWS, DEFAULT_SEED};
use crate::parallel::{generate_parallel, WorkerPool};
use crate::server;

const USAGE: &str = "usage: acme-synth <generate|preview|resolve|config|validate|serve>";

/// Flags that take a value; their values are not positional arguments.
const VALUE_FLAGS: &[&str] = &["--out", "--format", "--config", "--batches", "--workers"];
/// Flags without a value.
const SWITCH_FLAGS: &[&str] = &["--verbose", "-v"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Generate,
    Preview,
    Resolve,
    Config,
    Validate,
    Serve,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("generate") => Some(Command::Generate),
        Some("preview") => Some(Command::Preview),
        Some("resolve") => Some(Command::Resolve),
        Some("config") => Some(Command::Config),
        Some("validate") => Some(Command::Validate),
        Some("serve") => Some(Command::Serve),
        _ => None,
    }
}

/// True if the verbose switch is present anywhere in `args`.
pub fn wants_verbose(args: &[String]) -> bool {
    args.iter().any(|arg| SWITCH_FLAGS.contains(&arg.as_str()))
}

pub fn run_with_args(args: &[String]) -> i32 {
    if let Some(flag) = flag_missing_value(args) {
        eprintln!("{flag} requires a value");
        eprintln!("{USAGE}");
        return 2;
    }
    match parse_command(args) {
        Some(Command::Generate) => handle_generate(args),
        Some(Command::Preview) => handle_preview(args),
        Some(Command::Resolve) => handle_resolve(args),
        Some(Command::Config) => handle_config(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Serve) => handle_serve(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_generate(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let rows = parse_usize_arg(positional.first().copied(), "rows", DEFAULT_ROWS);
    let seed = parse_u64_arg(positional.get(1).copied(), "seed", DEFAULT_SEED);
    let out = flag_value(args, "--out").unwrap_or(DEFAULT_OUTPUT_PATH);
    let format = match flag_value(args, "--format") {
        Some(raw) => match raw.parse::<OutputFormat>() {
            Ok(format) => format,
            Err(err) => {
                eprintln!("{err}");
                return 2;
            }
        },
        None => OutputFormat::from_path(Path::new(out)),
    };
    let batches = parse_usize_arg(flag_value(args, "--batches"), "batches", 1);
    let workers = parse_usize_arg(flag_value(args, "--workers"), "workers", 0);

    // Configuration problems abort before anything is generated or written.
    let config = match effective_config(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return 1;
        }
    };

    tracing::info!(rows, seed, batches, workers, "generating dataset");
    let records = if batches > 1 {
        match generate_parallel(&config, rows, seed, batches, &WorkerPool::with_workers(workers)) {
            Ok(records) => records,
            Err(err) => {
                eprintln!("failed to start worker pool: {err}");
                return 1;
            }
        }
    } else {
        generate(&config, rows, seed)
    };

    println!("Sample of generated dataset:");
    print!("{}", preview_table(&records, DEFAULT_PREVIEW_ROWS));

    match save_dataset(out, &records, format) {
        Ok(()) => {
            println!("\nSaved {}-row synthetic dataset to '{out}'.", records.len());
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn handle_preview(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let rows = parse_usize_arg(positional.first().copied(), "rows", DEFAULT_PREVIEW_ROWS);
    let seed = parse_u64_arg(positional.get(1).copied(), "seed", DEFAULT_SEED);

    let config = match effective_config(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return 1;
        }
    };

    let records: Vec<Record> = generate(&config, rows, seed);
    print!("{}", preview_table(&records, rows));
    0
}

fn handle_resolve(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let (Some(portfolio), Some(brand)) = (positional.first(), positional.get(1)) else {
        eprintln!("usage: acme-synth resolve <portfolio> <brand> [--config PATH]");
        return 2;
    };

    let config = match effective_config(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return 1;
        }
    };

    let resolved = config.resolve(portfolio, brand);
    match serde_json::to_string_pretty(&resolved) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize constraints: {err}");
            1
        }
    }
}

fn handle_config(args: &[String]) -> i32 {
    let config = match effective_config(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return 1;
        }
    };

    match config.to_yaml() {
        Ok(yaml) => {
            print!("{yaml}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize config: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let Some(path) = positional.first() else {
        eprintln!("usage: acme-synth validate <config-path>");
        return 2;
    };

    match load_config(path) {
        Ok(config) => {
            println!(
                "validation passed: {path} (portfolio overrides={}, brand overrides={})",
                config.portfolio_overrides.len(),
                config.brand_overrides.len()
            );
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn handle_serve(args: &[String]) -> i32 {
    let config = match effective_config(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return 1;
        }
    };
    let bind_addr =
        env::var(server::BIND_ENV_VAR).unwrap_or_else(|_| server::DEFAULT_BIND_ADDR.to_string());
    match server::run_server(&bind_addr, &config) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

/// `--config PATH`, else `$ACME_SYNTH_CONFIG`, else the built-in Acme configuration.
fn effective_config(args: &[String]) -> Result<GeneratorConfig, ConfigError> {
    if let Some(path) = flag_value(args, "--config") {
        return load_config(path);
    }
    match env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => load_config(path.trim()),
        _ => Ok(GeneratorConfig::acme()),
    }
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

/// First value flag that is last on the line or directly followed by another flag.
fn flag_missing_value(args: &[String]) -> Option<&str> {
    args.iter().enumerate().find_map(|(index, arg)| {
        let flag = arg.as_str();
        if !VALUE_FLAGS.contains(&flag) {
            return None;
        }
        match args.get(index + 1).map(String::as_str) {
            None => Some(flag),
            Some(next) if VALUE_FLAGS.contains(&next) || SWITCH_FLAGS.contains(&next) => Some(flag),
            Some(_) => None,
        }
    })
}

/// Arguments after the command name that are neither flags nor flag values.
fn positional_args(args: &[String]) -> Vec<&str> {
    let mut positional = Vec::new();
    let mut iter = args.iter().skip(2);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !SWITCH_FLAGS.contains(&arg.as_str()) {
            positional.push(arg.as_str());
        }
    }
    positional
}

fn parse_usize_arg(raw: Option<&str>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_u64_arg(raw: Option<&str>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_command_maps_names() {
        assert_eq!(parse_command(&args(&["acme-synth", "generate"])), Some(Command::Generate));
        assert_eq!(parse_command(&args(&["acme-synth", "serve"])), Some(Command::Serve));
        assert_eq!(parse_command(&args(&["acme-synth", "bogus"])), None);
        assert_eq!(parse_command(&args(&["acme-synth"])), None);
    }

    #[test]
    fn positional_args_skip_flags_and_values() {
        let argv = args(&[
            "acme-synth", "generate", "--out", "x.csv", "50", "-v", "--batches", "4", "9",
        ]);
        assert_eq!(positional_args(&argv), vec!["50", "9"]);
        assert_eq!(flag_value(&argv, "--out"), Some("x.csv"));
        assert_eq!(flag_value(&argv, "--batches"), Some("4"));
        assert_eq!(flag_value(&argv, "--format"), None);
        assert!(wants_verbose(&argv));
    }

    #[test]
    fn value_flag_without_value_is_detected() {
        assert_eq!(
            flag_missing_value(&args(&["acme-synth", "config", "--config"])),
            Some("--config")
        );
        assert_eq!(
            flag_missing_value(&args(&["acme-synth", "generate", "--out", "--config", "a.yaml"])),
            Some("--out")
        );
        assert_eq!(
            flag_missing_value(&args(&["acme-synth", "generate", "--config", "-v"])),
            Some("--config")
        );
        assert_eq!(
            flag_missing_value(&args(&["acme-synth", "generate", "--config", "a.yaml", "-v"])),
            None
        );
    }

    #[test]
    fn dangling_config_flag_is_a_usage_error() {
        assert_eq!(run_with_args(&args(&["acme-synth", "config", "--config"])), 2);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        assert_eq!(parse_usize_arg(Some("many"), "rows", 1000), 1000);
        assert_eq!(parse_usize_arg(Some("12"), "rows", 1000), 12);
        assert_eq!(parse_u64_arg(None, "seed", 42), 42);
        assert_eq!(parse_u64_arg(Some("-1"), "seed", 42), 42);
    }
}
