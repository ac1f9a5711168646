//! metrics-runner: headless dataset generator for MetricsHub.
//!
//! Usage:
//!   metrics-runner --seed 12345 --dataset revenue --count 24
//!   metrics-runner --dataset sparkline --trend down --today 2025-01-15
//!   metrics-runner --seed 7 --config generators.json --ipc-mode

use anyhow::{Context, Result};
use metricshub_core::{
    clock::ReferenceClock,
    command::{DatasetRequest, DatasetResponse},
    config::GeneratorConfig,
    engine::MetricsEngine,
    types::Trend,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed: Option<u64> = parse_arg(&args, "--seed")?;
    let dataset = flag_value(&args, "--dataset").unwrap_or("snapshot");
    let count: Option<i64> = parse_arg(&args, "--count")?;
    let trend: Trend = flag_value(&args, "--trend").unwrap_or("up").parse()?;
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let config = match flag_value(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading generator config from {path}"))?,
        None => GeneratorConfig::default(),
    };
    let clock = match flag_value(&args, "--today") {
        Some(date) => ReferenceClock::parse_fixed(date)?,
        None => ReferenceClock::System,
    };

    let mut engine = match seed {
        Some(seed) => MetricsEngine::new(seed, config)?,
        None => MetricsEngine::unseeded(config)?,
    }
    .with_clock(clock);

    log::info!(
        "metrics-runner: seed={} today={} ipc={ipc_mode}",
        engine.seed(),
        engine.today()
    );

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        let request = build_request(dataset, count, trend)?;
        if let Some(response) = engine.handle(&request) {
            print_response(&response)?;
        }
    }

    Ok(())
}

/// One JSON request per line in, one JSON response per line out.
fn run_ipc_loop(engine: &mut MetricsEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: DatasetRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match engine.handle(&request) {
            Some(response) => writeln!(stdout, "{}", serde_json::to_string(&response)?)?,
            None => break,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn build_request(dataset: &str, count: Option<i64>, trend: Trend) -> Result<DatasetRequest> {
    let request = match dataset {
        "revenue" => DatasetRequest::Revenue { periods: count.unwrap_or(12) },
        "customers" => DatasetRequest::Customers { count: count.unwrap_or(50) },
        "cohorts" => DatasetRequest::Cohorts,
        "channels" => DatasetRequest::Channels,
        "sparkline" => DatasetRequest::Sparkline { trend },
        "snapshot" => DatasetRequest::Snapshot,
        other => {
            log::warn!("metrics-runner: unknown dataset '{other}'");
            anyhow::bail!(
                "unknown dataset '{other}' (expected revenue, customers, cohorts, channels, sparkline or snapshot)"
            )
        }
    };
    Ok(request)
}

fn print_response(response: &DatasetResponse) -> Result<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", serde_json::to_string_pretty(response)?)?;
    log::info!("metrics-runner: wrote {} rows", response.len());
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

/// Parsed value of `flag`, `None` when absent. A malformed value is an error.
fn parse_arg<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    flag_value(args, flag)
        .map(|v| v.parse().with_context(|| format!("invalid {flag} '{v}'")))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_are_read_pairwise() {
        let a = args(&["metrics-runner", "--seed", "9", "--count", "-3"]);
        assert_eq!(flag_value(&a, "--seed"), Some("9"));
        assert_eq!(parse_arg::<i64>(&a, "--count").unwrap(), Some(-3));
        assert_eq!(parse_arg::<i64>(&a, "--missing").unwrap(), None);
    }

    #[test]
    fn malformed_numbers_are_errors() {
        let a = args(&["metrics-runner", "--count", "abc", "--seed", "-1"]);
        let err = parse_arg::<i64>(&a, "--count").unwrap_err();
        assert!(err.to_string().contains("--count 'abc'"), "{err}");
        assert!(parse_arg::<u64>(&a, "--seed").is_err());
    }

    #[test]
    fn dataset_names_map_to_requests() {
        assert_eq!(
            build_request("revenue", None, Trend::Up).unwrap(),
            DatasetRequest::Revenue { periods: 12 }
        );
        assert_eq!(
            build_request("customers", Some(5), Trend::Up).unwrap(),
            DatasetRequest::Customers { count: 5 }
        );
        assert_eq!(
            build_request("sparkline", None, Trend::Down).unwrap(),
            DatasetRequest::Sparkline { trend: Trend::Down }
        );
        assert!(build_request("export", None, Trend::Up).is_err());
    }
}
