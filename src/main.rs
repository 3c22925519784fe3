use anyhow::{Context, Result};
use clap::{Arg, Command};
use source_mirror::{run_with_roots, AppConfig, MirrorRoots, TreeCopyReport};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

const SOURCE_ENV: &str = "SOURCE_MIRROR_SOURCE";
const DESTINATION_ENV: &str = "SOURCE_MIRROR_DESTINATION";

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    // .env may supply the roots
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = create_app_config(&matches);

    initialize_logging(&config.log_level)?;

    if !dotenv_loaded {
        debug!("No .env file found, using system environment variables");
    }

    run_application(&config)
}

fn build_cli() -> Command {
    Command::new("source-mirror")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mirror .cpp/.h files into a parallel tree as .txt copies")
        .arg(
            Arg::new("source")
                .value_name("SOURCE")
                .help("Source root to scan (default: $SOURCE_MIRROR_SOURCE or \"test\")"),
        )
        .arg(
            Arg::new("destination")
                .value_name("DESTINATION")
                .help("Destination root (default: $SOURCE_MIRROR_DESTINATION or \"test1\")"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .default_value("info"),
        )
        .arg(
            Arg::new("report-json")
                .long("report-json")
                .help("Print the run report as JSON on stdout")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Build configuration from CLI arguments, falling back to the environment
/// and then to the built-in roots
fn create_app_config(matches: &clap::ArgMatches) -> AppConfig {
    create_app_config_with_env(matches, |var| env::var(var).ok())
}

fn create_app_config_with_env<F>(matches: &clap::ArgMatches, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = AppConfig::default();

    let source = resolve_root(matches, "source", lookup(SOURCE_ENV), defaults.roots.source);
    let destination = resolve_root(
        matches,
        "destination",
        lookup(DESTINATION_ENV),
        defaults.roots.destination,
    );

    let log_level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or(defaults.log_level);

    AppConfig {
        roots: MirrorRoots::new(source, destination),
        log_level,
        report_json: matches.get_flag("report-json"),
    }
}

fn resolve_root(
    matches: &clap::ArgMatches,
    arg: &str,
    env_value: Option<String>,
    fallback: PathBuf,
) -> PathBuf {
    if let Some(value) = matches.get_one::<String>(arg) {
        return PathBuf::from(value);
    }

    match env_value {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => fallback,
    }
}

/// Initialize structured logging with tracing
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so --report-json output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn run_application(config: &AppConfig) -> Result<()> {
    info!("Starting source-mirror");
    debug!("Configuration: {:#?}", config);

    let report = run_with_roots(&config.roots).with_context(|| {
        format!(
            "Mirroring {} into {} failed",
            config.roots.source.display(),
            config.roots.destination.display()
        )
    })?;

    print_report(&report);

    if config.report_json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    }

    Ok(())
}

fn print_report(report: &TreeCopyReport) {
    info!("=== MIRROR REPORT ===");
    info!("Files copied: {}", report.copied_files.len());
    info!("Files skipped: {}", report.skipped_files);
    info!("Directories created: {}", report.directories_created);
    info!("Bytes written: {}", report.total_bytes());
    info!("Match rate: {:.2}%", report.match_rate() * 100.0);
    info!(
        "Elapsed: {} ms",
        (report.finished_at - report.started_at).num_milliseconds()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(args: &[&str], env: &[(&str, &str)]) -> AppConfig {
        let matches = build_cli().get_matches_from(args.iter().copied());
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        create_app_config_with_env(&matches, |var| env.get(var).cloned())
    }

    #[test]
    fn test_positional_roots_win_over_env() {
        let config = config_from(
            &["source-mirror", "cli-src", "cli-dst"],
            &[(SOURCE_ENV, "env-src"), (DESTINATION_ENV, "env-dst")],
        );
        assert_eq!(config.roots, MirrorRoots::new("cli-src", "cli-dst"));
    }

    #[test]
    fn test_env_roots_used_without_args() {
        let config = config_from(
            &["source-mirror"],
            &[(SOURCE_ENV, "env-src"), (DESTINATION_ENV, "env-dst")],
        );
        assert_eq!(config.roots, MirrorRoots::new("env-src", "env-dst"));
    }

    #[test]
    fn test_defaults_without_args_or_env() {
        let config = config_from(&["source-mirror"], &[]);
        assert_eq!(config.roots, MirrorRoots::new("test", "test1"));
        assert_eq!(config.log_level, "info");
        assert!(!config.report_json);
    }

    #[test]
    fn test_empty_env_falls_back_to_default() {
        let config = config_from(
            &["source-mirror"],
            &[(SOURCE_ENV, ""), (DESTINATION_ENV, "env-dst")],
        );
        assert_eq!(config.roots, MirrorRoots::new("test", "env-dst"));
    }

    #[test]
    fn test_source_arg_with_env_destination() {
        let config = config_from(&["source-mirror", "only-src"], &[(DESTINATION_ENV, "env-dst")]);
        assert_eq!(config.roots, MirrorRoots::new("only-src", "env-dst"));
    }

    #[test]
    fn test_flags() {
        let config = config_from(
            &["source-mirror", "--report-json", "--log-level", "debug"],
            &[],
        );
        assert!(config.report_json);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_run_failure_is_returned_with_context() {
        let config = AppConfig {
            roots: MirrorRoots::new("no/such/source/root", "no/such/destination"),
            ..AppConfig::default()
        };

        let err = run_application(&config).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Mirroring no/such/source/root into no/such/destination failed"));
        assert!(err.downcast_ref::<source_mirror::MirrorError>().is_some());
    }
}
