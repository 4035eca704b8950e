//! Lint command implementation.

use anyhow::{bail, Context, Result};
use clap::Args;
use klint::kotlin::KotlinParser;
use klint::{Config, ExitStatus, Runner, SeverityThresholds};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{config_resolver, sources};

/// Options of `klint lint`. Every option overrides the config file.
#[derive(Debug, Default, Args)]
pub struct LintArgs {
    /// Files or directories to lint
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Only run these rules (comma-separated identifiers)
    #[arg(long, value_delimiter = ',')]
    pub enable_rules: Option<Vec<String>>,

    /// Skip these rules (comma-separated identifiers)
    #[arg(long, value_delimiter = ',')]
    pub disable_rules: Vec<String>,

    /// Report format: text, html, json, pmd or xcode
    #[arg(short, long)]
    pub report_type: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Issue limits per severity, e.g. `critical=0,major=5`
    #[arg(long)]
    pub thresholds: Option<String>,

    /// Number of worker threads
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Run rules on the calling thread
    #[arg(long)]
    pub sequential: bool,

    /// Disable colored parse diagnostics
    #[arg(long)]
    pub no_color: bool,
}

/// Runs the lint command and returns the run's exit status.
pub fn run(args: &LintArgs, config_path: Option<&Path>) -> Result<ExitStatus> {
    let mut config = config_resolver::load(Path::new("."), config_path)?.config;
    apply_overrides(&mut config, args);

    let overrides = match &args.thresholds {
        Some(spec) => SeverityThresholds::from_names(&parse_thresholds(spec)?),
        None => SeverityThresholds::new(),
    };

    let parser = KotlinParser::new();
    let files = sources::discover(&args.paths, &config.exclude, parser.extensions())?;
    tracing::info!("Linting {} files", files.len());
    let sources = sources::read_all(&files)?;

    let output: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    let mut runner = Runner::from_config_with(&config, |builder| {
        let builder = builder.output(output);
        if args.no_color {
            builder.without_color()
        } else {
            builder
        }
    })
    .context("Failed to build driver")?;
    runner.merge_thresholds(&overrides);

    let status = runner.lint(&sources).context("Failed to write report")?;
    tracing::info!("Finished with {:?}", status);
    Ok(status)
}

fn apply_overrides(config: &mut Config, args: &LintArgs) {
    if let Some(rules) = &args.enable_rules {
        config.enable_rules = Some(rules.clone());
    }
    config.disable_rules.extend(args.disable_rules.iter().cloned());
    if let Some(kind) = &args.report_type {
        config.report_type = Some(kind.clone());
    }
    if let Some(path) = &args.output {
        config.output = Some(path.clone());
    }
    if let Some(jobs) = args.jobs {
        config.engine.jobs = Some(jobs);
    }
    if args.sequential {
        config.engine.parallel = false;
    }
}

/// Parses `critical=0,major=5` into a severity-name map.
fn parse_thresholds(spec: &str) -> Result<HashMap<String, usize>> {
    let mut thresholds = HashMap::new();
    for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((name, max)) = pair.split_once('=') else {
            bail!("Expected `severity=count`, got `{pair}`");
        };
        let max = max
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Invalid threshold count in `{pair}`"))?;
        thresholds.insert(name.trim().to_string(), max);
    }
    Ok(thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_threshold_pairs() {
        let parsed = parse_thresholds("critical=0, major = 5,").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["critical"], 0);
        assert_eq!(parsed["major"], 5);

        assert!(parse_thresholds("major").is_err());
        assert!(parse_thresholds("major=-1").is_err());
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::parse(
            "enable-rules = [\"long_line\"]\ndisable-rules = [\"class_naming\"]\nreport-type = \"html\"\n",
        )
        .unwrap();
        let args = LintArgs {
            enable_rules: Some(vec!["long_file".to_string()]),
            disable_rules: vec!["trailing_whitespace".to_string()],
            report_type: Some("json".to_string()),
            jobs: Some(2),
            sequential: true,
            ..LintArgs::default()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.enable_rules, Some(vec!["long_file".to_string()]));
        assert_eq!(config.disable_rules, vec!["class_naming", "trailing_whitespace"]);
        assert_eq!(config.report_type.as_deref(), Some("json"));
        assert_eq!(config.engine.jobs, Some(2));
        assert!(!config.engine.parallel);
        assert!(config.output.is_none());
    }

    #[test]
    fn lints_a_directory_into_a_report_file() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("App.kt"), "package app\n\nimport kotlin.io.*\n").unwrap();
        let config = tmp.path().join("klint.toml");
        fs::write(&config, "enable-rules = [\"no_wildcard_import\"]\n").unwrap();
        let report = tmp.path().join("report.txt");

        let args = LintArgs {
            paths: vec![src.clone()],
            report_type: Some("xcode".to_string()),
            output: Some(report.clone()),
            thresholds: Some("minor=0".to_string()),
            no_color: true,
            ..LintArgs::default()
        };
        let status = run(&args, Some(&config)).unwrap();

        assert_eq!(status, ExitStatus::TooManyIssues);
        assert_eq!(
            fs::read_to_string(&report).unwrap(),
            format!(
                "{}:3:1: warning: [bad practice|no_wildcard_import] Wildcard import `kotlin.io.*`\n",
                src.join("App.kt").display()
            )
        );
    }
}
