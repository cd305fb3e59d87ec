// SPDX-License-Identifier: PMPL-1.0-or-later

//! tscat: inspect, validate and maintain Qt Linguist translation catalogs

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tscat::config::Config;
use tscat::lookup::{self, Translator};
use tscat::report::{self, Render, ReportOutputFormat, StatsReport};
use tscat::sync::SyncOptions;
use tscat::types::Catalog;
use tscat::validate::Severity;
use tscat::{logging, sweep, ts};

#[derive(Parser)]
#[command(name = "tscat")]
#[command(version)]
#[command(about = "Inspect, validate and maintain Qt Linguist .ts translation catalogs")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (default: ./tscat.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate catalogs and report issues
    Check {
        #[arg(value_name = "CATALOG", required = true)]
        files: Vec<PathBuf>,

        /// Exit non-zero when an issue reaches this severity
        #[arg(long, value_enum)]
        fail_on: Option<SeverityArg>,

        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        /// Write the report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show translation progress
    Stats {
        #[arg(value_name = "CATALOG", required = true)]
        files: Vec<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Translate one string the way an application would
    Lookup {
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Context name, e.g. the UI component class
        #[arg(short, long)]
        context: String,

        /// Source string to translate
        #[arg(short, long)]
        source: String,

        /// Disambiguation comment
        #[arg(long)]
        comment: Option<String>,

        /// Count for plural forms
        #[arg(short = 'n', long)]
        count: Option<i64>,

        /// Positional arguments for %1, %2, ...
        #[arg(short, long = "arg", value_name = "VALUE")]
        args: Vec<String>,

        /// Additional catalogs consulted in order
        #[arg(long = "fallback", value_name = "CATALOG")]
        fallbacks: Vec<PathBuf>,

        /// Also use unfinished entries that carry text
        #[arg(long)]
        include_unfinished: bool,
    },

    /// Merge a catalog with a freshly extracted template
    Sync {
        /// Translated catalog; created when missing
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Template listing the strings currently in use
        #[arg(short, long)]
        template: PathBuf,

        /// Write the result here instead of updating CATALOG
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove retired entries instead of keeping them as vanished/obsolete
        #[arg(long)]
        drop_obsolete: bool,

        /// Do not pre-fill new entries from identical strings elsewhere
        #[arg(long)]
        no_same_text: bool,

        /// Report the summary without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Compare two catalogs message by message
    Diff {
        base: PathBuf,
        compare: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite catalogs in canonical layout
    Fmt {
        #[arg(value_name = "CATALOG", required = true)]
        files: Vec<PathBuf>,

        /// List files that would change and exit non-zero instead of writing
        #[arg(long)]
        check: bool,
    },

    /// Export a catalog as JSON or YAML
    Export {
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ReportOutputFormat,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scan a directory tree for catalogs
    Sweep {
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SeverityArg {
    Note,
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Note => Severity::Note,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    }
}

/// Print a report or save it, in the requested format.
fn emit<T: Serialize + Render>(report: &T, format: ReportOutputFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            colored::control::set_override(false);
            let text = format.serialize(report)?;
            write_file(path, &text)?;
            println!("Report saved to: {}", path.display());
        }
        None => println!("{}", format.serialize(report)?),
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

/// Catalogs named by `fallback_languages`, looked up next to `primary` as
/// `<lang>.ts`. Missing siblings are skipped.
fn sibling_fallbacks(primary: &Path, languages: &[String]) -> Vec<PathBuf> {
    let dir = primary.parent().unwrap_or_else(|| Path::new(""));
    languages
        .iter()
        .map(|lang| dir.join(format!("{}.ts", lang)))
        .filter(|path| {
            let exists = path.is_file() && path != primary;
            if !exists {
                debug!(path = %path.display(), "fallback catalog not found");
            }
            exists
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    let default_format = config.output_format()?;

    match cli.command {
        Commands::Check {
            files,
            fail_on,
            format,
            output,
        } => {
            let validator = config.validator()?;
            let report = report::check_files(&files, &validator);
            emit(&report, format.unwrap_or(default_format), output.as_deref())?;

            let threshold = fail_on.map(Severity::from).unwrap_or(config.checks.fail_on);
            if report.fails(threshold) {
                std::process::exit(1);
            }
        }

        Commands::Stats {
            files,
            format,
            output,
        } => {
            let mut catalogs = Vec::with_capacity(files.len());
            for path in &files {
                let (_, stats) = report::file_stats(path)?;
                catalogs.push(stats);
            }
            emit(
                &StatsReport::new(catalogs),
                format.unwrap_or(default_format),
                output.as_deref(),
            )?;
        }

        Commands::Lookup {
            catalog,
            context,
            source,
            comment,
            count,
            args,
            fallbacks,
            include_unfinished,
        } => {
            let mut policy = config.lookup_policy();
            policy.include_unfinished |= include_unfinished;

            let primary = ts::load(&catalog)?;
            let mut translator = Translator::with_policy(&primary, policy);
            let chain = fallbacks
                .into_iter()
                .chain(sibling_fallbacks(&catalog, &config.fallback_languages));
            for path in chain {
                translator = translator.with_fallback(&ts::load(&path)?);
            }
            debug!(languages = ?translator.languages(), "lookup chain");

            let comment = comment.as_deref();
            let text = match count {
                Some(n) => translator.translate_n(&context, &source, comment, n),
                None => translator.translate(&context, &source, comment).to_string(),
            };
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            println!("{}", lookup::substitute(&text, &args));
        }

        Commands::Sync {
            catalog,
            template,
            output,
            drop_obsolete,
            no_same_text,
            dry_run,
        } => {
            let template_catalog = ts::load(&template)?;
            let existing = if catalog.exists() {
                ts::load(&catalog)?
            } else {
                info!(path = %catalog.display(), "creating new catalog from template");
                Catalog {
                    contexts: Vec::new(),
                    ..template_catalog.clone()
                }
            };
            let options = SyncOptions {
                drop_obsolete: drop_obsolete || config.sync.drop_obsolete,
                no_same_text,
            };
            let (merged, summary) = tscat::sync::sync(&existing, &template_catalog, &options);
            println!("{}", summary.render());

            if !dry_run {
                let target = output.unwrap_or(catalog);
                ts::save(&merged, &target)?;
                println!("Catalog saved to: {}", target.display());
            }
        }

        Commands::Diff {
            base,
            compare,
            format,
            output,
        } => {
            let base_catalog = ts::load(&base)?;
            let compare_catalog = ts::load(&compare)?;
            let diff = report::diff_catalogs(
                &base_catalog,
                &compare_catalog,
                &base.display().to_string(),
                &compare.display().to_string(),
            );
            emit(&diff, format.unwrap_or(default_format), output.as_deref())?;
        }

        Commands::Fmt { files, check } => {
            let mut unformatted = 0;
            for path in &files {
                let original = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
                let catalog = ts::parse_bytes(&original)
                    .with_context(|| format!("parsing catalog {}", path.display()))?;
                let formatted = ts::to_string(&catalog);
                if formatted.as_bytes() == original.as_slice() {
                    continue;
                }
                if check {
                    println!("{}", path.display());
                    unformatted += 1;
                } else {
                    fs::write(path, formatted).with_context(|| format!("writing {}", path.display()))?;
                    println!("Formatted: {}", path.display());
                }
            }
            if unformatted > 0 {
                std::process::exit(1);
            }
        }

        Commands::Export {
            catalog,
            format,
            output,
        } => {
            let loaded = ts::load(&catalog)?;
            let data = format.serialize_data(&loaded)?;
            match output {
                Some(path) => write_file(&path, &data)?,
                None => println!("{}", data),
            }
        }

        Commands::Sweep {
            directory,
            format,
            output,
        } => {
            let validator = config.validator()?;
            let report = sweep::run(&directory, &validator)?;
            emit(&report, format.unwrap_or(default_format), output.as_deref())?;
        }
    }

    Ok(())
}
