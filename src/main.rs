use std::path::PathBuf;

use avstandards::cli::{Cli, Commands};
use avstandards::config::{Config, OutputFormat};
use avstandards::datasources::{load_context, load_rules};
use avstandards::error::{Result, StandardsError};
use avstandards::{evaluate_expression, report, RulesEngine};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const EXIT_OK: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    if let Some(source) = &config.source {
        tracing::debug!(path = %source.display(), "loaded config");
    }

    match cli.command {
        Commands::Check {
            rules,
            context,
            format,
        } => {
            let engine = RulesEngine::new(load_rules(&rules_path(rules, &config)?)?);
            let context = load_context(&context)?;

            let result = engine.validate(&context);
            let format = format.unwrap_or(config.output.format);
            print!("{}", report::render(&result, format)?);
            if format == OutputFormat::Json {
                println!();
            }

            Ok(if result.is_valid { EXIT_OK } else { EXIT_INVALID })
        }
        Commands::List { rules } => {
            let engine = RulesEngine::new(load_rules(&rules_path(rules, &config)?)?);
            for (id, name, severity) in engine.list_rules() {
                println!("{:<10} {:<24} {}", severity.as_str(), id, name);
            }
            Ok(EXIT_OK)
        }
        Commands::Eval {
            expression,
            context,
        } => {
            let context = load_context(&context)?;
            println!("{}", evaluate_expression(&expression, &context));
            Ok(EXIT_OK)
        }
    }
}

fn rules_path(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    explicit.or_else(|| config.rules_path()).ok_or_else(|| {
        StandardsError::Config(
            "no rule file given; pass --rules or set standards.rules_path".into(),
        )
    })
}
