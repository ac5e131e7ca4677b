use anyhow::{Context, Result};
use clap::Parser;

use fixpath_locator::config::{Config, OutputFormat};
use fixpath_locator::file::loader::{load_yaml_file, load_yaml_from_stdin};
use fixpath_locator::output::{render, LocatedFixPath};
use fixpath_locator::FixPathLocationResolver;

/// fixpath-locator - find where a remediation fix path applies in a YAML manifest
#[derive(Parser)]
#[command(name = "fixpath-locator")]
#[command(version)]
#[command(
    about = "Resolve remediation fix paths to line/column locations in YAML manifests",
    long_about = None
)]
struct Cli {
    /// YAML manifest to search (`-` reads stdin; `.gz` files are decompressed)
    file: String,

    /// Fix paths such as `spec.template.spec.containers[0].image` or `metadata.namespace=prod`
    #[arg(required = true)]
    fix_paths: Vec<String>,

    /// Document index within the manifest (default: from config, else 0)
    #[arg(short, long)]
    document: Option<usize>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Report 1:1 instead of 0:0 when a path cannot be located
    #[arg(long)]
    file_start_fallback: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Sets up env_logger; `RUST_LOG` takes precedence over `-v` and the config.
fn init_logging(verbose: u8, config: &Config) {
    let level = match verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();
    init_logging(cli.verbose, &config);

    let document = cli.document.unwrap_or(config.default_document);
    let format = cli.format.unwrap_or(config.output_format);
    let file_start_fallback = cli.file_start_fallback || config.file_start_fallback;

    let documents = if cli.file == "-" {
        load_yaml_from_stdin().context("Failed to load YAML from stdin")?
    } else {
        load_yaml_file(&cli.file).with_context(|| format!("Failed to load {}", cli.file))?
    };
    log::info!("{}: {} document(s)", cli.file, documents.len());

    let resolver = FixPathLocationResolver::from_documents(documents);

    let mut records = Vec::with_capacity(cli.fix_paths.len());
    for fix_path in &cli.fix_paths {
        let mut location = resolver
            .resolve_location(fix_path, document)
            .with_context(|| format!("Failed to resolve fix path '{}'", fix_path))?;
        if file_start_fallback {
            location = location.or_file_start();
        }
        records.push(LocatedFixPath {
            fix_path: fix_path.clone(),
            document,
            location,
        });
    }

    print!("{}", render(&records, format, &cli.file)?);
    Ok(())
}
