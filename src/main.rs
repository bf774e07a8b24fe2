//! rib-stability CLI
//!
//! Analyses route stability across RIB dumps given in chronological order.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rib_stability::{
    analyze,
    logging::{self, Profile},
    report::render_text,
    AnalysisConfig, ConfigOverrides, FileSource, NewRouteBase, RecordPolicy,
};

#[derive(Debug, Parser)]
#[command(name = "rib-stability")]
#[command(about = "Route stability statistics across BGP RIB snapshots", long_about = None)]
struct Cli {
    /// RIB dump files, earliest first (`.bz2` files are decompressed)
    #[arg(required = true)]
    sources: Vec<String>,

    /// TOML file with analysis options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the source paths are relative to
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Number of most frequent ASes listed per snapshot
    #[arg(long)]
    top_k: Option<usize>,

    /// Fail on the first malformed record instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Snapshot whose size is the base for the percentage of new routes
    #[arg(long, value_enum)]
    new_route_base: Option<BaseArg>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BaseArg {
    Earlier,
    Later,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

impl Cli {
    fn resolve_config(&self) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
        let config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::default(),
        };

        let overrides = ConfigOverrides {
            top_k: self.top_k,
            new_route_base: self.new_route_base.map(|base| match base {
                BaseArg::Earlier => NewRouteBase::Earlier,
                BaseArg::Later => NewRouteBase::Later,
            }),
            malformed_records: self.strict.then_some(RecordPolicy::Strict),
        };

        Ok(config.with_overrides(&overrides)?)
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.resolve_config()?;

    let source = match &cli.base_dir {
        Some(dir) => FileSource::new().with_base_dir(dir),
        None => FileSource::new(),
    };

    let report = analyze(&source, cli.sources.as_slice(), &config)?;

    match cli.format {
        Format::Text => print!("{}", render_text(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    logging::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
