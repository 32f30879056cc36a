//! rebar-opt - CLI tool to optimize rebar cutting plans.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rebar_optimizer::io::result_to_json;
use rebar_optimizer::{load_project, save_result, validate_project, NewBarPolicy};

/// Optimize rebar cutting plans against standard stock lengths.
#[derive(Parser, Debug)]
#[command(name = "rebar-opt")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input project file (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Output result file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the available stock lengths in meters (e.g. 6,12)
    #[arg(long, value_delimiter = ',')]
    stock_lengths: Option<Vec<f64>>,

    /// Open the longest stock bar, then move light bars to shorter stock
    #[arg(long)]
    downgrade: bool,

    /// Don't reuse offcuts between elements
    #[arg(long)]
    no_reuse: bool,

    /// Validate only, don't optimize
    #[arg(long)]
    validate: bool,

    /// Print the result as JSON instead of writing a file
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Processing: {}", args.input.display());

    let mut project = load_project(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    if let Some(lengths) = args.stock_lengths {
        project.config.stock_lengths = lengths;
    }
    if args.downgrade {
        project.config.new_bar_policy = NewBarPolicy::LargestThenDowngrade;
    }
    if args.no_reuse {
        project.reuse_leftovers = false;
    }

    info!(
        "Loaded project '{}' with {} element(s)",
        project.name,
        project.elements.len()
    );

    // Validate
    let validation = validate_project(&project);

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    let result = match project.recompute_all() {
        Ok(result) => result,
        Err(e) if e.is_config_error() => {
            error!("Check stock_lengths and splice_overlaps in the project config");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    info!("Summary: {}", result.summary());

    // Debug output
    if args.debug {
        println!("{}", result_to_json(&result)?);
        return Ok(());
    }

    // Write output
    let output_path = args.output.unwrap_or_else(|| {
        let mut path = args.input.clone();
        path.set_extension("plan.json");
        path
    });

    save_result(&output_path, &result)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("Generated: {}", output_path.display());

    Ok(())
}
