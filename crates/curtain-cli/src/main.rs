use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use curtain_core::{
    format_solution, CurtainSpec, DisplayUnit, FabricCatalog, FoldAllowance, Inventory,
    LayoutRequest, NetWidthMode, OptimizationResult, Optimizer, OptimizerError,
    STANDARD_ROLL_LENGTH,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "curtain")]
#[command(about = "Curtain Cut Planner - Find the fabric layout with the least waste", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a layout request file
    Optimize {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Unit used for the printed results (mm or cm)
        #[arg(short, long, default_value = "mm")]
        unit: DisplayUnit,
    },

    /// Optimize a curtain described on the command line
    Calc {
        /// Finished curtain width in mm
        #[arg(long)]
        width: f64,

        /// Finished curtain height in mm
        #[arg(long)]
        height: f64,

        /// Rolls in stock as WIDTH=COUNT, e.g. --roll 2100=3
        #[arg(short, long = "roll", value_parser = parse_roll, required = true)]
        rolls: Vec<(u32, u32)>,

        /// How the width is split into panels (net_of_folds or exact_division)
        #[arg(short, long, default_value = "net_of_folds")]
        mode: NetWidthMode,

        /// Track roll length so several panels can share a roll
        #[arg(long, num_args = 0..=1, default_missing_value = "5000")]
        roll_length: Option<f64>,

        /// Hem allowance of each end panel in mm
        #[arg(long)]
        outer_fold: Option<f64>,

        /// Hem allowance of each inner panel in mm
        #[arg(long)]
        inner_fold: Option<f64>,

        /// Unit used for the printed results (mm or cm)
        #[arg(short, long, default_value = "mm")]
        unit: DisplayUnit,
    },

    /// List the standard fabric widths and defaults
    Catalog,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize {
            input,
            output,
            unit,
        } => {
            optimize_command(input, output, unit)?;
        }
        Commands::Calc {
            width,
            height,
            rolls,
            mode,
            roll_length,
            outer_fold,
            inner_fold,
            unit,
        } => {
            let defaults = FoldAllowance::default();
            let mut request = LayoutRequest::new(
                CurtainSpec { width, height },
                rolls.into_iter().collect::<Inventory>(),
            );
            request.mode = mode;
            request.roll_length = roll_length;
            request.allowance = FoldAllowance {
                outer_fold: outer_fold.unwrap_or(defaults.outer_fold),
                inner_fold: inner_fold.unwrap_or(defaults.inner_fold),
            };
            let result = run(request, unit)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Catalog => {
            catalog_command();
        }
    }

    Ok(())
}

fn optimize_command(input: PathBuf, output: Option<PathBuf>, unit: DisplayUnit) -> Result<()> {
    eprintln!("{}", "🔍 Loading input...".bright_blue());

    let request = read_request(&input)?;
    let result = run(request, unit)?;

    let json = serde_json::to_string_pretty(&result)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)
            .with_context(|| format!("writing {}", output_path.display()))?;
        eprintln!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

/// Reads a request as YAML when the extension says so, JSON otherwise.
fn read_request(input: &Path) -> Result<LayoutRequest> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;

    let request = match input.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };

    Ok(request)
}

/// Runs the optimizer, reporting progress on stderr so stdout carries only JSON.
fn run(request: LayoutRequest, unit: DisplayUnit) -> Result<OptimizationResult> {
    eprintln!(
        "  Curtain {} x {}",
        unit.format_length(request.curtain.width).bright_white().bold(),
        unit.format_length(request.curtain.height).bright_white().bold()
    );
    eprintln!(
        "  {} rolls in stock",
        request.inventory.total_rolls().to_string().bright_white().bold()
    );
    eprintln!("  Mode: {}", request.mode.to_string().bright_white());
    eprintln!();

    eprintln!("{}", "🚀 Running optimization...".bright_blue());

    let optimizer = Optimizer::new(request)?;
    let result = match optimizer.optimize() {
        Ok(result) => result,
        Err(OptimizerError::NoValidSolution) => {
            bail!("no layout fits: add rolls or choose a wider fabric")
        }
        Err(err) => return Err(err.into()),
    };

    eprintln!();
    eprintln!("{}", "✅ Optimization complete!".bright_green().bold());
    eprintln!();

    eprintln!("{}", "📊 Results:".bright_yellow().bold());
    for (label, value) in format_solution(&result.solution, unit) {
        eprintln!("  {}: {}", label, value.bright_white());
    }
    eprintln!(
        "  Waste share: {}%",
        format!("{:.1}", result.summary.waste_percentage).bright_white()
    );
    if let Some(length) = result.summary.fabric_length {
        eprintln!("  Fabric length: {}", unit.format_length(length).bright_white());
    }
    eprintln!();

    Ok(result)
}

fn catalog_command() {
    let defaults = FoldAllowance::default();

    println!("{}", "🧵 Standard fabric widths:".bright_yellow().bold());
    for width in FabricCatalog::standard().widths() {
        println!("    • {} mm", width.to_string().bright_white());
    }
    println!();
    println!("  Outer fold: {} mm", defaults.outer_fold);
    println!("  Inner fold: {} mm", defaults.inner_fold);
    println!("  Roll length: {} mm", STANDARD_ROLL_LENGTH);
}

fn parse_roll(value: &str) -> std::result::Result<(u32, u32), String> {
    let (width, count) = value
        .split_once('=')
        .ok_or_else(|| format!("expected WIDTH=COUNT, got '{value}'"))?;
    let width = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid fabric width '{width}'"))?;
    let count = count
        .trim()
        .parse()
        .map_err(|_| format!("invalid roll count '{count}'"))?;
    Ok((width, count))
}
