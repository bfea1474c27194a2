//! Portfolio projection CLI
//!
//! Projects a monthly-contribution stock/bond portfolio over historical
//! annual returns and prints a yearly report.

use anyhow::Context;
use clap::Parser;
use log::info;
use portfolio_projection::projection::{
    PortfolioSimulator, SimulationConfig, DEFAULT_ANNUAL_BONUS, DEFAULT_BOND_ANNUAL_RATE,
    DEFAULT_FACTOR_RATIO, DEFAULT_MAX_ITER, DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_YEARS,
};
use portfolio_projection::report::{
    format_scenario, format_summary, format_year_line, write_chart, write_months_csv, ChartAxis,
};
use portfolio_projection::returns::{load_series, DEFAULT_RETURNS_PATH};
use portfolio_projection::ScenarioRunner;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Monthly-contribution portfolio projection over historical returns
#[derive(Parser, Debug)]
#[command(name = "portfolio", version, about)]
struct Args {
    /// The amount invested every month
    #[arg(short, long, default_value_t = DEFAULT_MONTHLY_CONTRIBUTION)]
    money: f64,

    /// Fraction of each contribution invested in stock; the rest buys bond
    #[arg(short, long, default_value_t = 1.0)]
    ratio: f64,

    /// The period of investment (unit: year)
    #[arg(short, long, default_value_t = DEFAULT_YEARS)]
    period: u32,

    /// The bonus invested every year, in the last month
    #[arg(short, long, default_value_t = DEFAULT_ANNUAL_BONUS)]
    bonus: f64,

    /// Fixed annual bond yield
    #[arg(long, default_value_t = DEFAULT_BOND_ANNUAL_RATE)]
    bond_rate: f64,

    /// Maximum deviation of a normal month's factor from 1.0
    #[arg(long, default_value_t = DEFAULT_FACTOR_RATIO)]
    band: f64,

    /// Attempt budget for each year's monthly factor search
    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    max_iter: u32,

    /// Random seed; a fresh one is drawn (and logged) when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// CSV table with a `Rate` column of annual returns in percent
    #[arg(long, default_value = DEFAULT_RETURNS_PATH)]
    returns: PathBuf,

    /// Write an SVG chart of the portfolio value
    #[arg(long)]
    plot: bool,

    /// Where to write the chart
    #[arg(long, default_value = "portfolio.svg")]
    plot_path: PathBuf,

    /// Chart x axis unit
    #[arg(long, value_enum, default_value_t = ChartAxis::Year)]
    x_axis: ChartAxis,

    /// Export the monthly time series to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the summary as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Run this many seeded trials and report the outcome distribution
    #[arg(long)]
    trials: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let series = load_series(&args.returns)
        .with_context(|| format!("Failed to load returns from {}", args.returns.display()))?;

    let config = SimulationConfig {
        monthly_contribution: args.money,
        annual_bonus: args.bonus,
        stock_ratio: args.ratio,
        years: args.period,
        bond_annual_rate: args.bond_rate,
        factor_ratio: args.band,
        max_search_iterations: args.max_iter,
    };
    let show_bond = config.stock_ratio < 1.0;
    let simulator =
        PortfolioSimulator::new(series, config).context("Invalid simulation configuration")?;

    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    info!("Using seed {}", seed);

    if let Some(trials) = args.trials {
        let runner = ScenarioRunner::new(simulator);
        let summary = runner.run(seed, trials).context("Scenario run failed")?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{}", format_scenario(&summary));
        }
        return Ok(());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let result = simulator.simulate(&mut rng).context("Simulation failed")?;
    let summary = result.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for year in &result.years {
            println!("{}", format_year_line(year));
        }
        println!();
        println!("{}", format_summary(&summary, simulator.config()));
        println!(
            "  Average Market Return: {:.4}% over {} historical years",
            simulator.series().mean() * 100.0,
            simulator.series().len()
        );
        println!("  Seed: {}", seed);
    }

    if let Some(path) = &args.csv {
        write_months_csv(path, &result.months)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if args.plot {
        write_chart(&args.plot_path, &result, args.x_axis, show_bond)
            .with_context(|| format!("Failed to write {}", args.plot_path.display()))?;
    }

    Ok(())
}
