use anyhow::{Context, Result};
use bakery_inventory_sim::io::reporting;
use bakery_inventory_sim::simulation::config::{
    BAKERY_LEAD_TIME_RANGE, HOLDING_COST_RANGE, HUB_INTERVAL_RANGE, HUB_LEAD_TIME_RANGE,
    STORE_INTERVAL_RANGE, STORE_LEAD_TIME_RANGE,
};
use bakery_inventory_sim::simulation::monte_carlo::run_replications;
use bakery_inventory_sim::strategy::optimization::{find_setting_for_fill_rate, TARGET_FILL_RATE};
use bakery_inventory_sim::strategy::sweep::{default_candidates, sweep_store_intervals};
use bakery_inventory_sim::{
    run_simulation_fresh, run_simulation_seeded, PerTier, SimulationParameters,
};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::PathBuf;

fn range_i64(range: RangeInclusive<u32>) -> RangeInclusive<i64> {
    i64::from(*range.start())..=i64::from(*range.end())
}

#[derive(Debug, Parser)]
#[command(name = "bakery-inventory-sim", version)]
#[command(about = "Inventory cost and service level for a bakery -> hub -> store chain")]
struct Args {
    /// Store replenishment frequency (days)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(range_i64(STORE_INTERVAL_RANGE)))]
    store_interval: u32,

    /// Hub replenishment frequency (days)
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(range_i64(HUB_INTERVAL_RANGE)))]
    hub_interval: u32,

    /// Store holding cost per unit ($)
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(range_i64(HOLDING_COST_RANGE)))]
    store_holding_cost: u32,

    /// Hub holding cost per unit ($)
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u32).range(range_i64(HOLDING_COST_RANGE)))]
    hub_holding_cost: u32,

    /// Bakery holding cost per unit ($)
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u32).range(range_i64(HOLDING_COST_RANGE)))]
    bakery_holding_cost: u32,

    /// Lead time to store (days)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(range_i64(STORE_LEAD_TIME_RANGE)))]
    store_lead_time: u32,

    /// Lead time to hub (days)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(range_i64(HUB_LEAD_TIME_RANGE)))]
    hub_lead_time: u32,

    /// Lead time to bakery (days)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(range_i64(BAKERY_LEAD_TIME_RANGE)))]
    bakery_lead_time: u32,

    /// Relative standard deviation of lead times
    #[arg(long, default_value_t = 0.2)]
    lead_time_variability: f64,

    /// Clamp negative stock to zero every day instead of carrying it forward
    #[arg(long)]
    clamp_state: bool,

    /// JSON parameter file; replaces all parameter flags above
    #[arg(long)]
    params: Option<PathBuf>,

    /// Seed for reproducible runs (fresh randomness when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Fill rate the recommended setting should land closest to
    #[arg(long, default_value_t = TARGET_FILL_RATE)]
    target_fill_rate: f64,

    /// Monte Carlo replications of the selected parameters (0 = skip)
    #[arg(long, default_value_t = 0)]
    replications: usize,

    /// Write the daily trace of the main run to this CSV file
    #[arg(long)]
    trace_csv: Option<PathBuf>,

    /// Write the service-level vs cost curve to this CSV file
    #[arg(long)]
    curve_csv: Option<PathBuf>,
}

impl Args {
    fn parameters(&self) -> Result<SimulationParameters> {
        if let Some(path) = &self.params {
            let file = File::open(path)
                .with_context(|| format!("opening parameter file {}", path.display()))?;
            let params: SimulationParameters = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing parameter file {}", path.display()))?;
            return Ok(params);
        }

        Ok(SimulationParameters {
            store_interval_days: self.store_interval,
            hub_interval_days: self.hub_interval,
            lead_time_base_days: PerTier::new(
                self.store_lead_time,
                self.hub_lead_time,
                self.bakery_lead_time,
            ),
            lead_time_variability: self.lead_time_variability,
            holding_cost: PerTier::new(
                f64::from(self.store_holding_cost),
                f64::from(self.hub_holding_cost),
                f64::from(self.bakery_holding_cost),
            ),
            clamp_state_each_day: self.clamp_state,
            ..Default::default()
        })
    }

    /// Distinct seed per phase so the curve and the search never reuse the
    /// main run's draws.
    fn phase_seed(&self, phase: u64) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(phase))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("=== Bakery Supply Chain Inventory Simulator ===");

    // 1. SETUP CONFIGURATION
    let params = args.parameters()?;
    params.validate().context("invalid simulation parameters")?;

    // 2. RUN SIMULATION WITH THE SELECTED SETTINGS
    let result = match args.phase_seed(0) {
        Some(seed) => run_simulation_seeded(&params, seed),
        None => run_simulation_fresh(&params),
    }
    .context("simulation failed")?;
    reporting::display_result(&result);

    if let Some(path) = &args.trace_csv {
        reporting::write_daily_trace(path, &result.history)
            .with_context(|| format!("writing trace to {}", path.display()))?;
        println!("Daily trace written to {}", path.display());
    }

    // 3. SERVICE LEVEL VS TOTAL COST CURVE
    let candidates = default_candidates();
    let curve = sweep_store_intervals(&params, &candidates, args.phase_seed(1))
        .context("store interval sweep failed")?;
    reporting::display_sweep(&curve);

    if let Some(path) = &args.curve_csv {
        reporting::write_sweep_curve(path, &curve)
            .with_context(|| format!("writing curve to {}", path.display()))?;
        println!("Curve written to {}", path.display());
    }

    // 4. FIND THE SETTING CLOSEST TO THE TARGET FILL RATE
    let best = find_setting_for_fill_rate(
        &params,
        &candidates,
        args.target_fill_rate,
        args.phase_seed(2),
    )
    .context("target fill rate search failed")?;
    reporting::display_best_setting(best.as_ref(), args.target_fill_rate);

    // 5. OPTIONAL MONTE CARLO SUMMARY
    if args.replications > 0 {
        let summary = run_replications(&params, args.replications, args.phase_seed(3))
            .context("monte carlo replications failed")?;
        reporting::display_replications(&summary);
    }

    println!("\nSimulation Complete.");
    Ok(())
}
