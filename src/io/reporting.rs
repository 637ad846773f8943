// src/io/reporting.rs

use crate::simulation::metrics::{DailyRecord, SimulationResult};
use crate::simulation::monte_carlo::{MetricStats, ReplicationSummary};
use crate::strategy::sweep::SweepPoint;
use serde::Serialize;
use std::path::Path;

fn write_rows<P: AsRef<Path>, T: Serialize>(file_path: P, rows: &[T]) -> csv::Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    log::info!("exported {} rows to '{}'", rows.len(), path.display());
    Ok(())
}

/// Writes the day-by-day trace of a run to a CSV file.
///
/// # Arguments
/// * `file_path` - Where to save the file (e.g., "results/trace.csv").
/// * `data` - The daily history from a `SimulationResult`.
pub fn write_daily_trace<P: AsRef<Path>>(file_path: P, data: &[DailyRecord]) -> csv::Result<()> {
    write_rows(file_path, data)
}

/// Writes the service-level vs total-cost curve to a CSV file.
pub fn write_sweep_curve<P: AsRef<Path>>(file_path: P, points: &[SweepPoint]) -> csv::Result<()> {
    write_rows(file_path, points)
}

pub fn display_result(result: &SimulationResult) {
    println!("\n=== Inventory Cost Breakdown ===");
    for (tier, value) in result.average_inventory_value.iter() {
        println!("{:<8} ${:>14.2}", tier.label(), value);
    }
    println!("{:<8} ${:>14.2}", "Total", result.total_inventory_value);

    println!("\n=== Service Level Metrics ===");
    println!("Fill Rate:                          {:.2}%", result.fill_rate * 100.0);
    println!(
        "Stockout Risk (Days with Shortage): {:.2}%",
        result.stockout_risk * 100.0
    );
    println!("Total Demand (Units):               {:.0}", result.total_demand);

    for warning in &result.warnings {
        println!("Warning: {:?}", warning);
    }
}

pub fn display_sweep(points: &[SweepPoint]) {
    println!("\n=== Service Level vs Total Cost ===");
    println!(
        "{:>12} {:>12} {:>14} {:>16}",
        "Store (days)", "Fill Rate", "Stockout Risk", "Total Cost ($)"
    );
    for point in points {
        println!(
            "{:>12} {:>11.2}% {:>13.2}% {:>16.2}",
            point.store_interval_days,
            point.fill_rate * 100.0,
            point.stockout_risk * 100.0,
            point.total_inventory_value
        );
    }
}

pub fn display_best_setting(best: Option<&SweepPoint>, target: f64) {
    println!(
        "\n=== Recommended Setting for {:.0}% Fill Rate ===",
        target * 100.0
    );
    match best {
        Some(point) => {
            println!("Store Repl. Freq (days): {}", point.store_interval_days);
            println!("Fill Rate (%):           {:.2}", point.fill_rate * 100.0);
            println!("Total Cost ($):          {:.2}", point.total_inventory_value);
        }
        None => println!("No candidate settings were evaluated."),
    }
}

fn display_stats(label: &str, stats: &MetricStats, scale: f64) {
    println!(
        "{:<22} mean {:>12.2} ± {:>10.2} | median {:>12.2} | range [{:.2}, {:.2}] | p10-p90 [{:.2}, {:.2}]",
        label,
        stats.mean * scale,
        stats.std_dev * scale,
        stats.percentile_50 * scale,
        stats.min * scale,
        stats.max * scale,
        stats.percentile_10 * scale,
        stats.percentile_90 * scale
    );
}

pub fn display_replications(summary: &ReplicationSummary) {
    println!(
        "\n=== Monte Carlo ({} replications) ===",
        summary.replications
    );
    display_stats("Total Cost ($)", &summary.total_inventory_value, 1.0);
    display_stats("Fill Rate (%)", &summary.fill_rate, 100.0);
    display_stats("Stockout Risk (%)", &summary.stockout_risk, 100.0);
    if summary.degenerate_runs > 0 {
        println!("Degenerate runs: {}", summary.degenerate_runs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::SimulationParameters;
    use crate::simulation::engine::run_simulation_seeded;

    #[test]
    fn trace_csv_has_header_and_one_row_per_day() {
        let params = SimulationParameters {
            horizon_days: 10,
            ..Default::default()
        };
        let result = run_simulation_seeded(&params, 1).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        write_daily_trace(&path, &result.history).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "day,demand,fulfilled,stockout,store_order_qty,store_order_dropped,\
             hub_order_qty,bakery_production_qty,store_inventory,hub_inventory,bakery_inventory"
        );
        assert_eq!(lines.count(), 10);
    }

    #[test]
    fn curve_csv_round_trips_interval_column() {
        let points = vec![
            SweepPoint {
                store_interval_days: 1,
                fill_rate: 0.9,
                stockout_risk: 0.1,
                total_inventory_value: 1000.0,
            },
            SweepPoint {
                store_interval_days: 2,
                fill_rate: 0.8,
                stockout_risk: 0.2,
                total_inventory_value: 900.0,
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.csv");
        write_sweep_curve(&path, &points).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let intervals: Vec<u32> = rdr
            .records()
            .map(|r| r.unwrap()[0].parse().unwrap())
            .collect();
        assert_eq!(intervals, vec![1, 2]);
    }
}
