//! minifleet — smallest end-to-end demo of the gridfleet benchmark.
//!
//! Synthesizes a 24×12 warehouse scenario on disk (the same artifacts an
//! external generator would produce), runs the benchmark through the public
//! entry point, and prints the metrics table.  Swap the constants for a
//! production-size floor (hundreds of shelves, dozens of robots) to
//! benchmark at scale.

use std::fmt::Write as _;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use gf_core::SimRng;
use gf_sim::run_scenario;

// ── Constants ─────────────────────────────────────────────────────────────────

const SCENARIO_DIR: &str = "output/minifleet";
const SEED: u64 = 42;
const ROBOTS: usize = 4;
const HORIZON_TICKS: u64 = 2_000;
const ORDER_COUNT: u32 = 40;

const WIDTH: u32 = 24;
const HEIGHT: u32 = 12;

// Cell codes of the layout artifact.
const FREE: u8 = 0;
const SHELF: u8 = 1;
const STATION: u8 = 2;
const SPAWN: u8 = 3;

// ── Scenario synthesis ────────────────────────────────────────────────────────

struct Scenario {
    layout_csv: String,
    shelves_json: String,
    stations_json: String,
    spawn_json: String,
    orders_json: String,
}

/// Build the scenario artifacts: spawns on the north edge, stations on the
/// south border, shelf blocks spaced through the middle with open aisles.
fn synthesize(seed: u64) -> Scenario {
    let mut codes = vec![vec![FREE; WIDTH as usize]; HEIGHT as usize];

    // Spawn points for the fleet, north edge.
    let spawns: Vec<(u32, u32)> = (0..ROBOTS as u32).map(|i| (0, 2 + i * 3)).collect();
    for &(r, c) in &spawns {
        codes[r as usize][c as usize] = SPAWN;
    }

    // Consolidation stations on the south border.
    let stations: Vec<(u32, u32)> = vec![(HEIGHT - 1, 5), (HEIGHT - 1, 12), (HEIGHT - 1, 19)];
    for &(r, c) in &stations {
        codes[r as usize][c as usize] = STATION;
    }

    // Shelf grid: every third row/column in the storage zone.
    let mut shelf_cells: Vec<(u32, u32)> = Vec::new();
    for r in (3..HEIGHT - 2).step_by(3) {
        for c in (2..WIDTH - 2).step_by(3) {
            codes[r as usize][c as usize] = SHELF;
            shelf_cells.push((r, c));
        }
    }

    // Random but reproducible order stream, ten orders per burst tick.
    let mut rng = SimRng::new(seed);
    let mut orders = String::from("[\n");
    for i in 0..ORDER_COUNT {
        let shelf = rng.gen_range(0..shelf_cells.len() as u32);
        let station = rng.gen_range(0..stations.len() as u32);
        let tick = (i / 10) as u64 * 5;
        let _ = write!(
            orders,
            "  {{\"id\": {i}, \"tick\": {tick}, \"shelf_id\": {shelf}, \"station_id\": {station}}}"
        );
        orders.push_str(if i + 1 < ORDER_COUNT { ",\n" } else { "\n" });
    }
    orders.push_str("]\n");

    let layout_csv = codes
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
        + "\n";

    Scenario {
        layout_csv,
        shelves_json: entities_json(&shelf_cells),
        stations_json: entities_json(&stations),
        spawn_json: cells_json(&spawns),
        orders_json: orders,
    }
}

fn entities_json(cells: &[(u32, u32)]) -> String {
    let entries: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(id, &(r, c))| format!("  {{\"id\": {id}, \"row\": {r}, \"col\": {c}}}"))
        .collect();
    format!("[\n{}\n]\n", entries.join(",\n"))
}

fn cells_json(cells: &[(u32, u32)]) -> String {
    let entries: Vec<String> = cells
        .iter()
        .map(|&(r, c)| format!("  {{\"row\": {r}, \"col\": {c}}}"))
        .collect();
    format!("[\n{}\n]\n", entries.join(",\n"))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== minifleet — gridfleet warehouse benchmark ===");
    println!("Floor: {WIDTH}x{HEIGHT}  |  Robots: {ROBOTS}  |  Orders: {ORDER_COUNT}  |  Seed: {SEED}");
    println!();

    // 1. Synthesize the scenario artifacts.
    let dir = Path::new(SCENARIO_DIR);
    std::fs::create_dir_all(dir)?;
    let scenario = synthesize(SEED);
    std::fs::write(dir.join("layout.csv"), &scenario.layout_csv)?;
    std::fs::write(dir.join("shelves.json"), &scenario.shelves_json)?;
    std::fs::write(dir.join("stations.json"), &scenario.stations_json)?;
    std::fs::write(dir.join("spawn.json"), &scenario.spawn_json)?;
    std::fs::write(dir.join("orders.json"), &scenario.orders_json)?;
    println!("Scenario written to {SCENARIO_DIR}/");

    // 2. Run the benchmark.
    let t0 = Instant::now();
    let report = run_scenario(dir, SEED, ROBOTS, HORIZON_TICKS)?;
    let elapsed = t0.elapsed();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!();

    // 3. Metrics table.
    println!("{:<24} {:>12}", "Metric", "Value");
    println!("{}", "-".repeat(38));
    println!("{:<24} {:>12}", "orders_total", report.orders_total);
    println!("{:<24} {:>12}", "orders_completed", report.orders_completed);
    println!("{:<24} {:>12}", "orders_pending", report.orders_pending);
    println!("{:<24} {:>12}", "orders_unreachable", report.orders_unreachable);
    println!("{:<24} {:>12.4}", "throughput", report.throughput);
    match report.mean_lead_time {
        Some(lt) => println!("{:<24} {:>12.1}", "mean_lead_time", lt),
        None => println!("{:<24} {:>12}", "mean_lead_time", "n/a"),
    }
    println!("{:<24} {:>12.4}", "mean_utilization", report.mean_utilization);
    println!("{:<24} {:>12.1}", "mean_wait_ticks", report.mean_wait_ticks);
    println!("{:<24} {:>12}", "deadlock_ticks", report.deadlock_ticks);
    println!("{:<24} {:>12}", "total_distance", report.total_distance);
    println!();
    println!(
        "Artifacts: {SCENARIO_DIR}/metrics.json, {}, {}, {}",
        report.heatmap_visits, report.heatmap_waits, report.heatmap_ratio
    );

    Ok(())
}
