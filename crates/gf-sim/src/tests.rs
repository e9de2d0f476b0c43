//! Integration tests for gf-sim.
//!
//! Layouts are drawn as ASCII art (`.` free, `#` obstacle, `S` shelf,
//! `T` station, `P` spawn).  Entities are numbered in row-major scan order:
//! the first `S` encountered is shelf 0, and so on.

#[cfg(test)]
mod helpers {
    use gf_core::{Cell, OrderId, ShelfId, SimConfig, StationId, Tick};
    use gf_fleet::Fleet;
    use gf_grid::{CellKind, Grid, Layout, Shelf, Station};
    use gf_order::Order;

    use crate::SimObserver;

    pub fn config(robots: usize, horizon: u64) -> SimConfig {
        SimConfig { seed: 42, robots, horizon_ticks: horizon }
    }

    /// Build a validated layout from art, numbering entities in scan order.
    pub fn layout_from_art(art: &[&str]) -> Layout {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        let mut shelves = Vec::new();
        let mut stations = Vec::new();
        let mut spawns = Vec::new();

        for (r, line) in art.iter().enumerate() {
            let mut row = Vec::new();
            for (c, ch) in line.chars().enumerate() {
                let cell = Cell::new(r as u32, c as u32);
                let kind = match ch {
                    '.' => CellKind::Free,
                    '#' => CellKind::Obstacle,
                    'S' => {
                        shelves.push(Shelf { id: ShelfId(shelves.len() as u32), anchor: cell });
                        CellKind::Shelf
                    }
                    'T' => {
                        stations
                            .push(Station { id: StationId(stations.len() as u32), dock: cell });
                        CellKind::Station
                    }
                    'P' => {
                        spawns.push(cell);
                        CellKind::Spawn
                    }
                    _ => panic!("unknown art char {ch:?}"),
                };
                row.push(kind.code());
            }
            rows.push(row);
        }

        let grid = Grid::from_rows(&rows).expect("valid art grid");
        Layout::new(grid, shelves, stations, spawns).expect("valid art layout")
    }

    pub fn order(id: u32, tick: u64, shelf: u32, station: u32) -> Order {
        Order {
            id: OrderId(id),
            created: Tick(tick),
            shelf: ShelfId(shelf),
            station: StationId(station),
        }
    }

    /// Observer that checks the two safety invariants every tick: no two
    /// robots on one cell, and no swap of adjacent cells across ticks.
    #[derive(Default)]
    pub struct CollisionWatch {
        prev: Option<Vec<Cell>>,
        pub vertex_conflicts: usize,
        pub edge_swaps: usize,
    }

    impl SimObserver for CollisionWatch {
        fn on_tick_end(&mut self, _tick: Tick, fleet: &Fleet, _moved: usize) {
            let pos = fleet.positions();

            for i in 0..pos.len() {
                for j in (i + 1)..pos.len() {
                    if pos[i] == pos[j] {
                        self.vertex_conflicts += 1;
                    }
                    if let Some(prev) = &self.prev {
                        if prev[i] == pos[j] && prev[j] == pos[i] && prev[i] != prev[j] {
                            self.edge_swaps += 1;
                        }
                    }
                }
            }

            self.prev = Some(pos);
        }
    }

    /// Observer that records each completion tick in order.
    #[derive(Default)]
    pub struct CompletionLog {
        pub events: Vec<(OrderId, Tick)>,
    }

    impl SimObserver for CompletionLog {
        fn on_order_completed(&mut self, order: OrderId, _robot: gf_core::RobotId, tick: Tick) {
            self.events.push((order, tick));
        }
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use gf_fleet::NearestFirst;
    use gf_grid::AStarPlanner;

    use super::helpers::{config, layout_from_art, order};
    use crate::{SimBuilder, SimError};

    #[test]
    fn builds_with_defaults() {
        let layout = layout_from_art(&["P.S", "..T"]);
        let sim = SimBuilder::new(config(1, 10), layout, AStarPlanner, NearestFirst)
            .build()
            .unwrap();
        assert_eq!(sim.fleet.len(), 1);
        assert_eq!(sim.queue.total(), 0);
    }

    #[test]
    fn too_many_robots_errors() {
        let layout = layout_from_art(&["P.S", "..T"]);
        let result = SimBuilder::new(config(2, 10), layout, AStarPlanner, NearestFirst).build();
        assert!(matches!(result, Err(SimError::Fleet(_))));
    }

    #[test]
    fn dangling_shelf_reference_errors() {
        let layout = layout_from_art(&["P.S", "..T"]);
        let result = SimBuilder::new(config(1, 10), layout, AStarPlanner, NearestFirst)
            .orders(vec![order(0, 0, 7, 0)])
            .build();
        assert!(matches!(result, Err(SimError::UnknownShelf { .. })));
    }

    #[test]
    fn dangling_station_reference_errors() {
        let layout = layout_from_art(&["P.S", "..T"]);
        let result = SimBuilder::new(config(1, 10), layout, AStarPlanner, NearestFirst)
            .orders(vec![order(0, 0, 0, 3)])
            .build();
        assert!(matches!(result, Err(SimError::UnknownStation { .. })));
    }
}

// ── S1: single robot, single order, empty 10×10 ───────────────────────────────

#[cfg(test)]
mod single_cycle {
    use gf_core::Cell;
    use gf_fleet::{NearestFirst, Phase};
    use gf_grid::AStarPlanner;

    use super::helpers::{config, layout_from_art, order, CollisionWatch};
    use crate::SimBuilder;

    fn ten_by_ten() -> Vec<&'static str> {
        vec![
            "P.........",
            "..........",
            "..S.......",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            ".....T....",
        ]
    }

    #[test]
    fn full_cycle_distance_and_lead_time() {
        let layout = layout_from_art(&ten_by_ten());
        let mut sim = SimBuilder::new(config(1, 60), layout, AStarPlanner, NearestFirst)
            .orders(vec![order(0, 0, 0, 0)])
            .build()
            .unwrap();

        let mut watch = CollisionWatch::default();
        sim.run(&mut watch);
        let report = sim.report();

        assert_eq!(report.orders_completed, 1);
        assert_eq!(report.orders_pending, 0);

        // Out: 4 to the shelf + 10 to the station.  Back: 10 to the anchor
        // + 4 home.  2 * (4 + 10) = 28 cells total.
        assert_eq!(report.total_distance, 28);

        // 4 travel + 1 pickup dwell + 10 + 10; completes at tick 24.
        assert_eq!(report.mean_lead_time, Some(24.0));
        assert!(report.mean_lead_time.unwrap() < 40.0);

        assert_eq!(report.deadlock_ticks, 0);
        assert_eq!(watch.vertex_conflicts, 0);
        assert_eq!(watch.edge_swaps, 0);

        // The robot walked home and parked.
        let robot = sim.fleet.get(gf_core::RobotId(0));
        assert_eq!(robot.phase, Phase::Idle);
        assert_eq!(robot.cell, Cell::new(0, 0));
    }
}

// ── S2: head-on corridor with a passing bay ───────────────────────────────────

#[cfg(test)]
mod corridor {
    use gf_fleet::NearestFirst;
    use gf_grid::AStarPlanner;

    use super::helpers::{config, layout_from_art, order, CollisionWatch};
    use crate::SimBuilder;

    /// Width-1 corridor (row 1) with a bypass segment above cols 3-6.
    /// Robot 0 spawns west and works the east shelf; robot 1 vice versa,
    /// released one tick later so the assignments cross.
    fn corridor_art() -> Vec<&'static str> {
        vec![
            "###....##", //
            "P.......P", //
            "#S#T#T#S#", //
        ]
    }

    #[test]
    fn head_on_resolves_without_conflicts() {
        let layout = layout_from_art(&corridor_art());
        // Scan order: shelf0 = (2,1), shelf1 = (2,7); station0 = (2,3),
        // station1 = (2,5).
        let orders = vec![
            order(0, 0, 1, 1), // robot 0 crosses east
            order(1, 1, 0, 0), // robot 1 crosses west
        ];
        let mut sim = SimBuilder::new(config(2, 150), layout, AStarPlanner, NearestFirst)
            .orders(orders)
            .build()
            .unwrap();

        let mut watch = CollisionWatch::default();
        sim.run(&mut watch);
        let report = sim.report();

        assert_eq!(watch.vertex_conflicts, 0, "no two robots may share a cell");
        assert_eq!(watch.edge_swaps, 0, "no head-on swap may be realized");
        assert_eq!(report.orders_completed, 2, "both crossings must finish");
        assert!(report.mean_wait_ticks > 0.0, "the standoff must cost someone a wait");
        assert!(report.deadlock_ticks <= 9, "standoffs must clear within corridor length");
    }
}

// ── S3: unreachable shelf ─────────────────────────────────────────────────────

#[cfg(test)]
mod unreachable {
    use gf_fleet::{NearestFirst, Phase};
    use gf_grid::AStarPlanner;

    use super::helpers::{config, layout_from_art, order};
    use crate::SimBuilder;

    #[test]
    fn walled_off_shelf_never_completes() {
        let layout = layout_from_art(&[
            "P...T",
            ".....",
            "..#..",
            ".#S#.",
            "..#..",
        ]);
        let mut sim = SimBuilder::new(config(1, 50), layout, AStarPlanner, NearestFirst)
            .orders(vec![order(0, 0, 0, 0)])
            .build()
            .unwrap();

        sim.run(&mut crate::NoopObserver);
        let report = sim.report();

        assert_eq!(report.orders_completed, 0);
        assert!(report.unreachable_attempts >= 1);
        assert_eq!(report.orders_unreachable, 1);
        // Conservation: completed + pending + unreachable = submitted.
        assert_eq!(
            report.orders_completed + report.orders_pending + report.orders_unreachable,
            1
        );
        // The robot never left idle.
        assert_eq!(sim.fleet.get(gf_core::RobotId(0)).phase, Phase::Idle);
        assert_eq!(report.total_distance, 0);
    }
}

// ── Shelf exclusivity ─────────────────────────────────────────────────────────

#[cfg(test)]
mod shelf_exclusivity {
    use gf_fleet::NearestFirst;
    use gf_grid::AStarPlanner;

    use super::helpers::{config, layout_from_art, order, CompletionLog};
    use crate::SimBuilder;

    #[test]
    fn same_shelf_orders_are_served_sequentially() {
        let layout = layout_from_art(&[
            "PP....",
            "..S..T",
        ]);
        let orders = vec![order(0, 0, 0, 0), order(1, 0, 0, 0)];
        let mut sim = SimBuilder::new(config(2, 80), layout, AStarPlanner, NearestFirst)
            .orders(orders)
            .build()
            .unwrap();

        let mut log = CompletionLog::default();
        sim.run(&mut log);
        let report = sim.report();

        assert_eq!(report.orders_completed, 2);
        assert_eq!(log.events.len(), 2);
        // The second order cannot start until the shelf is back on its
        // anchor, so the completions are strictly ordered.
        assert!(log.events[0].1 < log.events[1].1);
    }
}

// ── S4: burst load on a 30×30 floor ───────────────────────────────────────────

#[cfg(test)]
mod burst {
    use gf_core::{Cell, ShelfId, SimRng, StationId};
    use gf_fleet::NearestFirst;
    use gf_grid::{AStarPlanner, CellKind, Grid, Layout, Shelf, Station};
    use gf_order::Order;

    use super::helpers::{config, order, CollisionWatch};
    use crate::SimBuilder;

    /// 30×30 floor: spawns on the north edge, stations on the south border,
    /// shelf blocks spaced through the middle with 4-wide aisles.
    fn warehouse_30x30() -> Layout {
        const W: u32 = 30;
        const H: u32 = 30;
        let mut kinds = vec![CellKind::Free; (W * H) as usize];
        let at = |r: u32, c: u32| (r * W + c) as usize;

        let mut spawns = Vec::new();
        for c in [0u32, 6, 12, 18, 24] {
            kinds[at(0, c)] = CellKind::Spawn;
            spawns.push(Cell::new(0, c));
        }

        let mut stations = Vec::new();
        for (i, c) in [4u32, 10, 16, 22, 28].into_iter().enumerate() {
            kinds[at(H - 1, c)] = CellKind::Station;
            stations.push(Station { id: StationId(i as u32), dock: Cell::new(H - 1, c) });
        }

        let mut shelves = Vec::new();
        for r in (4..=24).step_by(4) {
            for c in (2..=27).step_by(5) {
                let id = ShelfId(shelves.len() as u32);
                kinds[at(r, c)] = CellKind::Shelf;
                shelves.push(Shelf { id, anchor: Cell::new(r, c) });
            }
        }

        let grid = Grid::from_kinds(W, H, kinds).expect("grid dims");
        Layout::new(grid, shelves, stations, spawns).expect("valid warehouse")
    }

    fn burst_orders(count: u32, shelves: u32, stations: u32) -> Vec<Order> {
        let mut rng = SimRng::new(42);
        (0..count)
            .map(|i| {
                order(
                    i,
                    (i / 10) as u64, // ten orders per tick: a sharp burst
                    rng.gen_range(0..shelves),
                    rng.gen_range(0..stations),
                )
            })
            .collect()
    }

    #[test]
    fn burst_of_100_orders_makes_progress() {
        let layout = warehouse_30x30();
        let shelf_count = layout.shelves().len() as u32;
        let orders = burst_orders(100, shelf_count, 5);

        let mut sim = SimBuilder::new(config(5, 5000), layout, AStarPlanner, NearestFirst)
            .orders(orders)
            .build()
            .unwrap();

        let mut watch = CollisionWatch::default();
        sim.run(&mut watch);
        let report = sim.report();

        assert_eq!(watch.vertex_conflicts, 0);
        assert_eq!(watch.edge_swaps, 0);

        assert!(report.throughput > 0.0);
        assert!((report.deadlock_ticks as f64) / 5000.0 < 0.5);
        assert!(report.mean_utilization > 0.0 && report.mean_utilization <= 1.0);

        // Conservation over the full stream.
        assert_eq!(
            report.orders_completed + report.orders_pending + report.orders_unreachable,
            100
        );
    }
}

// ── S5: determinism ───────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use std::path::Path;

    use crate::run_scenario;

    /// Write a small scenario to `dir`: 6×6 floor, two shelves, one station,
    /// two robots, four orders.
    fn write_scenario(dir: &Path) {
        std::fs::write(
            dir.join("layout.csv"),
            "3,0,0,0,0,3\n\
             0,0,1,0,0,0\n\
             0,0,0,0,1,0\n\
             0,0,0,0,0,0\n\
             0,0,0,0,0,0\n\
             0,0,2,0,0,0\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("shelves.json"),
            r#"[{"id":0,"row":1,"col":2},{"id":1,"row":2,"col":4}]"#,
        )
        .unwrap();
        std::fs::write(dir.join("stations.json"), r#"[{"id":0,"row":5,"col":2}]"#).unwrap();
        std::fs::write(dir.join("spawn.json"), r#"[{"row":0,"col":0},{"row":0,"col":5}]"#)
            .unwrap();
        std::fs::write(
            dir.join("orders.json"),
            r#"[
                {"id":0,"tick":0,"shelf_id":0,"station_id":0},
                {"id":1,"tick":0,"shelf_id":1,"station_id":0},
                {"id":2,"tick":6,"shelf_id":0,"station_id":0},
                {"id":3,"tick":9,"shelf_id":1,"station_id":0}
            ]"#,
        )
        .unwrap();
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_scenario(dir.path());

        let artifacts = ["metrics.json", "heatmap_visits.csv", "heatmap_waits.csv", "heatmap_ratio.csv"];

        let report_a = run_scenario(dir.path(), 42, 2, 400).unwrap();
        let bytes_a: Vec<Vec<u8>> = artifacts
            .iter()
            .map(|name| std::fs::read(dir.path().join(name)).unwrap())
            .collect();

        let report_b = run_scenario(dir.path(), 42, 2, 400).unwrap();
        let bytes_b: Vec<Vec<u8>> = artifacts
            .iter()
            .map(|name| std::fs::read(dir.path().join(name)).unwrap())
            .collect();

        assert_eq!(report_a, report_b);
        for (name, (a, b)) in artifacts.iter().zip(bytes_a.iter().zip(&bytes_b)) {
            assert_eq!(a, b, "{name} differs between identical runs");
        }
    }

    #[test]
    fn scenario_run_completes_orders() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_scenario(dir.path());
        let report = run_scenario(dir.path(), 42, 2, 400).unwrap();
        assert_eq!(report.orders_completed, 4);
        assert_eq!(report.orders_total, 4);
        assert!(report.total_distance > 0);
    }
}
