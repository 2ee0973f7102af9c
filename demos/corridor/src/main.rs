//! corridor — smallest example for the lattice_nav planner.
//!
//! Three agents share a walled two-lane corridor.  The upper lane flows
//! east, the lower lane flows west.  Agents are dispatched in order, so the
//! first one to plan reserves its cells and the others wait or change lane
//! around it.  Every committed path is printed as JSON.
//!
//! Pass a JSON file as the first argument to override the planner
//! configuration (any field left out keeps its default).  Set `RUST_LOG`
//! (e.g. `RUST_LOG=ln_search=debug`) to see planner logging.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ln_core::{Agent, AgentId, Clock, Direction, FixedClock, Position, SystemClock, Timestamp};
use ln_fleet::Dispatcher;
use ln_map::{WorldMap, WorldMapBuilder};
use ln_search::{Deadline, LatticePlanner, Planner, PlannerConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const LENGTH:          i32 = 10;
const FUEL:            u32 = 40;
const PLAN_BUDGET_MS:  u64 = 2_000; // wall-clock cap per dispatch
const TICK_MS:         u64 = 250;   // arrival polling step
const SNAPSHOT_MS:     u64 = 500;   // mid-journey status table

const EAST_LANE: i32 = 0;
const WEST_LANE: i32 = -1;

// ── World ─────────────────────────────────────────────────────────────────────

/// A solid block with two open lanes carved through it along x.
fn build_corridor() -> WorldMap {
    let mut b = WorldMapBuilder::new().block_region(
        Position::new(-1, -1, WEST_LANE - 1),
        Position::new(LENGTH + 1, 1, EAST_LANE + 1),
    );
    for x in 0..=LENGTH {
        b = b
            .clear(Position::new(x, 0, EAST_LANE))
            .flow(Position::new(x, 0, EAST_LANE), Direction::East)
            .clear(Position::new(x, 0, WEST_LANE))
            .flow(Position::new(x, 0, WEST_LANE), Direction::West);
    }
    b.build()
}

/// One row per agent: where it stands at `now` and how far along it is.
fn print_status<P: Planner>(fleet: &Dispatcher<P>, ids: &[AgentId], now: Timestamp) -> Result<()> {
    println!("t={} ms", now.0);
    println!("{:<12} {:<10} {:<8} {:>8}", "Agent", "Cell", "Facing", "Progress");
    println!("{}", "-".repeat(41));
    for &id in ids {
        let (pos, facing) = fleet.location(id, now)?;
        let progress = fleet.state(id)?.progress(now);
        println!(
            "{:<12} {:<10} {:<8} {:>7.0}%",
            id.to_string(),
            pos.to_string(),
            facing.to_string(),
            progress * 100.0,
        );
    }
    println!();
    Ok(())
}

fn load_config() -> Result<PlannerConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(PlannerConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== corridor — lattice_nav ===");

    let config = load_config()?;
    let mut map = build_corridor();
    println!("Map: {} cells, corridor length {}", map.len(), LENGTH + 1);

    // Simulated time starts at 0; the planner never reads the wall clock.
    let planner = LatticePlanner::with_clock(config, FixedClock::at(0))?;
    let mut fleet = Dispatcher::new(planner, 3);

    // (id, start, facing, destination, departure)
    let trips = [
        (AgentId(0), Position::new(0, 0, EAST_LANE),      Direction::East, Position::new(LENGTH, 0, EAST_LANE),     0),
        (AgentId(1), Position::new(LENGTH, 0, WEST_LANE), Direction::West, Position::new(0, 0, WEST_LANE),          0),
        (AgentId(2), Position::new(0, 0, EAST_LANE),      Direction::East, Position::new(LENGTH - 1, 0, EAST_LANE), 300),
    ];
    let ids: Vec<AgentId> = trips.iter().map(|&(id, ..)| id).collect();

    for &(id, start, facing, _, _) in &trips {
        fleet.place(Agent::new(id, FUEL), start, facing, Timestamp(0))?;
    }

    // Dispatch in order: earlier agents reserve first.
    for &(id, _, _, dest, depart) in &trips {
        let mut budget = Deadline::new(SystemClock, SystemClock.now() + PLAN_BUDGET_MS);
        let t0 = Instant::now();
        match fleet.dispatch(id, vec![dest], Timestamp(depart), &mut map, &mut budget) {
            Ok(arrival) => {
                println!("{id}: dispatched, arrives at {arrival} ({:.3} ms)", t0.elapsed().as_secs_f64() * 1e3);
                if let Some(path) = fleet.path(id) {
                    println!("{}", serde_json::to_string_pretty(path)?);
                }
            }
            Err(e) => println!("{id}: not dispatched: {e}"),
        }
    }
    println!();

    // Advance simulated time until everyone has arrived.
    let mut now = Timestamp(0);
    while ids.iter().any(|&id| fleet.store.in_transit(id)) {
        now += TICK_MS;
        if now.0 == SNAPSHOT_MS {
            print_status(&fleet, &ids, now)?;
        }
        for (id, pos) in fleet.arrivals(now) {
            println!("t={:>6} ms  {id} arrived at {pos}", now.0);
        }
    }
    println!();

    print_status(&fleet, &ids, now)?;

    Ok(())
}
