//! Autoplay - runs a simple built-in strategy headlessly
//!
//! Useful for balancing runs and for checking that a seed replays
//! identically.

use clap::Parser;
use geothermal_portfolio::core::error::Result;
use geothermal_portfolio::prelude::*;
use geothermal_portfolio::simulation::ActionOutcome;
use std::path::PathBuf;

/// Play a game with a fixed strategy and print the outcome
#[derive(Parser, Debug)]
#[command(name = "autoplay")]
#[command(about = "Run a geothermal portfolio game with a built-in strategy")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum quarters to simulate
    #[arg(long, default_value_t = 80)]
    quarters: u32,

    /// TOML config overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final state as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Keep this much cash after any discretionary spend
const CASH_RESERVE: Money = 4.0;
/// Sites surveyed hotter than this are worth securing
const TARGET_TEMP: f64 = 110.0;
const DRILL_FLOW: f64 = 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geothermal_portfolio=warn".into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let mut state = GameState::initialize(args.seed, config)?;

    let mut quarters = 0;
    while quarters < args.quarters && !state.is_game_over() {
        if state.pending_event().is_some() {
            resolve_cheapest(&mut state)?;
            continue;
        }
        abandon_losers(&mut state);
        take_one_step(&mut state);

        let report = state.advance_quarter()?;
        if report.advanced() {
            quarters += 1;
        }
    }

    if args.json {
        println!("{}", state.to_json()?);
    } else {
        print_summary(&state, quarters);
    }
    Ok(())
}

/// Pick the cheapest choice; free choices are always accepted
fn resolve_cheapest(state: &mut GameState) -> Result<()> {
    let Some(pending) = state.pending_event() else {
        return Ok(());
    };
    let choice = pending
        .choices()
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cost.total_cmp(&b.1.cost))
        .map(|(i, _)| i)
        .unwrap_or(0);
    state.resolve_event(choice)?;
    Ok(())
}

fn abandon_losers(state: &mut GameState) {
    let losers: Vec<DoubletId> = state
        .doublets()
        .iter()
        .filter(|d| d.is_active())
        .filter(|d| d.cash_history.latest().is_some_and(|p| p.value < 0.0))
        .map(|d| d.id)
        .collect();
    for id in losers {
        attempt("abandon", state.abandon(id));
    }
}

/// At most one discretionary action per quarter
fn take_one_step(state: &mut GameState) {
    let cash = state.cash();
    let at_capacity = state.capacity_in_use() >= state.config().max_doublets;

    // Drill a secured site once we can cover the worst-case cost
    if !at_capacity {
        let drillable = state.sites().iter().find(|s| s.is_secured()).map(|s| {
            let worst_case = s
                .revealed_drilling_cost
                .map(|r| r.max)
                .unwrap_or(state.config().sites.drilling_cost[1]);
            (s.id, worst_case)
        });
        if let Some((site, cost)) = drillable {
            if cash - cost >= CASH_RESERVE {
                attempt("drill", state.start_development(site, DRILL_FLOW));
            }
            return;
        }
    }

    // Secure the hottest surveyed site
    let best = state
        .sites()
        .iter()
        .filter(|s| s.is_open())
        .filter_map(|s| s.revealed_temperature.map(|r| (s.id, r.min)))
        .filter(|(_, t)| *t >= TARGET_TEMP)
        .max_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((site, _)) = best {
        if cash - state.config().secure_cost >= CASH_RESERVE {
            attempt("secure", state.secure(site));
        }
        return;
    }

    // Otherwise survey the next unknown site
    let unknown = state
        .sites()
        .iter()
        .find(|s| s.is_open() && s.investigation_level == 0)
        .map(|s| s.id);
    if let Some(site) = unknown {
        let cost = state.config().investigation_costs[0];
        if cash - cost >= CASH_RESERVE {
            attempt("investigate", state.investigate(site, 1));
        }
    }
}

/// Strategy moves are best effort; a rejection only costs the quarter
fn attempt(action: &str, result: Result<ActionOutcome>) {
    if let Err(e) = result {
        tracing::debug!(action, reason = e.kind(), "Move rejected");
    }
}

fn print_summary(state: &GameState, quarters: u32) {
    let snapshot = state.snapshot();
    println!("=== AUTOPLAY (seed {}) ===", state.seed());
    println!("Quarters played: {}", quarters);
    println!("Final date:      {}", state.calendar());
    println!("Cash:            €{:.2}M", state.cash());
    println!("Heat delivered:  {:.0} GWh", state.total_heat_delivered());
    println!(
        "Doublets:        {} active, {} under construction",
        snapshot.stats.active_doublets, snapshot.stats.sites_under_construction
    );
    match state.game_over() {
        Some(reason) => println!("{}", reason),
        None => println!("Still running."),
    }
    println!("\nLast log lines:");
    for line in state.log().lines() {
        println!("  {}", line);
    }
}
