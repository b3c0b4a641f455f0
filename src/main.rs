//! Geothermal Portfolio - Entry Point
//!
//! Text front end over the simulation core. It reads commands from stdin,
//! calls the corresponding operation and prints the resulting state.

use clap::Parser;
use geothermal_portfolio::core::error::Result;
use geothermal_portfolio::prelude::*;
use geothermal_portfolio::simulation::TickReport;

use std::io::{self, Write};
use std::path::PathBuf;

/// Interactive geothermal portfolio game
#[derive(Parser, Debug)]
#[command(name = "geothermal-portfolio")]
#[command(about = "Play the geothermal portfolio game from the terminal")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// TOML config overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geothermal_portfolio=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    tracing::info!(seed = args.seed, "Geothermal Portfolio starting...");
    let mut state = GameState::initialize(args.seed, config)?;

    println!("\n=== GEOTHERMAL PORTFOLIO ===");
    println!("Grow a district-heating business one quarter at a time");
    println!();
    print_help();

    loop {
        display_status(&state);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "tick" | "t" => match state.advance_quarter() {
                Ok(report) => print_report(&report),
                Err(e) => println!("Cannot advance: {}", e),
            },
            "run" => match args.first().and_then(|n| n.parse::<u32>().ok()) {
                Some(n) => run_quarters(&mut state, n),
                None => println!("Usage: run <quarters>"),
            },
            "status" | "s" => display_detailed_status(&state),
            "sites" => display_sites(&state),
            "investigate" | "inv" => {
                match (parse_site(args.first()), args.get(1).and_then(|l| l.parse().ok())) {
                    (Some(site), Some(level)) => report_action(state.investigate(site, level)),
                    _ => println!("Usage: investigate <site> <level 1-3>"),
                }
            }
            "secure" => match parse_site(args.first()) {
                Some(site) => report_action(state.secure(site)),
                None => println!("Usage: secure <site>"),
            },
            "drill" => {
                match (parse_site(args.first()), args.get(1).and_then(|f| f.parse().ok())) {
                    (Some(site), Some(flow)) => report_action(state.start_development(site, flow)),
                    _ => println!("Usage: drill <site> <flow kg/s>"),
                }
            }
            "abandon" => match args.first().and_then(|id| id.parse().ok()) {
                Some(id) => report_action(state.abandon(DoubletId(id))),
                None => println!("Usage: abandon <doublet id>"),
            },
            "choose" => match args.first().and_then(|c| c.parse::<usize>().ok()) {
                Some(choice) => report_action(state.resolve_event(choice)),
                None => println!("Usage: choose <option number>"),
            },
            "json" => println!("{}", state.to_json()?),
            "reset" => {
                state.reset()?;
                println!("Game reset (seed {}).", state.seed());
            }
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    println!(
        "\nGoodbye! Final state: {}, cash €{:.2}M, {:.0} GWh delivered.",
        state.calendar(),
        state.cash(),
        state.total_heat_delivered()
    );
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  tick / t                 - Advance one quarter");
    println!("  run <n>                  - Advance up to n quarters");
    println!("  status / s               - Show doublets and history");
    println!("  sites                    - List candidate sites");
    println!("  investigate <site> <lvl> - Survey a site (levels 1-3)");
    println!("  secure <site>            - Secure a site");
    println!("  drill <site> <flow>      - Drill a secured site");
    println!("  abandon <id>             - Abandon a doublet");
    println!("  choose <n>               - Resolve the pending event");
    println!("  json                     - Dump the state as JSON");
    println!("  reset                    - Restart with the same seed");
    println!("  quit / q                 - Exit");
    println!();
}

/// Sites are addressed by letter ("C") or index ("2")
fn parse_site(arg: Option<&&str>) -> Option<SiteId> {
    let arg = arg?;
    if let Ok(index) = arg.parse::<u32>() {
        return Some(SiteId(index));
    }
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some(SiteId(c.to_ascii_uppercase() as u32 - 'A' as u32))
        }
        _ => None,
    }
}

fn run_quarters(state: &mut GameState, n: u32) {
    println!("Running {} quarters...", n);
    for _ in 0..n {
        match state.advance_quarter() {
            Ok(report) => {
                print_report(&report);
                if report.event.is_some() || report.game_over.is_some() {
                    break;
                }
            }
            Err(e) => {
                println!("Stopped: {}", e);
                break;
            }
        }
    }
}

fn report_action(result: Result<geothermal_portfolio::simulation::ActionOutcome>) {
    match result {
        Ok(outcome) => {
            for line in outcome.log {
                println!("{}", line);
            }
        }
        Err(e) => println!("Rejected: {}", e),
    }
}

fn print_report(report: &TickReport) {
    for line in &report.log {
        println!("{}", line);
    }
    if report.advanced() {
        println!(
            "Quarter closed: net €{:+.2}M, {:.1} GWh",
            report.net_cash, report.heat_gwh
        );
    }
}

fn display_status(state: &GameState) {
    println!();
    println!(
        "[{} {:?}] Cash: €{:.2}M | Doublets: {}/{} | Heat delivered: {:.0} GWh",
        state.calendar(),
        state.calendar().season(),
        state.cash(),
        state.capacity_in_use(),
        state.config().max_doublets,
        state.total_heat_delivered()
    );

    if let Some(pending) = state.pending_event() {
        println!("EVENT: {} - {}", pending.event.name, pending.event.description);
        for (i, choice) in pending.choices().iter().enumerate() {
            println!("  choose {}: {}", i, choice.label);
        }
    }
    if let Some(reason) = state.game_over() {
        println!("{}", reason);
    }
}

fn display_detailed_status(state: &GameState) {
    println!("\n=== Portfolio ===");
    for doublet in state.doublets() {
        let status = if doublet.abandoned { "abandoned" } else { "active" };
        println!(
            "  #{} {:<10} {:>6.1}°C (from {:.0}°C) flow {:>5.1} kg/s  {:>5.1} MW  [{}]",
            doublet.id.0,
            doublet.name,
            doublet.current_temp,
            doublet.initial_temp,
            doublet.flow_rate,
            doublet.heat_output_mw(state.config()),
            status
        );
    }

    println!("\n=== Yearly history ===");
    for (cash, heat) in state.cash_history().iter().zip(state.heat_history().iter()) {
        println!("  {}: €{:+.2}M, {:.0} GWh", cash.year, cash.value, heat.value);
    }

    println!(
        "\nMultipliers: revenue x{:.2}, operating cost x{:.2}",
        state.revenue_multiplier(),
        state.operating_cost_multiplier()
    );

    println!("\n=== Log ===");
    for line in state.log().lines() {
        println!("  {}", line);
    }
}

fn display_sites(state: &GameState) {
    println!("\n=== Sites ===");
    for site in state.sites() {
        let temperature = match site.revealed_temperature {
            Some(range) if range.is_exact() => format!("{:.0}°C", range.min),
            Some(range) => format!("{:.0}-{:.0}°C", range.min, range.max),
            None => "?".to_string(),
        };
        let drilling = match site.revealed_drilling_cost {
            Some(range) if range.is_exact() => format!("€{:.0}M", range.min),
            Some(range) => format!("€{:.0}-{:.0}M", range.min, range.max),
            None => "?".to_string(),
        };
        println!(
            "  [{}] {:<8} L{}  temp {:<10} drill {:<10} {}",
            site.id.0,
            site.name,
            site.investigation_level,
            temperature,
            drilling,
            site.status.label()
        );
    }
}
