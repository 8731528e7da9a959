//! Demo driver for the scheduler runtime.
//!
//! A small subcommand dispatcher that loads a scenario list from a TOML
//! file and prints ANSI-colored terminal output. It drives real
//! `abt-core` scheduler instances end-to-end on top of `abt-pool`'s FIFO
//! pool and `abt-xstream`'s OS-thread-backed execution stream.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use abt_core::sched_def::SchedConfig;
use abt_core::{AccessMode, Predef, Scheduler, WorkUnit, WorkUnitId};
use abt_pool::FifoPoolFactory;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

#[derive(Parser)]
#[command(name = "abt", about = "Demo driver for the abt scheduler runtime")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run every scenario in demo.toml.
    Run,
    /// List the scenarios demo.toml defines, without running them.
    List,
    /// Run a single named scenario.
    Scenario { name: String },
}

#[derive(Debug, Deserialize, Clone)]
struct ScenarioConfig {
    name: String,
    predef: String,
    num_pools: usize,
    tasks: usize,
    stop: String,
}

#[derive(Debug, Deserialize)]
struct DemoFile {
    scenario: Vec<ScenarioConfig>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let scenarios = load_scenarios();

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            for s in &scenarios {
                run_scenario(s);
            }
        }
        Command::List => list_scenarios(&scenarios),
        Command::Scenario { name } => {
            let s = find_scenario(&scenarios, &name);
            run_scenario(s);
        }
    }
}

fn find_scenario<'a>(scenarios: &'a [ScenarioConfig], name: &str) -> &'a ScenarioConfig {
    scenarios.iter().find(|s| s.name == name).unwrap_or_else(|| {
        eprintln!("Unknown scenario: {name}");
        eprintln!("Use 'abt list' to see all scenarios");
        std::process::exit(1);
    })
}

fn load_scenarios() -> Vec<ScenarioConfig> {
    for path in ["demo.toml", "abt-cli/demo.toml", "../demo.toml"] {
        if let Ok(content) = std::fs::read_to_string(path) {
            let file: DemoFile = toml::from_str(&content).expect("demo.toml format error");
            return file.scenario;
        }
    }
    eprintln!("{YELLOW}warning:{RESET} no demo.toml found, using built-in defaults");
    default_scenarios()
}

fn default_scenarios() -> Vec<ScenarioConfig> {
    vec![
        ScenarioConfig {
            name: "finish".into(),
            predef: "basic".into(),
            num_pools: 1,
            tasks: 8,
            stop: "finish".into(),
        },
        ScenarioConfig {
            name: "exit".into(),
            predef: "basic".into(),
            num_pools: 1,
            tasks: 8,
            stop: "exit".into(),
        },
        ScenarioConfig {
            name: "prio".into(),
            predef: "prio".into(),
            num_pools: abt_core::PRIO_LEVELS,
            tasks: 16,
            stop: "finish".into(),
        },
    ]
}

fn list_scenarios(scenarios: &[ScenarioConfig]) {
    println!("{BOLD}abt demo scenarios{RESET}\n");
    for s in scenarios {
        println!(
            "  {BOLD}{}{RESET}  {DIM}predef={} pools={} tasks={} stop={}{RESET}",
            s.name, s.predef, s.num_pools, s.tasks, s.stop
        );
    }
}

fn parse_predef(name: &str) -> Predef {
    match name {
        "prio" => Predef::Prio,
        "default" => Predef::Default,
        _ => Predef::Basic,
    }
}

/// Build a scheduler from `s`, seed its pools with no-op counting tasks,
/// drive it on a dedicated execution stream, request the configured stop
/// mode, and print the final introspection line once it has drained.
fn run_scenario(s: &ScenarioConfig) {
    println!("\n{DIM}{BOLD}=== {} ==={RESET}", s.name);

    let config = SchedConfig {
        access: AccessMode::Prw,
        automatic: true,
        extra: None,
    };
    let sched = Scheduler::create_basic(
        parse_predef(&s.predef),
        s.num_pools.max(1),
        None,
        &config,
        &FifoPoolFactory,
    )
    .expect("scheduler construction failed");

    let completed = Arc::new(AtomicUsize::new(0));
    for i in 0..s.tasks {
        let completed = completed.clone();
        let pool = &sched.pools()[i % s.num_pools.max(1)];
        pool.push(WorkUnit::Task(
            WorkUnitId::new(),
            Box::new(move || {
                completed.fetch_add(1, Ordering::Relaxed);
            }),
        ));
    }

    let (es, handle) =
        abt_xstream::spawn(sched.clone()).expect("failed to spawn execution stream");

    match s.stop.as_str() {
        "exit" => sched.exit(),
        _ => sched.finish(),
    }
    es.resume();
    handle.join().expect("execution stream thread panicked");

    println!(
        "  {GREEN}{sched}{RESET}  ran {}/{} tasks",
        completed.load(Ordering::Relaxed),
        s.tasks
    );

    Scheduler::free(sched);
}
