use clap::Parser;
use env_logger::Env;
use log::{error, info};

use road_trip::config::{DEFAULT_SCENARIO, Error, Scenario};
use road_trip::strategies::StrategyKind;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario JSON file with countries, roads and players. A built-in
    /// Denmark/Sweden scenario is used if not given.
    #[arg(short, long)]
    scenario: Option<String>,

    /// Overrides the scenario's number of steps.
    #[arg(long)]
    steps: Option<u32>,

    /// Overrides the scenario's random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Replaces the scenario's players, e.g. `--players smart,random`.
    #[arg(short, long, value_enum, value_delimiter = ',')]
    players: Vec<StrategyKind>,

    /// Number of games to play, resetting the cities in between.
    #[arg(short, long, default_value_t = 1)]
    games: u32,
}

fn load_scenario(cli: &Cli) -> Result<Scenario, Error> {
    let mut scenario = match &cli.scenario {
        Some(filename) => Scenario::from_file(filename)?,
        None => {
            info!("Using the built-in scenario.");
            Scenario::from_json(DEFAULT_SCENARIO)?
        },
    };
    if let Some(steps) = cli.steps {
        scenario.total_steps = steps;
    }
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    Ok(scenario)
}

fn run(cli: Cli) -> Result<(), Error> {
    let scenario = load_scenario(&cli)?;
    let mut game = scenario.build_game(&cli.players)?;
    for round in 1..=cli.games {
        if round > 1 {
            game.reset();
        }
        info!("Game {round}/{games}", games = cli.games);
        game.run();
        println!("Game {round}:");
        for (rank, player) in game.standings().iter().enumerate() {
            println!("  {rank}. {name:<14} {money:>6}  ({position})",
                     rank = rank + 1, name = player.name(),
                     money = player.money(), position = player.position());
        }
    }
    Ok(())
}

fn main() {
    // Load .env file
    dotenvy::dotenv().ok();
    // Init logger with default value of info
    // This can be overriden with RUST_LOG env var
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("Error while running the simulation with underlying error:");
        error!("  {}", err);
        std::process::exit(1);
    }
}
