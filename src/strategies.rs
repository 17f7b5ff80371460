// Different ways for a player to pick where to go next once it has arrived.

use clap::ValueEnum;
use log::debug;
use serde::Deserialize;
use std::time::Instant;

use crate::context::Context;
use crate::country::CityRef;
use crate::player_path::best_path;
use crate::world::World;

pub trait Strategy {
    // Name to display for players using this strategy.
    fn name(&self) -> &str;

    // Implementation of the strategy. None means stay where we are.
    fn do_choose(&mut self, world: &World, ctx: &mut Context,
                 here: &CityRef) -> Option<CityRef>;

    // Wrapper to do_choose, to log timing and the decision.
    fn choose(&mut self, world: &World, ctx: &mut Context,
              here: &CityRef) -> Option<CityRef> {
        let start = Instant::now();
        let choice = self.do_choose(world, ctx, here);
        match &choice {
            Some(next) => debug!("{} in {} heads to {} (decided in {:?})",
                                 self.name(), here, next, start.elapsed()),
            None => debug!("{} stays in {}", self.name(), here),
        };
        choice
    }
}

#[derive(ValueEnum, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Never moves on its own, only through travel_to/set_position.
    Manual,
    /// Picks a random road out of every city it reaches.
    Random,
    /// Depth-limited search for the most valuable walk.
    Smart,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Manual => Box::new(ManualStrategy),
            StrategyKind::Random => Box::new(RandomStrategy),
            StrategyKind::Smart => Box::new(SmartStrategy),
        }
    }
}

// Externally driven traveler: takes no decisions of its own.
pub struct ManualStrategy;

// Uniformly random road out of the current city.
pub struct RandomStrategy;

// Runs the path search with the steps left in the game and takes the first
// road of the best walk found.
pub struct SmartStrategy;

impl Strategy for ManualStrategy {
    fn name(&self) -> &str {
        "Player"
    }

    fn do_choose(&mut self, _world: &World, _ctx: &mut Context,
                 _here: &CityRef) -> Option<CityRef> {
        None
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "Random Player"
    }

    fn do_choose(&mut self, world: &World, ctx: &mut Context,
                 here: &CityRef) -> Option<CityRef> {
        let roads: Vec<_> = world.roads(here).collect();
        if roads.is_empty() {
            return None;
        }
        let road = roads[ctx.random_index(roads.len())];
        Some(road.to().clone())
    }
}

impl Strategy for SmartStrategy {
    fn name(&self) -> &str {
        "Smart Player"
    }

    fn do_choose(&mut self, world: &World, ctx: &mut Context,
                 here: &CityRef) -> Option<CityRef> {
        let path = best_path(world, here, ctx.steps_left() as i64);
        debug!("Best walk out of {here}: {path} (value {value:.2})",
               value = path.value());
        path.road().map(|road| road.to().clone())
    }
}
