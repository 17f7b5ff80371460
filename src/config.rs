// Scenario files: the countries, cities, roads and players of a game.
use log::info;
use serde::Deserialize;
use serde_json::Error as JSONError;
use thiserror::Error;

use crate::context::Context;
use crate::country::{City, CityRef, Country, Distance, Value};
use crate::game::Game;
use crate::player::Player;
use crate::strategies::StrategyKind;
use crate::world::World;

/// Scenario used when none is given on the command line.
pub const DEFAULT_SCENARIO: &str = include_str!("../scenarios/default.json");

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed reading the scenario ({0})")]
    Read(#[from] std::io::Error),
    #[error("Failed parsing the scenario ({0})")]
    Parse(#[from] JSONError),
    #[error("Unknown country '{0}'")]
    UnknownCountry(String),
    #[error("Unknown city '{city}' in '{country}'")]
    UnknownCity { country: String, city: String },
    #[error("The scenario has no cities to start from")]
    NoStart,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Scenario {
    /// Seed of the shared random source.
    pub seed: u64,
    pub total_steps: u32,
    pub countries: Vec<CountryConfig>,
    #[serde(default)]
    pub players: Vec<PlayerConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CountryConfig {
    pub name: String,
    pub cities: Vec<CityConfig>,
    #[serde(default)]
    pub roads: Vec<RoadConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CityConfig {
    pub name: String,
    pub value: Value,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RoadConfig {
    pub from: String,
    pub to: String,
    pub length: Distance,
    /// Country of `to`, when the road crosses a border. Such roads are one
    /// way; declare the way back in the other country.
    #[serde(default)]
    pub to_country: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayerConfig {
    pub kind: StrategyKind,
    pub country: String,
    pub city: String,
}

impl Scenario {
    pub fn from_file(filename: &str) -> Result<Self, Error> {
        info!("Loading scenario from {filename}");
        let data = std::fs::read_to_string(filename)?;
        Scenario::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn build_world(&self) -> Result<World, Error> {
        let mut world = World::new();
        for config in &self.countries {
            let mut country = Country::new(&config.name);
            for city in &config.cities {
                country.add_city(City::new(&city.name, city.value));
            }
            world.add_country(country);
        }
        // Cities first, so roads can point across borders.
        for config in &self.countries {
            for road in &config.roads {
                let from = lookup(&world, &config.name, &road.from)?;
                let to_country = road.to_country.as_deref().unwrap_or(&config.name);
                let to = lookup(&world, to_country, &road.to)?;
                if let Some(country) = world.country_mut(&config.name) {
                    country.add_roads(&from, &to, road.length);
                }
            }
        }
        Ok(world)
    }

    /// Where players without an explicit start begin: the first player's
    /// city, or else the first city declared.
    pub fn default_start(&self) -> Option<(String, String)> {
        if let Some(player) = self.players.first() {
            return Some((player.country.clone(), player.city.clone()));
        }
        self.countries.iter()
            .find_map(|country| country.cities.first()
                      .map(|city| (country.name.clone(), city.name.clone())))
    }

    /// Builds a ready-to-run game. If `kinds` is not empty it replaces the
    /// scenario's players, all starting from `default_start`.
    pub fn build_game(&self, kinds: &[StrategyKind]) -> Result<Game, Error> {
        let world = self.build_world()?;
        let players: Vec<(StrategyKind, CityRef)> = if kinds.is_empty() {
            self.players.iter()
                .map(|p| lookup(&world, &p.country, &p.city).map(|start| (p.kind, start)))
                .collect::<Result<_, Error>>()?
        } else {
            let (country, city) = self.default_start().ok_or(Error::NoStart)?;
            let start = lookup(&world, &country, &city)?;
            kinds.iter().map(|&kind| (kind, start.clone())).collect()
        };

        let mut game = Game::new(world, Context::new(self.seed, self.total_steps));
        for (kind, start) in players {
            game.add_player(Player::new(start, kind.build()));
        }
        Ok(game)
    }
}

fn lookup(world: &World, country: &str, city: &str) -> Result<CityRef, Error> {
    let found = world.country(country)
        .ok_or_else(|| Error::UnknownCountry(country.to_string()))?;
    found.city_ref(city).ok_or_else(|| Error::UnknownCity {
        country: country.to_string(),
        city: city.to_string(),
    })
}
