// All countries of a game. Roads may cross borders, so lookups that follow a
// road go through here rather than through a single Country.
use std::collections::BTreeMap;

use crate::context::Context;
use crate::country::{City, CityRef, Country, Road, Value};
use crate::position::Position;

#[derive(Default)]
pub struct World {
    countries: BTreeMap<String, Country>,
}

impl World {
    pub fn new() -> Self {
        World::default()
    }

    pub fn add_country(&mut self, country: Country) {
        self.countries.insert(country.name().to_string(), country);
    }

    pub fn countries(&self) -> impl Iterator<Item=&Country> + '_ {
        self.countries.values()
    }

    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.get(name)
    }

    pub fn country_mut(&mut self, name: &str) -> Option<&mut Country> {
        self.countries.get_mut(name)
    }

    pub fn city(&self, city: &CityRef) -> Option<&City> {
        self.country(&city.country).and_then(|country| country.city(&city.name))
    }

    /// Current value of `city`, 0 if it does not exist.
    pub fn value(&self, city: &CityRef) -> Value {
        self.city(city).map_or(0, City::value)
    }

    pub fn roads<'a>(&'a self, city: &'a CityRef) -> impl Iterator<Item=&'a Road> + 'a {
        self.country(&city.country).into_iter()
            .flat_map(move |country| country.roads(city))
    }

    pub fn ready_to_travel(&self, from: &CityRef, to: &CityRef) -> Position {
        match self.country(&from.country) {
            Some(country) => country.ready_to_travel(from, to),
            None => Position::stationary(from.clone()),
        }
    }

    pub fn arrive(&mut self, city: &CityRef, ctx: &mut Context) -> Value {
        match self.country_mut(&city.country) {
            Some(country) => country.arrive(&city.name, ctx),
            None => 0,
        }
    }

    pub fn reset(&mut self) {
        for country in self.countries.values_mut() {
            country.reset();
        }
    }
}
