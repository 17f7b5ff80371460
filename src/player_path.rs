// Depth-first search for the most valuable walk within the remaining steps.
//
// Every walk from the current city that fits in the budget is scored; cities
// lose half their estimated worth each extra time a walk passes through them,
// and later gains are discounted by IMPULSIVENESS per road. Run time is
// exponential in MAX_SEARCH_BUDGET.

use arrayvec::ArrayVec;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt;

use crate::country::{CityRef, Distance, Road};
use crate::world::World;

/// Budget is clamped to this on every call. Gets slow if >= 30.
pub const MAX_SEARCH_BUDGET: usize = 26;

/// Discount applied per road already travelled before a gain.
pub const IMPULSIVENESS: f64 = 1.10;

type Visits = FxHashMap<CityRef, u32>;

/// Estimated worth of `value` when reached for the `visits`-th time, as the
/// `index`-th road of a walk.
pub fn contribution(value: f64, visits: u32, index: usize) -> f64 {
    let revisit_penalty = 2f64.powi(visits.saturating_sub(1) as i32);
    value / (revisit_penalty * IMPULSIVENESS.powi(index as i32))
}

#[derive(Clone, Debug, Default)]
pub struct PlayerPath {
    // Stack of roads: the top is the first road to take.
    roads: ArrayVec<Road, MAX_SEARCH_BUDGET>,
    length: Distance,
    value: f64,
}

impl PlayerPath {
    pub fn new() -> Self {
        PlayerPath::default()
    }

    /// The first road to take, if any.
    pub fn road(&self) -> Option<&Road> {
        self.roads.last()
    }

    pub fn length(&self) -> Distance {
        self.length
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    /// Roads in travel order.
    pub fn roads(&self) -> impl Iterator<Item=&Road> + '_ {
        self.roads.iter().rev()
    }

    /// Puts `road` in front of this path. `road` becomes road number `index`
    /// of the walk and reaches its destination for the `visits`-th time.
    ///
    /// Panics if `road` does not lead to where this path starts.
    pub fn add_road(&mut self, world: &World, road: Road, visits: u32, index: usize) {
        if let Some(top) = self.road() {
            if top.from() != road.to() {
                panic!("Invalid road {road}: it does not chain onto {top}, \
                        the next city is {next}", next = top.from());
            }
        }
        if index == 0 {
            self.value += contribution(world.value(road.from()) as f64, 1, 0);
        }
        self.value += contribution(world.value(road.to()) as f64, visits, index);
        self.length += road.length();
        self.roads.push(road);
    }
}

impl fmt::Display for PlayerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.roads().join(", "))
    }
}

/// Best walk out of `from` given `steps_left`. Empty if no road fits.
pub fn best_path(world: &World, from: &CityRef, steps_left: i64) -> PlayerPath {
    let mut visits = Visits::default();
    visits.insert(from.clone(), 1);
    maximize_value(world, &visits, from, steps_left, 0)
}

/// The city to head to now, or None to stay put.
pub fn best_destination(world: &World, from: &CityRef, steps_left: i64) -> Option<CityRef> {
    best_path(world, from, steps_left).road().map(|road| road.to().clone())
}

fn maximize_value(world: &World, visits: &Visits, city: &CityRef,
                  budget: i64, index: usize) -> PlayerPath {
    let budget = budget.min(MAX_SEARCH_BUDGET as i64);
    let mut best = PlayerPath::new();
    let mut best_value = 0.0;
    for road in world.roads(city) {
        let length = road.length() as i64;
        if length > budget {
            continue;
        }
        // Each branch gets its own copy, siblings never see each other's visits.
        let mut branch_visits = visits.clone();
        let count = branch_visits.entry(road.to().clone()).or_insert(0);
        *count += 1;
        let count = *count;

        let mut path = maximize_value(world, &branch_visits, road.to(),
                                      budget - length, index + 1);
        path.add_road(world, road.clone(), count, index);
        let value = path.value();
        if value > best_value || (value == best_value && path.length() < best.length()) {
            best = path;
            best_value = value;
        }
    }
    best
}
