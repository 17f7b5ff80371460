use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::context::Context;
use crate::position::Position;

pub type Value = i64;
pub type Distance = i32;

/// Names a city within a given country. Two references are the same city
/// only if both the country and the city names match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityRef {
    pub country: String,
    pub name: String,
}

impl CityRef {
    pub fn new(country: &str, name: &str) -> Self {
        CityRef { country: country.to_string(), name: name.to_string() }
    }
}

impl fmt::Display for CityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Clone, Debug)]
pub struct City {
    name: String,
    value: Value,
    initial_value: Value,
}

impl City {
    pub fn new(name: &str, value: Value) -> Self {
        City { name: name.to_string(), value, initial_value: value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn initial_value(&self) -> Value {
        self.initial_value
    }

    pub fn change_value(&mut self, amount: Value) {
        self.value += amount;
    }

    pub fn reset(&mut self) {
        self.value = self.initial_value;
    }

    /// Skims a random bonus off this city for an arriving traveler.
    pub fn arrive(&mut self, ctx: &mut Context) -> Value {
        let bonus = Country::bonus(ctx, self.value);
        self.value -= bonus;
        bonus
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.value)
    }
}

/// A directed road. Roads compare and order by the names of their endpoints
/// and then by length, regardless of which country those names belong to.
#[derive(Clone, Debug)]
pub struct Road {
    from: CityRef,
    to: CityRef,
    length: Distance,
}

impl Road {
    pub fn new(from: CityRef, to: CityRef, length: Distance) -> Self {
        Road { from, to, length }
    }

    pub fn from(&self) -> &CityRef {
        &self.from
    }

    pub fn to(&self) -> &CityRef {
        &self.to
    }

    pub fn length(&self) -> Distance {
        self.length
    }
}

impl PartialEq for Road {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Road {}

impl PartialOrd for Road {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Road {
    fn cmp(&self, other: &Self) -> Ordering {
        self.from.name.cmp(&other.from.name)
            .then_with(|| self.to.name.cmp(&other.to.name))
            .then_with(|| self.length.cmp(&other.length))
    }
}

impl fmt::Display for Road {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} : {}", self.from, self.to, self.length)
    }
}

pub struct Country {
    name: String,
    cities: BTreeMap<String, City>,
    // Outgoing roads, keyed by origin city name.
    network: BTreeMap<String, BTreeSet<Road>>,
}

impl Country {
    pub fn new(name: &str) -> Self {
        Country {
            name: name.to_string(),
            cities: BTreeMap::new(),
            network: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Random bonus in `[0, value]`, or 0 for non-positive values.
    pub fn bonus(ctx: &mut Context, value: Value) -> Value {
        if value > 0 {
            ctx.random_up_to(value)
        } else {
            0
        }
    }

    pub fn cities(&self) -> impl Iterator<Item=&City> + '_ {
        self.cities.values()
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    pub fn city_mut(&mut self, name: &str) -> Option<&mut City> {
        self.cities.get_mut(name)
    }

    pub fn city_ref(&self, name: &str) -> Option<CityRef> {
        self.cities.get(name).map(|city| CityRef::new(&self.name, city.name()))
    }

    /// Registers `city` with no outgoing roads. Re-adding a name replaces the
    /// previous city and drops its roads.
    pub fn add_city(&mut self, city: City) {
        self.network.insert(city.name.clone(), BTreeSet::new());
        self.cities.insert(city.name.clone(), city);
    }

    pub fn contains(&self, city: &CityRef) -> bool {
        city.country == self.name && self.network.contains_key(&city.name)
    }

    /// Adds `a -> b` and `b -> a`, each only if its origin belongs to this
    /// country. Non-positive lengths and self-loops are ignored.
    pub fn add_roads(&mut self, a: &CityRef, b: &CityRef, length: Distance) {
        if length <= 0 || a == b {
            return;
        }
        if self.contains(a) {
            if let Some(roads) = self.network.get_mut(&a.name) {
                roads.insert(Road::new(a.clone(), b.clone(), length));
            }
        }
        if self.contains(b) {
            if let Some(roads) = self.network.get_mut(&b.name) {
                roads.insert(Road::new(b.clone(), a.clone(), length));
            }
        }
    }

    /// Outgoing roads of `city`, in road order. Empty for unknown cities.
    pub fn roads(&self, city: &CityRef) -> impl Iterator<Item=&Road> + '_ {
        let roads = if city.country == self.name {
            self.network.get(&city.name)
        } else {
            None
        };
        roads.into_iter().flatten()
    }

    pub fn reset(&mut self) {
        for city in self.cities.values_mut() {
            city.reset();
        }
    }

    /// An arrived, zero-length position at `city`.
    pub fn position(&self, city: &CityRef) -> Position {
        Position::stationary(city.clone())
    }

    /// Position for travelling along the first road from `from` to `to`. If
    /// there is no such road the traveler stays at `from`.
    pub fn ready_to_travel(&self, from: &CityRef, to: &CityRef) -> Position {
        if from == to {
            return self.position(from);
        }
        match self.roads(from).find(|road| road.to() == to) {
            Some(road) => Position::new(from.clone(), to.clone(), road.length()),
            None => self.position(from),
        }
    }

    /// Applies the arrival bonus at `city` and returns what was collected.
    pub fn arrive(&mut self, city: &str, ctx: &mut Context) -> Value {
        match self.cities.get_mut(city) {
            Some(city) => city.arrive(ctx),
            None => 0,
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_country() -> Country {
        let mut country = Country::new("X");
        country.add_city(City::new("A", 10));
        country.add_city(City::new("B", 5));
        country.add_city(City::new("C", 7));
        country
    }

    fn city(name: &str) -> CityRef {
        CityRef::new("X", name)
    }

    fn roads_from(country: &Country, name: &str) -> Vec<(String, Distance)> {
        country.roads(&city(name))
            .map(|road| (road.to().name.clone(), road.length()))
            .collect()
    }

    #[test]
    fn test_add_roads_both_directions() {
        let mut country = make_country();
        country.add_roads(&city("A"), &city("B"), 4);
        assert_eq!(roads_from(&country, "A"), vec![("B".to_string(), 4)]);
        assert_eq!(roads_from(&country, "B"), vec![("A".to_string(), 4)]);
        assert!(roads_from(&country, "C").is_empty());
    }

    #[test]
    fn test_add_roads_invalid_is_noop() {
        let mut country = make_country();
        country.add_roads(&city("A"), &city("B"), 0);
        country.add_roads(&city("A"), &city("B"), -3);
        country.add_roads(&city("A"), &city("A"), 2);
        for name in ["A", "B", "C"] {
            assert!(roads_from(&country, name).is_empty(), "{name} got a road");
        }
    }

    #[test]
    fn test_add_roads_unregistered_endpoint_is_one_way() {
        let mut country = make_country();
        let outside = CityRef::new("Y", "Z");
        country.add_roads(&city("A"), &outside, 3);
        assert_eq!(roads_from(&country, "A"), vec![("Z".to_string(), 3)]);
        assert_eq!(country.roads(&outside).count(), 0);

        country.add_roads(&CityRef::new("X", "Nowhere"), &city("B"), 2);
        assert_eq!(roads_from(&country, "B"), vec![("Nowhere".to_string(), 2)]);
    }

    #[test]
    fn test_roads_ordered_by_destination_then_length() {
        let mut country = make_country();
        country.add_roads(&city("A"), &city("C"), 1);
        country.add_roads(&city("A"), &city("B"), 9);
        country.add_roads(&city("A"), &city("B"), 2);
        assert_eq!(roads_from(&country, "A"), vec![
            ("B".to_string(), 2),
            ("B".to_string(), 9),
            ("C".to_string(), 1),
        ]);
    }

    #[test]
    fn test_road_equality_uses_names() {
        let here = Road::new(CityRef::new("X", "A"), CityRef::new("X", "B"), 3);
        let there = Road::new(CityRef::new("Y", "A"), CityRef::new("Z", "B"), 3);
        let longer = Road::new(CityRef::new("X", "A"), CityRef::new("X", "B"), 4);
        assert_eq!(here, there);
        assert_ne!(here, longer);
        assert!(here < longer);
    }

    #[test]
    fn test_bonus_in_range() {
        let mut ctx = Context::new(7, 10);
        for value in [1, 2, 10, 1000] {
            for _ in 0..200 {
                let bonus = Country::bonus(&mut ctx, value);
                assert!((0..=value).contains(&bonus), "bonus {bonus} for {value}");
            }
        }
        assert_eq!(Country::bonus(&mut ctx, 0), 0);
        assert_eq!(Country::bonus(&mut ctx, -5), 0);
    }

    #[test]
    fn test_arrive_skims_value() {
        let mut ctx = Context::new(3, 10);
        let mut country = make_country();
        let bonus = country.arrive("A", &mut ctx);
        assert!((0..=10).contains(&bonus));
        assert_eq!(country.city("A").unwrap().value(), 10 - bonus);
        assert_eq!(country.arrive("Nowhere", &mut ctx), 0);
    }

    #[test]
    fn test_arrive_never_goes_negative() {
        let mut ctx = Context::new(11, 10);
        let mut country = make_country();
        for _ in 0..100 {
            country.arrive("B", &mut ctx);
            assert!(country.city("B").unwrap().value() >= 0);
        }
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut ctx = Context::new(5, 10);
        let mut country = make_country();
        country.city_mut("A").unwrap().change_value(-25);
        country.city_mut("C").unwrap().change_value(100);
        country.arrive("B", &mut ctx);
        country.reset();
        for city in country.cities() {
            assert_eq!(city.value(), city.initial_value(), "{city}");
        }
        assert_eq!(country.city("A").unwrap().value(), 10);
    }

    #[test]
    fn test_ready_to_travel() {
        let mut country = make_country();
        country.add_roads(&city("A"), &city("B"), 3);

        let trip = country.ready_to_travel(&city("A"), &city("B"));
        assert_eq!(trip, Position::new(city("A"), city("B"), 3));
        assert!(!trip.has_arrived());

        let same = country.ready_to_travel(&city("C"), &city("C"));
        assert!(same.has_arrived());
        assert_eq!(same.total(), 0);
        assert_eq!(same.to(), &city("C"));

        let stuck = country.ready_to_travel(&city("A"), &city("C"));
        assert!(stuck.has_arrived());
        assert_eq!(stuck.from(), &city("A"));
        assert_eq!(stuck.to(), &city("A"));
    }

    #[test]
    fn test_ready_to_travel_same_city_without_network() {
        let country = Country::new("Empty");
        let nowhere = CityRef::new("Empty", "Q");
        let position = country.ready_to_travel(&nowhere, &nowhere);
        assert!(position.has_arrived());
        assert_eq!(position.total(), 0);
    }

    #[test]
    fn test_display() {
        let country = make_country();
        assert_eq!(country.city("A").unwrap().to_string(), "A (10)");
        let road = Road::new(city("A"), city("B"), 3);
        assert_eq!(road.to_string(), "A -> B : 3");
        assert_eq!(country.to_string(), "X");
    }
}
