use std::fmt;
use std::hash::{Hash, Hasher};

use crate::country::{CityRef, Distance};

/// Progress of a traveler along a single road. `distance` is what remains,
/// `total` is the road length and never changes.
#[derive(Clone, Debug)]
pub struct Position {
    from: CityRef,
    to: CityRef,
    distance: Distance,
    total: Distance,
}

impl Position {
    pub fn new(from: CityRef, to: CityRef, distance: Distance) -> Self {
        let distance = distance.max(0);
        Position { from, to, distance, total: distance }
    }

    pub fn stationary(city: CityRef) -> Self {
        Position::new(city.clone(), city, 0)
    }

    pub fn from(&self) -> &CityRef {
        &self.from
    }

    pub fn to(&self) -> &CityRef {
        &self.to
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn total(&self) -> Distance {
        self.total
    }

    pub fn has_arrived(&self) -> bool {
        self.distance == 0
    }

    /// Moves one unit closer to `to`. Returns false if already there.
    pub fn advance(&mut self) -> bool {
        if self.distance > 0 {
            self.distance -= 1;
            true
        } else {
            false
        }
    }

    pub fn turn_around(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        self.distance = self.total - self.distance;
    }
}

// Positions are compared by city names only.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.from.name == other.from.name
            && self.to.name == other.to.name
            && self.distance == other.distance
            && self.total == other.total
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.name.hash(state);
        self.to.name.hash(state);
        self.distance.hash(state);
        self.total.hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} : {}/{}", self.from, self.to, self.distance, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(distance: Distance) -> Position {
        Position::new(CityRef::new("X", "A"), CityRef::new("X", "B"), distance)
    }

    #[test]
    fn test_advance_until_arrived() {
        let mut position = trip(4);
        for _ in 0..4 {
            assert!(!position.has_arrived());
            assert!(position.advance());
        }
        assert!(position.has_arrived());
        assert_eq!(position.total(), 4);
    }

    #[test]
    fn test_advance_when_arrived_is_noop() {
        let mut position = trip(0);
        let before = position.clone();
        assert!(!position.advance());
        assert_eq!(position, before);
        assert_eq!(position.distance(), 0);
    }

    #[test]
    fn test_turn_around_mirrors_progress() {
        let mut position = trip(5);
        position.advance();
        position.advance();
        position.turn_around();
        assert_eq!(position.from().name, "B");
        assert_eq!(position.to().name, "A");
        assert_eq!(position.distance(), 2);
        assert_eq!(position.total(), 5);
    }

    #[test]
    fn test_turn_around_twice_is_identity() {
        for steps in 0..=3 {
            let mut position = trip(3);
            for _ in 0..steps {
                position.advance();
            }
            let original = position.clone();
            position.turn_around();
            position.turn_around();
            assert_eq!(position, original, "after {steps} steps");
        }
    }

    #[test]
    fn test_equality_ignores_country() {
        let here = Position::new(CityRef::new("X", "A"), CityRef::new("X", "B"), 2);
        let there = Position::new(CityRef::new("Y", "A"), CityRef::new("Z", "B"), 2);
        assert_eq!(here, there);
        let mut moved = there.clone();
        moved.advance();
        assert_ne!(here, moved);
    }

    #[test]
    fn test_stationary() {
        let position = Position::stationary(CityRef::new("X", "A"));
        assert!(position.has_arrived());
        assert_eq!(position.from(), position.to());
        assert_eq!(position.to_string(), "A -> A : 0/0");
    }
}
