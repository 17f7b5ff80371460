use log::debug;

use crate::context::Context;
use crate::country::{CityRef, Value};
use crate::position::Position;
use crate::strategies::Strategy;
use crate::world::World;

/// A traveler moving along the roads of the world and collecting bonuses in
/// the cities it arrives at. Where it goes next is up to its strategy.
pub struct Player {
    /// Where the player is now.
    position: Position,
    /// Where to continue once `position` is done, if it starts there.
    pending: Option<Position>,
    /// Money collected so far.
    money: Value,
    start: CityRef,
    strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(start: CityRef, strategy: Box<dyn Strategy>) -> Self {
        Player {
            position: Position::stationary(start.clone()),
            pending: None,
            money: 0,
            start,
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        self.strategy.name()
    }

    pub fn money(&self) -> Value {
        self.money
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn pending_position(&self) -> Option<&Position> {
        self.pending.as_ref()
    }

    /// Country the player is in: the destination's once arrived, otherwise
    /// the one it left from.
    pub fn country(&self) -> &str {
        if self.position.has_arrived() {
            &self.position.to().country
        } else {
            &self.position.from().country
        }
    }

    /// Forgets the money collected.
    pub fn reset(&mut self) {
        self.money = 0;
    }

    /// Back to the start city with no money and nothing planned.
    pub fn restart(&mut self) {
        self.reset();
        self.position = Position::stationary(self.start.clone());
        self.pending = None;
    }

    /// Advances one step. On arrival the city's bonus is collected and a
    /// pending position starting there is taken up. Whenever the player is
    /// standing in a city afterwards, its strategy picks the next road.
    pub fn step(&mut self, world: &mut World, ctx: &mut Context) {
        if self.position.advance() && self.position.has_arrived() {
            let here = self.position.to().clone();
            let bonus = world.arrive(&here, ctx);
            self.money += bonus;
            debug!("{} arrived in {} and collected {} (total {})",
                   self.name(), here, bonus, self.money);
            if let Some(pending) = self.pending.take() {
                if pending.from() == &here {
                    self.position = pending;
                }
            }
        }
        if self.position.has_arrived() {
            let here = self.position.to().clone();
            if let Some(next) = self.strategy.choose(world, ctx, &here) {
                let position = world.ready_to_travel(&here, &next);
                self.set_position(position, ctx);
            }
        }
    }

    /// Only takes effect once arrived, or before the game's first step.
    pub fn set_position(&mut self, position: Position, ctx: &Context) {
        if self.position.has_arrived() || ctx.is_first_step() {
            self.position = position;
        }
    }

    pub fn set_pending_position(&mut self, pending: Position) {
        self.pending = Some(pending);
    }

    /// Heads for `city`. When standing in a city this starts right away if a
    /// road leads there. When travelling, asking for the city we came from
    /// turns around, anything else is queued for after arrival.
    pub fn travel_to(&mut self, world: &World, ctx: &Context, city: &CityRef) {
        let here = self.position.to().clone();
        if self.position.has_arrived() {
            if world.roads(&here).any(|road| road.to() == city) {
                let position = world.ready_to_travel(&here, city);
                self.set_position(position, ctx);
            }
        } else if city == self.position.from() {
            self.turn_around();
        } else {
            self.set_pending_position(world.ready_to_travel(&here, city));
        }
    }

    pub fn turn_around(&mut self) {
        self.position.turn_around();
    }
}
