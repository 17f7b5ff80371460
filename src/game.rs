use log::{debug, info};
use std::time::Instant;

use crate::context::Context;
use crate::country::CityRef;
use crate::player::Player;
use crate::world::World;

pub struct Game {
    world: World,
    ctx: Context,
    players: Vec<Player>,
}

impl Game {
    pub fn new(world: World, ctx: Context) -> Self {
        Game { world, ctx, players: Vec::new() }
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    /// Sends player number `index` towards `city`, see Player::travel_to.
    pub fn travel_to(&mut self, index: usize, city: &CityRef) {
        if let Some(player) = self.players.get_mut(index) {
            player.travel_to(&self.world, &self.ctx, city);
        }
    }

    /// Moves every player one step, in order. Returns false once the game is
    /// over, without doing anything.
    pub fn step(&mut self) -> bool {
        if self.ctx.is_over() {
            return false;
        }
        debug!("Step {current}/{total}",
               current = self.ctx.total_steps() - self.ctx.steps_left() + 1,
               total = self.ctx.total_steps());
        for player in self.players.iter_mut() {
            player.step(&mut self.world, &mut self.ctx);
        }
        self.ctx.tick();
        true
    }

    /// Steps until no steps are left.
    pub fn run(&mut self) {
        let start = Instant::now();
        info!("Game starting: {players} players, {steps} steps",
              players = self.players.len(), steps = self.ctx.steps_left());
        while self.step() {}
        info!("Game over in {:?}", start.elapsed());
        for player in self.standings() {
            info!("  {name}: {money} (at {position})",
                  name = player.name(), money = player.money(),
                  position = player.position());
        }
    }

    /// City values, the clock and all players go back to how they started.
    /// The random source carries on.
    pub fn reset(&mut self) {
        info!("Resetting game");
        self.world.reset();
        self.ctx.rewind();
        for player in self.players.iter_mut() {
            player.restart();
        }
    }

    /// Players by money collected, richest first, then by name.
    pub fn standings(&self) -> Vec<&Player> {
        let mut standings: Vec<&Player> = self.players.iter().collect();
        standings.sort_by(|a, b| b.money().cmp(&a.money())
                          .then_with(|| a.name().cmp(b.name())));
        standings
    }
}
