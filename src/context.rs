// Shared simulation state that cities and players need but do not own: the
// random source and the game clock.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct Context {
    pub rng: SmallRng,
    steps_left: u32,
    total_steps: u32,
}

impl Context {
    pub fn new(seed: u64, total_steps: u32) -> Self {
        Context {
            rng: SmallRng::seed_from_u64(seed),
            steps_left: total_steps,
            total_steps,
        }
    }

    pub fn steps_left(&self) -> u32 {
        self.steps_left
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// True until the first game step has been taken.
    pub fn is_first_step(&self) -> bool {
        self.steps_left == self.total_steps
    }

    pub fn is_over(&self) -> bool {
        self.steps_left == 0
    }

    pub fn tick(&mut self) {
        self.steps_left = self.steps_left.saturating_sub(1);
    }

    pub fn rewind(&mut self) {
        self.steps_left = self.total_steps;
    }

    /// Uniform integer in `[0, max]`.
    pub fn random_up_to(&mut self, max: i64) -> i64 {
        self.rng.gen_range(0..=max)
    }

    /// Uniform index in `[0, len)`. `len` must be positive.
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
