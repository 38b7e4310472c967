//! Dice adapters: a seedable RNG-backed roller and a scripted test double.

use std::collections::VecDeque;

use rand::{random, rngs::StdRng, Rng, SeedableRng};

use crate::ports::Dice;

/// Production dice backed by a seedable [`StdRng`].
pub struct StdDice {
    rng: StdRng,
}

impl StdDice {
    /// Non-deterministic dice (seeded from entropy).
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Deterministic dice for reproducible games.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdDice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for StdDice {
    fn roll_pair(&mut self) -> (u8, u8) {
        (self.rng.random_range(1..=6), self.rng.random_range(1..=6))
    }

    fn draw(&mut self, outcomes: &[i64]) -> i64 {
        outcomes[self.rng.random_range(0..outcomes.len())]
    }
}

/// Scripted dice for testing.
///
/// Pops rolls and draws from fixed queues, so tests can steer a turn onto
/// any board space. Panics when the script runs dry, which in a test means
/// the scenario rolled more often than expected.
#[derive(Default)]
pub struct ScriptedDice {
    rolls: VecDeque<(u8, u8)>,
    draws: VecDeque<i64>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(rolls: impl IntoIterator<Item = (u8, u8)>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            draws: VecDeque::new(),
        }
    }

    pub fn push_roll(&mut self, die1: u8, die2: u8) {
        self.rolls.push_back((die1, die2));
    }

    pub fn push_draw(&mut self, amount: i64) {
        self.draws.push_back(amount);
    }
}

impl Dice for ScriptedDice {
    fn roll_pair(&mut self) -> (u8, u8) {
        self.rolls
            .pop_front()
            .expect("ScriptedDice ran out of scripted rolls")
    }

    fn draw(&mut self, _outcomes: &[i64]) -> i64 {
        self.draws
            .pop_front()
            .expect("ScriptedDice ran out of scripted draws")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_dice_rolls_stay_in_range() {
        let mut dice = StdDice::from_seed(42);
        for _ in 0..200 {
            let (d1, d2) = dice.roll_pair();
            assert!((1..=6).contains(&d1));
            assert!((1..=6).contains(&d2));
        }
    }

    #[test]
    fn std_dice_draw_picks_from_outcomes() {
        let mut dice = StdDice::from_seed(7);
        let outcomes = [-100, -50, 50, 100, 200];
        for _ in 0..100 {
            assert!(outcomes.contains(&dice.draw(&outcomes)));
        }
    }

    #[test]
    fn seeded_dice_are_reproducible() {
        let mut a = StdDice::from_seed(123);
        let mut b = StdDice::from_seed(123);
        for _ in 0..20 {
            assert_eq!(a.roll_pair(), b.roll_pair());
        }
    }

    #[test]
    fn scripted_dice_replay_in_order() {
        let mut dice = ScriptedDice::with_rolls([(1, 2), (6, 6)]);
        dice.push_draw(-50);
        assert_eq!(dice.roll_pair(), (1, 2));
        assert_eq!(dice.roll_pair(), (6, 6));
        assert_eq!(dice.draw(&[0]), -50);
    }
}
