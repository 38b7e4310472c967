//! Randomness port for dice rolls and chance draws.
//!
//! The engine never touches an RNG directly; everything random flows
//! through this trait so turn resolution is deterministic under test.

/// Source of the two random events in a turn: the dice roll and the
/// chance-card draw.
pub trait Dice {
    /// Roll two independent uniform dice in `[1, 6]`.
    fn roll_pair(&mut self) -> (u8, u8);

    /// Draw one amount uniformly from a discrete outcome set.
    ///
    /// `outcomes` is never empty; the engine always passes a fixed
    /// non-empty constant set.
    fn draw(&mut self, outcomes: &[i64]) -> i64;
}
