//! Rule constants and the fixed default board.

use crate::models::{BoardSpace, PropertyState, SpaceType};

/// Credited when a player wraps past GO, and again when landing exactly on it.
pub const PASS_GO_BONUS: i64 = 200;

/// Flat cost of adding one improvement to an owned property.
pub const IMPROVEMENT_COST: i64 = 100;

/// Extra rent owed per improvement on the landed-on property.
pub const IMPROVEMENT_RENT_BONUS: i64 = 50;

/// Default payout for a bonus space whose event amount is zero.
pub const DEFAULT_BONUS: i64 = 150;

/// Default fee for a tax space whose event amount is zero.
pub const DEFAULT_TAX: i64 = 150;

/// Default fee for a penalty space whose event amount is zero.
pub const DEFAULT_PENALTY: i64 = 100;

/// Default fine for a jail space whose event amount is zero.
pub const DEFAULT_JAIL_FINE: i64 = 50;

/// Discrete outcome set for chance spaces, drawn uniformly.
pub const CHANCE_AMOUNTS: [i64; 5] = [-100, -50, 50, 100, 200];

/// Default starting balance offered during game setup.
pub const DEFAULT_STARTING_MONEY: i64 = 1500;

/// Minimum players required to start a game.
pub const MIN_PLAYERS: usize = 2;

/// Minimum non-property spaces a manually built board must contain.
pub const MIN_NON_PROPERTY_SPACES: usize = 4;

/// Rent owed by another player landing on an owned property.
pub fn rent_for(space: &BoardSpace, state: &PropertyState) -> i64 {
    space.base_rent.unwrap_or(0) + state.improvement_count * IMPROVEMENT_RENT_BONUS
}

/// Sale value of a property returned to the bank, manually or during
/// forced liquidation: half the purchase cost plus half the improvement
/// cost per improvement, both floored by integer division.
pub fn sale_value(space: &BoardSpace, state: &PropertyState) -> i64 {
    space.purchase_cost.unwrap_or(0) / 2 + state.improvement_count * (IMPROVEMENT_COST / 2)
}

/// A space definition without identity, used to seed boards.
#[derive(Debug, Clone)]
pub struct SpaceSpec {
    pub name: &'static str,
    pub kind: SpaceType,
    pub description: &'static str,
    pub purchase_cost: Option<i64>,
    pub base_rent: Option<i64>,
    pub event_amount: i64,
    pub move_target: Option<i64>,
}

impl SpaceSpec {
    const fn property(name: &'static str, description: &'static str, cost: i64, rent: i64) -> Self {
        Self {
            name,
            kind: SpaceType::Property,
            description,
            purchase_cost: Some(cost),
            base_rent: Some(rent),
            event_amount: 0,
            move_target: None,
        }
    }

    const fn event(
        name: &'static str,
        kind: SpaceType,
        description: &'static str,
        event_amount: i64,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            purchase_cost: None,
            base_rent: None,
            event_amount,
            move_target: None,
        }
    }
}

/// The fixed 12-space convenience board offered during setup.
pub const DEFAULT_BOARD: [SpaceSpec; 12] = [
    SpaceSpec::event("GO", SpaceType::Go, "Collect $200 when you pass.", PASS_GO_BONUS),
    SpaceSpec::property("Market Street", "Busy local shops.", 120, 25),
    SpaceSpec::property("Volunteer Avenue", "College town property.", 150, 35),
    SpaceSpec::event("City Tax", SpaceType::Tax, "Pay $150 to the city.", -150),
    SpaceSpec::event(
        "Fountain City Bonus",
        SpaceType::Bonus,
        "Heritage festival payout.",
        150,
    ),
    SpaceSpec::property("Cumberland Plaza", "Mixed-use towers.", 180, 45),
    SpaceSpec {
        name: "Go To Jail",
        kind: SpaceType::Jail,
        description: "Move to Jail (Space 8) and pay $50.",
        purchase_cost: None,
        base_rent: None,
        event_amount: -50,
        move_target: Some(8),
    },
    SpaceSpec::property("Smoky Mountain Trail", "Tourism hotspot.", 220, 55),
    SpaceSpec::event(
        "Jail / Just Visiting",
        SpaceType::Free,
        "Chill out for a turn.",
        0,
    ),
    SpaceSpec::event("Speeding Fine", SpaceType::Penalty, "Pay $100.", -100),
    SpaceSpec::property("Market Expansion", "Huge retail draw.", 260, 65),
    SpaceSpec::event("Chance", SpaceType::Chance, "Random reward or penalty.", 0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoardSpace, PropertyState};

    fn property_space(cost: i64, rent: i64) -> BoardSpace {
        BoardSpace {
            id: 1,
            game_id: 1,
            sequence_order: 0,
            name: "Test Street".to_string(),
            kind: SpaceType::Property,
            description: None,
            purchase_cost: Some(cost),
            base_rent: Some(rent),
            event_amount: 0,
            move_target: None,
        }
    }

    fn state_with(improvements: i64) -> PropertyState {
        PropertyState {
            id: 1,
            game_id: 1,
            space_id: 1,
            owner_id: Some(7),
            improvement_count: improvements,
        }
    }

    #[test]
    fn rent_adds_linear_improvement_bonus() {
        let space = property_space(200, 25);
        assert_eq!(rent_for(&space, &state_with(0)), 25);
        assert_eq!(rent_for(&space, &state_with(2)), 125);
    }

    #[test]
    fn sale_value_halves_cost_and_improvements() {
        let space = property_space(200, 25);
        assert_eq!(sale_value(&space, &state_with(0)), 100);
        assert_eq!(sale_value(&space, &state_with(3)), 100 + 3 * 50);

        // Odd purchase cost floors.
        let odd = property_space(205, 25);
        assert_eq!(sale_value(&odd, &state_with(0)), 102);
    }

    #[test]
    fn default_board_shape_matches_setup_requirements() {
        assert_eq!(DEFAULT_BOARD.len(), 12);
        let non_property = DEFAULT_BOARD
            .iter()
            .filter(|s| s.kind != SpaceType::Property)
            .count();
        assert!(non_property >= MIN_NON_PROPERTY_SPACES);
        assert_eq!(DEFAULT_BOARD[0].kind, SpaceType::Go);
        // The jail space redirects within board bounds.
        let jail = DEFAULT_BOARD
            .iter()
            .find(|s| s.kind == SpaceType::Jail)
            .expect("default board has a jail space");
        assert!(matches!(jail.move_target, Some(t) if (t as usize) < DEFAULT_BOARD.len()));
    }
}
