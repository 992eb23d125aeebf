//! Member entity - A player who has picked a starter

use serde::{Deserialize, Serialize};

use crate::ids::{PokemonNumber, UserId};
use crate::value_objects::SortOrder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: UserId,
    /// Number assigned to the next pokémon this member receives
    pub next_id: PokemonNumber,
    pub selected: PokemonNumber,
    #[serde(default)]
    pub order_by: SortOrder,
    #[serde(default)]
    pub redeems: u32,
}

impl Member {
    /// A member holding only their starter, numbered 1 and selected.
    pub fn with_starter(id: UserId) -> Self {
        let starter = PokemonNumber::new(1);
        Self {
            id,
            next_id: starter.next(),
            selected: starter,
            order_by: SortOrder::default(),
            redeems: 0,
        }
    }

    pub fn with_redeems(mut self, redeems: u32) -> Self {
        self.redeems = redeems;
        self
    }
}
