//! Value objects - Immutable objects defined by their attributes

mod comparison;
mod nature;
mod nickname;
mod sort_order;
mod stats;

pub use comparison::{ComparisonOp, ComparisonParseError, NumericComparison};
pub use nature::Nature;
pub use nickname::{Nickname, MAX_NICKNAME_LEN, RESET_KEYWORD};
pub use sort_order::SortOrder;
pub use stats::{BaseStats, Ivs, Stat, MAX_IV, MAX_IV_TOTAL};
