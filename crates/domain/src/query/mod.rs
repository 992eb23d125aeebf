//! Collection query building blocks: user flags and the pipeline they compile to.

mod flags;
mod stage;

pub use flags::{FilterFlag, FilterFlags, FlagKind, FlagValue};
pub use stage::{pipeline_document, Condition, Field, FilterStage, IvExpr, Scalar, SortKey};
