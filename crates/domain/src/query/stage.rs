//! Filter/sort pipeline stages
//!
//! A pipeline is an ordered `Vec<FilterStage>` applied to one owner's
//! collection. Stages render to aggregation documents (`$match`,
//! `$addFields`, `$sort`) so document stores can run them directly.

use serde_json::{json, Value};

use crate::entities::Pokemon;
use crate::ids::{PokemonNumber, SpeciesId};
use crate::value_objects::{NumericComparison, SortOrder, Stat, MAX_IV_TOTAL};

/// Stored field a match stage can test.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    SpeciesId,
    Level,
    Favorite,
    Number,
    /// A field derived by an earlier [`FilterStage::AddField`]
    Computed(&'static str),
}

impl Field {
    pub fn path(&self) -> &'static str {
        match self {
            Field::SpeciesId => "pokemon.species_id",
            Field::Level => "pokemon.level",
            Field::Favorite => "pokemon.favorite",
            Field::Number => "pokemon.number",
            Field::Computed(name) => *name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(u64),
    Bool(bool),
}

impl Scalar {
    fn to_value(self) -> Value {
        match self {
            Scalar::Int(v) => json!(v),
            Scalar::Bool(v) => json!(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field is one of the listed species ids
    In(Vec<SpeciesId>),
    Eq(Scalar),
    /// Field differs from the value; a missing field counts as different
    Ne(Scalar),
    Compare(NumericComparison),
}

/// Derivation of an IV-based scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IvExpr {
    /// Raw IV of one stat
    Stat(Stat),
    /// Total IV as a percentage in `0..=100`
    TotalPercent,
}

impl IvExpr {
    pub fn evaluate(&self, pokemon: &Pokemon) -> f64 {
        match self {
            IvExpr::Stat(stat) => f64::from(pokemon.ivs.get(*stat)),
            IvExpr::TotalPercent => pokemon.iv_percentage() * 100.0,
        }
    }

    fn to_document(self) -> Value {
        match self {
            IvExpr::Stat(stat) => json!(format!("$pokemon.{}", stat.iv_field())),
            IvExpr::TotalPercent => {
                let fields: Vec<Value> = Stat::ALL
                    .iter()
                    .map(|s| json!(format!("$pokemon.{}", s.iv_field())))
                    .collect();
                json!({
                    "$multiply": [
                        {"$divide": [{"$add": fields}, MAX_IV_TOTAL]},
                        100
                    ]
                })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Number,
    TotalIv,
    Level,
    SpeciesId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterStage {
    Match { field: Field, condition: Condition },
    AddField { name: &'static str, expr: IvExpr },
    Sort { key: SortKey, descending: bool },
}

impl FilterStage {
    pub fn species_in(ids: impl IntoIterator<Item = SpeciesId>) -> Self {
        Self::Match {
            field: Field::SpeciesId,
            condition: Condition::In(ids.into_iter().collect()),
        }
    }

    pub fn species_is(id: SpeciesId) -> Self {
        Self::Match {
            field: Field::SpeciesId,
            condition: Condition::Eq(Scalar::Int(u64::from(id.get()))),
        }
    }

    pub fn level_is(level: u32) -> Self {
        Self::Match {
            field: Field::Level,
            condition: Condition::Eq(Scalar::Int(u64::from(level))),
        }
    }

    pub fn favorites_only() -> Self {
        Self::Match {
            field: Field::Favorite,
            condition: Condition::Eq(Scalar::Bool(true)),
        }
    }

    pub fn exclude_favorites() -> Self {
        Self::Match {
            field: Field::Favorite,
            condition: Condition::Ne(Scalar::Bool(true)),
        }
    }

    pub fn number_is(number: PokemonNumber) -> Self {
        Self::Match {
            field: Field::Number,
            condition: Condition::Eq(Scalar::Int(number.get())),
        }
    }

    pub fn exclude_number(number: PokemonNumber) -> Self {
        Self::Match {
            field: Field::Number,
            condition: Condition::Ne(Scalar::Int(number.get())),
        }
    }

    pub fn computed_matches(name: &'static str, comparison: NumericComparison) -> Self {
        Self::Match {
            field: Field::Computed(name),
            condition: Condition::Compare(comparison),
        }
    }

    /// Sort stage for a member's chosen ordering.
    pub fn sort_by(order: SortOrder) -> Self {
        let (key, descending) = match order {
            SortOrder::Number => (SortKey::Number, false),
            SortOrder::Iv => (SortKey::TotalIv, true),
            SortOrder::Level => (SortKey::Level, true),
            SortOrder::Pokedex => (SortKey::SpeciesId, false),
        };
        Self::Sort { key, descending }
    }

    /// Newest entry first.
    pub fn latest_first() -> Self {
        Self::Sort {
            key: SortKey::Number,
            descending: true,
        }
    }

    /// Aggregation document for this stage.
    pub fn to_document(&self) -> Value {
        match self {
            FilterStage::Match { field, condition } => {
                let test = match condition {
                    Condition::In(ids) => json!({ "$in": ids }),
                    Condition::Eq(Scalar::Int(v)) => json!(v),
                    Condition::Eq(Scalar::Bool(v)) => json!(v),
                    Condition::Ne(v) => json!({ "$not": { "$eq": v.to_value() } }),
                    Condition::Compare(cmp) => {
                        let mut op = serde_json::Map::new();
                        op.insert(cmp.op.operator_name().to_string(), json!(cmp.operand));
                        Value::Object(op)
                    }
                };
                let mut body = serde_json::Map::new();
                body.insert(field.path().to_string(), test);
                json!({ "$match": body })
            }
            FilterStage::AddField { name, expr } => {
                let mut body = serde_json::Map::new();
                body.insert((*name).to_string(), expr.to_document());
                json!({ "$addFields": body })
            }
            FilterStage::Sort { key, descending } => {
                let path = match key {
                    SortKey::Number => "pokemon.number",
                    SortKey::TotalIv => "iv_total",
                    SortKey::Level => "pokemon.level",
                    SortKey::SpeciesId => "pokemon.species_id",
                };
                let mut body = serde_json::Map::new();
                body.insert(path.to_string(), json!(if *descending { -1 } else { 1 }));
                json!({ "$sort": body })
            }
        }
    }
}

/// Render a whole pipeline as an aggregation document array.
pub fn pipeline_document(stages: &[FilterStage]) -> Value {
    Value::Array(stages.iter().map(FilterStage::to_document).collect())
}
