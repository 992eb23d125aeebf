//! Flag-to-pipeline compilation.
//!
//! Each recognized flag has one rule in [`RULES`], processed top to bottom in
//! a single pass. A rule either contributes stages or rejects the whole
//! request; nothing is executed here, so a rejection has no side effects.

use std::sync::Arc;

use pokebot_domain::{
    pipeline_document, FilterFlag, FilterFlags, FilterStage, FlagValue, NumericComparison,
};

use crate::infrastructure::ports::{CatalogError, CatalogPort};

/// Why a set of flags could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterRejected {
    #[error("Couldn't find a pokémon species with that name.")]
    SpeciesNotFound(String),
    #[error("Couldn't parse `--{flag} {text}`")]
    BadNumericFlag { flag: FilterFlag, text: String },
    #[error("Invalid value for `--{0}`")]
    WrongValueKind(FilterFlag),
}

type StageBuilder =
    fn(&FilterCompiler, FilterFlag, &FlagValue) -> Result<Vec<FilterStage>, FilterRejected>;

struct FlagRule {
    flag: FilterFlag,
    build: StageBuilder,
}

const RULES: [FlagRule; 14] = [
    FlagRule { flag: FilterFlag::Mythical, build: rarity_stage },
    FlagRule { flag: FilterFlag::Legendary, build: rarity_stage },
    FlagRule { flag: FilterFlag::Ub, build: rarity_stage },
    FlagRule { flag: FilterFlag::Type, build: type_stage },
    FlagRule { flag: FilterFlag::Favorite, build: favorite_stage },
    FlagRule { flag: FilterFlag::Name, build: name_stage },
    FlagRule { flag: FilterFlag::Level, build: level_stage },
    FlagRule { flag: FilterFlag::HpIv, build: iv_stages },
    FlagRule { flag: FilterFlag::AtkIv, build: iv_stages },
    FlagRule { flag: FilterFlag::DefIv, build: iv_stages },
    FlagRule { flag: FilterFlag::SpatkIv, build: iv_stages },
    FlagRule { flag: FilterFlag::SpdefIv, build: iv_stages },
    FlagRule { flag: FilterFlag::SpdIv, build: iv_stages },
    FlagRule { flag: FilterFlag::Iv, build: iv_stages },
];

/// Compiles user flags into an ordered filter pipeline.
pub struct FilterCompiler {
    catalog: Arc<dyn CatalogPort>,
}

impl FilterCompiler {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    pub fn compile(&self, flags: &FilterFlags) -> Result<Vec<FilterStage>, FilterRejected> {
        let mut stages = Vec::new();
        for rule in &RULES {
            if let Some(value) = flags.get(rule.flag) {
                stages.extend((rule.build)(self, rule.flag, value)?);
            }
        }
        tracing::debug!(pipeline = %pipeline_document(&stages), "Compiled filter");
        Ok(stages)
    }
}

fn switch_on(flag: FilterFlag, value: &FlagValue) -> Result<bool, FilterRejected> {
    match value {
        FlagValue::Switch(on) => Ok(*on),
        _ => Err(FilterRejected::WrongValueKind(flag)),
    }
}

fn rarity_stage(
    compiler: &FilterCompiler,
    flag: FilterFlag,
    value: &FlagValue,
) -> Result<Vec<FilterStage>, FilterRejected> {
    let Some(class) = flag.rarity_class() else {
        return Err(FilterRejected::WrongValueKind(flag));
    };
    if !switch_on(flag, value)? {
        return Ok(Vec::new());
    }
    Ok(vec![FilterStage::species_in(
        compiler.catalog.ids_for_rarity(class),
    )])
}

fn type_stage(
    compiler: &FilterCompiler,
    flag: FilterFlag,
    value: &FlagValue,
) -> Result<Vec<FilterStage>, FilterRejected> {
    let FlagValue::Text(type_name) = value else {
        return Err(FilterRejected::WrongValueKind(flag));
    };
    if type_name.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![FilterStage::species_in(
        compiler.catalog.ids_for_type(type_name),
    )])
}

fn favorite_stage(
    _compiler: &FilterCompiler,
    flag: FilterFlag,
    value: &FlagValue,
) -> Result<Vec<FilterStage>, FilterRejected> {
    if switch_on(flag, value)? {
        Ok(vec![FilterStage::favorites_only()])
    } else {
        Ok(Vec::new())
    }
}

fn name_stage(
    compiler: &FilterCompiler,
    flag: FilterFlag,
    value: &FlagValue,
) -> Result<Vec<FilterStage>, FilterRejected> {
    let FlagValue::Text(name) = value else {
        return Err(FilterRejected::WrongValueKind(flag));
    };
    match compiler.catalog.species_by_name(name) {
        Ok(species) => Ok(vec![FilterStage::species_is(species.id)]),
        Err(CatalogError::SpeciesNotFound(name)) => Err(FilterRejected::SpeciesNotFound(name)),
        Err(e) => {
            tracing::warn!(error = %e, "Species lookup failed");
            Err(FilterRejected::SpeciesNotFound(name.clone()))
        }
    }
}

fn level_stage(
    _compiler: &FilterCompiler,
    flag: FilterFlag,
    value: &FlagValue,
) -> Result<Vec<FilterStage>, FilterRejected> {
    match value {
        FlagValue::Integer(level) => Ok(vec![FilterStage::level_is(*level)]),
        _ => Err(FilterRejected::WrongValueKind(flag)),
    }
}

fn iv_stages(
    _compiler: &FilterCompiler,
    flag: FilterFlag,
    value: &FlagValue,
) -> Result<Vec<FilterStage>, FilterRejected> {
    let Some(expr) = flag.iv_expr() else {
        return Err(FilterRejected::WrongValueKind(flag));
    };
    let tokens: Vec<&str> = match value {
        FlagValue::Tokens(tokens) => tokens.iter().map(String::as_str).collect(),
        FlagValue::Text(text) => vec![text.as_str()],
        _ => return Err(FilterRejected::WrongValueKind(flag)),
    };
    let comparison =
        NumericComparison::parse(&tokens).map_err(|_| FilterRejected::BadNumericFlag {
            flag,
            text: tokens.join(" "),
        })?;
    let name = flag.as_str();
    Ok(vec![
        FilterStage::AddField { name, expr },
        FilterStage::computed_matches(name, comparison),
    ])
}
