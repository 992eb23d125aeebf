//! In-memory document store.
//!
//! Runs filter pipelines the way a document database would: each stage is
//! applied in order to the owner's entries, computed fields live alongside
//! the entry for the rest of the pipeline, and sorts are stable with entry
//! number as the tie-breaker.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use pokebot_domain::{
    Condition, Field, FilterStage, Member, Pokemon, PokemonNumber, Scalar, SortKey, UserId,
};

use crate::infrastructure::ports::{
    MemberRepo, MemberUpdate, PokemonRepo, PokemonUpdate, RepoError,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldValue {
    Num(f64),
    Bool(bool),
}

/// One pipeline row: the entry plus fields derived so far.
struct Row {
    pokemon: Pokemon,
    computed: HashMap<&'static str, f64>,
}

impl Row {
    fn value(&self, field: &Field) -> Option<FieldValue> {
        let p = &self.pokemon;
        match field {
            Field::SpeciesId => Some(FieldValue::Num(f64::from(p.species_id.get()))),
            Field::Level => Some(FieldValue::Num(f64::from(p.level))),
            Field::Favorite => Some(FieldValue::Bool(p.favorite)),
            Field::Number => Some(FieldValue::Num(p.number.get() as f64)),
            Field::Computed(name) => self.computed.get(name).copied().map(FieldValue::Num),
        }
    }

    fn matches(&self, field: &Field, condition: &Condition) -> bool {
        let value = self.value(field);
        match condition {
            Condition::In(ids) => match value {
                Some(FieldValue::Num(v)) => ids.iter().any(|id| f64::from(id.get()) == v),
                _ => false,
            },
            Condition::Eq(expected) => equals(value, *expected),
            Condition::Ne(expected) => !equals(value, *expected),
            Condition::Compare(cmp) => match value {
                Some(FieldValue::Num(v)) => cmp.matches(v),
                _ => false,
            },
        }
    }

    fn sort_value(&self, key: SortKey) -> f64 {
        let p = &self.pokemon;
        match key {
            SortKey::Number => p.number.get() as f64,
            SortKey::TotalIv => f64::from(p.ivs.total()),
            SortKey::Level => f64::from(p.level),
            SortKey::SpeciesId => f64::from(p.species_id.get()),
        }
    }
}

fn equals(value: Option<FieldValue>, expected: Scalar) -> bool {
    match (value, expected) {
        (Some(FieldValue::Num(v)), Scalar::Int(e)) => v == e as f64,
        (Some(FieldValue::Bool(v)), Scalar::Bool(e)) => v == e,
        _ => false,
    }
}

/// Apply `stages` in order to `entries`.
pub fn run_pipeline(entries: &[Pokemon], stages: &[FilterStage]) -> Vec<Pokemon> {
    let mut rows: Vec<Row> = entries
        .iter()
        .map(|p| Row {
            pokemon: p.clone(),
            computed: HashMap::new(),
        })
        .collect();

    for stage in stages {
        match stage {
            FilterStage::Match { field, condition } => {
                rows.retain(|row| row.matches(field, condition));
            }
            FilterStage::AddField { name, expr } => {
                for row in &mut rows {
                    let value = expr.evaluate(&row.pokemon);
                    row.computed.insert(*name, value);
                }
            }
            FilterStage::Sort { key, descending } => {
                rows.sort_by(|a, b| {
                    let ord = a
                        .sort_value(*key)
                        .partial_cmp(&b.sort_value(*key))
                        .unwrap_or(Ordering::Equal);
                    let ord = if *descending { ord.reverse() } else { ord };
                    ord.then_with(|| a.pokemon.number.cmp(&b.pokemon.number))
                });
            }
        }
    }

    rows.into_iter().map(|row| row.pokemon).collect()
}

/// Members and their collections held in process memory.
#[derive(Default)]
pub struct InMemoryStore {
    members: RwLock<HashMap<UserId, Member>>,
    pokemon: RwLock<HashMap<UserId, Vec<Pokemon>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn pipeline(&self, owner: UserId, stages: &[FilterStage]) -> Vec<Pokemon> {
        let pokemon = self.pokemon.read().await;
        match pokemon.get(&owner) {
            Some(entries) => run_pipeline(entries, stages),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl MemberRepo for InMemoryStore {
    async fn get(&self, id: UserId) -> Result<Option<Member>, RepoError> {
        Ok(self.members.read().await.get(&id).cloned())
    }

    async fn create(&self, member: &Member) -> Result<(), RepoError> {
        let mut members = self.members.write().await;
        if members.contains_key(&member.id) {
            return Err(RepoError::constraint(format!(
                "member {} already exists",
                member.id
            )));
        }
        members.insert(member.id, member.clone());
        Ok(())
    }

    async fn update(&self, id: UserId, update: MemberUpdate) -> Result<(), RepoError> {
        let mut members = self.members.write().await;
        let member = members
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Member", id))?;
        match update {
            MemberUpdate::Select(number) => member.selected = number,
            MemberUpdate::SetOrder(order) => member.order_by = order,
            MemberUpdate::SpendRedeem => {
                if member.redeems == 0 {
                    return Err(RepoError::constraint("no redeems left"));
                }
                member.redeems -= 1;
                member.next_id = member.next_id.next();
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PokemonRepo for InMemoryStore {
    async fn count(&self, owner: UserId, stages: &[FilterStage]) -> Result<u64, RepoError> {
        Ok(self.pipeline(owner, stages).await.len() as u64)
    }

    async fn fetch_page(
        &self,
        owner: UserId,
        stages: &[FilterStage],
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Pokemon>, RepoError> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .pipeline(owner, stages)
            .await
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn fetch_single(
        &self,
        owner: UserId,
        stages: &[FilterStage],
    ) -> Result<Option<Pokemon>, RepoError> {
        Ok(self.pipeline(owner, stages).await.into_iter().next())
    }

    async fn position_of(
        &self,
        owner: UserId,
        stages: &[FilterStage],
        number: PokemonNumber,
    ) -> Result<Option<u64>, RepoError> {
        Ok(self
            .pipeline(owner, stages)
            .await
            .iter()
            .position(|p| p.number == number)
            .map(|idx| idx as u64))
    }

    async fn insert(&self, pokemon: &Pokemon) -> Result<(), RepoError> {
        let mut all = self.pokemon.write().await;
        let entries = all.entry(pokemon.owner_id).or_default();
        if entries.iter().any(|p| p.number == pokemon.number) {
            return Err(RepoError::constraint(format!(
                "pokemon {} already exists for {}",
                pokemon.number, pokemon.owner_id
            )));
        }
        entries.push(pokemon.clone());
        Ok(())
    }

    async fn update(
        &self,
        owner: UserId,
        number: PokemonNumber,
        update: PokemonUpdate,
    ) -> Result<(), RepoError> {
        let mut all = self.pokemon.write().await;
        let entry = all
            .get_mut(&owner)
            .and_then(|entries| entries.iter_mut().find(|p| p.number == number))
            .ok_or_else(|| RepoError::not_found("Pokemon", number))?;
        match update {
            PokemonUpdate::SetNickname(nickname) => entry.nickname = nickname,
            PokemonUpdate::SetFavorite(favorite) => entry.favorite = favorite,
        }
        Ok(())
    }

    async fn release(&self, owner: UserId, numbers: &[PokemonNumber]) -> Result<u64, RepoError> {
        let mut all = self.pokemon.write().await;
        let Some(entries) = all.get_mut(&owner) else {
            return Ok(0);
        };
        let before = entries.len();
        entries.retain(|p| !numbers.contains(&p.number));
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokebot_domain::{
        ComparisonOp, IvExpr, Ivs, Nature, NumericComparison, SortOrder, SpeciesId, Stat,
    };

    fn owner() -> UserId {
        UserId::new(1)
    }

    fn entry(number: u64, species: u32, level: u32, hp_iv: u8) -> Pokemon {
        Pokemon::new(
            PokemonNumber::new(number),
            owner(),
            SpeciesId::new(species),
            Nature::Hardy,
            Ivs::new(hp_iv, 10, 10, 10, 10, 10).unwrap(),
        )
        .with_level(level)
    }

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert(&entry(1, 4, 5, 31)).await.unwrap();
        store.insert(&entry(2, 151, 50, 0)).await.unwrap();
        store
            .insert(&entry(3, 151, 10, 20).with_favorite(true))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn match_stages_intersect() {
        let store = seeded().await;
        let stages = vec![
            FilterStage::species_in([SpeciesId::new(151)]),
            FilterStage::level_is(50),
        ];
        let found = store.fetch_page(owner(), &stages, 0, 20).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].number, PokemonNumber::new(2));
    }

    #[tokio::test]
    async fn computed_field_is_matched() {
        let store = seeded().await;
        let stages = vec![
            FilterStage::AddField {
                name: "hpiv",
                expr: IvExpr::Stat(Stat::Hp),
            },
            FilterStage::computed_matches(
                "hpiv",
                NumericComparison::new(ComparisonOp::GreaterThan, 15),
            ),
        ];
        assert_eq!(store.count(owner(), &stages).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn computed_match_without_add_field_matches_nothing() {
        let store = seeded().await;
        let stages = vec![FilterStage::computed_matches(
            "hpiv",
            NumericComparison::new(ComparisonOp::LessThan, 100),
        )];
        assert_eq!(store.count(owner(), &stages).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn exclusions_drop_selected_and_favorites() {
        let store = seeded().await;
        let stages = vec![
            FilterStage::exclude_number(PokemonNumber::new(1)),
            FilterStage::exclude_favorites(),
        ];
        let found = store.fetch_page(owner(), &stages, 0, 20).await.unwrap();
        assert_eq!(
            found.iter().map(|p| p.number.get()).collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[tokio::test]
    async fn sorting_and_paging() {
        let store = seeded().await;
        let stages = vec![FilterStage::sort_by(SortOrder::Level)];
        let page = store.fetch_page(owner(), &stages, 1, 1).await.unwrap();
        assert_eq!(page[0].number, PokemonNumber::new(3));
        assert_eq!(
            store
                .position_of(owner(), &stages, PokemonNumber::new(1))
                .await
                .unwrap(),
            Some(2)
        );
        let latest = store
            .fetch_single(owner(), &[FilterStage::latest_first()])
            .await
            .unwrap();
        assert_eq!(latest.map(|p| p.number.get()), Some(3));
    }

    #[tokio::test]
    async fn release_removes_listed_numbers() {
        let store = seeded().await;
        let removed = store
            .release(owner(), &[PokemonNumber::new(1), PokemonNumber::new(9)])
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.count(owner(), &[]).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn update_missing_entry_is_not_found() {
        let store = seeded().await;
        let err = PokemonRepo::update(
            &store,
            owner(),
            PokemonNumber::new(99),
            PokemonUpdate::SetFavorite(true),
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn spend_redeem_requires_balance() {
        let store = InMemoryStore::new();
        store.create(&Member::with_starter(owner())).await.unwrap();
        let err = MemberRepo::update(&store, owner(), MemberUpdate::SpendRedeem)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn duplicate_member_rejected() {
        let store = InMemoryStore::new();
        store.create(&Member::with_starter(owner())).await.unwrap();
        assert!(store.create(&Member::with_starter(owner())).await.is_err());
    }
}
