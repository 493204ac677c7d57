//! Cross-instance identity: natural key matching and ID translation
//!
//! IDs are instance-local, so an entity is recognised at the destination by
//! its natural key (a title in the selected language, or a resource's
//! external identifier). Comparison is exact string equality and the first
//! destination match wins when titles are duplicated.

use rems_common::entities::{Entity, Kind};
use std::collections::HashMap;

/// Find the destination counterpart of `entity`
///
/// Entities without a natural key in `language` never match.
pub fn find_match<'a, E: Entity>(entity: &E, destinations: &'a [E], language: &str) -> Option<&'a E> {
    let key = entity.natural_key(language)?;
    destinations
        .iter()
        .find(|candidate| candidate.natural_key(language) == Some(key))
}

/// True when a destination entity shares `entity`'s natural key
pub fn exists<E: Entity>(entity: &E, destinations: &[E], language: &str) -> bool {
    find_match(entity, destinations, language).is_some()
}

/// Source ID to destination ID mapping for one kind
///
/// Built from two snapshots and never updated afterwards; rebuild it after
/// the destination has changed.
#[derive(Debug, Clone)]
pub struct IdTranslator {
    kind: Kind,
    ids: HashMap<i64, i64>,
}

impl IdTranslator {
    pub fn build<E: Entity>(sources: &[E], destinations: &[E], language: &str) -> Self {
        let ids: HashMap<i64, i64> = sources
            .iter()
            .filter_map(|source| {
                find_match(source, destinations, language).map(|dest| (source.id(), dest.id()))
            })
            .collect();

        tracing::debug!(
            kind = %E::KIND,
            sources = sources.len(),
            translated = ids.len(),
            "Built ID translator"
        );

        Self { kind: E::KIND, ids }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Destination ID for a source ID, if the entity exists at the destination
    pub fn get(&self, source_id: i64) -> Option<i64> {
        self.ids.get(&source_id).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
