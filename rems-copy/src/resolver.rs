//! Dependency resolution
//!
//! Translates foreign keys carried by a source entity into destination IDs.
//! An unresolved reference only blocks the entity that carries it; callers
//! record it as a failed outcome and move on.

use crate::identity::IdTranslator;
use rems_common::entities::Kind;
use std::fmt;

/// A reference with no destination counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnresolvedDependency {
    pub kind: Kind,
    pub source_id: i64,
}

impl fmt::Display for UnresolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind.singular(), self.source_id)
    }
}

/// Outcome of resolving a single, possibly absent, reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The reference was null; nothing to translate
    NoDependency,
    Resolved(i64),
    Unresolved(UnresolvedDependency),
}

pub fn resolve_reference(reference: Option<i64>, translator: &IdTranslator) -> Resolution {
    match reference {
        None => Resolution::NoDependency,
        Some(source_id) => match translator.get(source_id) {
            Some(destination_id) => Resolution::Resolved(destination_id),
            None => Resolution::Unresolved(UnresolvedDependency {
                kind: translator.kind(),
                source_id,
            }),
        },
    }
}

/// Resolve a mandatory reference
pub fn resolve_required(
    source_id: i64,
    translator: &IdTranslator,
) -> Result<i64, UnresolvedDependency> {
    translator.get(source_id).ok_or(UnresolvedDependency {
        kind: translator.kind(),
        source_id,
    })
}

/// Resolve a nullable reference, keeping `None` as `None`
pub fn resolve_optional(
    reference: Option<i64>,
    translator: &IdTranslator,
) -> Result<Option<i64>, UnresolvedDependency> {
    match resolve_reference(reference, translator) {
        Resolution::NoDependency => Ok(None),
        Resolution::Resolved(id) => Ok(Some(id)),
        Resolution::Unresolved(unresolved) => Err(unresolved),
    }
}

/// Resolve a list of mandatory references, reporting every miss
pub fn resolve_all(
    source_ids: impl IntoIterator<Item = i64>,
    translator: &IdTranslator,
) -> Result<Vec<i64>, Vec<UnresolvedDependency>> {
    let mut resolved = Vec::new();
    let mut unresolved = Vec::new();

    for source_id in source_ids {
        match resolve_required(source_id, translator) {
            Ok(id) => resolved.push(id),
            Err(miss) => unresolved.push(miss),
        }
    }

    if unresolved.is_empty() {
        Ok(resolved)
    } else {
        Err(unresolved)
    }
}

/// Collect the misses from several independent resolutions
pub fn collect_unresolved<I>(results: I) -> Vec<UnresolvedDependency>
where
    I: IntoIterator<Item = Option<UnresolvedDependency>>,
{
    results.into_iter().flatten().collect()
}
