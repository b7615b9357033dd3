use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

// ============================================================================
// Canonical id bijection
// ============================================================================

/// Which id space a map covers. Screens and transitions are numbered
/// independently (`S1..`, `T1..`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdKind {
    Screen,
    Transition,
}

impl IdKind {
    pub fn prefix(self) -> char {
        match self {
            IdKind::Screen => 'S',
            IdKind::Transition => 'T',
        }
    }

    pub fn canonical_id(self, n: u64) -> String {
        format!("{}{}", self.prefix(), n)
    }

    /// Numeric part of a canonical id of this kind (`S12` -> 12).
    pub fn numeric_suffix(self, canonical: &str) -> Option<u64> {
        let digits = canonical.strip_prefix(self.prefix())?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

/// One `canonical <-> original` pair, the serialized form of an [`IdMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdEntry {
    pub canonical: String,
    pub original: String,
}

/// Bijection between original hashes and short sequential ids.
///
/// Both directions are kept in step; ids are handed out in insertion
/// order starting at 1 and never reused. Only the canonicalizer and the
/// transition normalizer build maps; everyone else reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdMap {
    kind: IdKind,
    canonical_to_original: HashMap<String, String>,
    original_to_canonical: HashMap<String, String>,
    /// Original ids in assignment order
    order: Vec<String>,
    /// Highest numeric suffix handed out so far
    last_assigned: u64,
}

impl IdMap {
    pub fn new(kind: IdKind) -> Self {
        Self {
            kind,
            canonical_to_original: HashMap::new(),
            original_to_canonical: HashMap::new(),
            order: Vec::new(),
            last_assigned: 0,
        }
    }

    /// Canonical id for `original`, assigning the next one if unseen.
    pub(crate) fn assign(&mut self, original: &str) -> String {
        if let Some(existing) = self.original_to_canonical.get(original) {
            return existing.clone();
        }
        self.last_assigned += 1;
        let canonical = self.kind.canonical_id(self.last_assigned);
        self.canonical_to_original
            .insert(canonical.clone(), original.to_string());
        self.original_to_canonical
            .insert(original.to_string(), canonical.clone());
        self.order.push(original.to_string());
        canonical
    }

    pub fn kind(&self) -> IdKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains_original(&self, original: &str) -> bool {
        self.original_to_canonical.contains_key(original)
    }

    pub fn original_of(&self, canonical: &str) -> Option<&str> {
        self.canonical_to_original.get(canonical).map(String::as_str)
    }

    pub fn canonical_of(&self, original: &str) -> Option<&str> {
        self.original_to_canonical.get(original).map(String::as_str)
    }

    pub fn canonical_to_original(&self) -> &HashMap<String, String> {
        &self.canonical_to_original
    }

    pub fn original_to_canonical(&self) -> &HashMap<String, String> {
        &self.original_to_canonical
    }

    /// `(canonical, original)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().map(move |original| {
            let canonical = self.original_to_canonical[original].as_str();
            (canonical, original.as_str())
        })
    }

    /// Numeric suffix of a canonical id in this map's id space.
    pub fn numeric_suffix(&self, canonical: &str) -> Option<u64> {
        self.kind.numeric_suffix(canonical)
    }

    pub fn to_entries(&self) -> Vec<IdEntry> {
        self.iter()
            .map(|(canonical, original)| IdEntry {
                canonical: canonical.to_string(),
                original: original.to_string(),
            })
            .collect()
    }

    /// Rebuild a map from saved entries, rejecting anything that is not a
    /// bijection over well-formed ids of `kind`.
    pub fn from_entries(kind: IdKind, entries: Vec<IdEntry>) -> Result<Self, TraceError> {
        let mut map = IdMap::new(kind);
        let mut seen = HashSet::new();

        let mut numbered = Vec::with_capacity(entries.len());
        for entry in entries {
            let n = kind
                .numeric_suffix(&entry.canonical)
                .filter(|n| *n > 0 && kind.canonical_id(*n) == entry.canonical)
                .ok_or_else(|| {
                    TraceError::InvalidIdMap(format!(
                        "'{}' is not a {:?} id",
                        entry.canonical, kind
                    ))
                })?;
            if !seen.insert(n) {
                return Err(TraceError::InvalidIdMap(format!(
                    "duplicate canonical id '{}'",
                    entry.canonical
                )));
            }
            if map.original_to_canonical.contains_key(&entry.original) {
                return Err(TraceError::InvalidIdMap(format!(
                    "original id '{}' mapped twice",
                    entry.original
                )));
            }
            map.original_to_canonical
                .insert(entry.original.clone(), entry.canonical.clone());
            numbered.push((n, entry));
        }

        numbered.sort_by_key(|(n, _)| *n);
        map.last_assigned = numbered.last().map_or(0, |(n, _)| *n);
        for (_, entry) in numbered {
            map.order.push(entry.original.clone());
            map.canonical_to_original
                .insert(entry.canonical, entry.original);
        }

        Ok(map)
    }
}

/// Both id maps of a parsed trace, as written by the `maps` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMaps {
    pub screens: Vec<IdEntry>,
    #[serde(default)]
    pub transitions: Vec<IdEntry>,
}

impl SavedMaps {
    pub fn from_maps(screens: &IdMap, transitions: &IdMap) -> Self {
        Self {
            screens: screens.to_entries(),
            transitions: transitions.to_entries(),
        }
    }

    /// Validate and split into `(screens, transitions)`.
    pub fn into_maps(self) -> Result<(IdMap, IdMap), TraceError> {
        let screens = IdMap::from_entries(IdKind::Screen, self.screens)?;
        let transitions = IdMap::from_entries(IdKind::Transition, self.transitions)?;
        Ok((screens, transitions))
    }
}
