//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities. Identifiers are opaque
//! ULID strings: globally unique and lexicographically ordered by
//! generation time, so sorted scans approximate chronological order.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Mutex;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ulid::Ulid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type PollingId = Id<markers::Polling>;
/// ```
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap an existing identifier string
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

// Manual impls: the derives would put bounds on the marker type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::from_string(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_string)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for Polling IDs
    pub struct Polling;

    /// Marker for Contestant IDs
    pub struct Contestant;

    /// Marker for Vote IDs
    pub struct Vote;
}

/// Type aliases for common IDs
pub type PollingId = Id<markers::Polling>;
pub type ContestantId = Id<markers::Contestant>;
pub type VoteId = Id<markers::Vote>;

/// Monotonic ULID generator, safe under concurrent callers.
///
/// IDs generated within the same millisecond keep increasing thanks to
/// the monotonic entropy; on entropy overflow inside one millisecond a
/// fresh random ULID of the same timestamp is taken instead.
pub struct IdGenerator {
    entropy: Mutex<ulid::Generator>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            entropy: Mutex::new(ulid::Generator::new()),
        }
    }

    pub fn next<T>(&self) -> Id<T> {
        let mut entropy = self.entropy.lock().unwrap_or_else(|e| e.into_inner());
        let ulid = entropy.generate().unwrap_or_else(|_| Ulid::new());
        Id::from_string(ulid.to_string())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let polling_id: PollingId = Id::from_string("01H000000000000000000000AA");
        let vote_id: VoteId = Id::from_string("01H000000000000000000000AA");

        // These are different types, cannot be mixed
        let _p: String = polling_id.into_string();
        let _v: String = vote_id.into_string();
    }

    #[test]
    fn test_id_equality_and_display() {
        let a: PollingId = Id::from_string("01H0");
        let b: PollingId = Id::from_string("01H0");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "01H0");
        assert!(!a.is_empty());
        assert!(PollingId::from_string("").is_empty());
    }

    #[test]
    fn test_id_serde_roundtrip() {
        let id: VoteId = Id::from_string("01HZXW5T9GQ6C3YB4N8E7M2K1D");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""01HZXW5T9GQ6C3YB4N8E7M2K1D""#);

        let back: VoteId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_generator_produces_canonical_ulids() {
        let gen = IdGenerator::new();
        let id: VoteId = gen.next();
        assert_eq!(id.as_str().len(), 26);
    }

    #[test]
    fn test_generator_ids_are_unique_and_sorted() {
        let gen = IdGenerator::new();
        let ids: Vec<String> = (0..64)
            .map(|_| gen.next::<markers::Vote>().into_string())
            .collect();

        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted, "generation order must match sort order");

        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }
}
