//! Document traits for the store

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Identifier of a stored document
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    fn as_str(&self) -> &str;
}

/// A document held in one collection of the store
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    type Key: StorageKey;

    /// Human readable collection name, used in error messages
    const COLLECTION: &'static str;

    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct NoteId(pub String);

    impl StorageKey for NoteId {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Note {
        pub id: NoteId,
        pub owner: String,
        pub body: String,
    }

    impl StorageEntity for Note {
        type Key = NoteId;
        const COLLECTION: &'static str = "Note";

        fn key(&self) -> &Self::Key {
            &self.id
        }
    }

    pub fn note(id: &str, owner: &str) -> Note {
        Note {
            id: NoteId(id.to_string()),
            owner: owner.to_string(),
            body: format!("note {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_entity_key() {
        let note = note("n-1", "alice");
        assert_eq!(note.key().as_str(), "n-1");
        assert_eq!(Note::COLLECTION, "Note");
    }
}
