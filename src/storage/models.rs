//! Persisted record models.
//!
//! These types describe what is written to the key-value store. They are kept
//! separate from [`BookRecord`] so the stored format stays fixed even if the
//! search model grows fields.

use crate::domain::BookRecord;
use serde::{Deserialize, Deserializer, Serialize};

/// Snapshot of a favorited book, as stored under the favorites key.
///
/// Field names follow the search endpoint's vocabulary (`cover_i`, `author_name`),
/// which is also the format browser builds of the client wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, rename = "cover_i")]
    pub cover_id: Option<u64>,

    #[serde(default, rename = "author_name", deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
}

impl From<&BookRecord> for FavoriteSnapshot {
    fn from(record: &BookRecord) -> Self {
        Self {
            title: record.title.clone(),
            cover_id: record.cover_id,
            authors: record.authors.clone(),
        }
    }
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_decode_as_empty() {
        let snapshot: FavoriteSnapshot =
            serde_json::from_str(r#"{"title":null,"cover_i":null,"author_name":null}"#).unwrap();
        assert_eq!(snapshot.title, "");
        assert_eq!(snapshot.cover_id, None);
        assert!(snapshot.authors.is_empty());
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let snapshot: FavoriteSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, FavoriteSnapshot {
            title: String::new(),
            cover_id: None,
            authors: Vec::new(),
        });
    }
}
