//! The generic response envelope shared by every list endpoint.

use serde::Serialize;
use serde_json::Value;

use crate::mapping::{Fields, FromFields, MapError};

/// Bag key used by every endpoint except documents.
pub const FILE_WRAPPER_BAG: &str = "patentFileWrapperDataBag";

/// An item type that lives inside a [`Collection`] response.
pub trait CollectionItem: FromFields {
    /// The JSON key holding the per-item objects.
    const BAG_KEY: &'static str = FILE_WRAPPER_BAG;
}

/// A counted, ordered list of per-application records.
///
/// `count` is whatever the API reported (0 when absent); it is not
/// recomputed from `items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection<T> {
    /// Number of results reported by the API.
    pub count: u64,
    /// Records in response order.
    pub items: Vec<T>,
    /// Correlation identifier returned by the API, if any.
    pub request_identifier: Option<String>,
}

impl<T> Collection<T> {
    /// Maps a response body, reading items from `bag_key` through `map_item`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if a present value has the wrong shape.
    pub fn from_value_with<F>(body: &Value, bag_key: &str, map_item: F) -> Result<Self, MapError>
    where
        F: FnMut(&Fields<'_>) -> Result<T, MapError>,
    {
        let fields = Fields::document(body);
        let count = fields.int("count")?;
        let count = u64::try_from(count)
            .map_err(|_| MapError::invalid_integer("count", count.to_string()))?;
        Ok(Self {
            count,
            items: fields.list_with(bag_key, map_item)?,
            request_identifier: fields.opt_text("requestIdentifier")?,
        })
    }

    /// Number of mapped records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the response carried no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the collection, returning its first record.
    #[must_use]
    pub fn into_first(self) -> Option<T> {
        self.items.into_iter().next()
    }
}

impl<T: CollectionItem> Collection<T> {
    /// Maps a response body using the item type's bag key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if a present value has the wrong shape.
    pub fn from_value(body: &Value) -> Result<Self, MapError> {
        Self::from_value_with(body, T::BAG_KEY, T::from_fields)
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
