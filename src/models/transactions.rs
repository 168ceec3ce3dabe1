//! Transaction (prosecution event) history.

use chrono::NaiveDate;
use serde::Serialize;

use crate::mapping::{Fields, FromFields, MapError};

use super::collection::{Collection, CollectionItem};

/// One prosecution event, e.g. a mailed office action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionEvent {
    /// Short event code, e.g. `CTNF`.
    pub event_code: String,
    /// Human-readable event description.
    pub event_description: String,
    /// Date the event was recorded.
    pub event_date: NaiveDate,
}

impl FromFields for TransactionEvent {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            event_code: fields.text("eventCode")?,
            event_description: fields.text("eventDescriptionText")?,
            event_date: fields.date("eventDate"),
        })
    }
}

/// All events for one application, in the order the API returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionHistory {
    /// Application serial number.
    pub application_number: String,
    /// Events in response order.
    pub events: Vec<TransactionEvent>,
}

impl FromFields for TransactionHistory {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            application_number: fields.text("applicationNumberText")?,
            events: fields.list("eventDataBag")?,
        })
    }
}

impl CollectionItem for TransactionHistory {}

/// Response of the `/transactions` endpoint.
pub type TransactionCollection = Collection<TransactionHistory>;
