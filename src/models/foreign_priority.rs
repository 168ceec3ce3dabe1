//! Foreign priority claims.

use chrono::NaiveDate;
use serde::Serialize;

use crate::mapping::{Fields, FromFields, MapError};

use super::collection::{Collection, CollectionItem};

/// A priority claim to an application filed at a foreign office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignPriorityClaim {
    /// Name of the foreign office, e.g. `JAPAN`.
    pub office_name: String,
    /// Filing date of the foreign application.
    pub filing_date: NaiveDate,
    /// Application number at the foreign office.
    pub application_number: String,
}

impl FromFields for ForeignPriorityClaim {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            office_name: fields.text("ipOfficeName")?,
            filing_date: fields.date("filingDate"),
            application_number: fields.text("applicationNumberText")?,
        })
    }
}

/// All foreign priority claims of one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignPriorityData {
    /// Application serial number.
    pub application_number: String,
    /// Foreign priority claims in response order.
    pub claims: Vec<ForeignPriorityClaim>,
}

impl FromFields for ForeignPriorityData {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            application_number: fields.text("applicationNumberText")?,
            claims: fields.list("foreignPriorityBag")?,
        })
    }
}

impl CollectionItem for ForeignPriorityData {}

/// Response of the `/foreign-priority` endpoint.
pub type ForeignPriorityCollection = Collection<ForeignPriorityData>;
