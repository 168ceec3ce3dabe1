//! Parent/child continuity relationships between applications.
//!
//! Parent and child entries use the same field names with a `parent` or
//! `child` prefix for the related application, so both map through one
//! record type tagged with [`ContinuityKind`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::mapping::{Fields, FromFields, MapError};

use super::collection::{Collection, CollectionItem};

/// Which side of the relationship the related application is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityKind {
    /// The related application is an earlier one this application claims from.
    Parent,
    /// The related application claims from this one.
    Child,
}

impl ContinuityKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
        }
    }

    fn bag_key(self) -> &'static str {
        match self {
            Self::Parent => "parentContinuityBag",
            Self::Child => "childContinuityBag",
        }
    }
}

/// A relationship between this application and a related one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContinuityRecord {
    /// Whether this record lists a parent or a child.
    pub kind: ContinuityKind,
    /// Serial number of the parent application.
    pub parent_application_number: String,
    /// Serial number of the child application.
    pub child_application_number: String,
    /// Relationship type code, e.g. `CON`, `DIV`, `CIP`.
    pub relationship_code: String,
    /// Relationship text, e.g. `is a Continuation of`.
    pub relationship_description: String,
    /// Filing date of the related application.
    pub filing_date: NaiveDate,
    /// Status code of the related application.
    pub status_code: i64,
    /// Status text of the related application.
    pub status_description: String,
    /// Patent number of the related application, if granted.
    pub patent_number: String,
    /// First-inventor-to-file flag of the related application.
    pub first_inventor_to_file: bool,
}

impl ContinuityRecord {
    fn map(kind: ContinuityKind, fields: &Fields<'_>) -> Result<Self, MapError> {
        let p = kind.prefix();
        Ok(Self {
            kind,
            parent_application_number: fields.text("parentApplicationNumberText")?,
            child_application_number: fields.text("childApplicationNumberText")?,
            relationship_code: fields.text("claimParentageTypeCode")?,
            relationship_description: fields.text("claimParentageTypeCodeDescriptionText")?,
            filing_date: fields.date(&format!("{p}ApplicationFilingDate")),
            status_code: fields.int(&format!("{p}ApplicationStatusCode"))?,
            status_description: fields.text(&format!("{p}ApplicationStatusDescriptionText"))?,
            patent_number: fields.text(&format!("{p}PatentNumber"))?,
            first_inventor_to_file: fields.flag("firstInventorToFileIndicator")?,
        })
    }

    /// Number of the application on the other side of the relationship.
    #[must_use]
    pub fn related_application_number(&self) -> &str {
        match self.kind {
            ContinuityKind::Parent => &self.parent_application_number,
            ContinuityKind::Child => &self.child_application_number,
        }
    }
}

/// Continuity data for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationContinuity {
    /// Application serial number.
    pub application_number: String,
    /// Applications this one claims priority from.
    pub parents: Vec<ContinuityRecord>,
    /// Applications claiming priority from this one.
    pub children: Vec<ContinuityRecord>,
}

impl FromFields for ApplicationContinuity {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        let related = |kind: ContinuityKind| {
            fields.list_with(kind.bag_key(), |item| ContinuityRecord::map(kind, item))
        };
        Ok(Self {
            application_number: fields.text("applicationNumberText")?,
            parents: related(ContinuityKind::Parent)?,
            children: related(ContinuityKind::Child)?,
        })
    }
}

impl CollectionItem for ApplicationContinuity {}

/// Response of the `/continuity` endpoint.
pub type ContinuityCollection = Collection<ApplicationContinuity>;
