//! Assignment (ownership transfer) records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::mapping::{Fields, FromFields, MapError};

use super::collection::{Collection, CollectionItem};

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    /// First address line.
    pub line1: String,
    /// Second address line.
    pub line2: Option<String>,
    /// Third address line.
    pub line3: Option<String>,
    /// City name.
    pub city: String,
    /// State or region code, e.g. `CA`.
    pub region: String,
    /// Postal code.
    pub postal_code: Option<String>,
}

impl FromFields for Address {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            line1: fields.text("addressLineOneText")?,
            line2: fields.opt_text("addressLineTwoText")?,
            line3: fields.opt_text("addressLineThreeText")?,
            city: fields.text("cityName")?,
            region: fields.text("geographicRegionCode")?,
            postal_code: fields.opt_text("postalCode")?,
        })
    }
}

/// A party transferring rights, with the date they signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignor {
    /// Name of the assignor.
    pub name: String,
    /// Date the assignor executed the assignment.
    pub execution_date: NaiveDate,
}

impl FromFields for Assignor {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            name: fields.text("assignorName")?,
            execution_date: fields.date("executionDate"),
        })
    }
}

/// A party receiving rights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignee {
    /// Name of the assignee.
    pub name: String,
    /// Mailing address.
    pub address: Address,
}

impl FromFields for Assignee {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            name: fields.text("assigneeNameText")?,
            address: fields.record("assigneeAddress")?,
        })
    }
}

/// The correspondent of record for an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correspondent {
    /// Name of the correspondent.
    pub name: String,
    /// Mailing address.
    pub address: Address,
}

impl FromFields for Correspondent {
    /// The API sends correspondent addresses as bare text lines with no city
    /// or region fields. The city is taken as everything before the first
    /// comma of line three (`"ALEXANDRIA, VA 22314"` → `"ALEXANDRIA"`); the
    /// region is left empty. This is lossy and may be wrong for addresses
    /// that do not follow the `CITY, REGION POSTAL` layout.
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        let line3 = fields.opt_text("addressLineThreeText")?;
        let city = line3
            .as_deref()
            .and_then(|line| line.split(',').next())
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            name: fields.text("correspondentNameText")?,
            address: Address {
                line1: fields.text("addressLineOneText")?,
                line2: fields.opt_text("addressLineTwoText")?,
                line3,
                city,
                region: String::new(),
                postal_code: None,
            },
        })
    }
}

/// A single recorded assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRecord {
    /// Date the assignment was received.
    pub received_date: NaiveDate,
    /// Date the assignment was recorded.
    pub recorded_date: NaiveDate,
    /// Date the recordation notice was mailed.
    pub mailed_date: NaiveDate,
    /// Recordation reel number.
    pub reel_number: i64,
    /// Recordation frame number.
    pub frame_number: i64,
    /// Number of pages recorded.
    pub page_number: i64,
    /// Combined reel/frame location as sent by the API, e.g. `52311/12`.
    pub reel_frame: String,
    /// Nature of the conveyance.
    pub conveyance_text: String,
    /// Parties conveying rights.
    pub assignors: Vec<Assignor>,
    /// Parties receiving rights.
    pub assignees: Vec<Assignee>,
    /// Correspondents of record.
    pub correspondents: Vec<Correspondent>,
}

impl FromFields for AssignmentRecord {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            received_date: fields.date("assignmentReceivedDate"),
            recorded_date: fields.date("assignmentRecordedDate"),
            mailed_date: fields.date("assignmentMailedDate"),
            reel_number: fields.int("reelNumber")?,
            frame_number: fields.int("frameNumber")?,
            page_number: fields.int("pageNumber")?,
            reel_frame: fields.text("reelNumber/frameNumber")?,
            conveyance_text: fields.text("conveyanceText")?,
            assignors: fields.list("assignorBag")?,
            assignees: fields.list("assigneeBag")?,
            correspondents: fields.list("correspondenceAddressBag")?,
        })
    }
}

/// All assignments recorded against one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationAssignment {
    /// Application serial number.
    pub application_number: String,
    /// Recorded assignments in response order.
    pub assignments: Vec<AssignmentRecord>,
}

impl FromFields for ApplicationAssignment {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            application_number: fields.text("applicationNumberText")?,
            assignments: fields.list("assignmentBag")?,
        })
    }
}

impl CollectionItem for ApplicationAssignment {}

/// Response of the `/assignment` endpoint.
pub type AssignmentCollection = Collection<ApplicationAssignment>;
