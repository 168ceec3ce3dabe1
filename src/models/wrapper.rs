//! Application file wrapper: metadata plus event history for one application.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::mapping::{Fields, FromFields, MapError};

use super::collection::{Collection, CollectionItem};
use super::transactions::TransactionEvent;

/// Bibliographic and status metadata for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationMetadata {
    /// Date the application was filed.
    pub filing_date: NaiveDate,
    /// Effective filing date, accounting for priority claims.
    pub effective_filing_date: NaiveDate,
    /// Numeric status code.
    pub application_status_code: i64,
    /// Status text, e.g. `Patented Case`.
    pub application_status_description: String,
    /// Date the current status took effect.
    pub application_status_date: NaiveDate,
    /// Application type code, e.g. `UTL`.
    pub application_type_code: String,
    /// Application type label, e.g. `Utility`.
    pub application_type_label: String,
    /// Application type category, e.g. `REGULAR`.
    pub application_type_category: String,
    /// Title of the invention.
    pub invention_title: String,
    /// Name of the first named inventor.
    pub first_inventor_name: String,
    /// Whether the application is examined under first-inventor-to-file.
    pub first_inventor_to_file: bool,
    /// Examiner of record.
    pub examiner_name: String,
    /// Group art unit number.
    pub group_art_unit: String,
    /// Correspondence customer number.
    pub customer_number: i64,
    /// Confirmation number.
    pub confirmation_number: i64,
    /// Combined USPC classification, e.g. `235/472.01`.
    pub class_subclass: String,
    /// USPC class.
    pub uspc_class: String,
    /// USPC subclass.
    pub uspc_subclass: String,
    /// CPC classification symbols.
    pub cpc_classifications: Vec<String>,
    /// Applicant's docket number.
    pub docket_number: String,
    /// Business entity status, e.g. `Small` or `Regular Undiscounted`.
    pub entity_status: String,
    /// Whether this is a national stage entry.
    pub national_stage: bool,
    /// Earliest pre-grant publication number.
    pub earliest_publication_number: String,
    /// Date of the earliest pre-grant publication.
    pub earliest_publication_date: NaiveDate,
    /// Dates of every publication.
    pub publication_dates: Vec<NaiveDate>,
    /// Publication sequence numbers.
    pub publication_sequence_numbers: Vec<String>,
    /// Publication categories, e.g. `Pre-Grant Publications - PGPub`.
    pub publication_categories: Vec<String>,
    /// Issued patent number, empty until grant.
    pub patent_number: String,
    /// Grant date, the sentinel until grant.
    pub grant_date: NaiveDate,
}

impl FromFields for ApplicationMetadata {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        let entity = fields.nested("entityStatusData")?;
        Ok(Self {
            filing_date: fields.date("filingDate"),
            effective_filing_date: fields.date("effectiveFilingDate"),
            application_status_code: fields.int("applicationStatusCode")?,
            application_status_description: fields.text("applicationStatusDescriptionText")?,
            application_status_date: fields.date("applicationStatusDate"),
            application_type_code: fields.text("applicationTypeCode")?,
            application_type_label: fields.text("applicationTypeLabelName")?,
            application_type_category: fields.text("applicationTypeCategory")?,
            invention_title: fields.text("inventionTitle")?,
            first_inventor_name: fields.text("firstInventorName")?,
            first_inventor_to_file: fields.flag("firstInventorToFileIndicator")?,
            examiner_name: fields.text("examinerNameText")?,
            group_art_unit: fields.text("groupArtUnitNumber")?,
            customer_number: fields.int("customerNumber")?,
            confirmation_number: fields.int("applicationConfirmationNumber")?,
            class_subclass: fields.text("class/subclass")?,
            uspc_class: fields.text("class")?,
            uspc_subclass: fields.text("subclass")?,
            cpc_classifications: fields.texts("cpcClassificationBag")?,
            docket_number: fields.text("docketNumber")?,
            entity_status: entity
                .text("businessEntityStatusCategory")
                .map_err(|e| e.within("entityStatusData"))?,
            national_stage: fields.flag("nationalStageIndicator")?,
            earliest_publication_number: fields.text("earliestPublicationNumber")?,
            earliest_publication_date: fields.date("earliestPublicationDate"),
            publication_dates: fields.dates("publicationDateBag")?,
            publication_sequence_numbers: fields.texts("publicationSequenceNumberBag")?,
            publication_categories: fields.texts("publicationCategoryBag")?,
            patent_number: fields.text("patentNumber")?,
            grant_date: fields.date("grantDate"),
        })
    }
}

/// Root record for one patent application.
///
/// `application_number` is always populated (possibly empty) even when the
/// metadata object is missing; defaults apply per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationWrapper {
    /// Application serial number.
    pub application_number: String,
    /// Bibliographic metadata.
    pub metadata: ApplicationMetadata,
    /// Transaction events attached to the wrapper.
    pub events: Vec<TransactionEvent>,
}

impl ApplicationWrapper {
    /// Maps a wrapper response body, taking the first record in the bag.
    ///
    /// An empty bag yields a wrapper whose fields all carry their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if a present value has the wrong shape.
    pub fn from_response(body: &Value) -> Result<Self, MapError> {
        match Collection::<Self>::from_value(body)?.into_first() {
            Some(wrapper) => Ok(wrapper),
            None => Self::from_fields(&Fields::empty()),
        }
    }
}

impl FromFields for ApplicationWrapper {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MapError> {
        Ok(Self {
            application_number: fields.text("applicationNumberText")?,
            metadata: fields.record("applicationMetaData")?,
            events: fields.list("eventDataBag")?,
        })
    }
}

impl CollectionItem for ApplicationWrapper {}

/// Response of the patent-number search endpoint.
pub type WrapperCollection = Collection<ApplicationWrapper>;
