//! Domain records mapped from API responses.
//!
//! All records are immutable values built once by [`crate::mapping`]. Every
//! list endpoint returns a [`Collection`] of per-application records.

mod assignment;
mod collection;
mod continuity;
mod documents;
mod foreign_priority;
mod transactions;
mod wrapper;

pub use assignment::{
    Address, ApplicationAssignment, Assignee, AssignmentCollection, AssignmentRecord, Assignor,
    Correspondent,
};
pub use collection::{Collection, CollectionItem, FILE_WRAPPER_BAG};
pub use continuity::{ApplicationContinuity, ContinuityCollection, ContinuityKind, ContinuityRecord};
pub use documents::{DirectionCategory, DocumentCollection, DocumentDescriptor, DownloadOption};
pub use foreign_priority::{ForeignPriorityClaim, ForeignPriorityCollection, ForeignPriorityData};
pub use transactions::{TransactionCollection, TransactionEvent, TransactionHistory};
pub use wrapper::{ApplicationMetadata, ApplicationWrapper, WrapperCollection};
