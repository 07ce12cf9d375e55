//! Employee record fetch and normalization.
//!
//! `lookup` pulls the raw record (plus its secondary company/partner
//! enrichments) out of the store; `normalize` flattens everything into the
//! [`CanonicalRecord`] consumed by the letter engine.

pub mod lookup;
pub mod normalize;
pub mod record;

pub use lookup::fetch_raw_employee;
pub use normalize::{normalize, CanonicalRecord, TravelExtras};
pub use record::RelationValue;

use thiserror::Error;

use crate::odoo::StoreError;

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("no employee record matches identification number '{0}'")]
    NotFound(String),
    #[error("employee record carries neither an id nor a name")]
    RecordIncomplete,
    #[error(transparent)]
    Store(#[from] StoreError),
}
