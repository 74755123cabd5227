//! Record model: the form's personal-info record and the enums that address it.

pub mod record;
pub mod types;

pub use record::{FixedFields, MAX_LIST_LEN, Record, RecordError, RepeatableList};
pub use types::{ListField, Mode, ScalarField, present, present_opt};
