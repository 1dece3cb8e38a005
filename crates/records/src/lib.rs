//! Employee-attached records: documents and time-off requests.

pub mod document;
pub mod time_off;

pub use document::{Document, NewDocument};
pub use time_off::{NewTimeOffRequest, TimeOffRequest, TimeOffStatus, DEFAULT_LEAVE_BALANCE};
