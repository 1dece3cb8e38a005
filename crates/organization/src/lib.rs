//! Organization structure: departments and the positions they offer.
//!
//! Pure record rules (no IO, no HTTP, no storage). Cross-record checks such as
//! name uniqueness live in the service layer.

pub mod department;
pub mod position;

pub use department::{Department, DepartmentChanges, NewDepartment};
pub use position::{NewPosition, Position, PositionChanges, PositionLevel};
