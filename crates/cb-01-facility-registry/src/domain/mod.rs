//! Domain layer: table parsing and snapshot types.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_facility_table, ParsedTable, RowIssue, RowWarning};
pub use snapshot::{FacilitySnapshot, RefreshReport};
