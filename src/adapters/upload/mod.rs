//! Upload adapters - CSV parsing for bulk imports.

mod csv;

pub use self::csv::{parse_group_csv, parse_user_csv};
