//! Conversion of typed records into table rows

use crate::output::table::Record;

/// Anything that can become one row of a [`ResultTable`](crate::output::ResultTable)
///
/// Field order in the returned record is the order its keys first appear in
/// the exported header, so implementations should insert fixed fields first.
pub trait IntoRecord {
    fn into_record(self) -> Record;
}

impl IntoRecord for Record {
    fn into_record(self) -> Record {
        self
    }
}
