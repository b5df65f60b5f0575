//! Join roster names against the reference table.

use crate::models::{LabeledName, NameRecord, UNKNOWN_SEX};
use crate::reference::ReferenceTable;
use crate::roster::RosterStore;

/// Label every stored record, in store order. First names are matched
/// exactly; a name absent from the reference table gets [`UNKNOWN_SEX`].
pub fn label_roster<'a>(
    store: &'a RosterStore,
    reference: &'a ReferenceTable,
) -> Vec<LabeledName<'a>> {
    store
        .iter()
        .map(|record| LabeledName {
            record,
            sex: reference.lookup(record.first()).unwrap_or(UNKNOWN_SEX),
        })
        .collect()
}

/// Records labeled unknown, in the order they were labeled.
pub fn unknowns<'r, 'a>(rows: &'r [LabeledName<'a>]) -> impl Iterator<Item = &'a NameRecord> + 'r {
    rows.iter().filter(|r| r.is_unknown()).map(|r| r.record)
}
