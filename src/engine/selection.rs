// ==========================================
// Vegetation Cut - cut record selection
// ==========================================
// Priority view: one cut per area (latest)
// History view: every cut per area
// Kept as two entry points on purpose
// ==========================================

use crate::domain::cut::CutRecord;
use std::collections::BTreeMap;

/// Most recent cut per area
///
/// Picks the maximum cut date, not the first row listed for the area, so
/// an unsorted file still yields the latest cut. Equal dates keep the
/// earliest row of the input.
pub fn latest_cut_per_area(records: &[CutRecord]) -> BTreeMap<u32, CutRecord> {
    let mut latest: BTreeMap<u32, CutRecord> = BTreeMap::new();

    for record in records {
        match latest.get(&record.area_id) {
            Some(current) if current.cut_date >= record.cut_date => {}
            _ => {
                latest.insert(record.area_id, record.clone());
            }
        }
    }

    latest
}

/// Every cut per area, in input order
pub fn all_cuts_per_area(records: &[CutRecord]) -> BTreeMap<u32, Vec<CutRecord>> {
    let mut grouped: BTreeMap<u32, Vec<CutRecord>> = BTreeMap::new();

    for record in records {
        grouped
            .entry(record.area_id)
            .or_insert_with(Vec::new)
            .push(record.clone());
    }

    grouped
}
