// src/export.rs
// Flatten resolution records into one table with a stable column order.

use std::collections::{HashMap, HashSet};

use crate::config::consts::col;
use crate::model::ResolutionRecord;
use crate::store::DataSet;

/// Header = the fixed columns, then every other key (country codes, Note)
/// in the order it first appears across `records`. Missing values are empty.
pub fn to_dataset(records: &[ResolutionRecord]) -> DataSet {
    let flat: Vec<Vec<(String, String)>> = records.iter().map(ResolutionRecord::fields).collect();

    let mut headers: Vec<String> = col::FIXED.iter().map(|c| s!(*c)).collect();
    let mut seen: HashSet<String> = headers.iter().cloned().collect();
    for fields in &flat {
        for (key, _) in fields {
            if seen.insert(key.clone()) {
                headers.push(key.clone());
            }
        }
    }

    let index: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.as_str(), i))
        .collect();

    let rows = flat
        .iter()
        .map(|fields| {
            let mut row = vec![s!(); headers.len()];
            for (key, value) in fields {
                if let Some(&i) = index.get(key.as_str()) {
                    row[i] = value.clone();
                }
            }
            row
        })
        .collect();

    DataSet { headers: Some(headers), rows }
}
