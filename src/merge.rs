// src/merge.rs
use std::collections::HashMap;

use crate::config::consts::AGENDA_MISSING;
use crate::diag::{Diagnostics, Warning};
use crate::model::ResolutionRecord;

/// Left join of agenda text onto records by resolution symbol. Every record
/// keeps its place; an unmatched one gets the `AGENDA_MISSING` sentinel and
/// a `Warning::JoinKeyMissing`.
pub fn attach_agendas(
    records: &mut [ResolutionRecord],
    agendas: &HashMap<String, String>,
    diag: &mut dyn Diagnostics,
) {
    for record in records.iter_mut() {
        match agendas.get(record.resolution()) {
            Some(agenda) => record.agenda = Some(agenda.clone()),
            None => {
                diag.warn(Warning::JoinKeyMissing { resolution: s!(record.resolution()) });
                record.agenda = Some(s!(AGENDA_MISSING));
            }
        }
    }
}
