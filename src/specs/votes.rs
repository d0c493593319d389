// src/specs/votes.rs
//! Per-country votes and their totals.
//!
//! Each voting country has one `967` field: `c` is the country code, `d` the
//! vote indicator (`Y`, `N`, `A`, empty or absent). Field `996` carries an
//! independent Yes total in `b`, or a free-text comment in `a`.
//!
//! The feed does not mark countries individually when a vote was unanimous,
//! so a literal reading undercounts Yes votes. When the literal tally
//! disagrees with `996/b`, the record is read a second time with every
//! country counted as Yes. That second reading is final: there is exactly one
//! known misreading to correct, and a record that still disagrees is kept
//! (flagged through diagnostics) rather than dropped.

use log::debug;

use super::ExtractError;
use crate::config::consts::ADOPTED_WITHOUT_VOTE;
use crate::diag::{Diagnostics, Warning};
use crate::model::{TallyCheck, TallyMode, VoteCode, VoteTally};
use crate::record::Record;

/// Cross-check a calculated Yes count against field 996.
///
/// Only an unambiguous numeric total can fail the check. A missing field, a
/// comment, or a missing total all count as nothing to disagree with.
pub fn validate_tally(calculated_yes: u32, record: &Record) -> TallyCheck {
    let Some(totals) = record.field("996") else {
        return TallyCheck::NoTotalField;
    };
    // the feed's own signal that per-country data is unreliable here
    if totals.has_subfield("a") {
        return TallyCheck::Commented;
    }
    let Some(raw) = totals.subfield("b") else {
        return TallyCheck::NoTotal;
    };

    match raw.trim().parse::<u32>() {
        Ok(expected) => {
            debug!("Total votes from XML: {expected}, total votes from calculated data: {calculated_yes}");
            if expected == calculated_yes {
                TallyCheck::Matched
            } else {
                TallyCheck::Mismatch { expected, calculated: calculated_yes }
            }
        }
        Err(_) => TallyCheck::Unreadable(s!(raw)),
    }
}

/// One reading of the `967` fields under `mode`. No validation.
pub fn tally_votes(record: &Record, mode: TallyMode) -> Result<VoteTally, ExtractError> {
    let mut votes = Vec::new();
    for field in record.fields("967") {
        let country = field.subfield("c").ok_or_else(|| ExtractError::MissingField {
            field: "Country",
            tag: "967",
            code: "c",
            resolution: None,
        })?;

        let code = match mode {
            TallyMode::AsRecorded => VoteCode::from_indicator(field.subfield("d")),
            TallyMode::Unanimous => VoteCode::Yes,
        };
        if let VoteCode::Other(raw) = &code {
            debug!("Unexpected vote indicator {raw:?} for {country}");
        }
        votes.push((s!(country), code));
    }
    Ok(VoteTally::from_votes(votes, mode))
}

/// Extract and validate the votes of one record.
///
/// Pass one reads indicators as recorded. If the Yes count disagrees with
/// 996, pass two counts every country as Yes and is returned whatever its
/// own check says; a persisting disagreement becomes a
/// `Warning::ValidationMismatch`.
pub fn extract_voting_data(
    record: &Record,
    resolution: &str,
    diag: &mut dyn Diagnostics,
) -> Result<VoteTally, ExtractError> {
    debug!("Extracting voting data for resolution {resolution}...");

    let with_resolution = |e: ExtractError| match e {
        ExtractError::MissingField { field, tag, code, .. } => ExtractError::MissingField {
            field,
            tag,
            code,
            resolution: Some(s!(resolution)),
        },
    };

    let mut tally = tally_votes(record, TallyMode::AsRecorded).map_err(with_resolution)?;
    tally.check = validate_tally(tally.totals.yes, record);

    if !tally.check.is_valid() {
        debug!(
            "Discrepancy in {resolution} ({}). Retrying with mitigation for unanimous votes...",
            tally.check
        );
        tally = tally_votes(record, TallyMode::Unanimous).map_err(with_resolution)?;
        tally.check = validate_tally(tally.totals.yes, record);

        if !tally.check.is_valid() {
            diag.warn(Warning::ValidationMismatch {
                resolution: s!(resolution),
                check: tally.check.clone(),
            });
        }
    }

    if tally.all_non_participating() {
        tally.note = Some(ADOPTED_WITHOUT_VOTE);
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DataField;

    fn vote(country: &str, indicator: Option<&str>) -> DataField {
        match indicator {
            Some(d) => DataField::new("967", &[("c", country), ("d", d)]),
            None => DataField::new("967", &[("c", country)]),
        }
    }

    #[test]
    fn validator_without_996_is_valid() {
        let r = Record::new(vec![vote("FR", Some("Y"))]);
        assert_eq!(validate_tally(0, &r), TallyCheck::NoTotalField);
        assert!(validate_tally(7, &r).is_valid());
    }

    #[test]
    fn validator_comment_wins_over_numbers() {
        let r = Record::new(vec![DataField::new("996", &[("b", "15"), ("a", "Adopted unanimously")])]);
        for yes in [0, 3, 15, 99] {
            assert_eq!(validate_tally(yes, &r), TallyCheck::Commented);
        }
    }

    #[test]
    fn validator_without_total_is_valid() {
        let r = Record::new(vec![DataField::new("996", &[("c", "0")])]);
        assert_eq!(validate_tally(4, &r), TallyCheck::NoTotal);
    }

    #[test]
    fn validator_compares_numbers() {
        let r = Record::new(vec![DataField::new("996", &[("b", " 12 ")])]);
        assert_eq!(validate_tally(12, &r), TallyCheck::Matched);
        assert_eq!(validate_tally(11, &r), TallyCheck::Mismatch { expected: 12, calculated: 11 });
    }

    #[test]
    fn validator_flags_unreadable_total() {
        let r = Record::new(vec![DataField::new("996", &[("b", "twelve")])]);
        let check = validate_tally(12, &r);
        assert_eq!(check, TallyCheck::Unreadable(s!("twelve")));
        assert!(!check.is_valid());
    }

    #[test]
    fn absent_and_empty_indicators_are_non_participating() {
        let r = Record::new(vec![vote("FR", None), vote("US", Some(""))]);
        let t = tally_votes(&r, TallyMode::AsRecorded).unwrap();
        assert_eq!(t.totals.non_participating, 2);
    }

    #[test]
    fn unanimous_mode_ignores_indicators() {
        let r = Record::new(vec![vote("FR", Some("N")), vote("US", Some("A")), vote("CN", None)]);
        let t = tally_votes(&r, TallyMode::Unanimous).unwrap();
        assert_eq!(t.totals.yes, 3);
        assert_eq!(t.mode, TallyMode::Unanimous);
    }

    #[test]
    fn missing_country_code_is_fatal() {
        let r = Record::new(vec![vote("FR", Some("Y")), DataField::new("967", &[("d", "Y")])]);
        let mut diag: Vec<Warning> = Vec::new();
        let err = extract_voting_data(&r, "S/RES/9(1946)", &mut diag).unwrap_err();
        assert_eq!(
            err,
            ExtractError::MissingField {
                field: "Country",
                tag: "967",
                code: "c",
                resolution: Some(s!("S/RES/9(1946)")),
            }
        );
    }

    #[test]
    fn note_only_when_nobody_participated() {
        let mut diag: Vec<Warning> = Vec::new();

        let none = Record::new(vec![vote("FR", None), vote("US", Some(""))]);
        let t = extract_voting_data(&none, "S/RES/1(1946)", &mut diag).unwrap();
        assert_eq!(t.note, Some(ADOPTED_WITHOUT_VOTE));

        let some = Record::new(vec![vote("FR", None), vote("US", Some("Y"))]);
        let t = extract_voting_data(&some, "S/RES/2(1946)", &mut diag).unwrap();
        assert_eq!(t.note, None);

        assert!(diag.is_empty());
    }
}
