// src/specs/resolution.rs
//! Resolution metadata from one MARCXML record.
//!
//! | field            | tag | code | required |
//! |------------------|-----|------|----------|
//! | Title            | 245 | a    | yes      |
//! | Resolution       | 791 | a    | yes      |
//! | Meeting Record   | 952 | a    | yes      |
//! | Vote Date        | 269 | a    | yes      |
//! | Draft Resolution | 993 | a    | no       |

use log::debug;

use super::ExtractError;
use crate::config::consts::RESOLUTION_FEED_URL;
use crate::model::ResolutionMetadata;
use crate::record::Record;

/// Search URL returning one year of Security Council voting records as MARCXML.
pub fn feed_url(year: i32) -> String {
    RESOLUTION_FEED_URL.replace("{year}", &year.to_string())
}

fn required(
    record: &Record,
    field: &'static str,
    tag: &'static str,
    resolution: Option<&str>,
) -> Result<String, ExtractError> {
    record
        .value(tag, "a")
        .map(str::to_string)
        .ok_or_else(|| ExtractError::MissingField {
            field,
            tag,
            code: "a",
            resolution: resolution.map(str::to_string),
        })
}

/// Resolution symbol alone; the join key and the name used in every log line.
pub fn resolution_symbol(record: &Record) -> Result<String, ExtractError> {
    required(record, "Resolution", "791", None)
}

pub fn parse_metadata(record: &Record) -> Result<ResolutionMetadata, ExtractError> {
    let resolution = resolution_symbol(record)?;
    let res = Some(resolution.as_str());

    let title = required(record, "Title", "245", res)?;
    let meeting_record = required(record, "Meeting Record", "952", res)?;
    let vote_date = required(record, "Vote Date", "269", res)?;

    let draft_resolution = record.value("993", "a").map(str::to_string);
    if draft_resolution.is_none() {
        debug!("Resolution {resolution} has no draft resolution.");
    }

    Ok(ResolutionMetadata { title, resolution, meeting_record, vote_date, draft_resolution })
}
