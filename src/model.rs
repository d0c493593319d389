// src/model.rs
// Per-resolution output types. Built fresh for each record, never mutated
// after extraction apart from the agenda join.

use std::fmt;

use crate::config::consts::col;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionMetadata {
    pub title: String,
    /// Join key, e.g. `S/RES/1234(1999)`.
    pub resolution: String,
    pub meeting_record: String,
    pub vote_date: String,
    pub draft_resolution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VoteCode {
    Yes,
    No,
    Abstain,
    NonParticipating,
    /// Indicator text the feed is not expected to carry; kept verbatim.
    Other(String),
}

impl VoteCode {
    /// Interpret a raw `967`/`d` indicator. Absent or empty means the
    /// country did not take part.
    pub fn from_indicator(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => VoteCode::NonParticipating,
            Some("Y") => VoteCode::Yes,
            Some("N") => VoteCode::No,
            Some("A") => VoteCode::Abstain,
            Some("NP") => VoteCode::NonParticipating,
            Some(other) => VoteCode::Other(s!(other)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VoteCode::Yes => "Y",
            VoteCode::No => "N",
            VoteCode::Abstain => "A",
            VoteCode::NonParticipating => "NP",
            VoteCode::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for VoteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How per-country indicators were read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyMode {
    /// Indicators taken literally; missing ones are non-participation.
    AsRecorded,
    /// Every listed country counted as a Yes.
    Unanimous,
}

/// Outcome of cross-checking a calculated Yes count against field 996.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyCheck {
    NoTotalField,
    /// 996 carries a free-text comment; numbers are not compared.
    Commented,
    NoTotal,
    Matched,
    Mismatch { expected: u32, calculated: u32 },
    /// 996/b is present but not a number.
    Unreadable(String),
}

impl TallyCheck {
    pub fn is_valid(&self) -> bool {
        matches!(
            self,
            TallyCheck::NoTotalField | TallyCheck::Commented | TallyCheck::NoTotal | TallyCheck::Matched
        )
    }
}

impl fmt::Display for TallyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TallyCheck::NoTotalField => f.write_str("no total-votes field"),
            TallyCheck::Commented => f.write_str("total-votes field is commented"),
            TallyCheck::NoTotal => f.write_str("no total in total-votes field"),
            TallyCheck::Matched => f.write_str("matched"),
            TallyCheck::Mismatch { expected, calculated } => {
                write!(f, "calculated {calculated} Yes votes, record says {expected}")
            }
            TallyCheck::Unreadable(raw) => write!(f, "unreadable total {raw:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTotals {
    pub yes: u32,
    pub no: u32,
    pub abstentions: u32,
    pub non_participating: u32,
}

impl VoteTotals {
    /// Always the sum of the four counts.
    pub fn membership(&self) -> u32 {
        self.yes + self.no + self.abstentions + self.non_participating
    }

    fn count(&mut self, code: &VoteCode) {
        match code {
            VoteCode::Yes => self.yes += 1,
            VoteCode::No => self.no += 1,
            VoteCode::Abstain => self.abstentions += 1,
            VoteCode::NonParticipating => self.non_participating += 1,
            VoteCode::Other(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTally {
    /// Country code → vote, in first-seen order.
    pub votes: Vec<(String, VoteCode)>,
    pub totals: VoteTotals,
    pub note: Option<&'static str>,
    pub mode: TallyMode,
    pub check: TallyCheck,
}

impl VoteTally {
    /// Build from country votes; a repeated country overwrites in place.
    /// `check` starts as `NoTotalField` until validated.
    pub fn from_votes<I>(votes: I, mode: TallyMode) -> Self
    where
        I: IntoIterator<Item = (String, VoteCode)>,
    {
        let mut ordered: Vec<(String, VoteCode)> = Vec::new();
        for (country, code) in votes {
            match ordered.iter_mut().find(|(c, _)| *c == country) {
                Some(slot) => slot.1 = code,
                None => ordered.push((country, code)),
            }
        }

        let mut totals = VoteTotals::default();
        for (_, code) in &ordered {
            totals.count(code);
        }

        Self { votes: ordered, totals, note: None, mode, check: TallyCheck::NoTotalField }
    }

    pub fn vote(&self, country: &str) -> Option<&VoteCode> {
        self.votes.iter().find(|(c, _)| c == country).map(|(_, v)| v)
    }

    /// Everyone listed is non-participating (includes the empty tally).
    pub fn all_non_participating(&self) -> bool {
        self.totals.non_participating == self.totals.membership()
    }
}

/// Final unit handed to merge/export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRecord {
    pub metadata: ResolutionMetadata,
    pub tally: VoteTally,
    /// Filled by the agenda join; `None` until then.
    pub agenda: Option<String>,
}

impl ResolutionRecord {
    pub fn new(metadata: ResolutionMetadata, tally: VoteTally) -> Self {
        Self { metadata, tally, agenda: None }
    }

    pub fn resolution(&self) -> &str {
        &self.metadata.resolution
    }

    /// Flat ordered key/value view: metadata, then countries, totals, note
    /// and agenda. Optional keys are omitted when absent.
    pub fn fields(&self) -> Vec<(String, String)> {
        let m = &self.metadata;
        let t = &self.tally.totals;

        let mut out = Vec::with_capacity(self.tally.votes.len() + 12);
        out.push((s!(col::TITLE), m.title.clone()));
        out.push((s!(col::RESOLUTION), m.resolution.clone()));
        out.push((s!(col::MEETING_RECORD), m.meeting_record.clone()));
        out.push((s!(col::VOTE_DATE), m.vote_date.clone()));
        if let Some(draft) = &m.draft_resolution {
            out.push((s!(col::DRAFT_RESOLUTION), draft.clone()));
        }
        for (country, code) in &self.tally.votes {
            out.push((country.clone(), code.to_string()));
        }
        out.push((s!(col::TOTAL_YES), t.yes.to_string()));
        out.push((s!(col::TOTAL_NO), t.no.to_string()));
        out.push((s!(col::TOTAL_ABSTENTIONS), t.abstentions.to_string()));
        out.push((s!(col::TOTAL_NON_PARTICIPATING), t.non_participating.to_string()));
        out.push((s!(col::TOTAL_MEMBERSHIP), t.membership().to_string()));
        if let Some(note) = self.tally.note {
            out.push((s!(col::NOTE), s!(note)));
        }
        if let Some(agenda) = &self.agenda {
            out.push((s!(col::AGENDA), agenda.clone()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_mapping() {
        assert_eq!(VoteCode::from_indicator(None), VoteCode::NonParticipating);
        assert_eq!(VoteCode::from_indicator(Some("")), VoteCode::NonParticipating);
        assert_eq!(VoteCode::from_indicator(Some("A")), VoteCode::Abstain);
        assert_eq!(VoteCode::from_indicator(Some("X")), VoteCode::Other(s!("X")));
    }

    #[test]
    fn repeated_country_overwrites_in_place() {
        let t = VoteTally::from_votes(
            vec![
                (s!("FR"), VoteCode::No),
                (s!("US"), VoteCode::Yes),
                (s!("FR"), VoteCode::Yes),
            ],
            TallyMode::AsRecorded,
        );
        assert_eq!(t.votes.len(), 2);
        assert_eq!(t.votes[0], (s!("FR"), VoteCode::Yes));
        assert_eq!(t.totals.yes, 2);
        assert_eq!(t.totals.no, 0);
    }

    #[test]
    fn unknown_codes_are_kept_but_not_counted() {
        let t = VoteTally::from_votes(
            vec![(s!("FR"), VoteCode::Other(s!("X"))), (s!("US"), VoteCode::Yes)],
            TallyMode::AsRecorded,
        );
        assert_eq!(t.totals.membership(), 1);
        assert_eq!(t.vote("FR").map(|v| v.as_str()), Some("X"));
    }

    #[test]
    fn fields_omit_absent_optionals() {
        let meta = ResolutionMetadata {
            title: s!("T"),
            resolution: s!("S/RES/1(1946)"),
            meeting_record: s!("S/PV.1"),
            vote_date: s!("1946-01-25"),
            draft_resolution: None,
        };
        let mut tally = VoteTally::from_votes(vec![(s!("FR"), VoteCode::Yes)], TallyMode::AsRecorded);
        tally.check = TallyCheck::Matched;
        let rec = ResolutionRecord::new(meta, tally);
        let keys: Vec<String> = rec.fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "Title", "Resolution", "Meeting Record", "Vote Date", "FR",
                "Total Yes", "Total No", "Total Abstentions",
                "Total Non-Participating", "Total voting membership",
            ]
        );
    }
}
