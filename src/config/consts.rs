// src/config/consts.rs

// Net config
pub const RESOLUTION_FEED_URL: &str = "https://digitallibrary.un.org/search?ln=en&p=&f=&rm=&sf=&so=d&rg=200&c=Resource+Type&c=UN+Bodies&c=&of=xm&fti=0&fct__1=Voting+Data&fct__2=Security+Council&fct__3={year}&fti=0";
pub const AGENDA_URL_PREFIX: &str = "https://www.un.org/securitycouncil/content/";
pub const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Mobile Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 20;
pub const RETRY_PAUSE_SECS: u64 = 5;
pub const MAX_ATTEMPTS: u32 = 12;

// Years
pub const START_YEAR: i32 = 1946; // first Security Council resolutions

// Export
pub const DEFAULT_OUT_FILE: &str = "voting";

// Data
pub const AGENDA_MISSING: &str = "Error in dataset.";
pub const ADOPTED_WITHOUT_VOTE: &str =
    "In rare cases resolutions were adopted without a vote, showing all countries as non-voting.";

/// Agenda link symbols shorter than this lack the `(<year>)` suffix.
/// Known to be imprecise: it was tuned on the pages seen so far, not derived
/// from the symbol grammar.
pub const SHORT_SYMBOL_LEN: usize = 11;

/// Column labels, as they appear in the export header.
pub mod col {
    pub const TITLE: &str = "Title";
    pub const RESOLUTION: &str = "Resolution";
    pub const MEETING_RECORD: &str = "Meeting Record";
    pub const AGENDA: &str = "Agenda";
    pub const DRAFT_RESOLUTION: &str = "Draft Resolution";
    pub const VOTE_DATE: &str = "Vote Date";
    pub const TOTAL_YES: &str = "Total Yes";
    pub const TOTAL_NO: &str = "Total No";
    pub const TOTAL_ABSTENTIONS: &str = "Total Abstentions";
    pub const TOTAL_NON_PARTICIPATING: &str = "Total Non-Participating";
    pub const TOTAL_MEMBERSHIP: &str = "Total voting membership";
    pub const NOTE: &str = "Note";

    /// Leading export columns; everything else follows in first-seen order.
    pub const FIXED: [&str; 11] = [
        TITLE,
        RESOLUTION,
        MEETING_RECORD,
        AGENDA,
        DRAFT_RESOLUTION,
        VOTE_DATE,
        TOTAL_YES,
        TOTAL_NO,
        TOTAL_ABSTENTIONS,
        TOTAL_NON_PARTICIPATING,
        TOTAL_MEMBERSHIP,
    ];
}
