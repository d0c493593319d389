// src/specs/agendas.rs
//! Agenda text per resolution from the yearly overview pages on un.org.
//!
//! Page shape (one row per resolution):
//! ```text
//! <tr>
//!   <td><a href="https://undocs.org/en/S/RES/2722(2024)">S/RES/2722 (2024)</a></td>
//!   <td>10 January 2024</td>
//!   <td>The situation in the Middle East</td>
//! </tr>
//! ```
//! The symbol comes from the *last* link of the *first* cell, the agenda from
//! the *last* cell. Header rows (`<th>` only) have no cells and are skipped.

use log::debug;

use crate::config::consts::{AGENDA_URL_PREFIX, SHORT_SYMBOL_LEN};
use crate::core::html::{attr_value, inner_after_open_tag, open_tag, strip_tags, tag_blocks};
use crate::core::sanitize::compact_symbol;
use crate::diag::{Diagnostics, Warning};
use crate::store::YearPage;

/// Overview page for `year`. Years with a single resolution live under the
/// singular form of the path.
pub fn page_url(year: i32, single: bool) -> String {
    let kind = if single { "resolution" } else { "resolutions" };
    format!("{AGENDA_URL_PREFIX}{kind}-adopted-security-council-{year}")
}

/// Resolution symbol from a link target.
///
/// `https://undocs.org/en/S/RES/5%20(1946)` → `S/RES/5(1946)`
pub fn symbol_from_href(href: &str) -> Option<String> {
    let split_by = if href.contains("/en/") { ".org/en/" } else { ".org/" };
    let (_, tail) = href.split_once(split_by)?;
    let symbol = compact_symbol(tail);
    if symbol.is_empty() { None } else { Some(symbol) }
}

/// Some pages link `S/RES/5` without the year. Anything shorter than
/// `SHORT_SYMBOL_LEN` gets `(<year>)` appended.
///
/// Known-imprecise: a short symbol that already has its year, or a long one
/// without it, passes through wrong. Kept as the narrow special case it is;
/// a miss surfaces later as a `JoinKeyMissing` warning.
pub fn with_year_suffix(symbol: String, year: i32) -> String {
    if symbol.chars().count() < SHORT_SYMBOL_LEN {
        format!("{symbol}({year})")
    } else {
        symbol
    }
}

/// Parse one year's overview page into `(resolution, agenda)` pairs, in
/// page order.
pub fn parse_agenda_page(page: &YearPage, diag: &mut dyn Diagnostics) -> Vec<(String, String)> {
    let mut out = Vec::new();

    for (row_ix, row) in tag_blocks(&page.body, "tr").into_iter().enumerate() {
        let cells = tag_blocks(row, "td");
        let (Some(first), Some(last)) = (cells.first(), cells.last()) else {
            continue;
        };

        // last anchor that actually links somewhere; name-only anchors are ignored
        let Some(href) = tag_blocks(inner_after_open_tag(first, "td"), "a")
            .into_iter()
            .filter_map(|a| attr_value(open_tag(a), "href"))
            .last()
        else {
            diag.warn(Warning::AgendaRowSkipped { year: page.year, row: row_ix, reason: "no link in first cell" });
            continue;
        };
        let Some(symbol) = symbol_from_href(&href) else {
            diag.warn(Warning::AgendaRowSkipped { year: page.year, row: row_ix, reason: "link is not a document symbol" });
            continue;
        };

        let resolution = with_year_suffix(symbol, page.year);
        let agenda = strip_tags(inner_after_open_tag(last, "td"));
        debug!("Parsed resolution {resolution} with agenda: {agenda}");
        out.push((resolution, agenda));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_split_prefers_language_path() {
        assert_eq!(symbol_from_href("https://undocs.org/en/S/RES/2722(2024)").as_deref(), Some("S/RES/2722(2024)"));
        assert_eq!(symbol_from_href("http://undocs.org/S/RES/5 (1946)").as_deref(), Some("S/RES/5(1946)"));
        assert_eq!(symbol_from_href("https://undocs.org/en/S/RES/5%20(1946)").as_deref(), Some("S/RES/5(1946)"));
        assert_eq!(symbol_from_href("/local/link"), None);
        assert_eq!(symbol_from_href("https://undocs.org/"), None);
    }

    #[test]
    fn short_symbols_get_the_year() {
        assert_eq!(with_year_suffix(s!("S/RES/5"), 1946), "S/RES/5(1946)");
        assert_eq!(with_year_suffix(s!("S/RES/1234"), 1999), "S/RES/1234(1999)");
        assert_eq!(with_year_suffix(s!("S/RES/5(1946)"), 1946), "S/RES/5(1946)");
    }

    #[test]
    fn page_urls() {
        assert!(page_url(1999, false).ends_with("/resolutions-adopted-security-council-1999"));
        assert!(page_url(1946, true).ends_with("/resolution-adopted-security-council-1946"));
    }

    #[test]
    fn parses_rows_and_skips_headers() {
        let page = YearPage {
            year: 1946,
            body: s!(r##"<table>
<tr><th>Resolution</th><th>Date</th><th>Topic</th></tr>
<tr><td><a href="https://undocs.org/en/S/RES/1(1946)">S/RES/1 (1946)</a></td><td>25 January 1946</td><td>Military Staff Committee</td></tr>
<tr><td><a href="#">x</a> <a href="https://undocs.org/S/RES/2">S/RES/2</a></td><td>30 January 1946</td><td>The Iranian &amp; question</td></tr>
<tr><td>no link</td><td>?</td></tr>
</table>"##),
        };
        let mut diag: Vec<Warning> = Vec::new();
        let rows = parse_agenda_page(&page, &mut diag);
        assert_eq!(
            rows,
            vec![
                (s!("S/RES/1(1946)"), s!("Military Staff Committee")),
                (s!("S/RES/2(1946)"), s!("The Iranian & question")),
            ]
        );
        assert_eq!(
            diag,
            vec![Warning::AgendaRowSkipped { year: 1946, row: 3, reason: "no link in first cell" }]
        );
    }

    #[test]
    fn anchors_without_href_do_not_hide_the_link() {
        let page = YearPage {
            year: 1946,
            body: s!(r#"<tr><td><a href="https://undocs.org/en/S/RES/1(1946)">S/RES/1 (1946)</a><a name="r1"></a></td><td>25 January 1946</td><td>Military Staff Committee</td></tr>
<tr><td><a href = "https://undocs.org/en/S/RES/2(1946)">S/RES/2 (1946)</a></td><td>30 January 1946</td><td>The Iranian question</td></tr>
<tr><td><a name="only-a-name">S/RES/3</a></td><td>?</td><td>?</td></tr>"#),
        };
        let mut diag: Vec<Warning> = Vec::new();
        let rows = parse_agenda_page(&page, &mut diag);
        assert_eq!(
            rows,
            vec![
                (s!("S/RES/1(1946)"), s!("Military Staff Committee")),
                (s!("S/RES/2(1946)"), s!("The Iranian question")),
            ]
        );
        assert_eq!(
            diag,
            vec![Warning::AgendaRowSkipped { year: 1946, row: 2, reason: "no link in first cell" }]
        );
    }
}
