// src/core/html.rs
// Low-level HTML string helpers for the agenda overview pages.
// No DOM: case-insensitive tag scanning that tolerates omitted closing tags.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find `<tag` at or after `from` where the name is not just a prefix
/// (`<tr` must not match `<track`). `lc` is the lowercased haystack.
fn find_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = join!("<", tag);
    let mut at = from;
    while let Some(rel) = lc.get(at..)?.find(&pat) {
        let start = at + rel;
        match lc.as_bytes().get(start + pat.len()) {
            Some(b' ' | b'\t' | b'\r' | b'\n' | b'>' | b'/') | None => return Some(start),
            _ => at = start + pat.len(),
        }
    }
    None
}

/// All `<tag …>…</tag>` blocks in `s`, in order, case-insensitive.
///
/// A block ends at its closing tag, or where the next `<tag` opens if the
/// closing tag was omitted, or at the end of `s`. Same-name nesting is not
/// tracked.
pub fn tag_blocks<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let tag = to_lower(tag);
    let close = join!("</", &tag, ">");

    let mut out = Vec::new();
    let mut from = 0usize;
    while let Some(start) = find_open(&lc, &tag, from) {
        let Some(gt) = lc[start..].find('>') else { break };
        let open_end = start + gt + 1;

        let next_open = find_open(&lc, &tag, open_end).unwrap_or(lc.len());
        let end = match lc[open_end..next_open].find(&close) {
            Some(rel) => open_end + rel + close.len(),
            None => next_open,
        };
        out.push(&s[start..end]);
        from = end;
    }
    out
}

/// The opening tag of a block, e.g. `<a href="…" class=x>`.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(gt) => &block[..=gt],
        None => block,
    }
}

/// Given a block like `<td …>INNER</td>`, return INNER (may contain nested tags).
/// Works when the closing tag was omitted.
pub fn inner_after_open_tag<'a>(block: &'a str, tag: &str) -> &'a str {
    let Some(gt) = block.find('>') else { return "" };
    let inner = &block[gt + 1..];
    let close = join!("</", tag, ">");
    let lc = to_lower(inner);
    if lc.ends_with(&to_lower(&close)) {
        &inner[..inner.len() - close.len()]
    } else {
        inner
    }
}

/// Attribute value from an opening tag, case-insensitive on the name.
/// Handles double, single and unquoted values.
pub fn attr_value(open: &str, name: &str) -> Option<String> {
    let lc = to_lower(open);
    let name = to_lower(name);

    let mut at = 0usize;
    let val_start = loop {
        let rel = lc.get(at..)?.find(&name)?;
        let p = at + rel;
        at = p + name.len();
        // must be a whole attribute name, e.g. not data-href=
        let prev = lc[..p].chars().next_back();
        if !matches!(prev, Some(c) if c.is_ascii_whitespace()) {
            continue;
        }
        // whitespace is allowed around '='
        let rest = lc[at..].trim_start();
        if rest.starts_with('=') {
            break lc.len() - rest.len() + 1;
        }
    };

    let val = open[val_start..].trim_start();
    let (quote, start_off) = match val.as_bytes().first() {
        Some(b'"') => (Some('"'), 1),
        Some(b'\'') => (Some('\''), 1),
        _ => (None, 0),
    };
    let end = match quote {
        Some(q) => val[start_off..].find(q).map(|e| start_off + e),
        None => val.find(|c: char| c.is_ascii_whitespace() || c == '>'),
    }
    .unwrap_or(val.len());
    Some(normalize_entities(&val[start_off..end]))
}

/// Remove all tags, decode entities, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_case_insensitive_and_skip_prefixes() {
        let doc = "<TABLE><TR><td>a</TD><track></track><td class=x>b</td></tr><tr><td>c</td></tr></table>";
        let rows = tag_blocks(doc, "tr");
        assert_eq!(rows.len(), 2);
        let cells = tag_blocks(rows[0], "td");
        assert_eq!(cells.len(), 2);
        assert_eq!(inner_after_open_tag(cells[0], "td"), "a");
        assert_eq!(inner_after_open_tag(cells[1], "td"), "b");
    }

    #[test]
    fn blocks_tolerate_missing_close_tags() {
        let row = "<tr><td>one<td>two</tr>";
        let cells = tag_blocks(row, "td");
        assert_eq!(cells.len(), 2);
        assert_eq!(strip_tags(cells[0]), "one");
        assert_eq!(strip_tags(cells[1]), "two");
    }

    #[test]
    fn reads_attribute_values() {
        let a = r#"<a class="link" HREF='https://undocs.org/en/S/RES/1(1946)' data-x=1>"#;
        assert_eq!(attr_value(a, "href").as_deref(), Some("https://undocs.org/en/S/RES/1(1946)"));
        assert_eq!(attr_value(a, "data-x").as_deref(), Some("1"));
        assert_eq!(attr_value("<a data-href=x>", "href"), None);
        assert_eq!(attr_value("<a href=plain>", "href").as_deref(), Some("plain"));
        assert_eq!(attr_value("<a href = \"spaced\">", "href").as_deref(), Some("spaced"));
        assert_eq!(attr_value("<a hreflang=en href\n='x'>", "href").as_deref(), Some("x"));
        assert_eq!(attr_value("<a name=\"r1\">", "href"), None);
    }

    #[test]
    fn strip_tags_decodes_and_collapses() {
        assert_eq!(strip_tags("<p>The&nbsp;situation\n  in <b>Cyprus</b> &amp; more</p>"), "The situation in Cyprus & more");
    }
}
