// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/// Read an export back into rows. Handles quoted fields (with `""`
/// escapes and embedded newlines) and CRLF line ends. Blank lines are
/// dropped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = s!();
    let mut quoted = false;
    let mut it = text.chars().peekable();

    let end_row = |row: &mut Vec<String>, rows: &mut Vec<Vec<String>>| {
        let blank = row.len() == 1 && row[0].is_empty();
        let done = take(row);
        if !blank {
            rows.push(done);
        }
    };

    while let Some(ch) = it.next() {
        if quoted {
            match ch {
                '"' if it.peek() == Some(&'"') => {
                    it.next();
                    cell.push('"');
                }
                '"' => quoted = false,
                _ => cell.push(ch),
            }
            continue;
        }
        match ch {
            '"' => quoted = true,
            '\r' | '\n' => {
                if ch == '\r' && it.peek() == Some(&'\n') {
                    it.next();
                }
                row.push(take(&mut cell));
                end_row(&mut row, &mut rows);
            }
            c if c == sep => row.push(take(&mut cell)),
            c => cell.push(c),
        }
    }

    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        end_row(&mut row, &mut rows);
    }
    rows
}

/// One row, separator-joined and newline-terminated. A cell is quoted only
/// when it holds the separator, a quote or a line break.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{sep}")?;
        }
        let quote = cell.contains(|c: char| c == sep || matches!(c, '"' | '\n' | '\r'));
        if quote {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/// Header line (if any) followed by every row.
pub fn to_export_string(headers: &Option<Vec<String>>, rows: &[Vec<String>], sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // writing into a Vec cannot fail
    for r in headers.iter().chain(rows.iter()) {
        let _ = write_row(&mut buf, r, sep);
    }
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| s!(*c)).collect()
    }

    #[test]
    fn quotes_only_when_needed() {
        let s = to_export_string(
            &Some(row(&["Title", "Agenda"])),
            &[row(&["Resolution 1", "Cyprus, \"the\" question"])],
            ',',
        );
        assert_eq!(s, "Title,Agenda\nResolution 1,\"Cyprus, \"\"the\"\" question\"\n");
    }

    #[test]
    fn tsv_does_not_quote_commas() {
        let s = to_export_string(&None, &[row(&["a,b", "c"])], '\t');
        assert_eq!(s, "a,b\tc\n");
    }

    #[test]
    fn parse_reads_back_quoted_fields() {
        let text = "A,B\r\n\"x, y\",\"multi\nline\"\n1,\n";
        let rows = parse_rows(text, ',');
        assert_eq!(rows, vec![row(&["A", "B"]), row(&["x, y", "multi\nline"]), row(&["1", ""])]);
    }
}
