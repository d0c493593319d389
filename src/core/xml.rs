// src/core/xml.rs
// Small strict XML tree reader for the MARCXML feed.
// Byte-cursor scanner that builds a tree and refuses structurally broken
// input instead of skipping over it.
//
// Supported: elements, attributes ('…' or "…"), text, CDATA, comments,
// processing instructions, a leading DOCTYPE (skipped), the five predefined
// entities and numeric character references.
// Not supported: DTD-declared entities, encodings other than UTF-8.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("XML error at byte {offset}: {kind}")]
pub struct XmlError {
    pub offset: usize,
    pub kind: XmlErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlErrorKind {
    #[error("unexpected end of document")]
    UnexpectedEof,
    #[error("document has no root element")]
    NoRoot,
    #[error("closing tag </{found}> does not match <{expected}>")]
    MismatchedTag { expected: String, found: String },
    #[error("unknown entity &{0};")]
    UnknownEntity(String),
    #[error("content after the root element")]
    TrailingContent,
    #[error("malformed markup: {0}")]
    Malformed(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written, e.g. `marc:datafield`.
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn new(name: String, attrs: Vec<(String, String)>) -> Self {
        Self { name, attrs, children: Vec::new() }
    }

    /// Name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    /// Attribute lookup by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| local(k) == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Child elements with the given local name.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.local_name() == name)
    }

    /// Concatenated direct text children (not descendants).
    pub fn text(&self) -> String {
        let mut out = s!();
        for n in &self.children {
            if let Node::Text(t) = n {
                out.push_str(t);
            }
        }
        out
    }
}

fn local(name: &str) -> &str {
    match name.rfind(':') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// Parse a complete document and return its root element.
pub fn parse(doc: &str) -> Result<Element, XmlError> {
    let mut r = Reader::new(doc);
    r.skip_misc()?;
    if r.at_end() {
        return Err(r.err(XmlErrorKind::NoRoot));
    }
    let root = r.read_root()?;
    r.skip_misc()?;
    if !r.at_end() {
        return Err(r.err(XmlErrorKind::TrailingContent));
    }
    Ok(root)
}

struct Reader<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
}

impl<'a> Reader<'a> {
    fn new(s: &'a str) -> Self {
        let s = s.strip_prefix('\u{feff}').unwrap_or(s);
        Self { s, b: s.as_bytes(), i: 0 }
    }

    fn err(&self, kind: XmlErrorKind) -> XmlError {
        XmlError { offset: self.i, kind }
    }

    #[inline]
    fn at_end(&self) -> bool { self.i >= self.b.len() }

    #[inline]
    fn starts_with(&self, pat: &str) -> bool {
        self.b[self.i..].starts_with(pat.as_bytes())
    }

    fn skip_ws(&mut self) {
        while self.i < self.b.len() && self.b[self.i].is_ascii_whitespace() {
            self.i += 1;
        }
    }

    /// Advance past the next occurrence of `pat`.
    fn skip_past(&mut self, pat: &str) -> Result<(), XmlError> {
        match self.s[self.i..].find(pat) {
            Some(off) => { self.i += off + pat.len(); Ok(()) }
            None => { self.i = self.b.len(); Err(self.err(XmlErrorKind::UnexpectedEof)) }
        }
    }

    /// Whitespace, comments, PIs and DOCTYPE outside the root element.
    fn skip_misc(&mut self) -> Result<(), XmlError> {
        loop {
            self.skip_ws();
            if self.starts_with("<?") {
                self.skip_past("?>")?;
            } else if self.starts_with("<!--") {
                self.skip_past("-->")?;
            } else if self.starts_with("<!DOCTYPE") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_doctype(&mut self) -> Result<(), XmlError> {
        // internal subset may contain '>' inside [...]
        let mut in_subset = false;
        while self.i < self.b.len() {
            match self.b[self.i] {
                b'[' => in_subset = true,
                b']' => in_subset = false,
                b'>' if !in_subset => { self.i += 1; return Ok(()); }
                _ => {}
            }
            self.i += 1;
        }
        Err(self.err(XmlErrorKind::UnexpectedEof))
    }

    fn read_name(&mut self) -> Result<String, XmlError> {
        let start = self.i;
        while self.i < self.b.len() {
            match self.b[self.i] {
                b' ' | b'\t' | b'\r' | b'\n' | b'/' | b'>' | b'=' | b'<' => break,
                _ => self.i += 1,
            }
        }
        if self.i == start {
            return Err(self.err(XmlErrorKind::Malformed("expected a name")));
        }
        Ok(self.s[start..self.i].to_string())
    }

    /// Called with the cursor on the root's '<'. Uses an explicit stack so
    /// deep documents cannot overflow the call stack.
    fn read_root(&mut self) -> Result<Element, XmlError> {
        let mut stack: Vec<Element> = Vec::new();

        loop {
            if self.at_end() {
                return Err(self.err(XmlErrorKind::UnexpectedEof));
            }

            if self.b[self.i] != b'<' {
                let text = self.read_text()?;
                match stack.last_mut() {
                    Some(parent) if !text.is_empty() => parent.children.push(Node::Text(text)),
                    Some(_) => {}
                    None => return Err(self.err(XmlErrorKind::Malformed("text outside root"))),
                }
                continue;
            }

            if self.starts_with("</") {
                self.i += 2;
                let found = self.read_name()?;
                self.skip_ws();
                if self.at_end() || self.b[self.i] != b'>' {
                    return Err(self.err(XmlErrorKind::Malformed("unterminated closing tag")));
                }
                self.i += 1;

                let done = match stack.pop() {
                    Some(el) => el,
                    None => return Err(self.err(XmlErrorKind::Malformed("closing tag without opener"))),
                };
                if done.name != found {
                    return Err(self.err(XmlErrorKind::MismatchedTag { expected: done.name, found }));
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(done)),
                    None => return Ok(done),
                }
            } else if self.starts_with("<!--") {
                self.skip_past("-->")?;
            } else if self.starts_with("<![CDATA[") {
                self.i += "<![CDATA[".len();
                let start = self.i;
                self.skip_past("]]>")?;
                let text = self.s[start..self.i - 3].to_string();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Text(text)),
                    None => return Err(self.err(XmlErrorKind::Malformed("CDATA outside root"))),
                }
            } else if self.starts_with("<?") {
                self.skip_past("?>")?;
            } else if self.starts_with("<!") {
                return Err(self.err(XmlErrorKind::Malformed("unexpected declaration")));
            } else {
                self.i += 1;
                let (el, self_closing) = self.read_open_tag()?;
                if self_closing {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(el)),
                        None => return Ok(el),
                    }
                } else {
                    stack.push(el);
                }
            }
        }
    }

    /// Cursor just after '<'. Returns the element and whether it was `<…/>`.
    fn read_open_tag(&mut self) -> Result<(Element, bool), XmlError> {
        let name = self.read_name()?;
        let mut attrs = Vec::new();
        loop {
            self.skip_ws();
            if self.at_end() {
                return Err(self.err(XmlErrorKind::UnexpectedEof));
            }
            match self.b[self.i] {
                b'>' => { self.i += 1; return Ok((Element::new(name, attrs), false)); }
                b'/' => {
                    if self.starts_with("/>") {
                        self.i += 2;
                        return Ok((Element::new(name, attrs), true));
                    }
                    return Err(self.err(XmlErrorKind::Malformed("stray '/' in tag")));
                }
                _ => {
                    let key = self.read_name()?;
                    self.skip_ws();
                    if self.at_end() || self.b[self.i] != b'=' {
                        return Err(self.err(XmlErrorKind::Malformed("attribute without value")));
                    }
                    self.i += 1;
                    self.skip_ws();
                    let quote = match self.b.get(self.i) {
                        Some(q @ (b'"' | b'\'')) => *q,
                        Some(_) => return Err(self.err(XmlErrorKind::Malformed("unquoted attribute value"))),
                        None => return Err(self.err(XmlErrorKind::UnexpectedEof)),
                    };
                    self.i += 1;
                    let start = self.i;
                    while self.i < self.b.len() && self.b[self.i] != quote {
                        self.i += 1;
                    }
                    if self.at_end() {
                        return Err(self.err(XmlErrorKind::UnexpectedEof));
                    }
                    let raw = &self.s[start..self.i];
                    self.i += 1;
                    let value = decode_entities(raw).map_err(|kind| XmlError { offset: start, kind })?;
                    attrs.push((key, value));
                }
            }
        }
    }

    fn read_text(&mut self) -> Result<String, XmlError> {
        let start = self.i;
        while self.i < self.b.len() && self.b[self.i] != b'<' {
            self.i += 1;
        }
        decode_entities(&self.s[start..self.i]).map_err(|kind| XmlError { offset: start, kind })
    }
}

/// Decode predefined entities and character references.
pub fn decode_entities(raw: &str) -> Result<String, XmlErrorKind> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let semi = after
            .find(';')
            .ok_or(XmlErrorKind::Malformed("unterminated entity"))?;
        let name = &after[..semi];
        match name {
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "amp" => out.push('&'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => out.push(char_ref(name).ok_or_else(|| XmlErrorKind::UnknownEntity(name.to_string()))?),
        }
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn char_ref(name: &str) -> Option<char> {
    let num = name.strip_prefix('#')?;
    let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => num.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}
