//! Top-level text splitting for command arguments.
//!
//! Everything here ignores separators nested inside quotes, parentheses
//! or brackets, so `PRINT "a;b"; X(1,2)` splits into two items.

struct Depth {
    paren: usize,
    quote: Option<char>,
}

impl Depth {
    fn new() -> Depth {
        Depth {
            paren: 0,
            quote: None,
        }
    }

    /// Feed one character. Returns true if the character sits at top level.
    fn feed(&mut self, ch: char) -> bool {
        if let Some(q) = self.quote {
            if ch == q {
                self.quote = None;
            }
            return false;
        }
        match ch {
            '"' | '\'' => {
                self.quote = Some(ch);
                false
            }
            '(' | '[' => {
                self.paren += 1;
                false
            }
            ')' | ']' => {
                self.paren = self.paren.saturating_sub(1);
                false
            }
            _ => self.paren == 0,
        }
    }
}

/// Split on `sep` at top level. Pieces are trimmed; blank input yields nothing.
pub fn split_top(s: &str, sep: char) -> Vec<&str> {
    if s.trim().is_empty() {
        return vec![];
    }
    let mut depth = Depth::new();
    let mut pieces = vec![];
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        if depth.feed(ch) && ch == sep {
            pieces.push(s[start..i].trim());
            start = i + ch.len_utf8();
        }
    }
    pieces.push(s[start..].trim());
    pieces
}

/// Split a PRINT list into items, each with the separator that followed it.
pub fn split_print(s: &str) -> Vec<(&str, Option<char>)> {
    let mut depth = Depth::new();
    let mut items = vec![];
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        if depth.feed(ch) && (ch == ';' || ch == ',') {
            items.push((s[start..i].trim(), Some(ch)));
            start = i + 1;
        }
    }
    let tail = s[start..].trim();
    if !tail.is_empty() {
        items.push((tail, None));
    }
    items
}

/// Byte position of the first top-level `ch`.
pub fn find_top(s: &str, ch: char) -> Option<usize> {
    let mut depth = Depth::new();
    s.char_indices()
        .find(|&(_, c)| depth.feed(c) && c == ch)
        .map(|(i, _)| i)
}

/// Byte position of a top-level assignment `=`, skipping comparison
/// operators such as `==`, `<=`, `>=`, `<>` and `!=`.
pub fn find_assignment(s: &str) -> Option<usize> {
    let mut depth = Depth::new();
    let bytes = s.as_bytes();
    for (i, ch) in s.char_indices() {
        if !depth.feed(ch) || ch != '=' {
            continue;
        }
        let prev = if i > 0 { bytes[i - 1] } else { b' ' };
        let next = bytes.get(i + 1).copied().unwrap_or(b' ');
        if b"<>!=".contains(&prev) || b"=<>".contains(&next) {
            return None;
        }
        return Some(i);
    }
    None
}

/// Find a whole-word keyword at top level, case-insensitive.
/// Returns the byte range of the keyword.
pub fn find_keyword(s: &str, keyword: &str) -> Option<std::ops::Range<usize>> {
    let mut depth = Depth::new();
    let bytes = s.as_bytes();
    let klen = keyword.len();
    for (i, ch) in s.char_indices() {
        if !depth.feed(ch) {
            continue;
        }
        let end = i + klen;
        if end > s.len() || !s.is_char_boundary(end) {
            continue;
        }
        if !s[i..end].eq_ignore_ascii_case(keyword) {
            continue;
        }
        let before = i == 0 || !is_word_byte(bytes[i - 1]);
        let after = end == s.len() || !is_word_byte(bytes[end]);
        if before && after {
            return Some(i..end);
        }
    }
    None
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b == b'%'
}

/// Leading alphabetic word and the trimmed remainder.
pub fn leading_word(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len());
    (&s[..end], s[end..].trim())
}

pub fn is_identifier(s: &str) -> bool {
    let body = s.strip_suffix(|c: char| c == '$' || c == '%').unwrap_or(s);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whitespace-separated tokens; a bracket group `[ ... ]` is one token.
pub fn logo_tokens(s: &str) -> Vec<&str> {
    let mut tokens = vec![];
    let mut depth = Depth::new();
    let mut start: Option<usize> = None;
    for (i, ch) in s.char_indices() {
        let top = depth.feed(ch);
        let boundary = top && (ch == ' ' || ch == '\t');
        match (start, boundary) {
            (Some(st), true) => {
                tokens.push(&s[st..i]);
                start = None;
            }
            (None, false) => start = Some(i),
            _ => {}
        }
    }
    if let Some(st) = start {
        tokens.push(&s[st..]);
    }
    tokens
}

/// Strip one layer of enclosing brackets, if the whole text is bracketed.
pub fn unbracket(s: &str) -> &str {
    let t = s.trim();
    if t.starts_with('[') && t.ends_with(']') && t.len() >= 2 {
        let mut depth = Depth::new();
        for (i, ch) in t.char_indices() {
            depth.feed(ch);
            if depth.paren == 0 && depth.quote.is_none() && i + 1 < t.len() {
                return t;
            }
        }
        return t[1..t.len() - 1].trim();
    }
    t
}

/// Remove surrounding double or single quotes.
pub fn unquote(s: &str) -> &str {
    let t = s.trim();
    for q in &['"', '\''] {
        if t.len() >= 2 && t.starts_with(*q) && t.ends_with(*q) {
            return &t[1..t.len() - 1];
        }
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_top() {
        assert_eq!(split_top(r#"1, "a,b", A(1,2)"#, ','), vec!["1", r#""a,b""#, "A(1,2)"]);
        assert!(split_top("  ", ',').is_empty());
    }

    #[test]
    fn test_split_print() {
        assert_eq!(
            split_print(r#""X=";X, Y;"#),
            vec![(r#""X=""#, Some(';')), ("X", Some(',')), ("Y", Some(';'))]
        );
        assert_eq!(split_print("A"), vec![("A", None)]);
    }

    #[test]
    fn test_find_keyword() {
        let s = r#"A$ = "THEN" THEN PRINT 1 ELSE PRINT 2"#;
        let then = find_keyword(s, "then").unwrap();
        assert_eq!(&s[then.end..], " PRINT 1 ELSE PRINT 2");
        assert!(find_keyword("ATHENS", "THEN").is_none());
    }

    #[test]
    fn test_find_top() {
        assert_eq!(find_top(r#"T("a:b"):x"#, ':'), Some(8));
        assert_eq!(find_top("T:x", ':'), Some(1));
        assert_eq!(find_top(r#"PRINT "a:b""#, ':'), None);
    }

    #[test]
    fn test_find_assignment() {
        assert_eq!(find_assignment("X = 5"), Some(2));
        assert_eq!(find_assignment(r#"A("=") = 1"#), Some(7));
        assert_eq!(find_assignment("X == 5"), None);
        assert_eq!(find_assignment("X <= 5"), None);
        assert_eq!(find_assignment("PRINT X"), None);
    }

    #[test]
    fn test_logo_tokens() {
        assert_eq!(
            logo_tokens("FD 10  RT 90 REPEAT 2 [FD 5 LT 3]"),
            vec!["FD", "10", "RT", "90", "REPEAT", "2", "[FD 5 LT 3]"]
        );
    }

    #[test]
    fn test_unbracket() {
        assert_eq!(unbracket("[FD 10 [RT 2]]"), "FD 10 [RT 2]");
        assert_eq!(unbracket("[a] [b]"), "[a] [b]");
        assert_eq!(unbracket("FD 1"), "FD 1");
    }

    #[test]
    fn test_identifier() {
        assert!(is_identifier("Name$"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("A B"));
        assert!(!is_identifier("$"));
    }
}
