//! Tokenization of a single raw line.
//!
//! # Responsibilities
//! - Split content from the inline comment at the first unescaped `;` or `#`
//! - Split content on whitespace runs into name + values
//! - Derive the keyword map by pairing the token tail right to left
//!
//! # Design Decisions
//! - `\;` and `\#` are literal delimiters; the backslash is dropped
//! - No quoting and no line continuation
//! - Tail pairing walks from the end two tokens at a time; an odd run of
//!   bare flags shifts every pair to its left. Existing configs depend on
//!   this, so it is reproduced as-is.

use std::collections::BTreeMap;

use crate::parser::record::Record;

/// Parse one raw line.
///
/// Returns `None` for blank or comment-only lines.
pub fn parse_line(raw: &str) -> Option<Record> {
    let (content, comment) = split_comment(raw);

    let fields: Vec<&str> = content.split_whitespace().collect();
    let (name, rest) = fields.split_first()?;
    let values: Vec<String> = rest.iter().map(|v| v.to_string()).collect();

    let mut keywords = BTreeMap::new();
    let mut i = fields.len().saturating_sub(2);
    while i > 0 {
        keywords.insert(values[i - 1].clone(), values[i].clone());
        i = i.saturating_sub(2);
    }

    Some(Record::from_parts(
        name.to_string(),
        values,
        keywords,
        comment.to_string(),
    ))
}

/// Split `raw` into (content, comment).
fn split_comment(raw: &str) -> (String, &str) {
    let mut content = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some((_, ';' | '#'))) => {
                if let Some((_, delimiter)) = chars.next() {
                    content.push(delimiter);
                }
            }
            ';' | '#' => return (content, &raw[i + c.len_utf8()..]),
            c => content.push(c),
        }
    }

    (content, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_name_values_and_comment() {
        let record = parse_line("server s1 1.2.3.4:80 check ; primary").unwrap();

        assert_eq!(record.name(), "server");
        assert_eq!(record.values(), strings(&["s1", "1.2.3.4:80", "check"]).as_slice());
        assert_eq!(record.comment(), " primary");
    }

    #[test]
    fn test_hash_comment() {
        let record = parse_line("\tmaxconn 50000 # tuned for prod").unwrap();
        assert_eq!(record.name(), "maxconn");
        assert_eq!(record.values(), strings(&["50000"]).as_slice());
        assert_eq!(record.comment(), " tuned for prod");
    }

    #[test]
    fn test_first_delimiter_wins() {
        let record = parse_line("mode tcp ; one # two").unwrap();
        assert_eq!(record.values(), strings(&["tcp"]).as_slice());
        assert_eq!(record.comment(), " one # two");
    }

    #[test]
    fn test_blank_and_comment_only_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   \t  ").is_none());
        assert!(parse_line("# just a comment").is_none());
        assert!(parse_line("   ; indented comment").is_none());
        assert!(parse_line("#").is_none());
    }

    #[test]
    fn test_single_token_line() {
        let record = parse_line("daemon").unwrap();
        assert_eq!(record.name(), "daemon");
        assert!(record.values().is_empty());
        assert!(record.keywords().is_empty());
        assert_eq!(record.comment(), "");
    }

    #[test]
    fn test_escaped_delimiters() {
        let record = parse_line(r"acl bad path_reg ^/a\#b\;c ; real comment").unwrap();
        assert_eq!(record.values(), strings(&["bad", "path_reg", "^/a#b;c"]).as_slice());
        assert_eq!(record.comment(), " real comment");
    }

    #[test]
    fn test_backslash_without_delimiter_is_kept() {
        let record = parse_line(r"log-format %ci\ %b").unwrap();
        assert_eq!(record.values(), strings(&[r"%ci\", "%b"]).as_slice());
    }

    #[test]
    fn test_tail_pairing_matches_existing_behavior() {
        let record = parse_line(
            "server 10.0.0.1:80 10.0.0.1:80 maxconn 25 check inter 5s rise 3 fall 2",
        )
        .unwrap();

        let expected: BTreeMap<String, String> = [
            ("fall", "2"),
            ("rise", "3"),
            ("inter", "5s"),
            ("25", "check"),
            ("10.0.0.1:80", "maxconn"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(record.keywords(), &expected);
        assert_eq!(record.value("inter"), Some("5s"));
    }

    #[test]
    fn test_tail_pairing_short_lines() {
        // Two values: first one pairs with the second.
        let record = parse_line("timeout check 5s").unwrap();
        assert_eq!(record.value("check"), Some("5s"));
        assert_eq!(record.keywords().len(), 1);

        // One value: nothing to pair.
        let record = parse_line("mode tcp").unwrap();
        assert!(record.keywords().is_empty());
    }

    #[test]
    fn test_tail_pairing_later_pairs_overwrite() {
        // Scanning from the right, the leftmost `a` is written last.
        let record = parse_line("opt x a 1 a 2").unwrap();
        assert_eq!(record.value("a"), Some("1"));
    }

    #[test]
    fn test_whitespace_runs() {
        let record = parse_line("  stats \t socket   /var/run/haproxy.stat  mode 777  ").unwrap();
        assert_eq!(record.name(), "stats");
        assert_eq!(
            record.values(),
            strings(&["socket", "/var/run/haproxy.stat", "mode", "777"]).as_slice()
        );
        assert_eq!(record.value("mode"), Some("777"));
        assert_eq!(record.value("socket"), Some("/var/run/haproxy.stat"));
    }
}
