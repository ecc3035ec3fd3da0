//! Balanced-delimiter region discovery.
//!
//! Finds the nearest delimiter pair enclosing a byte offset in a larger
//! document, so a caller can reformat just that region and splice the
//! rendering back in. This is a pure string utility; wiring it to an editor
//! buffer is the caller's concern.

/// Byte offsets of the opening and closing delimiter, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    /// The region text, delimiters included.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..=self.end]
    }

    /// The document with the region replaced by `replacement`.
    pub fn splice(&self, text: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(text.len() + replacement.len());
        out.push_str(&text[..self.start]);
        out.push_str(replacement);
        out.push_str(&text[self.end + 1..]);
        out
    }
}

/// Finds the innermost balanced delimiter pair enclosing `offset`.
///
/// Scans backwards from `offset` for the nearest opener not matched by a
/// closer seen on the way, then forwards (starting at `offset`) for the
/// first unmatched closer. A cursor sitting on an opening delimiter thus
/// resolves to the pair around that group. Returns `None` when the offset
/// is not inside any pair.
pub fn enclosing(text: &str, offset: usize) -> Option<Region> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }
    let start = find_opening(text, offset)?;
    let end = find_closing(text, offset)?;
    Some(Region { start, end })
}

fn is_opener(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{')
}

fn is_closer(ch: char) -> bool {
    matches!(ch, ')' | ']' | '}')
}

fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn find_opening(text: &str, offset: usize) -> Option<usize> {
    let mut stack: Vec<char> = Vec::new();
    for (pos, ch) in text[..offset].char_indices().rev() {
        if is_closer(ch) {
            stack.push(ch);
        } else if is_opener(ch) {
            match stack.last() {
                Some(&top) if closer_for(ch) == top => {
                    stack.pop();
                }
                // Unmatched opener: this is the enclosing one. A mismatched
                // pair also stops the scan; the parse will reject it later.
                _ => return Some(pos),
            }
        }
    }
    None
}

fn find_closing(text: &str, offset: usize) -> Option<usize> {
    if offset >= text.len() {
        return None;
    }
    let mut stack: Vec<char> = Vec::new();
    for (rel, ch) in text[offset..].char_indices() {
        if is_opener(ch) {
            stack.push(ch);
        } else if is_closer(ch) {
            match stack.last() {
                Some(&top) if closer_for(top) == ch => {
                    stack.pop();
                }
                _ => return Some(offset + rel),
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_inside_a_flat_group() {
        let text = "value = dict(a=1, b=2)";
        let region = enclosing(text, 14).unwrap();
        assert_eq!(region.slice(text), "(a=1, b=2)");
    }

    #[test]
    fn offset_in_an_inner_group_finds_the_inner_pair() {
        let text = "(foo, [bar, baz], qux)";
        //                  ^ offset 8 is inside the brackets
        let region = enclosing(text, 8).unwrap();
        assert_eq!(region.slice(text), "[bar, baz]");
    }

    #[test]
    fn sibling_groups_before_the_offset_are_skipped() {
        let text = "f(a), g(b)";
        let region = enclosing(text, 8).unwrap();
        assert_eq!(region.slice(text), "(b)");
    }

    #[test]
    fn offset_outside_any_pair() {
        assert_eq!(enclosing("foo bar", 3), None);
        assert_eq!(enclosing("(done) later", 9), None);
    }

    #[test]
    fn offset_on_the_opening_delimiter_resolves_outward() {
        let text = "{outer: (inner)}";
        //                  ^ offset 8 sits on the paren itself
        let region = enclosing(text, 8).unwrap();
        assert_eq!(region.slice(text), "{outer: (inner)}");
    }

    #[test]
    fn splice_replaces_only_the_region() {
        let text = "x = (a,b)\n";
        let region = enclosing(text, 6).unwrap();
        assert_eq!(region.splice(text, "(a, b)"), "x = (a, b)\n");
    }

    #[test]
    fn offset_past_the_end_finds_nothing() {
        assert_eq!(enclosing("(a)", 10), None);
    }
}
