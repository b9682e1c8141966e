//! Inline highlighting of the original text against a change list.
//!
//! The `original` strings of all changes are deduplicated, sorted longest
//! first and joined into one alternation regex.  The regex engine picks the
//! leftmost match and, among alternatives starting at the same position, the
//! first listed one, so the length sort yields longest-match substitution:
//! with changes for `"ทำ"` and `"ทำงาณ"`, the text `"ทำงาณ"` is highlighted
//! as a whole rather than as `"ทำ"` followed by plain `"งาณ"`.

use std::collections::HashSet;

use regex::Regex;

use super::types::ChangeItem;

/// A contiguous slice of the text, flagged when it matches a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub is_error: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    fn error(text: &'a str) -> Self {
        Self {
            text,
            is_error: true,
        }
    }
}

/// Precompiled matcher for one change list.
///
/// # Example
/// ```rust
/// use thai_proofreader::proofread::{ChangeItem, Highlighter};
///
/// let changes = vec![ChangeItem { original: "ทำงาณ".into(), ..Default::default() }];
/// let segments = Highlighter::new(&changes).segments("ไปทำงาณ");
/// assert_eq!(segments.len(), 2);
/// assert!(segments[1].is_error);
/// ```
#[derive(Debug, Clone)]
pub struct Highlighter {
    originals: Vec<String>,
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(changes: &[ChangeItem]) -> Self {
        let originals = sorted_originals(changes);
        let pattern = if originals.is_empty() {
            None
        } else {
            let alternation = originals
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            match Regex::new(&alternation) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("highlight: could not build pattern, showing plain text: {e}");
                    None
                }
            }
        };

        Self { originals, pattern }
    }

    /// Distinct non-empty originals in match-priority order.
    pub fn originals(&self) -> &[String] {
        &self.originals
    }

    /// Split `text` into ordered segments.
    ///
    /// Concatenating the segment texts reproduces `text`.  Empty plain
    /// segments are never emitted.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let Some(re) = &self.pattern else {
            return if text.is_empty() {
                Vec::new()
            } else {
                vec![Segment::plain(text)]
            };
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in re.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::plain(&text[last..m.start()]));
            }
            segments.push(Segment::error(m.as_str()));
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::plain(&text[last..]));
        }
        segments
    }

    /// Number of highlighted occurrences in `text`.
    pub fn count_matches(&self, text: &str) -> usize {
        self.pattern
            .as_ref()
            .map_or(0, |re| re.find_iter(text).count())
    }
}

/// Convenience wrapper for one-off highlighting.
pub fn highlight<'a>(text: &'a str, changes: &[ChangeItem]) -> Vec<Segment<'a>> {
    Highlighter::new(changes).segments(text)
}

/// Distinct non-empty `original` values, longest first.  Ties keep the order
/// in which they first appear in `changes`.
fn sorted_originals(changes: &[ChangeItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut originals: Vec<String> = changes
        .iter()
        .map(|c| c.original.as_str())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect();

    originals.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
    originals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn change(original: &str) -> ChangeItem {
        ChangeItem {
            original: original.into(),
            ..ChangeItem::default()
        }
    }

    fn joined(segments: &[Segment<'_>]) -> String {
        segments.iter().map(|s| s.text).collect()
    }

    #[test]
    fn no_changes_returns_whole_text() {
        let segments = highlight("สวัสดีครับ", &[]);
        assert_eq!(segments, vec![Segment::plain("สวัสดีครับ")]);
    }

    #[test]
    fn only_empty_originals_returns_whole_text() {
        let segments = highlight("สวัสดี", &[change(""), change("")]);
        assert_eq!(segments, vec![Segment::plain("สวัสดี")]);
    }

    #[test]
    fn empty_text_has_no_segments() {
        assert!(highlight("", &[]).is_empty());
        assert!(highlight("", &[change("ก")]).is_empty());
    }

    #[test]
    fn marks_single_match() {
        let segments = highlight("ผมไปทำงาณแล้ว", &[change("ทำงาณ")]);
        assert_eq!(
            segments,
            vec![
                Segment::plain("ผมไป"),
                Segment::error("ทำงาณ"),
                Segment::plain("แล้ว"),
            ]
        );
    }

    #[test]
    fn longest_match_wins_over_prefix() {
        let changes = [change("ทำ"), change("ทำงาณ")];
        let segments = highlight("ไปทำงาณแล้วทำต่อ", &changes);
        assert_eq!(
            segments,
            vec![
                Segment::plain("ไป"),
                Segment::error("ทำงาณ"),
                Segment::plain("แล้ว"),
                Segment::error("ทำ"),
                Segment::plain("ต่อ"),
            ]
        );
    }

    #[test]
    fn every_occurrence_is_marked() {
        let hl = Highlighter::new(&[change("คะ")]);
        let segments = hl.segments("ได้คะ ไม่คะ");
        assert_eq!(segments.iter().filter(|s| s.is_error).count(), 2);
        assert_eq!(hl.count_matches("ได้คะ ไม่คะ"), 2);
    }

    #[test]
    fn adjacent_matches_have_no_empty_segments() {
        let segments = highlight("กขกข", &[change("ก"), change("ข")]);
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| s.is_error && !s.text.is_empty()));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let segments = highlight("ราคา (a+b)*2 บาท", &[change("(a+b)*")]);
        assert_eq!(
            segments,
            vec![
                Segment::plain("ราคา "),
                Segment::error("(a+b)*"),
                Segment::plain("2 บาท"),
            ]
        );
    }

    #[test]
    fn originals_are_deduplicated_and_sorted() {
        let changes = [change("ก"), change("ขขข"), change("ก"), change("คค"), change("งง")];
        let hl = Highlighter::new(&changes);
        assert_eq!(hl.originals(), ["ขขข", "คค", "งง", "ก"]);
    }

    #[test]
    fn length_is_measured_in_characters() {
        // "ก่" is 2 chars / 6 bytes; "abc" is 3 chars / 3 bytes.
        let hl = Highlighter::new(&[change("ก่"), change("abc")]);
        assert_eq!(hl.originals(), ["abc", "ก่"]);
    }

    #[test]
    fn unmatched_original_leaves_text_plain() {
        let segments = highlight("ข้อความถูกต้อง", &[change("ไม่มีในข้อความ")]);
        assert_eq!(segments, vec![Segment::plain("ข้อความถูกต้อง")]);
    }

    #[test]
    fn segments_reassemble_input() {
        let text = "ฉันชอบกินข้าวผัดกระเพรา และ ต้มยำกุ้ง มากๆ\nครับ";
        let changes = [change("กระเพรา"), change(" และ "), change("มากๆ"), change("ครับ")];
        let segments = highlight(text, &changes);
        assert_eq!(joined(&segments), text);
    }
}
