//! Data model for per-sonnet match results.

/// Half-open byte range into a title or line marking one term occurrence.
///
/// Offsets always fall on character boundaries: the scan only reports ranges
/// whose bytes compare equal to the term (ASCII case folded), so a range can
/// neither start nor end inside a multi-byte character.
pub type Span = (usize, usize);

/// One line of a sonnet that contains at least one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// 1-based line number within the sonnet.
    pub line_number: usize,
    /// The literal line text, unmodified.
    pub text: String,
    /// Match ranges into `text`, left to right, non-overlapping per scan.
    pub spans: Vec<Span>,
}

/// Result of matching one term (or combining several) against one sonnet.
///
/// `matches == 0` implies `title_spans` and `line_matches` are both empty: a
/// non-matching result never carries highlight data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Occurrence count. `matches > 0` is the "this sonnet matched" signal
    /// downstream; the magnitude is kept for display and tests.
    pub matches: usize,
    /// Match ranges into the sonnet title.
    pub title_spans: Vec<Span>,
    /// Lines with at least one occurrence, in increasing line-number order.
    pub line_matches: Vec<LineMatch>,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        self.matches > 0
    }
}
