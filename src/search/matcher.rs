//! Term matching over a single sonnet.
//!
//! Matching is literal substring search, ASCII-case-insensitive, applied the
//! same way to the title and to every line. No tokenization, no stemming:
//! "the" matches inside "thee".

use crate::corpus::Sonnet;
use crate::search::error::{Result, SearchError};
use crate::search::types::{LineMatch, MatchResult, Span};

/// Match one search term against one sonnet.
///
/// Scans the title and every line for non-overlapping occurrences of `term`.
/// Each occurrence contributes one unit to `matches` and one span. Lines
/// without occurrences do not appear in the result. Pure function of its
/// inputs.
///
/// An empty term is rejected up front: it would otherwise match everywhere
/// trivially.
pub fn match_sonnet(sonnet: &Sonnet, term: &str) -> Result<MatchResult> {
    if term.is_empty() {
        return Err(SearchError::EmptyTerm);
    }

    let title_spans = find_occurrences(&sonnet.title, term);
    let mut matches = title_spans.len();

    let mut line_matches = Vec::new();
    for (idx, line) in sonnet.lines.iter().enumerate() {
        let spans = find_occurrences(line, term);
        if spans.is_empty() {
            continue;
        }
        matches += spans.len();
        line_matches.push(LineMatch {
            line_number: idx + 1,
            text: line.clone(),
            spans,
        });
    }

    Ok(MatchResult {
        matches,
        title_spans,
        line_matches,
    })
}

/// Non-overlapping occurrences of `term` in `text`, left to right.
///
/// Greedy scan: after a match the search resumes at the end of the match,
/// not one byte further, so "aaaa" contains two occurrences of "aa".
/// Comparison is byte-wise with ASCII case folding; non-ASCII bytes must
/// match exactly, which also keeps reported offsets on character boundaries.
fn find_occurrences(text: &str, term: &str) -> Vec<Span> {
    let haystack = text.as_bytes();
    let needle = term.as_bytes();

    let mut spans = Vec::new();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()].eq_ignore_ascii_case(needle) {
            spans.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    spans
}
