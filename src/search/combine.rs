//! AND/OR merging of per-term match results.
//!
//! A multi-word query is evaluated one word at a time: every word produces
//! one MatchResult per sonnet, and successive word results are folded into a
//! running accumulator under the configured search mode. Merging is
//! index-aligned across the corpus (titles are not guaranteed unique), so
//! sonnets, per-word results and the accumulator are three parallel vectors
//! sharing the same indices.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::Sonnet;
use crate::search::error::Result;
use crate::search::matcher::match_sonnet;
use crate::search::types::{LineMatch, MatchResult};

/// Policy for combining the results of multiple query words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchMode {
    /// Every word must match somewhere in the sonnet.
    #[default]
    And,
    /// Any word matching is enough.
    Or,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMode::And => "AND",
            SearchMode::Or => "OR",
        })
    }
}

/// Combine the accumulated result for a sonnet with the next term's result.
///
/// OR sums the match counts and unions the spans. AND does the same when
/// both sides matched; when either side is empty the combined result is
/// forced back to zero and ALL spans are dropped, so a sonnet excluded by
/// AND never carries stale highlight data from an earlier term.
pub fn combine(acc: &MatchResult, next: &MatchResult, mode: SearchMode) -> MatchResult {
    match mode {
        SearchMode::Or => merge(acc, next),
        SearchMode::And => {
            if acc.is_match() && next.is_match() {
                merge(acc, next)
            } else {
                MatchResult::default()
            }
        }
    }
}

/// Evaluate a whole query: match every word against every sonnet, then fold
/// per-word results into one accumulator per sonnet.
///
/// The first word seeds the accumulator directly; each further word is
/// merged in with [`combine`]. The per-sonnet scan runs in parallel but the
/// returned vector is always in corpus order.
pub fn evaluate_query(
    sonnets: &[Sonnet],
    words: &[&str],
    mode: SearchMode,
) -> Result<Vec<MatchResult>> {
    let mut combined: Vec<MatchResult> = Vec::new();

    for word in words {
        let results: Vec<MatchResult> = sonnets
            .par_iter()
            .map(|sonnet| match_sonnet(sonnet, word))
            .collect::<Result<_>>()?;

        if combined.is_empty() {
            combined = results;
        } else {
            combined = combined
                .iter()
                .zip(results.iter())
                .map(|(acc, next)| combine(acc, next, mode))
                .collect();
        }
    }

    Ok(combined)
}

/// Union of two results for the same sonnet: counts summed, title spans and
/// per-line spans merged in left-to-right order, line matches keyed by line
/// number with no duplicate entries.
fn merge(a: &MatchResult, b: &MatchResult) -> MatchResult {
    let mut title_spans = a.title_spans.clone();
    title_spans.extend(b.title_spans.iter().copied());
    title_spans.sort_unstable();

    MatchResult {
        matches: a.matches + b.matches,
        title_spans,
        line_matches: merge_line_matches(&a.line_matches, &b.line_matches),
    }
}

fn merge_line_matches(a: &[LineMatch], b: &[LineMatch]) -> Vec<LineMatch> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    // Both inputs are already sorted by line number.
    while i < a.len() && j < b.len() {
        match a[i].line_number.cmp(&b[j].line_number) {
            std::cmp::Ordering::Less => {
                out.push(a[i].clone());
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j].clone());
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                let mut spans = a[i].spans.clone();
                spans.extend(b[j].spans.iter().copied());
                spans.sort_unstable();
                out.push(LineMatch {
                    line_number: a[i].line_number,
                    text: a[i].text.clone(),
                    spans,
                });
                i += 1;
                j += 1;
            }
        }
    }
    out.extend(a[i..].iter().cloned());
    out.extend(b[j..].iter().cloned());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(line_number: usize, text: &str, spans: Vec<(usize, usize)>) -> LineMatch {
        LineMatch {
            line_number,
            text: text.to_string(),
            spans,
        }
    }

    fn result(matches: usize, line_matches: Vec<LineMatch>) -> MatchResult {
        MatchResult {
            matches,
            title_spans: Vec::new(),
            line_matches,
        }
    }

    #[test]
    fn or_with_zero_result_is_identity() {
        let r = result(2, vec![line(3, "so long lives this", vec![(0, 2), (8, 10)])]);
        let combined = combine(&r, &MatchResult::default(), SearchMode::Or);
        assert_eq!(combined, r);
    }

    #[test]
    fn or_sums_matches_and_merges_lines() {
        let a = result(1, vec![line(1, "shall i compare thee", vec![(16, 20)])]);
        let b = result(1, vec![line(2, "to a summer's day", vec![(14, 17)])]);
        let combined = combine(&a, &b, SearchMode::Or);
        assert_eq!(combined.matches, 2);
        assert_eq!(combined.line_matches.len(), 2);
        assert_eq!(combined.line_matches[0].line_number, 1);
        assert_eq!(combined.line_matches[1].line_number, 2);
    }

    #[test]
    fn and_zeroes_out_when_next_is_empty() {
        let acc = result(3, vec![line(1, "shall i compare thee", vec![(16, 20)])]);
        let combined = combine(&acc, &MatchResult::default(), SearchMode::And);
        assert_eq!(combined.matches, 0);
        assert!(combined.line_matches.is_empty());
        assert!(combined.title_spans.is_empty());
    }

    #[test]
    fn and_zeroes_out_when_acc_is_empty() {
        let next = result(1, vec![line(2, "to a summer's day", vec![(14, 17)])]);
        let combined = combine(&MatchResult::default(), &next, SearchMode::And);
        assert_eq!(combined, MatchResult::default());
    }

    #[test]
    fn and_unions_spans_when_both_match() {
        let a = result(1, vec![line(1, "thou art more lovely", vec![(0, 4)])]);
        let b = result(2, vec![line(1, "thou art more lovely", vec![(5, 8)])]);
        let combined = combine(&a, &b, SearchMode::And);
        assert_eq!(combined.matches, 3);
        assert_eq!(combined.line_matches.len(), 1);
        assert_eq!(combined.line_matches[0].spans, vec![(0, 4), (5, 8)]);
    }

    #[test]
    fn shared_line_merges_into_one_entry_in_span_order() {
        let a = result(2, vec![line(5, "rough winds do shake", vec![(6, 11)])]);
        let b = result(1, vec![line(5, "rough winds do shake", vec![(0, 5)])]);
        let combined = combine(&a, &b, SearchMode::Or);
        assert_eq!(combined.line_matches.len(), 1);
        assert_eq!(combined.line_matches[0].spans, vec![(0, 5), (6, 11)]);
    }

    #[test]
    fn merged_line_numbers_are_strictly_increasing() {
        let a = result(
            3,
            vec![
                line(1, "a", vec![(0, 1)]),
                line(4, "d", vec![(0, 1)]),
                line(9, "i", vec![(0, 1)]),
            ],
        );
        let b = result(
            2,
            vec![line(4, "d", vec![(0, 1)]), line(7, "g", vec![(0, 1)])],
        );
        let combined = combine(&a, &b, SearchMode::Or);
        let numbers: Vec<usize> = combined
            .line_matches
            .iter()
            .map(|lm| lm.line_number)
            .collect();
        assert_eq!(numbers, vec![1, 4, 7, 9]);
    }

    #[test]
    fn title_spans_are_unioned() {
        let a = MatchResult {
            matches: 1,
            title_spans: vec![(7, 9)],
            line_matches: Vec::new(),
        };
        let b = MatchResult {
            matches: 1,
            title_spans: vec![(0, 6)],
            line_matches: Vec::new(),
        };
        let combined = combine(&a, &b, SearchMode::Or);
        assert_eq!(combined.title_spans, vec![(0, 6), (7, 9)]);
    }

    #[test]
    fn evaluate_query_seeds_accumulator_with_first_word() {
        let sonnets = vec![Sonnet {
            title: "Sonnet 1".to_string(),
            lines: vec!["shall i compare thee".to_string()],
        }];
        let results = evaluate_query(&sonnets, &["thee"], SearchMode::And).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matches, 1);
    }

    #[test]
    fn evaluate_query_preserves_corpus_order() {
        let sonnets: Vec<Sonnet> = (1..=5)
            .map(|n| Sonnet {
                title: format!("Sonnet {n}"),
                lines: vec![format!("line of sonnet {n}")],
            })
            .collect();
        let results = evaluate_query(&sonnets, &["sonnet"], SearchMode::Or).unwrap();
        assert_eq!(results.len(), 5);
        // Every sonnet matches once in the title and once in its line.
        for result in &results {
            assert_eq!(result.matches, 2);
        }
    }
}
