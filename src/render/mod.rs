//! Rendering of combined match results with optional ANSI highlighting.
//!
//! Highlighting wraps each span in a color-start/reset pair; text outside
//! spans is emitted unmodified. Everything here is a pure function from
//! results to an output string, built with a cursor fold over the spans.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::corpus::Sonnet;
use crate::search::{MatchResult, Span};

const RESET: &str = "\x1b[0m";
const BRIGHT_YELLOW: &str = "\x1b[93m";
const GREEN: &str = "\x1b[32m";

/// Color choice applied to highlighted spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HighlightMode {
    #[default]
    Default,
    Green,
}

impl HighlightMode {
    fn color(self) -> &'static str {
        match self {
            HighlightMode::Default => BRIGHT_YELLOW,
            HighlightMode::Green => GREEN,
        }
    }
}

impl fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HighlightMode::Default => "DEFAULT",
            HighlightMode::Green => "GREEN",
        })
    }
}

/// Wrap each span of `text` in the mode's color sequence.
///
/// Spans from a single scan never overlap; spans merged from several query
/// words can, so the cursor clamps each span's start and skips spans the
/// cursor has already passed.
pub fn highlight_spans(text: &str, spans: &[Span], mode: HighlightMode) -> String {
    let color = mode.color();
    let mut out = String::with_capacity(text.len() + spans.len() * (color.len() + RESET.len()));
    let mut cursor = 0;

    for &(start, end) in spans {
        if end <= cursor {
            continue;
        }
        let start = start.max(cursor);
        out.push_str(&text[cursor..start]);
        out.push_str(color);
        out.push_str(&text[start..end]);
        out.push_str(RESET);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Format the full result listing for one query.
///
/// The summary line reports how many sonnets matched out of the whole
/// corpus, with an optional elapsed-time suffix. Matched sonnets follow in
/// corpus order: the index numerator counts matched sonnets only while the
/// denominator stays the corpus size (a match-density readout, kept from the
/// source behavior), then the title and each matching line.
pub fn render_results(
    query: &str,
    sonnets: &[Sonnet],
    results: &[MatchResult],
    highlight: bool,
    mode: HighlightMode,
    query_time_ms: Option<f64>,
) -> String {
    let total = results.len();
    let matched = results.iter().filter(|r| r.is_match()).count();

    let mut out = String::new();
    let _ = write!(out, "{matched} out of {total} sonnets contain \"{query}\".");
    if let Some(ms) = query_time_ms {
        let _ = write!(out, " Your query took {ms:.2}ms.");
    }
    out.push('\n');

    let mut idx = 0;
    for (sonnet, result) in sonnets.iter().zip(results) {
        if !result.is_match() {
            continue;
        }
        idx += 1;

        let title = styled(&sonnet.title, &result.title_spans, highlight, mode);
        let _ = writeln!(out, "[{idx}/{total}] {title}");

        for lm in &result.line_matches {
            let text = styled(&lm.text, &lm.spans, highlight, mode);
            let _ = writeln!(out, "[{:>2}] {}", lm.line_number, text);
        }
    }
    out
}

fn styled(text: &str, spans: &[Span], highlight: bool, mode: HighlightMode) -> String {
    if highlight {
        highlight_spans(text, spans, mode)
    } else {
        text.to_string()
    }
}
