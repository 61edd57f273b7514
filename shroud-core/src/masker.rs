// shroud-core/src/masker.rs
//! Turns findings into masked text.
//!
//! Fragments are located by literal substring search against the original
//! text, so masking never depends on how a fragment was detected. A fragment
//! that does not occur literally (a paraphrased generative finding, say) is
//! skipped here but stays in the findings for the reader.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::findings::{log_mask_action_debug, FindingSet, Span};

/// Masks every locatable finding in `text` and returns the rebuilt string.
pub fn mask_findings(text: &str, findings: &FindingSet) -> String {
    let candidates = collect_spans(text, findings);
    let selected = resolve_overlaps(candidates);
    mask_spans(text, selected)
}

/// Locates every occurrence of every fragment, producing one candidate span
/// per occurrence. Empty fragments are ignored.
fn collect_spans(text: &str, findings: &FindingSet) -> Vec<Span> {
    let mut candidates = Vec::new();

    for (category, fragments) in findings.iter() {
        for fragment in fragments {
            if fragment.is_empty() {
                continue;
            }
            let mut found = false;
            for (start, matched) in text.match_indices(fragment.as_str()) {
                found = true;
                candidates.push(Span {
                    start,
                    end: start + matched.len(),
                    category,
                });
            }
            if !found {
                debug!(
                    "A fragment under '{}' does not occur literally; leaving it unmasked.",
                    category
                );
            }
        }
    }

    candidates
}

/// Resolves overlapping candidates down to a disjoint set.
///
/// Stronger tiers claim their spans first (pattern over entity over
/// generative). Within a tier the earlier start wins, and at the same start
/// the longer match wins. Remaining ties keep findings order, so the outcome
/// is deterministic for a given finding set.
pub fn resolve_overlaps(mut candidates: Vec<Span>) -> Vec<Span> {
    candidates.sort_by(|a, b| {
        b.category
            .tier()
            .cmp(&a.category.tier())
            .then(a.start.cmp(&b.start))
            .then(b.end.cmp(&a.end))
    });

    let mut selected: Vec<Span> = Vec::new();
    for candidate in candidates {
        if selected.iter().all(|span| !span.overlaps(&candidate)) {
            selected.push(candidate);
        }
    }
    selected
}

/// Rebuilds `text` left to right, replacing each span with its category
/// placeholder. Tolerates overlapping input spans on a first-wins basis:
/// a span swallowed by an earlier replacement is dropped, and a partial
/// overlap is truncated to the unreplaced remainder.
pub fn mask_spans(text: &str, mut spans: Vec<Span>) -> String {
    spans.sort_by_key(|span| span.start);

    let mut masked = String::with_capacity(text.len());
    let mut last_end = 0usize;

    for span in &spans {
        if span.end <= last_end {
            continue;
        }
        let current_start = span.start.max(last_end);
        let placeholder = span.category.placeholder();
        log_mask_action_debug(module_path!(), &text[span.start..span.end], placeholder, span.category);
        masked.push_str(&text[last_end..current_start]);
        masked.push_str(placeholder);
        last_end = span.end;
    }
    masked.push_str(&text[last_end..]);

    masked
}
