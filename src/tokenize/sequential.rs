//! Sequential (exact) scanning
//!
//! Walks the text left to right from a cursor. Each round probes every
//! still-active rule for its next match at or after the cursor and emits the
//! earliest one (longest on ties, first registered on equal length). A rule
//! that finds nothing is dropped for the rest of the scan. The cursor then
//! moves past the emitted token, so nested or overlapping tokens are never
//! produced.

use regex::Captures;
use tracing::trace;

use super::{next_boundary, token_from_captures};
use crate::core::model::Token;
use crate::fuel::Rule;

/// A rule that still has matches ahead of the cursor
struct Probe<'r> {
    rule: &'r Rule,
    /// Start of this rule's next known match
    next_start: usize,
}

/// Scan `text`, returning tokens with offsets relative to `text`
pub fn scan(text: &str, rules: &[&Rule]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut active: Vec<Probe> = rules
        .iter()
        .map(|&rule| Probe { rule, next_start: 0 })
        .collect();
    let mut cursor = 0;

    while cursor < text.len() && !active.is_empty() {
        // Winner so far: (index into `found`, whole-match start, whole-match length)
        let mut best: Option<(usize, usize, usize)> = None;
        let mut found: Vec<(Probe, Captures)> = Vec::with_capacity(active.len());

        for mut probe in active {
            let Some(caps) = probe.rule.pattern.captures_at(text, cursor) else {
                trace!(rule = %probe.rule.name, cursor, "rule exhausted");
                continue;
            };
            let Some(whole) = caps.get(0) else { continue };
            probe.next_start = whole.start();

            let better = match best {
                None => true,
                Some((_, start, len)) => whole.start() < start || (whole.start() == start && whole.len() > len),
            };
            if better {
                best = Some((found.len(), whole.start(), whole.len()));
            }
            found.push((probe, caps));
        }

        let Some((winner, _, _)) = best else { break };

        let whole_end = found[winner].1.get(0).map_or(cursor, |m| m.end());
        let token = token_from_captures(&found[winner].1, &found[winner].0.rule.name);

        // The winner's next start is its next match past the one just used
        let winner_next = {
            let probe = &found[winner].0;
            let from = if whole_end > cursor {
                whole_end
            } else {
                next_boundary(text, cursor)
            };
            if from > text.len() {
                text.len()
            } else {
                probe.rule.pattern.find_at(text, from).map_or(text.len(), |m| m.start())
            }
        };
        found[winner].0.next_start = winner_next;

        let earliest = found.iter().map(|(p, _)| p.next_start).min().unwrap_or(text.len());
        let token_end = token.as_ref().map_or(cursor, |t| t.end);
        let mut next_cursor = earliest.max(token_end);
        if next_cursor <= cursor {
            // Empty match at the cursor: step over one character
            next_cursor = next_boundary(text, cursor);
        }

        if let Some(token) = token {
            trace!(rule = %token.category, start = token.start, end = token.end, "emit");
            tokens.push(token);
        }

        cursor = next_cursor;
        active = found.into_iter().map(|(probe, _)| probe).collect();
    }

    tokens
}
