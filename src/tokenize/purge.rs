//! Overlap resolution for independently collected matches
//!
//! Sorts tokens by start (stable) and sweeps left to right. For each kept
//! token `i`, later tokens `j` that start before `i` ends are resolved:
//! - same start and `j` longer: `i` is discarded and the sweep moves on
//! - otherwise `j` is discarded, whether `i` contains it or only partially
//!   overlaps it (the token reached first in the sweep wins)
//!
//! The result is sorted and pairwise non-overlapping. Purging it again
//! changes nothing.

use crate::core::model::Token;

/// Reduce possibly overlapping tokens to a non-overlapping list
pub fn purge(mut tokens: Vec<Token>) -> Vec<Token> {
    tokens.sort_by_key(|t| t.start);

    let mut keep = vec![true; tokens.len()];
    for i in 0..tokens.len() {
        if !keep[i] {
            continue;
        }
        for j in (i + 1)..tokens.len() {
            if !keep[j] {
                continue;
            }
            let (current, next) = (&tokens[i], &tokens[j]);
            if current.is_before(next) {
                break;
            }
            if next.start == current.start && next.length > current.length {
                keep[i] = false;
                break;
            }
            keep[j] = false;
        }
    }

    tokens
        .into_iter()
        .zip(keep)
        .filter_map(|(token, kept)| kept.then_some(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, len: usize, category: &str) -> Token {
        Token::new("x".repeat(len), category, start)
    }

    #[test]
    fn test_longer_wins_at_same_start() {
        let tokens = vec![
            Token::new("a", "short", 0),
            Token::new("ab", "long", 0),
        ];
        assert_eq!(purge(tokens), vec![Token::new("ab", "long", 0)]);

        let tokens = vec![
            Token::new("ab", "long", 0),
            Token::new("a", "short", 0),
        ];
        assert_eq!(purge(tokens), vec![Token::new("ab", "long", 0)]);
    }

    #[test]
    fn test_outer_match_wins_over_nested() {
        let outer = span(0, 10, "string");
        let inner = span(2, 3, "keyword");
        let purged = purge(vec![inner, outer.clone()]);
        assert_eq!(purged, vec![outer]);
    }

    #[test]
    fn test_partial_overlap_drops_second_in_sweep() {
        // Neither contains the other; the later-starting one goes.
        let x = span(0, 5, "x");
        let y = span(3, 5, "y");
        assert_eq!(purge(vec![y, x.clone()]), vec![x]);
    }

    #[test]
    fn test_equal_spans_keep_first_registered() {
        let purged = purge(vec![span(4, 2, "first"), span(4, 2, "second")]);
        assert_eq!(purged.len(), 1);
        assert_eq!(purged[0].category, "first");
    }

    #[test]
    fn test_adjacent_tokens_survive() {
        let tokens = vec![span(3, 3, "b"), span(0, 3, "a"), span(6, 1, "c")];
        let purged = purge(tokens);
        let cats: Vec<&str> = purged.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_discarded_token_does_not_shadow() {
        // b is dropped by a; c only overlaps b, so it survives.
        let purged = purge(vec![span(0, 4, "a"), span(2, 6, "b"), span(5, 2, "c")]);
        let cats: Vec<&str> = purged.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, vec!["a", "c"]);
    }

    #[test]
    fn test_purge_is_idempotent() {
        let tokens = vec![
            span(0, 10, "a"),
            span(2, 3, "b"),
            span(9, 4, "c"),
            span(12, 1, "d"),
            span(13, 2, "e"),
        ];
        let once = purge(tokens);
        let twice = purge(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_list() {
        assert!(purge(Vec::new()).is_empty());
    }
}
