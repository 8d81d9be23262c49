//! Property-based tests for the unidoc lexer.
//!
//! These verify invariants that must hold for ANY input, not just
//! crafted examples: the lexer never fails, token spans tile the source
//! exactly, and token texts concatenate back to the input.

use proptest::prelude::*;
use unidoc_lexer::{Location, Scanner, TokenKind};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

/// Generator tuned to unidoc syntax: prefixes, braces, blanks and line
/// breaks show up far more often than in arbitrary text.
fn unidoc_flavoured() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9#.\\\\{} \\t\\r\\n!-]{0,300}")
        .expect("valid generator regex")
}

// =============================================================================
// Property: lexing never fails
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// The lexer has no error state: any string tokenizes.
    #[test]
    fn tokenize_never_panics(input in any::<String>()) {
        let _ = Scanner::tokenize(&input);
    }

    #[test]
    fn tokenize_never_panics_flavoured(input in unidoc_flavoured()) {
        let _ = Scanner::tokenize(&input);
    }
}

// =============================================================================
// Property: span coverage and text reproduction
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// Concatenating all token texts reproduces the input exactly.
    #[test]
    fn token_texts_reproduce_source(input in any::<String>()) {
        let rebuilt: String = Scanner::tokenize(&input)
            .iter()
            .map(|t| t.text())
            .collect();
        prop_assert_eq!(rebuilt, input);
    }

    /// Token spans tile the input: no gaps, no overlaps, full coverage.
    #[test]
    fn spans_tile_the_source(input in unidoc_flavoured()) {
        let tokens = Scanner::tokenize(&input);
        if let Some(first) = tokens.first() {
            prop_assert_eq!(first.span.from, Location::start());
        }
        for pair in tokens.windows(2) {
            prop_assert_eq!(pair[0].span.to, pair[1].span.from);
        }
        if let Some(last) = tokens.last() {
            prop_assert_eq!(last.span.to.index as usize, input.chars().count());
        }
    }

    /// Span indexes never decrease across the token stream.
    #[test]
    fn span_indexes_are_monotonic(input in any::<String>()) {
        let tokens = Scanner::tokenize(&input);
        for token in &tokens {
            prop_assert!(token.span.from.index <= token.span.to.index);
        }
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].span.from.index <= pair[1].span.from.index);
        }
    }
}

// =============================================================================
// Property: classification invariants
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// A prefixed token always carries a well-formed, non-empty name; a
    /// malformed prefix never surfaces as TAG/IDENTIFIER/CLASS.
    #[test]
    fn prefixed_tokens_have_valid_names(input in unidoc_flavoured()) {
        for token in Scanner::tokenize(&input) {
            if let Some(name) = token.name() {
                prop_assert!(!name.is_empty());
                prop_assert!(
                    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'),
                    "bad name {:?}",
                    name
                );
            }
        }
    }

    /// Adjacent SPACE tokens never appear: blank runs gather maximally.
    /// (WORD tokens can split at a degraded prefix, as in `a\ `, so no
    /// such guarantee holds for them.)
    #[test]
    fn space_runs_are_maximal(input in unidoc_flavoured()) {
        let tokens = Scanner::tokenize(&input);
        for pair in tokens.windows(2) {
            let both_space = matches!(
                (&pair[0].kind, &pair[1].kind),
                (TokenKind::Space(_), TokenKind::Space(_))
            );
            prop_assert!(!both_space, "adjacent space runs");
        }
    }
}
