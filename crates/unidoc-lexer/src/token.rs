use crate::location::Span;

/// Token classification for unidoc source.
///
/// Data-carrying variants embed their value directly. Prefixed kinds
/// (`Tag`, `Identifier`, `Class`) store the name without its prefix
/// character; run kinds (`Word`, `Space`, `NewLine`) store the raw
/// source text of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Prefixed names
    Tag(String),        // \name
    Identifier(String), // #name
    Class(String),      // .name

    // Block delimiters
    BlockStart, // {
    BlockEnd,   // }

    // Runs
    Word(String),
    Space(String),
    NewLine(String), // "\n", "\r", or "\r\n"
}

/// A token produced by the unidoc scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The name carried by a prefixed token, if any.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Tag(name) | TokenKind::Identifier(name) | TokenKind::Class(name) => {
                Some(name)
            }
            _ => None,
        }
    }

    /// The exact source text this token was scanned from.
    pub fn text(&self) -> String {
        match &self.kind {
            TokenKind::Tag(name) => format!("\\{name}"),
            TokenKind::Identifier(name) => format!("#{name}"),
            TokenKind::Class(name) => format!(".{name}"),
            TokenKind::BlockStart => "{".to_string(),
            TokenKind::BlockEnd => "}".to_string(),
            TokenKind::Word(raw) | TokenKind::Space(raw) | TokenKind::NewLine(raw) => raw.clone(),
        }
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Space(_) | TokenKind::NewLine(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_on_prefixed_kinds() {
        let span = Span::UNKNOWN;
        assert_eq!(
            Token::new(TokenKind::Tag("em".into()), span).name(),
            Some("em")
        );
        assert_eq!(
            Token::new(TokenKind::Identifier("top".into()), span).name(),
            Some("top")
        );
        assert_eq!(
            Token::new(TokenKind::Class("wide".into()), span).name(),
            Some("wide")
        );
        assert_eq!(Token::new(TokenKind::Word("em".into()), span).name(), None);
    }

    #[test]
    fn test_text_restores_prefix() {
        let span = Span::UNKNOWN;
        assert_eq!(Token::new(TokenKind::Tag("em".into()), span).text(), "\\em");
        assert_eq!(
            Token::new(TokenKind::Identifier("top".into()), span).text(),
            "#top"
        );
        assert_eq!(
            Token::new(TokenKind::Class("wide".into()), span).text(),
            ".wide"
        );
        assert_eq!(Token::new(TokenKind::BlockStart, span).text(), "{");
        assert_eq!(Token::new(TokenKind::BlockEnd, span).text(), "}");
    }

    #[test]
    fn test_text_preserves_raw_runs() {
        let span = Span::UNKNOWN;
        assert_eq!(
            Token::new(TokenKind::NewLine("\r\n".into()), span).text(),
            "\r\n"
        );
        assert_eq!(
            Token::new(TokenKind::Space(" \t ".into()), span).text(),
            " \t "
        );
    }

    #[test]
    fn test_is_whitespace() {
        let span = Span::UNKNOWN;
        assert!(Token::new(TokenKind::Space(" ".into()), span).is_whitespace());
        assert!(Token::new(TokenKind::NewLine("\n".into()), span).is_whitespace());
        assert!(!Token::new(TokenKind::Word("x".into()), span).is_whitespace());
    }
}
