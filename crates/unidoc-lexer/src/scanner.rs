use crate::location::Span;
use crate::symbol::{Symbol, Symbols};
use crate::token::{Token, TokenKind};

/// Which prefixed token a prefix character opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Tag,        // \
    Identifier, // #
    Class,      // .
}

impl Prefix {
    fn of(ch: char) -> Option<Prefix> {
        match ch {
            '\\' => Some(Prefix::Tag),
            '#' => Some(Prefix::Identifier),
            '.' => Some(Prefix::Class),
            _ => None,
        }
    }
}

/// Scanner state between symbols.
///
/// `Prefix` holds a bare prefix character whose classification is still
/// open: a name character confirms it, a terminator degrades it to a
/// one-character word, anything else absorbs it into a plain word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Space,
    CarriageReturn,
    Prefix(Prefix),
    Name(Prefix),
    Word,
}

/// Blank characters that form `Space` tokens.
fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{000C}')
}

/// Characters allowed in tag, identifier and class names.
fn is_name(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-'
}

/// Characters that end a word or a name run.
fn is_terminator(ch: char) -> bool {
    is_space(ch) || matches!(ch, '\n' | '\r' | '\\' | '{' | '}')
}

/// unidoc source scanner.
///
/// A push automaton over [`Symbol`]s: feed symbols with [`push`] and
/// collect the tokens with [`finish`], or use [`Scanner::tokenize`] for
/// whole strings. Scanning never fails. A prefix character that is not
/// followed by a name degrades into an ordinary `Word`, CR and CRLF
/// fold into single `NewLine` tokens, and adjacent blanks gather into
/// one `Space` token. Token spans tile the source with no gaps and the
/// token texts concatenate back to the input exactly.
///
/// [`push`]: Scanner::push
/// [`finish`]: Scanner::finish
pub struct Scanner {
    state: State,
    buffer: String,
    span: Span,
    tokens: Vec<Token>,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            buffer: String::new(),
            span: Span::UNKNOWN,
            tokens: Vec::new(),
        }
    }

    /// Tokenize an entire source string.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new();
        for symbol in Symbols::new(source) {
            scanner.push(symbol);
        }
        scanner.finish()
    }

    /// Feed the next symbol into the automaton.
    pub fn push(&mut self, symbol: Symbol) {
        // A symbol that ends the current token is reprocessed from
        // `Start` on the next loop pass; `Start` consumes every symbol.
        loop {
            match self.state {
                State::Start => {
                    match symbol.ch {
                        '{' => self.emit(TokenKind::BlockStart, symbol.span),
                        '}' => self.emit(TokenKind::BlockEnd, symbol.span),
                        '\n' => self.emit(TokenKind::NewLine("\n".into()), symbol.span),
                        '\r' => self.begin(State::CarriageReturn, symbol),
                        ch if is_space(ch) => self.begin(State::Space, symbol),
                        ch => match Prefix::of(ch) {
                            Some(prefix) => self.begin(State::Prefix(prefix), symbol),
                            None => self.begin(State::Word, symbol),
                        },
                    }
                    return;
                }

                State::Space => {
                    if is_space(symbol.ch) {
                        self.grow(symbol);
                        return;
                    }
                    self.flush();
                }

                State::CarriageReturn => {
                    if symbol.ch == '\n' {
                        self.grow(symbol);
                        self.flush();
                        return;
                    }
                    self.flush();
                }

                State::Prefix(prefix) => {
                    if is_name(symbol.ch) {
                        self.state = State::Name(prefix);
                        self.grow(symbol);
                        return;
                    }
                    // A backslash is not a terminator here: `#\` is the
                    // start of a word, not an identifier then a tag.
                    if is_space(symbol.ch) || matches!(symbol.ch, '\n' | '\r' | '{' | '}') {
                        self.flush();
                    } else {
                        self.state = State::Word;
                        self.grow(symbol);
                        return;
                    }
                }

                State::Name(_) => {
                    if is_name(symbol.ch) {
                        self.grow(symbol);
                        return;
                    }
                    if is_terminator(symbol.ch) {
                        self.flush();
                    } else {
                        // A name run touching a non-name character is no
                        // longer a name at all, only a word.
                        self.state = State::Word;
                        self.grow(symbol);
                        return;
                    }
                }

                State::Word => {
                    if is_terminator(symbol.ch) {
                        self.flush();
                    } else {
                        self.grow(symbol);
                        return;
                    }
                }
            }
        }
    }

    /// Signal end of input and take the accumulated tokens.
    pub fn finish(mut self) -> Vec<Token> {
        self.flush();
        self.tokens
    }

    /// Enter a buffering state on this symbol.
    fn begin(&mut self, state: State, symbol: Symbol) {
        self.state = state;
        self.buffer.push(symbol.ch);
        self.span = symbol.span;
    }

    /// Extend the current buffer with this symbol.
    fn grow(&mut self, symbol: Symbol) {
        self.buffer.push(symbol.ch);
        self.span = self.span.concat(symbol.span);
    }

    fn emit(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token::new(kind, span));
    }

    /// Finalize the buffered run as a token and return to `Start`.
    fn flush(&mut self) {
        if self.state == State::Start {
            return;
        }
        let buffer = std::mem::take(&mut self.buffer);
        let kind = match self.state {
            State::Start => unreachable!(),
            State::Space => TokenKind::Space(buffer),
            State::CarriageReturn => TokenKind::NewLine(buffer),
            // A bare prefix or an interrupted word is just a word.
            State::Prefix(_) | State::Word => TokenKind::Word(buffer),
            State::Name(prefix) => {
                let name = buffer[1..].to_string();
                match prefix {
                    Prefix::Tag => TokenKind::Tag(name),
                    Prefix::Identifier => TokenKind::Identifier(name),
                    Prefix::Class => TokenKind::Class(name),
                }
            }
        };
        let span = self.span;
        self.state = State::Start;
        self.span = Span::UNKNOWN;
        self.emit(kind, span);
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
