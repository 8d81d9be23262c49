//! Token-to-event parser for unidoc.
//!
//! A pushdown automaton over the token stream from `unidoc-lexer`.
//! Tag heads are disambiguated into singletons or blocks, adjacent
//! content tokens coalesce into single events, and anything left open
//! at end of input is force-closed in LIFO order. The output stream is
//! always well-formed; the only fatal case is a stray `}` with no open
//! block to match it.

use unidoc_lexer::{Location, Scanner, Span, Token, TokenKind};

use crate::event::{ContentEvent, Event, TagEvent};
use crate::path::{Path, TagFrame, BLOCK_NAME};
use crate::ParseError;

/// A run of content being coalesced, not yet emitted.
#[derive(Debug, Clone)]
struct Pending {
    whitespace: bool,
    text: String,
    span: Span,
}

/// A tag head still accumulating identifier and class tokens.
///
/// `held` buffers whitespace seen inside the head. It is a separator if
/// more head components follow, parent content if the head turns out to
/// be a singleton, and dropped if the head opens a block.
#[derive(Debug)]
struct Head {
    frame: TagFrame,
    held: Option<Pending>,
}

/// One level of the parse stack.
#[derive(Debug)]
enum Frame {
    /// Content of the synthesized document root.
    Root(TagFrame),
    /// Content of a `{...}` block body.
    Block(TagFrame),
    /// A tag head not yet resolved to singleton or block.
    Head(Head),
}

/// unidoc event parser.
///
/// Consumes tokens and emits [`Event`]s, each stamped with its span and
/// a snapshot of its ancestor [`Path`]. If the stream opens with a tag
/// head, that tag is adopted as the root unchanged; otherwise a root
/// named `document` is synthesized around the whole stream.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    stack: Vec<Frame>,
    path: Path,
    pending: Option<Pending>,
    events: Vec<Event>,
    last_location: Location,
}

impl Parser {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            stack: Vec::new(),
            path: Path::stream(),
            pending: None,
            events: Vec::new(),
            last_location: Location::start(),
        }
    }

    /// Parse source text into an event stream.
    pub fn parse(source: &str) -> Result<Vec<Event>, ParseError> {
        Self::parse_tokens(Scanner::tokenize(source))
    }

    /// Parse an already-lexed token stream.
    pub fn parse_tokens(tokens: Vec<Token>) -> Result<Vec<Event>, ParseError> {
        let mut parser = Parser::new(tokens);
        parser.run()?;
        Ok(parser.events)
    }

    fn run(&mut self) -> Result<(), ParseError> {
        self.open_root();
        while self.pos < self.tokens.len() {
            self.step()?;
        }
        self.finish();
        Ok(())
    }

    /// Synthesize the document root, unless the stream opens with a tag
    /// head of its own, which becomes the root unchanged.
    fn open_root(&mut self) {
        let span = match self.tokens.first() {
            Some(token) if matches!(token.kind, TokenKind::Tag(_)) => return,
            Some(token) => token.span.snap_to_start(),
            None => Span::point(Location::start()),
        };
        let frame = TagFrame::document(span);
        let start = self.tag_event(&frame, frame.span);
        self.events.push(Event::StartTag(start));
        self.path.push(frame.clone());
        self.stack.push(Frame::Root(frame));
    }

    fn step(&mut self) -> Result<(), ParseError> {
        match self.stack.last() {
            Some(Frame::Head(_)) => {
                self.head_token();
                Ok(())
            }
            _ => self.content_token(),
        }
    }

    /// Advance the unresolved tag head on top of the stack.
    fn head_token(&mut self) {
        let token = self.tokens[self.pos].clone();
        let span = token.span;
        match token.kind {
            TokenKind::Identifier(name) => {
                let head = self.head_mut();
                head.held = None;
                head.frame.identifier = Some(name);
                head.frame.span = head.frame.span.concat(span);
                self.consume();
            }
            TokenKind::Class(name) => {
                let head = self.head_mut();
                head.held = None;
                head.frame.classes.push(name);
                head.frame.span = head.frame.span.concat(span);
                self.consume();
            }
            TokenKind::Space(raw) | TokenKind::NewLine(raw) => {
                let head = self.head_mut();
                match &mut head.held {
                    Some(held) => {
                        held.text.push_str(&raw);
                        held.span = held.span.concat(span);
                    }
                    None => {
                        head.held = Some(Pending {
                            whitespace: true,
                            text: raw,
                            span,
                        });
                    }
                }
                self.consume();
            }
            TokenKind::BlockStart => {
                // Resolved: a block tag. Held whitespace was only a
                // separator and is dropped, not block content.
                let head = self.pop_head();
                let frame = head.frame;
                let start = self.tag_event(&frame, frame.span);
                self.events.push(Event::StartTag(start));
                self.path.push(frame.clone());
                self.stack.push(Frame::Block(frame));
                self.consume();
            }
            TokenKind::Word(_) | TokenKind::Tag(_) | TokenKind::BlockEnd => {
                // Resolved: a singleton. The token is reprocessed in the
                // parent scope on the next step.
                let head = self.pop_head();
                self.close_singleton(head);
            }
        }
    }

    /// Dispatch a token inside root, block, or stream-level content.
    fn content_token(&mut self) -> Result<(), ParseError> {
        let token = self.tokens[self.pos].clone();
        let span = token.span;
        match token.kind {
            TokenKind::Word(raw) => {
                self.gather(false, raw, span);
                self.consume();
            }
            TokenKind::Space(raw) | TokenKind::NewLine(raw) => {
                self.gather(true, raw, span);
                self.consume();
            }
            // A prefixed name outside a tag head is plain prose.
            TokenKind::Identifier(name) => {
                self.gather(false, format!("#{name}"), span);
                self.consume();
            }
            TokenKind::Class(name) => {
                self.gather(false, format!(".{name}"), span);
                self.consume();
            }
            TokenKind::Tag(name) => {
                self.flush_pending();
                self.stack.push(Frame::Head(Head {
                    frame: TagFrame::new(name, span),
                    held: None,
                }));
                self.consume();
            }
            TokenKind::BlockStart => {
                self.flush_pending();
                let frame = TagFrame::new(BLOCK_NAME, span);
                let start = self.tag_event(&frame, frame.span);
                self.events.push(Event::StartTag(start));
                self.path.push(frame.clone());
                self.stack.push(Frame::Block(frame));
                self.consume();
            }
            TokenKind::BlockEnd => {
                self.flush_pending();
                match self.stack.last() {
                    Some(Frame::Block(_)) => {
                        let Some(Frame::Block(frame)) = self.stack.pop() else {
                            unreachable!()
                        };
                        self.path.pop();
                        let end = self.tag_event(&frame, span);
                        self.events.push(Event::EndTag(end));
                        self.consume();
                    }
                    _ => return Err(self.error("unmatched '}'".into(), span.from)),
                }
            }
        }
        Ok(())
    }

    /// Close every open frame in LIFO order. A missing `}` is tolerated,
    /// never an error.
    fn finish(&mut self) {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Head(head) => self.close_singleton(head),
                Frame::Root(frame) | Frame::Block(frame) => {
                    self.flush_pending();
                    self.path.pop();
                    let end = self.tag_event(&frame, Span::point(self.last_location));
                    self.events.push(Event::EndTag(end));
                }
            }
        }
        self.flush_pending();
    }

    /// Emit the head as a singleton tag. Its held whitespace becomes
    /// pending content of the parent scope.
    fn close_singleton(&mut self, head: Head) {
        let start = self.tag_event(&head.frame, head.frame.span);
        let end = self.tag_event(&head.frame, head.frame.span.snap_to_end());
        self.events.push(Event::StartTag(start));
        self.events.push(Event::EndTag(end));
        self.pending = head.held;
    }

    /// Coalesce a content run into the pending event, flushing first if
    /// the run kind changes.
    fn gather(&mut self, whitespace: bool, text: String, span: Span) {
        match &mut self.pending {
            Some(pending) if pending.whitespace == whitespace => {
                pending.text.push_str(&text);
                pending.span = pending.span.concat(span);
            }
            _ => {
                self.flush_pending();
                self.pending = Some(Pending {
                    whitespace,
                    text,
                    span,
                });
            }
        }
    }

    fn flush_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            let content = ContentEvent {
                text: pending.text,
                span: pending.span,
                path: self.path.clone(),
            };
            self.events.push(if pending.whitespace {
                Event::Whitespace(content)
            } else {
                Event::Word(content)
            });
        }
    }

    fn tag_event(&self, frame: &TagFrame, span: Span) -> TagEvent {
        TagEvent {
            name: frame.name.clone(),
            identifier: frame.identifier.clone(),
            classes: frame.classes.clone(),
            span,
            path: self.path.clone(),
        }
    }

    fn head_mut(&mut self) -> &mut Head {
        match self.stack.last_mut() {
            Some(Frame::Head(head)) => head,
            _ => unreachable!("head dispatch without a head frame"),
        }
    }

    fn pop_head(&mut self) -> Head {
        match self.stack.pop() {
            Some(Frame::Head(head)) => head,
            _ => unreachable!("head dispatch without a head frame"),
        }
    }

    fn consume(&mut self) {
        self.last_location = self.tokens[self.pos].span.to;
        self.pos += 1;
    }

    fn error(&self, message: String, at: Location) -> ParseError {
        ParseError {
            message,
            line: at.line,
            column: at.column,
        }
    }
}
