//! Stream-level root wrapping.
//!
//! [`AutoWrapper`] guarantees that a stream begins with a single root
//! `START_TAG` and ends with its matching `END_TAG`. A stream that
//! already opens with a `document` root passes through unchanged; any
//! other stream is wrapped in a synthesized `document` root, and every
//! wrapped event has the root frame spliced into its ancestor path.
//!
//! Content appearing after the root has closed (a singleton `\document`
//! head followed by prose) is pulled back inside the root and the close
//! is re-emitted at the very end.

use unidoc_lexer::{Location, Span};

use crate::event::{Event, TagEvent};
use crate::path::{Path, TagFrame, DOCUMENT_NAME};

/// Wrapper progress over the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WrapState {
    /// Buffering whitespace until the first substantial event decides
    /// between pass-through and wrapping.
    LeadingWhitespace,
    /// Passing through a stream that opened with its own root.
    Document,
    /// The upstream root just closed; its end event is held back in
    /// case more content follows.
    JustClosed,
    /// Wrapping: every event is re-pathed under the root frame.
    Stream,
}

/// Guarantees exactly one root around the whole stream.
pub struct AutoWrapper {
    state: WrapState,
    buffered: Vec<Event>,
    root: Option<TagFrame>,
    held_end: Option<TagEvent>,
    depth: usize,
    last: Location,
    out: Vec<Event>,
}

impl AutoWrapper {
    pub fn new() -> Self {
        Self {
            state: WrapState::LeadingWhitespace,
            buffered: Vec::new(),
            root: None,
            held_end: None,
            depth: 0,
            last: Location::UNKNOWN,
            out: Vec::new(),
        }
    }

    /// Wrap a whole stream in one call.
    pub fn wrap(events: Vec<Event>) -> Vec<Event> {
        let mut wrapper = AutoWrapper::new();
        for event in events {
            wrapper.push(event);
        }
        wrapper.finish()
    }

    /// Feed the next event through.
    pub fn push(&mut self, event: Event) {
        if !event.span().to.is_unknown() {
            self.last = event.span().to;
        }
        match self.state {
            WrapState::LeadingWhitespace => self.first_event(event),
            WrapState::Document => match &event {
                Event::StartTag(_) => {
                    self.depth += 1;
                    self.out.push(event);
                }
                Event::EndTag(tag) => {
                    if self.depth == 0 {
                        self.held_end = Some(tag.clone());
                        self.state = WrapState::JustClosed;
                    } else {
                        self.depth -= 1;
                        self.out.push(event);
                    }
                }
                _ => self.out.push(event),
            },
            WrapState::JustClosed => {
                self.state = WrapState::Stream;
                self.adopt(event);
            }
            WrapState::Stream => self.adopt(event),
        }
    }

    /// Signal end of stream and take the wrapped events.
    pub fn finish(mut self) -> Vec<Event> {
        match self.state {
            WrapState::LeadingWhitespace => {
                // Nothing but whitespace ever arrived.
                let span = self
                    .buffered
                    .first()
                    .map(|e| e.span().snap_to_start())
                    .unwrap_or_else(|| Span::point(Location::start()));
                let frame = TagFrame::document(span);
                self.out.push(Event::StartTag(Self::root_tag(&frame, frame.span)));
                self.flush_buffered(&frame);
                let at = if self.last.is_unknown() {
                    span
                } else {
                    Span::point(self.last)
                };
                self.out.push(Event::EndTag(Self::root_tag(&frame, at)));
            }
            WrapState::Document => {
                // The upstream root never closed; close it here.
                let frame = self.root.take().expect("document state implies a root");
                self.out
                    .push(Event::EndTag(Self::root_tag(&frame, Span::point(self.last))));
            }
            WrapState::JustClosed => {
                let end = self.held_end.take().expect("just-closed holds an end");
                self.out.push(Event::EndTag(end));
            }
            WrapState::Stream => {
                let end = match self.held_end.take() {
                    Some(mut end) => {
                        end.span = Span::point(self.last);
                        end
                    }
                    None => {
                        let frame = self.root.take().expect("stream state implies a root");
                        Self::root_tag(&frame, Span::point(self.last))
                    }
                };
                self.out.push(Event::EndTag(end));
            }
        }
        self.out
    }

    /// Handle the first non-whitespace event: pass through an explicit
    /// `document` root, wrap anything else.
    fn first_event(&mut self, event: Event) {
        if event.is_whitespace() {
            self.buffered.push(event);
            return;
        }
        match event {
            Event::StartTag(tag) if tag.name == DOCUMENT_NAME => {
                let frame = TagFrame {
                    name: tag.name.clone(),
                    identifier: tag.identifier.clone(),
                    classes: tag.classes.clone(),
                    span: tag.span,
                };
                self.out.push(Event::StartTag(tag));
                self.flush_buffered(&frame);
                self.root = Some(frame);
                self.depth = 0;
                self.state = WrapState::Document;
            }
            event => {
                let frame = TagFrame::document(event.span().snap_to_start());
                self.out.push(Event::StartTag(Self::root_tag(&frame, frame.span)));
                self.flush_buffered(&frame);
                self.root = Some(frame);
                self.state = WrapState::Stream;
                self.adopt(event);
            }
        }
    }

    /// Re-path an event under the root frame and emit it.
    fn adopt(&mut self, mut event: Event) {
        let frame = self.root.as_ref().expect("adoption requires a root");
        event.path_mut().insert_root(frame.clone());
        self.out.push(event);
    }

    /// Emit buffered leading whitespace as the root's first children.
    fn flush_buffered(&mut self, frame: &TagFrame) {
        let buffered = std::mem::take(&mut self.buffered);
        for mut event in buffered {
            event.path_mut().insert_root(frame.clone());
            self.out.push(event);
        }
    }

    /// A root boundary event payload: the root's ancestor chain is just
    /// the stream frame.
    fn root_tag(frame: &TagFrame, span: Span) -> TagEvent {
        TagEvent {
            name: frame.name.clone(),
            identifier: frame.identifier.clone(),
            classes: frame.classes.clone(),
            span,
            path: Path::stream(),
        }
    }
}

impl Default for AutoWrapper {
    fn default() -> Self {
        Self::new()
    }
}
