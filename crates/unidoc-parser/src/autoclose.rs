//! Stream-level forced closing.
//!
//! [`AutoCloser`] re-derives the open-tag stack from the event stream
//! itself, independent of whatever produced it, and closes anything
//! still open when the stream ends. On a stream that is already
//! well-formed it is the identity.

use unidoc_lexer::{Location, Span};

use crate::event::{Event, TagEvent};

/// Closes unterminated tags at end of stream, innermost first.
pub struct AutoCloser {
    open: Vec<TagEvent>,
    last: Location,
    out: Vec<Event>,
}

impl AutoCloser {
    pub fn new() -> Self {
        Self {
            open: Vec::new(),
            last: Location::UNKNOWN,
            out: Vec::new(),
        }
    }

    /// Repair a whole stream in one call.
    pub fn close(events: Vec<Event>) -> Vec<Event> {
        let mut closer = AutoCloser::new();
        for event in events {
            closer.push(event);
        }
        closer.finish()
    }

    /// Feed the next event through.
    pub fn push(&mut self, event: Event) {
        match &event {
            Event::StartTag(tag) => self.open.push(tag.clone()),
            Event::EndTag(_) => {
                self.open.pop();
            }
            _ => {}
        }
        if !event.span().to.is_unknown() {
            self.last = event.span().to;
        }
        self.out.push(event);
    }

    /// Signal end of stream and take the repaired events.
    pub fn finish(mut self) -> Vec<Event> {
        while let Some(tag) = self.open.pop() {
            self.out.push(Event::EndTag(TagEvent {
                name: tag.name,
                identifier: tag.identifier,
                classes: tag.classes,
                span: Span::point(self.last),
                path: tag.path,
            }));
        }
        self.out
    }
}

impl Default for AutoCloser {
    fn default() -> Self {
        Self::new()
    }
}
