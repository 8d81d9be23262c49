use unidoc_lexer::Span;

/// Name of the implicit root tag.
pub const DOCUMENT_NAME: &str = "document";

/// Name given to anonymous `{...}` blocks.
pub const BLOCK_NAME: &str = "block";

/// One tag's identity on the ancestor chain: name, optional identifier,
/// class set, and the span of its head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFrame {
    pub name: String,
    pub identifier: Option<String>,
    pub classes: Vec<String>,
    pub span: Span,
}

impl TagFrame {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            identifier: None,
            classes: Vec::new(),
            span,
        }
    }

    /// The frame of an implicit `document` root.
    pub fn document(span: Span) -> Self {
        Self::new(DOCUMENT_NAME, span)
    }
}

/// A single element of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElement {
    /// The enclosing stream itself, the bottom of every path.
    Stream,
    /// An open tag.
    Tag(TagFrame),
}

/// The ordered ancestor chain active at a point in the event stream.
///
/// The path attached to an event lists the event's ancestors only, never
/// the tag the event itself opens or closes. Equality and cloning are
/// structural, so snapshots compare by content in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// The path of a bare stream: just the stream frame.
    pub fn stream() -> Self {
        Self {
            elements: vec![PathElement::Stream],
        }
    }

    pub fn push(&mut self, frame: TagFrame) {
        self.elements.push(PathElement::Tag(frame));
    }

    pub fn pop(&mut self) -> Option<PathElement> {
        self.elements.pop()
    }

    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Number of frames on the chain, the stream frame included.
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    /// Insert a root frame directly above the stream frame, below
    /// everything else. Used when a stream is re-parented under a root
    /// that its events did not know about when they were emitted.
    pub fn insert_root(&mut self, frame: TagFrame) {
        let at = usize::from(self.elements.first() == Some(&PathElement::Stream));
        self.elements.insert(at, PathElement::Tag(frame));
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::stream()
    }
}
