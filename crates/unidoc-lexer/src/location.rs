/// An absolute position in source text.
///
/// `line` and `column` are 1-based, `index` is the 0-based code point
/// offset. A position can also be *unknown* (all fields `-1`), which is
/// used for synthesized structure that has no source of its own.
/// Advancing an unknown location is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub line: i32,
    pub column: i32,
    pub index: i32,
}

impl Location {
    /// The unknown position sentinel.
    pub const UNKNOWN: Location = Location {
        line: -1,
        column: -1,
        index: -1,
    };

    pub fn new(line: i32, column: i32, index: i32) -> Self {
        Self {
            line,
            column,
            index,
        }
    }

    /// The position of the first code point of any source: line 1, column 1.
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }

    pub fn is_unknown(&self) -> bool {
        self.line < 0
    }

    /// The position one code point to the right.
    pub fn next_column(&self) -> Self {
        if self.is_unknown() {
            return *self;
        }
        Self::new(self.line, self.column + 1, self.index + 1)
    }

    /// The position at the start of the following line.
    pub fn next_line(&self) -> Self {
        if self.is_unknown() {
            return *self;
        }
        Self::new(self.line + 1, 1, self.index + 1)
    }
}

/// A half-open `[from, to)` range of source positions.
///
/// `from` is the position of the first covered code point and `to` the
/// position just past the last one. Tokens and events each carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub from: Location,
    pub to: Location,
}

impl Span {
    /// A span with both endpoints unknown.
    pub const UNKNOWN: Span = Span {
        from: Location::UNKNOWN,
        to: Location::UNKNOWN,
    };

    pub fn new(from: Location, to: Location) -> Self {
        Self { from, to }
    }

    /// The empty span at a single position.
    pub fn point(at: Location) -> Self {
        Self { from: at, to: at }
    }

    pub fn is_unknown(&self) -> bool {
        self.from.is_unknown() && self.to.is_unknown()
    }

    /// The span covering this span through the end of `other`.
    pub fn concat(&self, other: Span) -> Span {
        Span::new(self.from, other.to)
    }

    /// The empty span at this span's start.
    pub fn snap_to_start(&self) -> Span {
        Span::point(self.from)
    }

    /// The empty span at this span's end.
    pub fn snap_to_end(&self) -> Span {
        Span::point(self.to)
    }
}
