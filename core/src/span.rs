//! Buffer positions, edit spans, and edit/change records.
//!
//! Positions are (line, character) pairs where `character` counts Unicode
//! scalar values, not bytes or UTF-16 code units. A glyph outside the Basic
//! Multilingual Plane (e.g. 𝕨) therefore occupies exactly one position,
//! which keeps span arithmetic uniform across the whole table.

/// A position in a text buffer: zero-based line and character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Return a position offset by the given line/character deltas.
    ///
    /// Saturates at zero rather than wrapping; callers never translate past
    /// the buffer origin on purpose.
    pub fn translate(&self, line_delta: i32, character_delta: i32) -> Self {
        Self {
            line: self.line.saturating_add_signed(line_delta),
            character: self.character.saturating_add_signed(character_delta),
        }
    }
}

/// A half-open range over buffer positions: `[start, end)`.
///
/// Composition replacements always cover exactly the two inserted characters
/// (trigger character plus key), but the type itself carries no such policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditSpan {
    pub start: Position,
    pub end: Position,
}

impl EditSpan {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty span at a single position (used for pure insertions).
    pub fn at(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One buffer-change record as delivered by the host, in application order.
///
/// `span` is the range that was replaced (empty for a pure insertion) and
/// `text` is the text that now occupies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub span: EditSpan,
    pub text: String,
}

impl ContentChange {
    pub fn new(span: EditSpan, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// An insertion of `text` at `position`.
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self {
            span: EditSpan::at(position),
            text: text.into(),
        }
    }

    /// Number of Unicode scalar values in the inserted text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// An edit command issued back to the host editor surface.
///
/// A `Vec<TextEdit>` batch is applied atomically: all positions refer to the
/// buffer state before the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Insert `text` at `at`, shifting the rest of the line right.
    Insert { at: Position, text: String },
    /// Replace the text in `span` with `text`.
    Replace { span: EditSpan, text: String },
}

impl TextEdit {
    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self::Insert {
            at,
            text: text.into(),
        }
    }

    pub fn replace(span: EditSpan, text: impl Into<String>) -> Self {
        Self::Replace {
            span,
            text: text.into(),
        }
    }

    /// Start position of the edit, used for ordering within a batch.
    pub fn start(&self) -> Position {
        match self {
            Self::Insert { at, .. } => *at,
            Self::Replace { span, .. } => span.start,
        }
    }
}
