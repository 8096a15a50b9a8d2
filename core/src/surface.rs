//! Editor surface abstraction and an in-memory reference implementation.
//!
//! `EditorSurface` is the seam between the engine and whatever host editor
//! embeds it: the engine only ever asks for cursor positions and line text,
//! and hands back atomic edit batches. `ScratchBuffer` implements the trait
//! over a plain line vector and doubles as the change-record source for
//! tests and the demo binary, so the full gesture loop can run without any
//! host attached.
//!
//! Buffer columns are Unicode scalar counts (see `span`), so all slicing
//! here goes through char-to-byte conversion rather than byte offsets.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::span::{ContentChange, EditSpan, Position, TextEdit};

/// Host editor operations the engine consumes.
pub trait EditorSurface {
    /// Active cursor positions, in selection order.
    fn cursors(&self) -> Vec<Position>;

    /// Number of lines in the document.
    fn line_count(&self) -> u32;

    /// Text of the given line, without its terminator.
    fn line_text(&self, line: u32) -> Option<String>;

    /// Text of the current selection (empty when nothing is selected).
    fn selection_text(&self) -> String;

    /// Path of the backing document, if it has one.
    fn document_path(&self) -> Option<&Path>;

    /// Persist the document.
    fn save(&mut self) -> Result<()>;

    /// Apply an edit batch atomically. All edit positions refer to the
    /// buffer state before the batch. Returns the resulting change records
    /// in application order, ready to feed to a `Composer`.
    fn apply(&mut self, edits: Vec<TextEdit>) -> Vec<ContentChange>;

    /// Move every cursor down by the given number of lines, clamped to the
    /// last line.
    fn move_cursors_down(&mut self, lines: u32);
}

/// In-memory text buffer implementing `EditorSurface`.
#[derive(Debug, Clone, Default)]
pub struct ScratchBuffer {
    lines: Vec<String>,
    cursors: Vec<Position>,
    selection: Option<EditSpan>,
    path: Option<PathBuf>,
    save_count: usize,
}

impl ScratchBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursors: vec![Position::new(0, 0)],
            selection: None,
            path: None,
            save_count: 0,
        }
    }

    /// Build a buffer from seed text; the cursor starts at the origin.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = if text.is_empty() {
            vec![String::new()]
        } else {
            text.split('\n').map(|l| l.to_string()).collect()
        };
        Self {
            lines,
            cursors: vec![Position::new(0, 0)],
            selection: None,
            path: None,
            save_count: 0,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn set_cursors(&mut self, cursors: Vec<Position>) {
        self.cursors = cursors;
    }

    pub fn set_selection(&mut self, selection: Option<EditSpan>) {
        self.selection = selection;
    }

    /// Full buffer text joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Simulate the user typing `text` at every cursor, one change record
    /// per cursor in selection order, advancing each cursor past the text.
    pub fn type_text(&mut self, text: &str) -> Vec<ContentChange> {
        let cursors = self.cursors.clone();
        let mut changes = Vec::with_capacity(cursors.len());
        for at in cursors {
            changes.extend(self.apply(vec![TextEdit::insert(at, text.to_string())]));
        }
        changes
    }

    fn apply_one(&mut self, edit: &TextEdit) -> Option<ContentChange> {
        match edit {
            TextEdit::Insert { at, text } => {
                let line = self.lines.get_mut(at.line as usize)?;
                let byte = char_to_byte(line, at.character)?;
                line.insert_str(byte, text);
                let delta = text.chars().count() as i32;
                self.shift_cursors(*at, delta);
                Some(ContentChange::insert(*at, text.clone()))
            }
            TextEdit::Replace { span, text } => {
                // Replacement spans are single-line by construction here;
                // composition only ever replaces two adjacent characters.
                if span.start.line != span.end.line {
                    return None;
                }
                let line = self.lines.get_mut(span.start.line as usize)?;
                let start = char_to_byte(line, span.start.character)?;
                let end = char_to_byte(line, span.end.character)?;
                let removed = (span.end.character - span.start.character) as i32;
                line.replace_range(start..end, text);
                let delta = text.chars().count() as i32 - removed;
                self.shift_cursors(span.start, delta);
                Some(ContentChange::new(*span, text.clone()))
            }
        }
    }

    /// Shift cursors on the edited line that sit at or after the edit point.
    fn shift_cursors(&mut self, at: Position, delta: i32) {
        for cursor in &mut self.cursors {
            if cursor.line == at.line && cursor.character >= at.character {
                *cursor = cursor.translate(0, delta);
            }
        }
    }
}

impl EditorSurface for ScratchBuffer {
    fn cursors(&self) -> Vec<Position> {
        self.cursors.clone()
    }

    fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    fn line_text(&self, line: u32) -> Option<String> {
        self.lines.get(line as usize).cloned()
    }

    fn selection_text(&self) -> String {
        let span = match self.selection {
            Some(span) => span,
            None => return String::new(),
        };
        if span.start.line == span.end.line {
            let line = match self.lines.get(span.start.line as usize) {
                Some(line) => line,
                None => return String::new(),
            };
            return slice_chars(line, span.start.character, span.end.character);
        }

        let mut parts = Vec::new();
        for line_no in span.start.line..=span.end.line {
            let line = match self.lines.get(line_no as usize) {
                Some(line) => line,
                None => break,
            };
            let text = if line_no == span.start.line {
                slice_chars(line, span.start.character, line.chars().count() as u32)
            } else if line_no == span.end.line {
                slice_chars(line, 0, span.end.character)
            } else {
                line.clone()
            };
            parts.push(text);
        }
        parts.join("\n")
    }

    fn document_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn save(&mut self) -> Result<()> {
        self.save_count += 1;
        Ok(())
    }

    fn apply(&mut self, edits: Vec<TextEdit>) -> Vec<ContentChange> {
        // Apply from the back of the document forward so earlier positions in
        // the batch stay valid; report the records in batch-coordinate order.
        let mut ordered: Vec<(usize, TextEdit)> = edits.into_iter().enumerate().collect();
        ordered.sort_by(|a, b| b.1.start().cmp(&a.1.start()));

        let mut changes: Vec<(usize, ContentChange)> = Vec::with_capacity(ordered.len());
        for (index, edit) in ordered {
            if let Some(change) = self.apply_one(&edit) {
                changes.push((index, change));
            }
        }
        changes.sort_by_key(|(index, _)| *index);
        changes.into_iter().map(|(_, change)| change).collect()
    }

    fn move_cursors_down(&mut self, lines: u32) {
        let last_line = self.line_count().saturating_sub(1);
        for cursor in &mut self.cursors {
            cursor.line = (cursor.line + lines).min(last_line);
        }
    }
}

/// Byte offset of the given character column, or `None` past end of line.
fn char_to_byte(line: &str, character: u32) -> Option<usize> {
    let mut count = 0u32;
    for (byte, _) in line.char_indices() {
        if count == character {
            return Some(byte);
        }
        count += 1;
    }
    if count == character {
        Some(line.len())
    } else {
        None
    }
}

fn slice_chars(line: &str, start: u32, end: u32) -> String {
    line.chars()
        .skip(start as usize)
        .take(end.saturating_sub(start) as usize)
        .collect()
}
