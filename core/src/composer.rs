//! Gesture state machine turning trigger-plus-key sequences into glyphs.
//!
//! A gesture starts when the host fires the composition command: the composer
//! inserts a literal trigger character at every cursor so the user sees what
//! they typed, then watches the buffer-change stream. It first consumes the
//! self-insert notifications for those trigger characters (one per cursor),
//! then matches one single-character insertion per cursor against the
//! snapshotted positions. When every cursor has resolved, all replacements go
//! out as one atomic batch; any change that does not fit the expected shape
//! aborts the whole gesture with nothing applied.
//!
//! The machine is driven entirely by arrival order. Notifications are assumed
//! delivered in the order edits were applied; a reordering shows up as an
//! unexpected shape and aborts, which is the safe failure mode.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::keymap::KeyGlyphTable;
use crate::span::{ContentChange, EditSpan, Position, TextEdit};

/// Default composition trigger character.
pub const DEFAULT_TRIGGER: char = '\\';

/// Current state of the composition machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeState {
    /// No gesture in flight.
    Idle,
    /// Waiting for the self-insert notifications of the trigger characters.
    AwaitingSelfInsert,
    /// All self-inserts seen; waiting for one key per cursor.
    AwaitingKeys,
}

/// Result of feeding one change record to the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeOutcome {
    /// No gesture is in flight; the change is none of our business.
    Ignored,
    /// The change was consumed; the gesture is still open.
    Pending,
    /// Every cursor resolved. Apply these replacements as one atomic edit.
    /// The batch may be empty when every key turned out unmapped.
    Apply(Vec<(EditSpan, String)>),
    /// The change did not match the expected shape; the gesture was
    /// discarded with no replacements applied.
    Aborted,
}

/// One cursor being tracked through a gesture.
#[derive(Debug, Clone)]
struct Slot {
    origin: Position,
    open: bool,
}

/// Transient state for one in-flight gesture.
#[derive(Debug, Clone)]
struct PendingComposition {
    slots: Vec<Slot>,
    unseen_self_inserts: usize,
    queued: Vec<(EditSpan, String)>,
}

impl PendingComposition {
    fn new(cursors: &[Position]) -> Self {
        Self {
            slots: cursors
                .iter()
                .map(|&origin| Slot { origin, open: true })
                .collect(),
            unseen_self_inserts: cursors.len(),
            queued: Vec::new(),
        }
    }

    fn open_slot_after(&mut self, position: Position) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| {
            slot.open
                && slot.origin.line == position.line
                && slot.origin.character + 1 == position.character
        })
    }

    fn all_closed(&self) -> bool {
        self.slots.iter().all(|slot| !slot.open)
    }
}

/// The composition engine: owns the key table and at most one gesture.
///
/// Single-flight by construction: a second trigger while a gesture is open
/// only yields the visual trigger-character inserts and leaves the running
/// machine untouched, so two gestures can never track the same change stream.
pub struct Composer {
    table: Arc<KeyGlyphTable>,
    trigger_char: char,
    state: ComposeState,
    pending: Option<PendingComposition>,
}

impl Composer {
    pub fn new(table: Arc<KeyGlyphTable>) -> Self {
        Self::with_trigger(table, DEFAULT_TRIGGER)
    }

    /// Build a composer with a non-default trigger character.
    pub fn with_trigger(table: Arc<KeyGlyphTable>, trigger_char: char) -> Self {
        Self {
            table,
            trigger_char,
            state: ComposeState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> ComposeState {
        self.state
    }

    /// Whether a gesture is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.state != ComposeState::Idle
    }

    /// The key table backing this composer.
    pub fn table(&self) -> &KeyGlyphTable {
        &self.table
    }

    /// Start a gesture for the given cursors.
    ///
    /// Returns the trigger-character inserts the host must apply (one per
    /// cursor). With zero cursors this is a no-op. If a gesture is already in
    /// flight, only the inserts are returned and no new machine starts.
    pub fn trigger(&mut self, cursors: &[Position]) -> Vec<TextEdit> {
        let inserts: Vec<TextEdit> = cursors
            .iter()
            .map(|&at| TextEdit::insert(at, self.trigger_char.to_string()))
            .collect();

        if cursors.is_empty() {
            return inserts;
        }
        if self.is_pending() {
            debug!("composition re-triggered while pending; inserting only");
            return inserts;
        }

        debug!(cursors = cursors.len(), "composition gesture started");
        self.pending = Some(PendingComposition::new(cursors));
        self.state = ComposeState::AwaitingSelfInsert;
        inserts
    }

    /// Feed one buffer-change record to the machine, in delivery order.
    pub fn observe(&mut self, change: &ContentChange) -> ComposeOutcome {
        match self.state {
            ComposeState::Idle => ComposeOutcome::Ignored,
            ComposeState::AwaitingSelfInsert => self.observe_self_insert(change),
            ComposeState::AwaitingKeys => self.observe_key(change),
        }
    }

    /// Discard any in-flight gesture.
    pub fn reset(&mut self) {
        self.pending = None;
        self.state = ComposeState::Idle;
    }

    fn observe_self_insert(&mut self, change: &ContentChange) -> ComposeOutcome {
        let mut chars = change.text.chars();
        if chars.next() != Some(self.trigger_char) || chars.next().is_some() {
            debug!(text = %change.text, "unexpected change during self-insert phase");
            return self.abort();
        }

        let pending = match self.pending.as_mut() {
            Some(pending) => pending,
            None => return self.abort(),
        };
        pending.unseen_self_inserts -= 1;
        if pending.unseen_self_inserts == 0 {
            trace!("all trigger self-inserts seen");
            self.state = ComposeState::AwaitingKeys;
        }
        ComposeOutcome::Pending
    }

    fn observe_key(&mut self, change: &ContentChange) -> ComposeOutcome {
        let mut chars = change.text.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(key), None) => key,
            // Multi-character insertions (snippets, paste, concurrent edits)
            // and empty changes (deletions) are not composition keys.
            _ => {
                debug!(text = %change.text, "non-single-character change; aborting gesture");
                return self.abort();
            }
        };

        let position = change.span.start;
        let pending = match self.pending.as_mut() {
            Some(pending) => pending,
            None => return self.abort(),
        };
        let slot = match pending.open_slot_after(position) {
            Some(slot) => slot,
            None => {
                debug!(?position, "change position matches no open cursor; aborting gesture");
                return self.abort();
            }
        };

        slot.open = false;
        let span = EditSpan::new(slot.origin, position.translate(0, 1));
        match self.table.lookup(key) {
            Some(glyph) => {
                trace!(%key, %glyph, "queued replacement");
                pending.queued.push((span, glyph.to_string()));
            }
            None => {
                // Unmapped key: this cursor keeps its literal trigger+key,
                // the other cursors still compose.
                trace!(%key, "no mapping; cursor abandoned");
            }
        }

        if pending.all_closed() {
            let queued = std::mem::take(&mut pending.queued);
            debug!(replacements = queued.len(), "gesture resolved");
            self.reset();
            ComposeOutcome::Apply(queued)
        } else {
            ComposeOutcome::Pending
        }
    }

    fn abort(&mut self) -> ComposeOutcome {
        self.reset();
        ComposeOutcome::Aborted
    }
}

/// Convert a resolved replacement batch into host edit commands.
pub fn replacements_to_edits(batch: Vec<(EditSpan, String)>) -> Vec<TextEdit> {
    batch
        .into_iter()
        .map(|(span, text)| TextEdit::replace(span, text))
        .collect()
}
