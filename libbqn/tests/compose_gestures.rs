use libbqn::{
    BqnConfig, BqnSession, ComposeState, EditorSurface, Position, ProcessSpawner, ScratchBuffer,
    TextEdit,
};

/// End-to-end gesture tests over the in-memory buffer.
///
/// These exercise the full loop a host would run: the backslash command
/// applies the visual inserts, the buffer reports each change record in
/// application order, and the session feeds them back to the composer,
/// applying the replacement batch when the gesture resolves. The canonical
/// BQN keymap is used throughout, so `r` composes to `↑` and keys like `y`
/// stay literal.

fn session() -> BqnSession<ProcessSpawner> {
    BqnSession::new(BqnConfig::default(), ProcessSpawner)
}

fn type_text(session: &mut BqnSession<ProcessSpawner>, buffer: &mut ScratchBuffer, text: &str) {
    for ch in text.chars() {
        let changes = buffer.type_text(&ch.to_string());
        for change in &changes {
            session.notify_change(change, buffer);
        }
    }
}

#[test]
fn mapped_key_replaces_backslash_span() {
    let mut session = session();
    let mut buffer = ScratchBuffer::new();

    session.backslash(&mut buffer);
    assert_eq!(buffer.text(), "\\");
    type_text(&mut session, &mut buffer, "r");

    assert_eq!(buffer.text(), "↑");
    assert_eq!(session.composer().state(), ComposeState::Idle);
}

#[test]
fn gesture_mid_line_places_glyph_at_trigger_position() {
    let mut session = session();
    let mut buffer = ScratchBuffer::from_text("line0\nline1\nline2\nabcdefgh");
    buffer.set_cursors(vec![Position::new(3, 5)]);

    session.backslash(&mut buffer);
    assert_eq!(buffer.line_text(3).unwrap(), "abcde\\fgh");
    type_text(&mut session, &mut buffer, "w");

    assert_eq!(buffer.line_text(3).unwrap(), "abcde𝕨fgh");
    // The cursor ends just past the composed glyph.
    assert_eq!(buffer.cursors(), vec![Position::new(3, 6)]);
}

#[test]
fn unmapped_key_leaves_literal_pair() {
    let mut session = session();
    let mut buffer = ScratchBuffer::new();

    session.backslash(&mut buffer);
    type_text(&mut session, &mut buffer, "y");

    assert_eq!(buffer.text(), "\\y");
    assert_eq!(session.composer().state(), ComposeState::Idle);
}

#[test]
fn multi_cursor_composes_every_span() {
    let mut session = session();
    let mut buffer = ScratchBuffer::from_text("a\nbb\nccc");
    buffer.set_cursors(vec![
        Position::new(0, 1),
        Position::new(1, 2),
        Position::new(2, 3),
    ]);

    session.backslash(&mut buffer);
    type_text(&mut session, &mut buffer, "s");

    assert_eq!(buffer.text(), "a𝕤\nbb𝕤\nccc𝕤");
    assert_eq!(session.composer().state(), ComposeState::Idle);
}

#[test]
fn multi_cursor_mixed_mapped_and_unmapped() {
    // One cursor types into a mapped slot, typing continues with an
    // unmapped key for the other: only the mapped span is replaced.
    let mut session = session();
    let mut buffer = ScratchBuffer::from_text("x\ny");
    buffer.set_cursors(vec![Position::new(0, 1), Position::new(1, 1)]);

    session.backslash(&mut buffer);
    assert_eq!(buffer.text(), "x\\\ny\\");

    // Feed the two key insertions by hand so the cursors get different keys.
    let first = buffer.cursors()[0];
    let mut changes = buffer.apply(vec![TextEdit::insert(first, "z")]);
    let second = buffer.cursors()[1];
    changes.extend(buffer.apply(vec![TextEdit::insert(second, "y")]));
    for change in &changes {
        session.notify_change(change, &mut buffer);
    }

    assert_eq!(buffer.text(), "x⥊\ny\\y");
    assert_eq!(session.composer().state(), ComposeState::Idle);
}

#[test]
fn retrigger_while_pending_stays_single_flight() {
    let mut session = session();
    let mut buffer = ScratchBuffer::new();

    session.backslash(&mut buffer);
    assert!(session.composer().is_pending());

    // Second backslash while the gesture is open: only the visual insert.
    // Its change record arrives in the key phase, and since backslash maps
    // to itself, the gesture resolves to a single literal backslash.
    session.backslash(&mut buffer);
    assert_eq!(buffer.text(), "\\");
    assert_eq!(session.composer().state(), ComposeState::Idle);

    // A fresh gesture still works afterwards.
    session.backslash(&mut buffer);
    type_text(&mut session, &mut buffer, "r");
    assert_eq!(buffer.text(), "\\↑");
}

#[test]
fn unexpected_edit_aborts_and_requires_fresh_trigger() {
    let mut session = session();
    let mut buffer = ScratchBuffer::new();

    session.backslash(&mut buffer);

    // An autocomplete-style multi-character insertion lands mid-gesture.
    let changes = buffer.type_text("each");
    session.notify_change(&changes[0], &mut buffer);
    assert_eq!(session.composer().state(), ComposeState::Idle);

    // A now-valid key neither composes nor crashes: the gesture is gone.
    type_text(&mut session, &mut buffer, "r");
    assert_eq!(buffer.text(), "\\eachr");
}

#[test]
fn zero_cursors_is_a_noop() {
    let mut session = session();
    let mut buffer = ScratchBuffer::new();
    buffer.set_cursors(vec![]);

    session.backslash(&mut buffer);
    assert_eq!(buffer.text(), "");
    assert!(!session.composer().is_pending());
}
