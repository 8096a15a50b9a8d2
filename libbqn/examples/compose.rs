//! Minimal embedding example: drive one composition gesture by hand.

use libbqn::{bqn_keymap, ComposeOutcome, Composer, ContentChange, Position};

fn main() {
    let mut composer = Composer::new(bqn_keymap());

    // User hits the backslash command with one cursor at (0, 0).
    let origin = Position::new(0, 0);
    let inserts = composer.trigger(&[origin]);
    println!("host applies: {inserts:?}");

    // The host reports the backslash self-insert, then the typed key.
    composer.observe(&ContentChange::insert(origin, "\\"));
    match composer.observe(&ContentChange::insert(Position::new(0, 1), "r")) {
        ComposeOutcome::Apply(batch) => {
            for (span, glyph) in batch {
                println!("replace {:?}..{:?} with {glyph}", span.start, span.end);
            }
        }
        other => println!("gesture ended with {other:?}"),
    }
}
