//! Interactive composition demo.
//!
//! Reads lines from stdin and simulates typing them into an in-memory
//! buffer with the composer attached, so `\r` becomes `↑`, `\w` becomes
//! `𝕨`, and so on. Prefix a line with `?` to look up hover help for its
//! first character instead.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use libbqn::{bqn_docs, BqnConfig, BqnSession, ProcessSpawner, ScratchBuffer};

#[derive(Parser)]
#[command(name = "libbqn", about = "Interactive BQN glyph composition demo")]
struct Args {
    /// TOML configuration file (executable path, delays, flags).
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => BqnConfig::load_toml(path)?,
        None => BqnConfig::default(),
    };
    let mut session = BqnSession::new(config, ProcessSpawner);

    println!("Type text with backslash sequences (\\r → ↑); ?<glyph> for help; Ctrl-D quits.");
    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        print!("bqn> ");
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches('\n');

        if let Some(rest) = line.strip_prefix('?') {
            match bqn_docs().hover(rest, 0) {
                Some(help) => println!("{help}"),
                None => println!("no help found"),
            }
            continue;
        }

        let mut buffer = ScratchBuffer::new();
        for ch in line.chars() {
            if ch == '\\' {
                session.backslash(&mut buffer);
            } else {
                let changes = buffer.type_text(&ch.to_string());
                for change in &changes {
                    session.notify_change(change, &mut buffer);
                }
            }
        }
        println!("{}", buffer.text());
    }
    Ok(())
}
