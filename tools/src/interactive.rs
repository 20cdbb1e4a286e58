//! Console demo driving a `Session`.
//!
//! Each input line is a batch of key presses. Plain characters are typed
//! into the composition; a few `:` commands stand for keys a terminal line
//! cannot carry:
//!
//! ```text
//! (empty line)   space, commit the first candidate
//! :1 .. :9       select a candidate on the page
//! :bs            backspace
//! :esc           drop the composition
//! :next / :prev  candidate pages
//! :mode          toggle literal / transcription mode
//! ```

use anyhow::Result;
use scripa_core::{Engine, KeyEvent, KeyResult, Mode, Session};
use std::io::{self, BufRead, Write};

fn parse_command(cmd: &str) -> Option<KeyEvent> {
    match cmd {
        "bs" => Some(KeyEvent::Backspace),
        "esc" => Some(KeyEvent::Escape),
        "next" => Some(KeyEvent::PageDown),
        "prev" => Some(KeyEvent::PageUp),
        "mode" => Some(KeyEvent::ToggleMode),
        _ => match cmd.parse::<u8>() {
            Ok(n @ 1..=9) => Some(KeyEvent::Select(n)),
            _ => None,
        },
    }
}

/// Key events for one console line.
fn line_to_keys(line: &str) -> Vec<KeyEvent> {
    if line.is_empty() {
        return vec![KeyEvent::Space];
    }
    if let Some(cmd) = line.strip_prefix(':') {
        if let Some(key) = parse_command(cmd.trim()) {
            return vec![key];
        }
    }
    line.chars()
        .map(|c| if c == ' ' { KeyEvent::Space } else { KeyEvent::Char(c) })
        .collect()
}

fn render(out: &mut impl Write, session: &Session, committed: &str) -> io::Result<()> {
    let mode = match session.mode() {
        Mode::Literal => "ENG",
        Mode::Transliterate => "IPA",
    };
    writeln!(out, "[{mode}] code: {}", session.preedit())?;

    let list = session.candidates();
    if !list.is_empty() {
        let page: Vec<String> = list
            .current_page_candidates()
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}.{}", i + 1, c))
            .collect();
        writeln!(
            out,
            "  {}  ({}/{})",
            page.join("  "),
            list.current_page() + 1,
            list.num_pages()
        )?;
    }
    writeln!(out, "  text: {committed}")?;
    out.flush()
}

pub fn run(engine: Engine) -> Result<()> {
    let mut session = Session::new(engine);
    let mut committed = String::new();

    println!("scripa console - type codes and press Enter; empty line commits, :mode toggles");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        for key in line_to_keys(line.trim_end_matches('\r')) {
            if let KeyResult::Commit(text) = session.process_key(key) {
                committed.push_str(&text);
            }
        }
        render(&mut stdout, &session, &committed)?;
    }
    Ok(())
}
