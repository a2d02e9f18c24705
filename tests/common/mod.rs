#![allow(dead_code)]

use papertrade::domain::market::Market;
use papertrade::domain::portfolio::Portfolio;
use papertrade::session::Session;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{Cursor, Write};

pub type ScriptedSession = Session<Cursor<Vec<u8>>, Vec<u8>, StdRng>;

/// A session over the default market with scripted input lines.
pub fn scripted_session(balance: f64, seed: u64, lines: &[&str]) -> ScriptedSession {
    scripted_session_with(Market::default_listing(), balance, seed, lines)
}

pub fn scripted_session_with(
    market: Market,
    balance: f64,
    seed: u64,
    lines: &[&str],
) -> ScriptedSession {
    let mut script = lines.join("\n");
    script.push('\n');
    Session::new(
        market,
        Portfolio::new(balance),
        StdRng::seed_from_u64(seed),
        Cursor::new(script.into_bytes()),
        Vec::new(),
    )
}

pub fn transcript(session: ScriptedSession) -> String {
    String::from_utf8(session.into_output()).unwrap()
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
