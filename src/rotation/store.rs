//! Sidecar file holding the rotation state of one image directory.
//!
//! The file is a single INI section:
//!
//! ```text
//! [files]
//! b.jpg = 2024-01-01
//! c.jpg =
//! a.jpg =
//! ```
//!
//! Entry order is the rotation order. Keys and values are backslash-escaped
//! where needed (`\=`, `\\`, a leading `\#`), so any file name reads back
//! as written.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use super::pool::is_bare_name;
use crate::ui::prelude::*;

const SECTION: &str = "files";

/// When an image was last used as wallpaper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastUsed {
    /// Not used in the current cycle
    Unused,
    /// Used on this day
    On(NaiveDate),
    /// Unparseable value, kept verbatim so saving does not rewrite it
    Invalid(String),
}

impl LastUsed {
    /// Parse a stored value. Anything that is not empty or a `YYYY-MM-DD`
    /// date is `Invalid`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return LastUsed::Unused;
        }
        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => LastUsed::On(date),
            Err(_) => LastUsed::Invalid(raw.to_string()),
        }
    }
}

impl fmt::Display for LastUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastUsed::Unused => Ok(()),
            LastUsed::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            LastUsed::Invalid(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationEntry {
    pub filename: String,
    pub last_used: LastUsed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationStore {
    entries: Vec<RotationEntry>,
}

impl RotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the sidecar at `path`. A missing file gives an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading rotation file {}", path.display()));
            }
        };
        Ok(Self::parse(&decode_lines(&bytes)))
    }

    /// Parse sidecar contents. Lines outside the `[files]` section, blank
    /// lines, comments and keys that are not bare file names are ignored.
    pub fn parse(contents: &str) -> Self {
        let mut store = Self::new();
        let mut in_section = false;

        for line in contents.lines() {
            let head = line.trim_start();
            if head.is_empty() || head.starts_with(';') || head.starts_with('#') {
                continue;
            }
            if let Some(name) = head
                .trim_end()
                .strip_prefix('[')
                .and_then(|l| l.strip_suffix(']'))
            {
                in_section = name.trim().eq_ignore_ascii_case(SECTION);
                continue;
            }
            if !in_section {
                continue;
            }

            let tokens = tokenize(line);
            let split = tokens.iter().position(|&(c, escaped)| c == '=' && !escaped);
            let (key, value) = match split {
                Some(i) => (trimmed(&tokens[..i]), trimmed(&tokens[i + 1..])),
                None => (trimmed(&tokens), String::new()),
            };
            if key.is_empty() {
                continue;
            }
            if !is_bare_name(&key) {
                emit(
                    Level::Debug,
                    "store.skip_key",
                    &format!("Ignoring sidecar entry {key:?}, not a plain file name"),
                    None,
                );
                continue;
            }
            store.set(&key, LastUsed::parse(&value));
        }

        store
    }

    /// Render the store in sidecar format.
    pub fn render(&self) -> String {
        let mut out = format!("[{SECTION}]\n");
        for entry in &self.entries {
            let key = escape(&entry.filename);
            match &entry.last_used {
                LastUsed::Unused => out.push_str(&format!("{key} =\n")),
                value => out.push_str(&format!("{key} = {}\n", escape(&value.to_string()))),
            }
        }
        out
    }

    /// Write the store to `path`, replacing any previous file atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temporary file in {}", dir.display()))?;
        tmp.write_all(self.render().as_bytes())
            .context("writing rotation state")?;
        tmp.persist(path)
            .with_context(|| format!("writing rotation file {}", path.display()))?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Insert or update an entry. New names go to the end.
    pub fn set(&mut self, filename: &str, last_used: LastUsed) {
        match self.entries.iter_mut().find(|e| e.filename == filename) {
            Some(entry) => entry.last_used = last_used,
            None => self.entries.push(RotationEntry {
                filename: filename.to_string(),
                last_used,
            }),
        }
    }

    pub fn get(&self, filename: &str) -> Option<&LastUsed> {
        self.entries
            .iter()
            .find(|e| e.filename == filename)
            .map(|e| &e.last_used)
    }

    pub fn entries(&self) -> &[RotationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keep the valid UTF-8 lines of a sidecar, dropping the rest.
fn decode_lines(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for (n, line) in bytes.split(|b| *b == b'\n').enumerate() {
        match std::str::from_utf8(line) {
            Ok(line) => {
                out.push_str(line);
                out.push('\n');
            }
            Err(_) => emit(
                Level::Debug,
                "store.skip_line",
                &format!("Ignoring sidecar line {} with invalid UTF-8", n + 1),
                None,
            ),
        }
    }
    out
}

/// Backslash-escape text so that it reads back unchanged: `\`, `=` and line
/// breaks anywhere, comment or section markers at the start, whitespace at
/// either end.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let last = s.chars().count().saturating_sub(1);
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '=' => out.push_str("\\="),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '#' | ';' | '[' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_whitespace() && (i == 0 || i == last) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// A character of a sidecar line and whether it was escaped
type Token = (char, bool);

fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            tokens.push((c, false));
            continue;
        }
        match chars.next() {
            Some('n') => tokens.push(('\n', true)),
            Some('r') => tokens.push(('\r', true)),
            Some(next) => tokens.push((next, true)),
            None => tokens.push(('\\', false)),
        }
    }
    tokens
}

/// Collect tokens, dropping unescaped whitespace at both ends.
fn trimmed(tokens: &[Token]) -> String {
    let keep = |&(c, escaped): &Token| escaped || !c.is_whitespace();
    let start = tokens.iter().position(keep).unwrap_or(tokens.len());
    let end = tokens.iter().rposition(keep).map_or(start, |i| i + 1);
    tokens[start..end].iter().map(|&(c, _)| c).collect()
}
