//! Positional line cursor over a run log.

use bfstats_error::{Result, StatsError};
use regex::Regex;

/// A cursor over the lines of one log file.
///
/// The cursor owns the position; callers describe each step (skip a fixed
/// count, consume a line that must match a pattern, scan forward for a
/// marker) and get typed errors carrying the file and 1-based line number
/// when the log does not have the expected shape.
#[derive(Debug)]
pub struct LineCursor<'a> {
    path: &'a str,
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    #[must_use]
    pub fn new(path: &'a str, text: &'a str) -> Self {
        Self {
            path,
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.path
    }

    /// 1-based number of the next line to be consumed.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// Discard `n` lines. `expecting` names the region for the error when
    /// the log ends early.
    pub fn skip(&mut self, n: usize, expecting: &str) -> Result<()> {
        if self.pos + n > self.lines.len() {
            return Err(self.eof(expecting));
        }
        self.pos += n;
        Ok(())
    }

    /// Consume and return the next line.
    pub fn next_line(&mut self, expecting: &str) -> Result<&'a str> {
        let line = self
            .lines
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.eof(expecting))?;
        self.pos += 1;
        Ok(line)
    }

    /// Consume the next line, which must match `re`; returns the first
    /// capture group.
    pub fn capture(&mut self, re: &Regex, field: &'static str) -> Result<String> {
        let line_number = self.line_number();
        let line = self.next_line(field)?;
        match re.captures(line) {
            Some(caps) => Ok(caps[1].to_owned()),
            None => Err(StatsError::HeaderField {
                path: self.path.to_owned(),
                line: line_number,
                field,
                text: line.to_owned(),
            }),
        }
    }

    /// Advance until a line matches `re`, consuming it. Returns the matched
    /// line's number and first capture group, or `None` if the log ends
    /// first (the cursor is then at the end).
    pub fn scan_capture(&mut self, re: &Regex) -> Option<(usize, String)> {
        while self.pos < self.lines.len() {
            let line_number = self.line_number();
            let line = self.lines[self.pos];
            self.pos += 1;
            if let Some(caps) = re.captures(line) {
                return Some((line_number, caps[1].to_owned()));
            }
        }
        None
    }

    fn eof(&self, expecting: &str) -> StatsError {
        StatsError::UnexpectedEof {
            path: self.path.to_owned(),
            expecting: expecting.to_owned(),
        }
    }
}
