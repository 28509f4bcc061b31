//! Line cursor over a TSPLIB stream.
//!
//! Sections hand the same reader to each other, so a component consumes exactly
//! the lines that belong to it and leaves the rest to the instance parser.

use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::{ParseError, Result};

/// Sentinel that terminates tours, depot lists and edge data
pub(crate) const SECTION_END: &str = "-1";

pub(crate) struct LineReader<R: BufRead> {
    inner: R,
    buffer: String,
    line_number: usize,
    pushed_back: Option<String>,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        LineReader { inner, buffer: String::new(), line_number: 0, pushed_back: None }
    }

    /// 1-based number of the last line handed out
    pub(crate) fn line_number(&self) -> usize {
        self.line_number
    }

    /// Next line with surrounding whitespace removed, `None` once the stream is exhausted
    pub(crate) fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pushed_back.take() {
            self.line_number += 1;
            return Ok(Some(line));
        }

        self.buffer.clear();
        if self.inner.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        log::trace!("{:>6}: {}", self.line_number, self.buffer.trim_end());

        Ok(Some(self.buffer.trim().to_string()))
    }

    /// Next non-blank line, failing if the stream ends first
    pub(crate) fn next_data_line(&mut self, section: &'static str) -> Result<String> {
        loop {
            match self.next_line()? {
                Some(line) if line.is_empty() => continue,
                Some(line) => return Ok(line),
                None => return Err(ParseError::UnexpectedEndOfInput { section }),
            }
        }
    }

    /// Hands `line` out again on the next call to [`LineReader::next_line`]
    pub(crate) fn push_back(&mut self, line: String) {
        self.line_number -= 1;
        self.pushed_back = Some(line);
    }

    pub(crate) fn malformed(&self, content: &str) -> ParseError {
        ParseError::MalformedDataLine { line: self.line_number, content: content.to_string() }
    }

    /// Parses a whitespace separated token of the current line
    pub(crate) fn parse_token<T: FromStr>(&self, token: &str) -> Result<T> {
        token.parse::<T>().map_err(|_| self.malformed(token))
    }

    pub(crate) fn tokens(&mut self, section: &'static str) -> Tokens<'_, R> {
        Tokens { reader: self, section, pending: VecDeque::new() }
    }
}

/// Whitespace separated values of a section that may wrap over several lines.
///
/// Tokens left on the last consumed line are dropped with the line.
pub(crate) struct Tokens<'a, R: BufRead> {
    reader: &'a mut LineReader<R>,
    section: &'static str,
    pending: VecDeque<String>,
}

impl<'a, R: BufRead> Tokens<'a, R> {
    /// Next token, or `None` when the section is cut short by an `EOF` line or
    /// the end of the stream. The `EOF` line is pushed back for the instance parser.
    pub(crate) fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let Some(line) = self.reader.next_line()? else {
                return Ok(None);
            };
            if line == "EOF" {
                self.reader.push_back(line);
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }

        Ok(self.pending.pop_front())
    }

    /// Next token, failing when the section is cut short
    pub(crate) fn expect_token(&mut self) -> Result<String> {
        self.next_token()?.ok_or(ParseError::UnexpectedEndOfInput { section: self.section })
    }

    pub(crate) fn expect<T: FromStr>(&mut self) -> Result<T> {
        let token = self.expect_token()?;
        self.parse(&token)
    }

    pub(crate) fn parse<T: FromStr>(&self, token: &str) -> Result<T> {
        self.reader.parse_token(token)
    }

    /// Reads 1-based node indices until the `-1` sentinel, an `EOF` line or the end of the stream.
    /// Returns the indices and whether the sentinel was seen.
    pub(crate) fn indices_until_sentinel(&mut self) -> Result<(Vec<usize>, bool)> {
        let mut indices = Vec::new();
        while let Some(token) = self.next_token()? {
            if token == SECTION_END {
                return Ok((indices, true));
            }
            indices.push(self.parse(&token)?);
        }
        Ok((indices, false))
    }
}

/// Converts a 1-based node index from a file into a zero-based one
pub(crate) fn to_zero_based(index: usize, dimension: usize) -> Result<usize> {
    if index == 0 || index > dimension {
        return Err(ParseError::IndexOutOfBounds { index, dimension });
    }
    Ok(index - 1)
}
