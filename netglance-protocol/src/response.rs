//! Incremental echo response parsing
//!
//! Bytes are fed in whatever chunks the socket delivers. The parser keeps
//! only the status line and a bounded prefix of the body; everything else is
//! drained and discarded so a misbehaving server cannot exhaust memory.

use heapless::Vec;

use crate::address::PublicAddress;

/// Header/body separator
const SEPARATOR: &[u8; 4] = b"\r\n\r\n";

/// Bytes of the status line kept for inspection
const MAX_STATUS_LINE: usize = 64;

/// Bytes of body kept; anything beyond is drained
pub const MAX_BODY_SIZE: usize = 64;

/// Errors that can occur when interpreting a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// Connection closed before any byte arrived
    Empty,
    /// Connection closed before the header separator
    Incomplete,
    /// Status line is not `HTTP/x.y NNN ...`
    MalformedStatus,
    /// Server answered with a non-2xx status code
    Status(u16),
    /// Body is not UTF-8 text
    InvalidUtf8,
    /// Body is empty or whitespace only
    EmptyBody,
    /// First body line is not an IP address
    InvalidAddress,
}

/// Where the parser is in the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Collecting the status line
    StatusLine,
    /// Skipping header fields, looking for the blank line
    Headers,
    /// Collecting body bytes
    Body,
}

/// State machine for parsing an echo response
#[derive(Debug, Clone)]
pub struct ResponseParser {
    state: ParseState,
    status_line: Vec<u8, MAX_STATUS_LINE>,
    /// Bytes of [`SEPARATOR`] matched so far
    matched: usize,
    body: Vec<u8, MAX_BODY_SIZE>,
    received: usize,
    drained: usize,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    /// Create a new parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::StatusLine,
            status_line: Vec::new(),
            matched: 0,
            body: Vec::new(),
            received: 0,
            drained: 0,
        }
    }

    /// Feed a chunk of received bytes
    pub fn feed(&mut self, data: &[u8]) {
        for &byte in data {
            self.feed_byte(byte);
        }
    }

    fn feed_byte(&mut self, byte: u8) {
        self.received += 1;

        match self.state {
            ParseState::StatusLine | ParseState::Headers => {
                if self.state == ParseState::StatusLine {
                    if byte == b'\n' {
                        self.state = ParseState::Headers;
                    } else if byte != b'\r' {
                        // Only the first few bytes matter; the reason phrase may be cut
                        let _ = self.status_line.push(byte);
                    }
                }

                self.matched = if byte == SEPARATOR[self.matched] {
                    self.matched + 1
                } else if byte == b'\r' {
                    1
                } else {
                    0
                };

                if self.matched == SEPARATOR.len() {
                    self.state = ParseState::Body;
                }
            }
            ParseState::Body => {
                if self.body.push(byte).is_err() {
                    self.drained += 1;
                }
            }
        }
    }

    /// Whether the header separator has been seen
    pub fn headers_complete(&self) -> bool {
        self.state == ParseState::Body
    }

    /// Total bytes fed so far
    pub fn received(&self) -> usize {
        self.received
    }

    /// Body bytes discarded because they did not fit
    pub fn drained(&self) -> usize {
        self.drained
    }

    /// Status code from the status line, if it could be parsed
    pub fn status_code(&self) -> Option<u16> {
        let line = core::str::from_utf8(&self.status_line).ok()?;
        let mut parts = line.split(' ').filter(|p| !p.is_empty());

        let version = parts.next()?;
        if !version.starts_with("HTTP/") {
            return None;
        }

        let code = parts.next()?;
        if code.len() != 3 {
            return None;
        }
        code.parse().ok()
    }

    /// Interpret the response once the connection has closed
    pub fn finish(self) -> Result<PublicAddress, ResponseError> {
        if self.received == 0 {
            return Err(ResponseError::Empty);
        }
        if !self.headers_complete() {
            return Err(ResponseError::Incomplete);
        }

        let code = self.status_code().ok_or(ResponseError::MalformedStatus)?;
        if !(200..300).contains(&code) {
            return Err(ResponseError::Status(code));
        }

        let body = decode_body(&self.body)?;
        let first_line = body
            .trim()
            .lines()
            .next()
            .map(str::trim)
            .unwrap_or("");
        if first_line.is_empty() {
            return Err(ResponseError::EmptyBody);
        }

        PublicAddress::parse(first_line).ok_or(ResponseError::InvalidAddress)
    }
}

/// Body bytes as text
///
/// The kept prefix may end inside a multibyte character; that tail is
/// dropped. Invalid bytes anywhere else are an error.
fn decode_body(body: &[u8]) -> Result<&str, ResponseError> {
    match core::str::from_utf8(body) {
        Ok(text) => Ok(text),
        Err(e) if e.error_len().is_none() => {
            core::str::from_utf8(&body[..e.valid_up_to()]).map_err(|_| ResponseError::InvalidUtf8)
        }
        Err(_) => Err(ResponseError::InvalidUtf8),
    }
}
