//! Echo request encoding
//!
//! Request format (HTTP/1.0, so the server closes the connection after the
//! body and no chunked encoding is ever used):
//! ```text
//! GET <path> HTTP/1.0\r\n
//! Host: <host>\r\n
//! \r\n
//! ```

use heapless::Vec;

/// Echo service host name
pub const ECHO_HOST: &str = "api.ipify.org";

/// Echo service port (plain HTTP)
pub const ECHO_PORT: u16 = 80;

/// Path returning the caller's address as bare text
pub const ECHO_PATH: &str = "/?format=text";

/// Maximum encoded request size in bytes
pub const MAX_REQUEST_SIZE: usize = 128;

/// Errors that can occur while encoding a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Buffer too small for the encoded request
    BufferTooSmall,
    /// Host or path contains a CR or LF
    InvalidField,
}

/// A single GET request to an echo service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    /// Value of the `Host` header
    pub host: &'a str,
    /// Request target
    pub path: &'a str,
}

impl Default for Request<'static> {
    fn default() -> Self {
        Self::new(ECHO_HOST, ECHO_PATH)
    }
}

impl<'a> Request<'a> {
    /// Create a request for `path` on `host`
    pub const fn new(host: &'a str, path: &'a str) -> Self {
        Self { host, path }
    }

    /// Encode this request into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, RequestError> {
        if has_line_break(self.host) || has_line_break(self.path) {
            return Err(RequestError::InvalidField);
        }

        let parts: [&[u8]; 5] = [
            b"GET ",
            self.path.as_bytes(),
            b" HTTP/1.0\r\nHost: ",
            self.host.as_bytes(),
            b"\r\n\r\n",
        ];

        let total: usize = parts.iter().map(|p| p.len()).sum();
        if buffer.len() < total {
            return Err(RequestError::BufferTooSmall);
        }

        let mut pos = 0;
        for part in parts {
            buffer[pos..pos + part.len()].copy_from_slice(part);
            pos += part.len();
        }

        Ok(pos)
    }

    /// Encode this request into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_REQUEST_SIZE>, RequestError> {
        let mut buffer = [0u8; MAX_REQUEST_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| RequestError::BufferTooSmall)?;
        Ok(vec)
    }
}

fn has_line_break(s: &str) -> bool {
    s.bytes().any(|b| b == b'\r' || b == b'\n')
}
