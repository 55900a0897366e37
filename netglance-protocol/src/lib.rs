//! Public Address Echo Protocol
//!
//! The device learns the address its network presents to the internet by
//! asking a plain-text echo service (`api.ipify.org`) over unencrypted
//! HTTP/1.0 on port 80.
//!
//! # Exchange Overview
//!
//! ```text
//! device                                   echo service
//!   │  GET /?format=text HTTP/1.0\r\n             │
//!   │  Host: api.ipify.org\r\n\r\n                │
//!   │ ──────────────────────────────────────────► │
//!   │                                             │
//!   │  HTTP/1.1 200 OK\r\n ... \r\n\r\n           │
//!   │  203.0.113.5                                │
//!   │ ◄────────────────────────────────────────── │
//!   │                 (connection closed)         │
//! ```
//!
//! This is not a general HTTP client: one request per connection, the body
//! is delimited by connection close, and there are no redirects, chunked
//! transfers or retries.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod request;
pub mod response;

pub use address::{PublicAddress, MAX_ADDRESS_LEN};
pub use request::{Request, RequestError, ECHO_HOST, ECHO_PATH, ECHO_PORT, MAX_REQUEST_SIZE};
pub use response::{ResponseError, ResponseParser, MAX_BODY_SIZE};
