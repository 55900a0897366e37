//! Public address fetch
//!
//! One HTTP/1.0 exchange with the echo service per call:
//! resolve, connect, send the request, read to EOF, parse.

use defmt::*;
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Write;
use netglance_core::traits::AddressSource;
use netglance_protocol::{
    PublicAddress, Request, RequestError, ResponseError, ResponseParser, ECHO_HOST, ECHO_PORT,
};

use crate::config::{FETCH_RX_BUFFER, FETCH_TX_BUFFER};

/// Why a fetch produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
enum FetchError {
    /// Name resolution failed
    Dns,
    /// The resolver returned no A record
    NoAddress,
    /// TCP connect failed
    Connect,
    /// Sending the request failed
    Write,
    /// Reading the response failed
    Read,
    Request(RequestError),
    Response(ResponseError),
}

/// [`AddressSource`] querying the echo service over plain TCP
pub struct EchoFetcher {
    stack: Stack<'static>,
    rx_buffer: [u8; FETCH_RX_BUFFER],
    tx_buffer: [u8; FETCH_TX_BUFFER],
}

impl EchoFetcher {
    pub fn new(stack: Stack<'static>) -> Self {
        Self {
            stack,
            rx_buffer: [0; FETCH_RX_BUFFER],
            tx_buffer: [0; FETCH_TX_BUFFER],
        }
    }

    async fn exchange(&mut self, timeout: Duration) -> Result<PublicAddress, FetchError> {
        let addresses = self
            .stack
            .dns_query(ECHO_HOST, DnsQueryType::A)
            .await
            .map_err(|_| FetchError::Dns)?;
        let address = *addresses.first().ok_or(FetchError::NoAddress)?;
        debug!("{} resolved to {}", ECHO_HOST, Debug2Format(&address));

        let mut socket = TcpSocket::new(self.stack, &mut self.rx_buffer, &mut self.tx_buffer);
        socket.set_timeout(Some(timeout));
        socket
            .connect((address, ECHO_PORT))
            .await
            .map_err(|_| FetchError::Connect)?;

        let request = Request::default()
            .encode_to_vec()
            .map_err(FetchError::Request)?;
        socket
            .write_all(&request)
            .await
            .map_err(|_| FetchError::Write)?;

        // Read to EOF; the parser keeps only what it needs
        let mut parser = ResponseParser::new();
        let mut chunk = [0u8; 64];
        loop {
            let n = socket.read(&mut chunk).await.map_err(|_| FetchError::Read)?;
            if n == 0 {
                break;
            }
            parser.feed(&chunk[..n]);
        }
        socket.close();

        trace!(
            "Response: status {}, {} bytes, {} drained",
            parser.status_code(),
            parser.received(),
            parser.drained()
        );
        parser.finish().map_err(FetchError::Response)
    }
}

impl AddressSource for EchoFetcher {
    async fn fetch(&mut self, timeout_ms: u32) -> Option<PublicAddress> {
        let timeout = Duration::from_millis(u64::from(timeout_ms));

        match with_timeout(timeout, self.exchange(timeout)).await {
            Ok(Ok(address)) => Some(address),
            Ok(Err(e)) => {
                warn!("Public address fetch failed: {}", e);
                None
            }
            Err(_) => {
                warn!("Public address fetch timed out after {} ms", timeout_ms);
                None
            }
        }
    }
}
