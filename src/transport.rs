//! Serial transport seam and the buffered USB serial adapter.
//!
//! [`Transport`] is what the control loop sees: non-blocking byte receive and
//! send, either of which may move fewer bytes than asked (or none).
//!
//! [`SerialPort`] implements it over a raw [`Endpoint`]. Outgoing bytes are
//! staged in a ring buffer and flushed one packet per [`SerialPort::service`]
//! call; incoming bytes are read straight from the endpoint.

use crate::ringbuf::{OverflowPolicy, RingBuffer};

/// Default transmit staging buffer size.
pub const TX_BUFFER_SIZE: usize = 32;

/// Non-blocking byte transport.
pub trait Transport {
    /// Read up to `buf.len()` bytes. Returns how many were read.
    fn receive(&mut self, buf: &mut [u8]) -> usize;
    /// Write up to `data.len()` bytes. Returns how many were accepted.
    fn send(&mut self, data: &[u8]) -> usize;
}

/// Errors reported by an [`Endpoint`] write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointError {
    /// The endpoint cannot take a packet right now; retry next tick.
    Busy,
    /// The host is not connected.
    Disconnected,
}

/// Raw USB serial endpoint pair.
pub trait Endpoint {
    /// Read pending OUT bytes into `buf` without blocking.
    fn read(&mut self, buf: &mut [u8]) -> usize;
    /// Queue one IN packet without blocking. Returns how many leading bytes
    /// of `data` the endpoint took.
    fn write_packet(&mut self, data: &[u8]) -> Result<usize, EndpointError>;
}

pub struct SerialPort<E, const N: usize = TX_BUFFER_SIZE> {
    endpoint: E,
    tx: RingBuffer<N>,
    packet_size: usize,
}

impl<E: Endpoint, const N: usize> SerialPort<E, N> {
    /// `packet_size` is the endpoint's max packet size. Flushes stay one byte
    /// short of it so the host never waits on a zero-length packet.
    pub fn new(endpoint: E, packet_size: usize) -> Self {
        Self {
            endpoint,
            tx: RingBuffer::new(OverflowPolicy::Reject),
            packet_size: packet_size.max(2),
        }
    }

    /// Stage a single diagnostic byte. Dropped silently when the buffer is
    /// full. Takes `&mut self`, so only the owner of the port (the tick loop)
    /// can produce output; interrupt handlers must not hold a port.
    pub fn send_char(&mut self, byte: u8) {
        self.tx.put(byte);
    }

    /// Bytes staged but not yet handed to the endpoint.
    pub fn pending(&self) -> usize {
        self.tx.len()
    }

    /// Flush at most one packet of staged bytes to the endpoint.
    ///
    /// Returns the number of bytes handed over.
    pub fn service(&mut self) -> usize {
        let chunk = self.tx.peek_contiguous();
        if chunk.is_empty() {
            return 0;
        }
        let count = chunk.len().min(self.packet_size - 1);
        match self.endpoint.write_packet(&chunk[..count]) {
            Ok(written) => {
                let written = written.min(count);
                self.tx.skip(written);
                written
            }
            Err(EndpointError::Busy) => 0,
            Err(e) => {
                log::debug!("serial flush failed: {:?}", e);
                0
            }
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn endpoint_mut(&mut self) -> &mut E {
        &mut self.endpoint
    }
}

impl<E: Endpoint, const N: usize> Transport for SerialPort<E, N> {
    fn receive(&mut self, buf: &mut [u8]) -> usize {
        let n = self.endpoint.read(buf);
        n.min(buf.len())
    }

    fn send(&mut self, data: &[u8]) -> usize {
        data.iter().take_while(|&&byte| self.tx.put(byte)).count()
    }
}

impl<E: Endpoint, const N: usize> core::fmt::Write for SerialPort<E, N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for byte in s.bytes() {
            self.send_char(byte);
        }
        Ok(())
    }
}
