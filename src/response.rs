//! Outgoing response queue.
//!
//! Responses are admitted whole or not at all: if the queue lacks room for
//! every byte of a record, the record is dropped. The host treats a missing
//! `OK` as failure and resends.

use crate::protocol::{ErrorCode, Response};
use crate::ringbuf::{OverflowPolicy, RingBuffer};

/// Default response queue capacity (holds `RESPONSE_QUEUE_SIZE - 1` bytes).
pub const RESPONSE_QUEUE_SIZE: usize = 32;

pub struct ResponseQueue<const N: usize = RESPONSE_QUEUE_SIZE> {
    buf: RingBuffer<N>,
}

impl<const N: usize> ResponseQueue<N> {
    pub const fn new() -> Self {
        Self {
            buf: RingBuffer::new(OverflowPolicy::Reject),
        }
    }

    pub fn push_ok(&mut self) -> bool {
        self.push(Response::Ok)
    }

    pub fn push_err(&mut self, code: ErrorCode) -> bool {
        self.push(Response::Err(code))
    }

    /// Queue a response. Returns `false` if it was dropped for lack of room.
    pub fn push(&mut self, response: Response) -> bool {
        if self.buf.free() < response.wire_len() {
            log::warn!("response queue full, dropping {:?}", response);
            return false;
        }
        for &byte in response.encode().iter() {
            self.buf.put(byte);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Contiguous chunk of pending response bytes.
    pub fn peek(&self) -> &[u8] {
        self.buf.peek_contiguous()
    }

    /// Mark `count` bytes from [`peek`](Self::peek) as sent.
    pub fn consume(&mut self, count: usize) {
        self.buf.skip(count);
    }
}

impl<const N: usize> Default for ResponseQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
