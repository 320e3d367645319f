//! Command accumulator.
//!
//! Raw bytes from the transport are appended at the write cursor; the frame
//! splitter reads `[0, len)`, then compacts away whatever prefix it consumed.
//! Bytes past the last delimiter stay put until the next tick completes them.

/// Default accumulator capacity; also the longest frame that can be accepted.
pub const CMD_BUFFER_SIZE: usize = 32;

pub struct CommandBuffer<const C: usize = CMD_BUFFER_SIZE> {
    data: [u8; C],
    write: usize,
}

impl<const C: usize> CommandBuffer<C> {
    pub const fn new() -> Self {
        Self {
            data: [0; C],
            write: 0,
        }
    }

    /// Unwritten tail of the buffer. Empty when the buffer is full.
    pub fn writable_region(&mut self) -> &mut [u8] {
        &mut self.data[self.write..]
    }

    /// Number of bytes that can still be appended.
    pub fn remaining(&self) -> usize {
        C - self.write
    }

    /// Mark `n` bytes of the writable region as filled.
    ///
    /// `n` must not exceed [`remaining`](Self::remaining); it is clamped so
    /// the cursor never leaves the buffer.
    pub fn commit(&mut self, n: usize) {
        debug_assert!(n <= self.remaining(), "commit past writable region");
        self.write += n.min(self.remaining());
    }

    pub fn len(&self) -> usize {
        self.write
    }

    pub fn is_empty(&self) -> bool {
        self.write == 0
    }

    pub fn byte_at(&self, index: usize) -> u8 {
        self.data[index]
    }

    /// Unconsumed input, `[0, len)`.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.write]
    }

    /// Drop the first `prefix_len` bytes and shift the rest down to index 0.
    pub fn compact(&mut self, prefix_len: usize) {
        let prefix_len = prefix_len.min(self.write);
        if prefix_len < self.write {
            self.data.copy_within(prefix_len..self.write, 0);
        }
        self.write -= prefix_len;
    }

    /// Reset to empty, returning the full capacity now writable.
    pub fn clear(&mut self) -> usize {
        self.write = 0;
        C
    }
}

impl<const C: usize> Default for CommandBuffer<C> {
    fn default() -> Self {
        Self::new()
    }
}
