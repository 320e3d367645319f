//! Fixed-capacity byte ring buffer.
//!
//! Capacity `N` must be a power of two so indices wrap with a mask instead of
//! a modulo. One slot is always left unused, so at most `N - 1` bytes are held
//! and `head == tail` unambiguously means empty.
//!
//! The same type backs both the response queue (rejecting writes when full)
//! and the serial transmit queue; the [`OverflowPolicy`] chosen at
//! construction decides what [`RingBuffer::push`] does on a full buffer.

/// What a full buffer does with a new byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Refuse the new byte, leaving the buffer unchanged.
    Reject,
    /// Accept the new byte and drop the oldest unread one.
    Overwrite,
}

pub struct RingBuffer<const N: usize> {
    data: [u8; N],
    head: usize,
    tail: usize,
    policy: OverflowPolicy,
}

impl<const N: usize> RingBuffer<N> {
    const MASK: usize = {
        assert!(N >= 2 && N.is_power_of_two(), "ring buffer capacity must be a power of two");
        N - 1
    };

    pub const fn new(policy: OverflowPolicy) -> Self {
        let _ = Self::MASK;
        Self {
            data: [0; N],
            head: 0,
            tail: 0,
            policy,
        }
    }

    pub const fn capacity(&self) -> usize {
        N - 1
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        (self.head + 1) & Self::MASK == self.tail
    }

    /// Number of bytes available to read.
    pub fn len(&self) -> usize {
        self.head.wrapping_sub(self.tail) & Self::MASK
    }

    /// Number of bytes that can be put before the buffer is full.
    pub fn free(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Append a byte, rejecting it when the buffer is full.
    pub fn put(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.data[self.head] = byte;
        self.head = (self.head + 1) & Self::MASK;
        true
    }

    /// Append a byte, overwriting the oldest unread byte when full.
    pub fn write(&mut self, byte: u8) {
        self.data[self.head] = byte;
        self.head = (self.head + 1) & Self::MASK;
        // Head caught up with tail: eat the oldest byte
        if self.head == self.tail {
            self.tail = (self.tail + 1) & Self::MASK;
        }
    }

    /// Append a byte according to the buffer's overflow policy.
    ///
    /// Returns `false` only when a `Reject` buffer refused the byte.
    pub fn push(&mut self, byte: u8) -> bool {
        match self.policy {
            OverflowPolicy::Reject => self.put(byte),
            OverflowPolicy::Overwrite => {
                self.write(byte);
                true
            }
        }
    }

    pub fn get(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.data[self.tail];
        self.tail = (self.tail + 1) & Self::MASK;
        Some(byte)
    }

    /// Longest run of readable bytes that does not wrap around the end of
    /// the backing storage.
    pub fn peek_contiguous(&self) -> &[u8] {
        let end = if self.head >= self.tail { self.head } else { N };
        &self.data[self.tail..end]
    }

    /// Discard `count` bytes from the read side.
    ///
    /// `count` must not exceed [`len`](Self::len); it is clamped so a
    /// miscounting caller cannot move `tail` past `head`.
    pub fn skip(&mut self, count: usize) {
        debug_assert!(count <= self.len(), "skip past readable data");
        let count = count.min(self.len());
        self.tail = (self.tail + count) & Self::MASK;
    }

    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new(OverflowPolicy::Reject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_buffer_is_empty() {
        let buf = RingBuffer::<8>::new(OverflowPolicy::Reject);
        assert!(buf.is_empty());
        assert!(!buf.is_full());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 7);
    }

    #[test]
    fn put_rejects_when_full() {
        let mut buf = RingBuffer::<4>::new(OverflowPolicy::Reject);
        assert!(buf.put(1));
        assert!(buf.put(2));
        assert!(buf.put(3));
        assert!(buf.is_full());
        assert!(!buf.put(4));
        assert_eq!(buf.get(), Some(1));
        assert_eq!(buf.get(), Some(2));
        assert_eq!(buf.get(), Some(3));
        assert_eq!(buf.get(), None);
    }

    #[test]
    fn write_drops_oldest_when_full() {
        let mut buf = RingBuffer::<4>::new(OverflowPolicy::Overwrite);
        for b in 1..=5 {
            assert!(buf.push(b));
        }
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.get(), Some(3));
        assert_eq!(buf.get(), Some(4));
        assert_eq!(buf.get(), Some(5));
        assert!(buf.is_empty());
    }

    #[test]
    fn push_follows_reject_policy() {
        let mut buf = RingBuffer::<2>::new(OverflowPolicy::Reject);
        assert!(buf.push(b'a'));
        assert!(!buf.push(b'b'));
        assert_eq!(buf.get(), Some(b'a'));
    }

    #[test]
    fn peek_contiguous_stops_at_wrap() {
        let mut buf = RingBuffer::<8>::new(OverflowPolicy::Reject);
        for b in 0..6 {
            buf.put(b);
        }
        buf.skip(5);
        // tail = 5, head = 6; fill across the end of storage
        for b in 10..15 {
            buf.put(b);
        }
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.peek_contiguous(), &[5, 10, 11]);
        buf.skip(3);
        assert_eq!(buf.peek_contiguous(), &[12, 13, 14]);
        buf.skip(3);
        assert!(buf.is_empty());
        assert!(buf.peek_contiguous().is_empty());
    }

    #[test]
    fn reset_discards_everything() {
        let mut buf = RingBuffer::<8>::default();
        buf.put(1);
        buf.put(2);
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.get(), None);
    }

    fn exercise<const N: usize>(ops: &[(bool, u8)], overwrite: bool) -> Result<(), TestCaseError> {
        let policy = if overwrite {
            OverflowPolicy::Overwrite
        } else {
            OverflowPolicy::Reject
        };
        let mut buf = RingBuffer::<N>::new(policy);
        let mut model = std::collections::VecDeque::new();
        for &(is_push, byte) in ops {
            if is_push {
                let accepted = buf.push(byte);
                if model.len() < N - 1 {
                    prop_assert!(accepted);
                    model.push_back(byte);
                } else if overwrite {
                    prop_assert!(accepted);
                    model.pop_front();
                    model.push_back(byte);
                } else {
                    prop_assert!(!accepted);
                }
            } else {
                prop_assert_eq!(buf.get(), model.pop_front());
            }
            prop_assert!(!(buf.is_full() && buf.is_empty()));
            prop_assert!(buf.len() <= N - 1);
            prop_assert_eq!(buf.len(), model.len());
            prop_assert_eq!(buf.is_full(), model.len() == N - 1);
            let chunk = buf.peek_contiguous();
            prop_assert!(chunk.len() <= buf.len());
            prop_assert!(chunk.iter().eq(model.iter().take(chunk.len())));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_never_full_and_empty(
            ops in prop::collection::vec((any::<bool>(), any::<u8>()), 0..200),
            overwrite in any::<bool>(),
        ) {
            exercise::<2>(&ops, overwrite)?;
            exercise::<4>(&ops, overwrite)?;
            exercise::<8>(&ops, overwrite)?;
            exercise::<16>(&ops, overwrite)?;
            exercise::<32>(&ops, overwrite)?;
            exercise::<64>(&ops, overwrite)?;
            exercise::<256>(&ops, overwrite)?;
        }

        #[test]
        fn prop_drain_by_chunks_preserves_order(data in prop::collection::vec(any::<u8>(), 0..31)) {
            let mut buf = RingBuffer::<32>::new(OverflowPolicy::Reject);
            // Offset the indices so the data wraps
            for _ in 0..20 {
                buf.put(0);
            }
            buf.skip(20);
            for &b in &data {
                prop_assert!(buf.put(b));
            }
            let mut out = std::vec::Vec::new();
            while !buf.is_empty() {
                let chunk = buf.peek_contiguous();
                let n = chunk.len();
                out.extend_from_slice(chunk);
                buf.skip(n);
            }
            prop_assert_eq!(out, data);
        }
    }
}
