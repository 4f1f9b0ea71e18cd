//! # Byte Window
//!
//! Bounded accumulator for the raw, unparsed tail of the stream.
//!
//! The framing protocol carries no length prefix, so arriving bytes
//! are held in a sliding window until an end signature shows up at
//! the tail. Bytes older than [`WINDOW_CAP`](crate::bep::protocol::WINDOW_CAP)
//! can never be part of a future frame and are dropped first.

use bytes::{Buf, BytesMut};

/// Sliding window over the most recent stream bytes
///
/// Length never exceeds the configured cap; appends drop the oldest
/// bytes once the cap is reached. All operations are total, including
/// on an empty window.
#[derive(Debug)]
pub struct ByteWindow {
    buf: BytesMut,
    cap: usize,
}

impl ByteWindow {
    /// Create an empty window retaining at most `cap` bytes
    pub fn new(cap: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(cap),
            cap,
        }
    }

    /// Append bytes, dropping from the front if the cap is exceeded
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        if self.buf.len() > self.cap {
            let excess = self.buf.len() - self.cap;
            self.buf.advance(excess);
        }
    }

    /// Empty the window
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Last `n` bytes, or the whole window if it is shorter
    pub fn tail(&self, n: usize) -> &[u8] {
        let start = self.buf.len().saturating_sub(n);
        &self.buf[start..]
    }

    /// Current number of retained bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when no bytes are retained
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bep::protocol::WINDOW_CAP;

    #[test]
    fn test_append_and_tail() {
        let mut window = ByteWindow::new(WINDOW_CAP);
        window.append(&[1, 2, 3]);
        window.append(&[4, 5]);

        assert_eq!(window.len(), 5);
        assert_eq!(window.tail(2), &[4, 5]);
        assert_eq!(window.tail(5), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_tail_longer_than_window() {
        let mut window = ByteWindow::new(WINDOW_CAP);
        window.append(&[7, 8]);

        // Asking for more than is retained returns everything
        assert_eq!(window.tail(100), &[7, 8]);
    }

    #[test]
    fn test_tail_of_empty_window() {
        let window = ByteWindow::new(WINDOW_CAP);
        assert!(window.is_empty());
        assert_eq!(window.tail(8), &[] as &[u8]);
    }

    #[test]
    fn test_cap_drops_oldest_bytes() {
        let mut window = ByteWindow::new(4);
        window.append(&[1, 2, 3]);
        window.append(&[4, 5, 6]);

        assert_eq!(window.len(), 4);
        assert_eq!(window.tail(4), &[3, 4, 5, 6]);
    }

    #[test]
    fn test_single_append_larger_than_cap() {
        let mut window = ByteWindow::new(4);
        window.append(&[1, 2, 3, 4, 5, 6, 7]);

        assert_eq!(window.len(), 4);
        assert_eq!(window.tail(4), &[4, 5, 6, 7]);
    }

    #[test]
    fn test_cap_never_exceeded_under_any_append_sequence() {
        let mut window = ByteWindow::new(WINDOW_CAP);

        for size in [1usize, 7, 31, 80, 159, 160, 161, 500] {
            let chunk = vec![0xAA; size];
            window.append(&chunk);
            assert!(window.len() <= WINDOW_CAP, "window overflowed at append of {} bytes", size);
        }
    }

    #[test]
    fn test_reset_empties_window() {
        let mut window = ByteWindow::new(WINDOW_CAP);
        window.append(&[1, 2, 3]);
        window.reset();

        assert!(window.is_empty());
        assert_eq!(window.len(), 0);

        // Still usable after reset
        window.append(&[9]);
        assert_eq!(window.tail(1), &[9]);
    }
}
