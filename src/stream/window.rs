// Rolling plaintext history shared in shape (never in instance) by the
// stream encoder and decoder.

/// A bounded buffer holding the most recent plaintext of one session.
///
/// Appends evict the oldest bytes once `capacity` is exceeded, so the
/// window always holds the trailing `min(total appended, capacity)` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamWindow {
    buf: Vec<u8>,
    capacity: usize,
}

impl StreamWindow {
    /// Create an empty window.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a window seeded with the tail of `dictionary`.
    pub fn seeded(capacity: usize, dictionary: &[u8]) -> Self {
        let mut window = Self::new(capacity);
        window.append(dictionary);
        window
    }

    /// Replace the contents with the tail of `dictionary`, or empty the
    /// window when none is given. The capacity may change at the same time.
    pub fn reseed(&mut self, capacity: usize, dictionary: Option<&[u8]>) {
        self.buf.clear();
        self.capacity = capacity;
        if let Some(dict) = dictionary {
            self.append(dict);
        }
    }

    /// Append plaintext, evicting the oldest bytes beyond capacity.
    pub fn append(&mut self, data: &[u8]) {
        if data.len() >= self.capacity {
            self.buf.clear();
            self.buf
                .extend_from_slice(&data[data.len() - self.capacity..]);
            return;
        }
        let overflow = (self.buf.len() + data.len()).saturating_sub(self.capacity);
        if overflow > 0 {
            self.buf.drain(..overflow);
        }
        self.buf.extend_from_slice(data);
    }

    /// Current history, oldest byte first.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
