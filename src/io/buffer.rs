use crate::{ReadBenchError, Result};

/// Pre-allocated read buffer reused across every timed read of a run,
/// so that no allocation happens between the start and end timestamps.
pub struct ReadBuffer {
    buffer: Vec<u8>,
}

impl ReadBuffer {
    /// Allocate a zeroed buffer able to hold `capacity` bytes
    pub fn new(capacity: u64) -> Result<Self> {
        if capacity == 0 {
            return Err(ReadBenchError::Config(
                "Buffer size must be greater than 0".to_string(),
            ));
        }
        let capacity = usize::try_from(capacity).map_err(|_| {
            ReadBenchError::Config(format!(
                "Read length {} does not fit in memory on this platform",
                capacity
            ))
        })?;

        Ok(Self {
            buffer: vec![0u8; capacity],
        })
    }

    /// Mutable view of the first `len` bytes
    pub fn slice(&mut self, len: u64) -> &mut [u8] {
        let len = (len as usize).min(self.buffer.len());
        &mut self.buffer[..len]
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_buffer_basic() {
        let mut buffer = ReadBuffer::new(1024).unwrap();
        assert_eq!(buffer.capacity(), 1024);
        assert_eq!(buffer.slice(1).len(), 1);
        assert_eq!(buffer.slice(1024).len(), 1024);
    }

    #[test]
    fn test_slice_clamped_to_capacity() {
        let mut buffer = ReadBuffer::new(16).unwrap();
        assert_eq!(buffer.slice(4096).len(), 16);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(ReadBuffer::new(0), Err(ReadBenchError::Config(_))));
    }
}
