//! Packed 1-bit pixel storage
//!
//! [`BitplaneBuffer`] wraps caller-provided storage (typically a static,
//! DMA-capable `[u8; 1024]`) and only exposes index-checked bit access. An
//! index or bit outside the buffer is refused instead of touching a
//! neighbouring byte.

use crate::geometry::BUFFER_SIZE;

/// Bounds-checked bitplane over borrowed or owned storage
///
/// Bit `n` of byte `i` mirrors one pixel; which pixel is decided by
/// [`CoordinateMapper`](crate::mapper::CoordinateMapper).
#[derive(Debug)]
pub struct BitplaneBuffer<B> {
    storage: B,
}

impl<B> BitplaneBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap storage without checking its length
    ///
    /// Use [`validate`](Self::validate) before relying on the full
    /// [`BUFFER_SIZE`] being available.
    pub fn new(storage: B) -> Self {
        Self { storage }
    }

    /// Check that the storage can hold a full frame
    ///
    /// Returns the provided length as the error when it is too small.
    pub fn validate(&self) -> Result<(), usize> {
        let provided = self.storage.as_ref().len();
        if provided < BUFFER_SIZE {
            return Err(provided);
        }
        Ok(())
    }

    /// Number of usable bytes (never more than [`BUFFER_SIZE`])
    pub fn len(&self) -> usize {
        self.storage.as_ref().len().min(BUFFER_SIZE)
    }

    /// Whether the buffer holds no bytes at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one bit
    ///
    /// Returns `None` if `index` or `bit` is out of range.
    pub fn bit(&self, index: usize, bit: u8) -> Option<bool> {
        if bit > 7 || index >= self.len() {
            return None;
        }
        Some(self.storage.as_ref()[index] & (1 << bit) != 0)
    }

    /// Set or clear one bit
    ///
    /// Returns `false` without writing if `index` or `bit` is out of range.
    pub fn set_bit(&mut self, index: usize, bit: u8, on: bool) -> bool {
        if bit > 7 || index >= self.len() {
            return false;
        }
        let byte = &mut self.storage.as_mut()[index];
        if on {
            *byte |= 1 << bit;
        } else {
            *byte &= !(1 << bit);
        }
        true
    }

    /// Fill every byte with all pixels on or off
    pub fn fill(&mut self, on: bool) {
        let value = if on { 0xFF } else { 0x00 };
        let len = self.len();
        self.storage.as_mut()[..len].fill(value);
    }

    /// The packed bytes, one [`COLUMNS`](crate::geometry::COLUMNS) stride per page
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_ref()[..self.len()]
    }

    /// Give back the underlying storage
    pub fn into_inner(self) -> B {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_short_storage() {
        let buffer = BitplaneBuffer::new([0u8; 100]);
        assert_eq!(buffer.validate(), Err(100));
    }

    #[test]
    fn test_validate_accepts_exact_and_larger_storage() {
        assert!(BitplaneBuffer::new([0u8; BUFFER_SIZE]).validate().is_ok());
        let larger = BitplaneBuffer::new([0u8; BUFFER_SIZE + 16]);
        assert!(larger.validate().is_ok());
        assert_eq!(larger.len(), BUFFER_SIZE);
    }

    #[test]
    fn test_set_and_clear_single_bit() {
        let mut buffer = BitplaneBuffer::new([0u8; BUFFER_SIZE]);
        assert!(buffer.set_bit(5, 3, true));
        assert_eq!(buffer.as_bytes()[5], 0b0000_1000);
        assert_eq!(buffer.bit(5, 3), Some(true));

        assert!(buffer.set_bit(5, 3, false));
        assert_eq!(buffer.as_bytes()[5], 0);
        assert_eq!(buffer.bit(5, 3), Some(false));
    }

    #[test]
    fn test_set_bit_leaves_neighbours_untouched() {
        let mut buffer = BitplaneBuffer::new([0xA5u8; BUFFER_SIZE]);
        assert!(buffer.set_bit(10, 1, true));
        assert_eq!(buffer.as_bytes()[9], 0xA5);
        assert_eq!(buffer.as_bytes()[10], 0xA7);
        assert_eq!(buffer.as_bytes()[11], 0xA5);
    }

    #[test]
    fn test_out_of_range_access_is_refused() {
        let mut buffer = BitplaneBuffer::new([0u8; BUFFER_SIZE]);
        assert!(!buffer.set_bit(BUFFER_SIZE, 0, true));
        assert!(!buffer.set_bit(0, 8, true));
        assert_eq!(buffer.bit(BUFFER_SIZE, 0), None);
        assert_eq!(buffer.bit(0, 8), None);
        assert!(buffer.as_bytes().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_fill() {
        let mut buffer = BitplaneBuffer::new(alloc::vec![0u8; BUFFER_SIZE]);
        buffer.fill(true);
        assert!(buffer.as_bytes().iter().all(|byte| *byte == 0xFF));
        buffer.fill(false);
        assert!(buffer.as_bytes().iter().all(|byte| *byte == 0x00));
    }
}
