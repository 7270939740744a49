//! Per-character occupancy bitset

/// Fixed-size bitset indexed by stable character id. Sized once from the
/// character roster at room load; out-of-range reads are false and
/// out-of-range writes are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyMask {
    words: Vec<u64>,
    bits: usize,
}

impl OccupancyMask {
    pub fn new(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(64)],
            bits,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Resize to a new roster size, clearing all bits.
    pub fn resize(&mut self, bits: usize) {
        self.words.clear();
        self.words.resize(bits.div_ceil(64), 0);
        self.bits = bits;
    }

    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        if index >= self.bits {
            return false;
        }
        self.words[index / 64] & (1 << (index % 64)) != 0
    }

    pub fn set(&mut self, index: usize, value: bool) {
        if index >= self.bits {
            return;
        }
        let word = &mut self.words[index / 64];
        let bit = 1u64 << (index % 64);
        if value {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    /// Any bit set at all.
    pub fn any(&self) -> bool {
        self.words.iter().any(|&word| word != 0)
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Copy all bits from another mask of the same size.
    pub fn copy_from(&mut self, other: &OccupancyMask) {
        if self.bits == other.bits {
            self.words.copy_from_slice(&other.words);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut mask = OccupancyMask::new(70);
        assert!(!mask.get(0));
        mask.set(0, true);
        mask.set(69, true);
        assert!(mask.get(0));
        assert!(mask.get(69));
        assert_eq!(mask.count(), 2);
        mask.set(0, false);
        assert!(!mask.get(0));
    }

    #[test]
    fn test_out_of_range() {
        let mut mask = OccupancyMask::new(4);
        mask.set(10, true);
        assert!(!mask.get(10));
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_resize_clears() {
        let mut mask = OccupancyMask::new(8);
        mask.set(3, true);
        mask.resize(16);
        assert_eq!(mask.len(), 16);
        assert!(!mask.any());
    }

    #[test]
    fn test_copy_from() {
        let mut a = OccupancyMask::new(8);
        let mut b = OccupancyMask::new(8);
        b.set(5, true);
        a.copy_from(&b);
        assert!(a.get(5));
    }
}
