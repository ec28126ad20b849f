/// Compact bit matrix, row-major, packed into 64-bit words
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    words: Vec<u64>,
}

impl BitMatrix {
    /// Create a new all-false bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let words_needed = (width * height).div_ceil(64);
        Self {
            width,
            height,
            words: vec![0; words_needed],
        }
    }

    /// Create a square matrix
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn locate(&self, x: usize, y: usize) -> Option<(usize, u64)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y * self.width + x;
        Some((index / 64, 1u64 << (index % 64)))
    }

    /// Get bit at (x, y); out of bounds reads as false
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        match self.locate(x, y) {
            Some((word, bit)) => self.words[word] & bit != 0,
            None => false,
        }
    }

    /// Set bit at (x, y); out of bounds writes are ignored
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some((word, bit)) = self.locate(x, y) {
            if value {
                self.words[word] |= bit;
            } else {
                self.words[word] &= !bit;
            }
        }
    }

    /// Toggle bit at (x, y)
    #[inline]
    pub fn toggle(&mut self, x: usize, y: usize) {
        if let Some((word, bit)) = self.locate(x, y) {
            self.words[word] ^= bit;
        }
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Number of set bits
    pub fn count_set(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Swap rows and columns
    pub fn transposed(&self) -> BitMatrix {
        let mut out = BitMatrix::new(self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    out.set(y, x, true);
                }
            }
        }
        out
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
