//! Function-module layout of a symbol and the zig-zag order of its data modules

use super::bch::{format_bits, version_bits};
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Alignment pattern center coordinates (rows and columns) for a version
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let v = version.number() as usize;
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let step = (v * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;
    let mut positions = vec![0usize; num_align];
    positions[0] = 6;
    let mut pos = version.size() - 7;
    for slot in positions.iter_mut().skip(1).rev() {
        *slot = pos;
        pos = pos.saturating_sub(step);
    }
    positions
}

/// Module coordinates `(x, y)` of format bit `i` for both copies
pub fn format_positions(size: usize) -> [[(usize, usize); 15]; 2] {
    let mut first = [(0, 0); 15];
    let mut second = [(0, 0); 15];
    for (i, slot) in first.iter_mut().enumerate() {
        *slot = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
    }
    for (i, slot) in second.iter_mut().enumerate() {
        *slot = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
    }
    [first, second]
}

/// Module coordinates `(x, y)` of version bit `i` for both copies
pub fn version_positions(size: usize) -> [[(usize, usize); 18]; 2] {
    let mut top_right = [(0, 0); 18];
    let mut bottom_left = [(0, 0); 18];
    for i in 0..18 {
        let a = size - 11 + i % 3;
        let b = i / 3;
        top_right[i] = (a, b);
        bottom_left[i] = (b, a);
    }
    [top_right, bottom_left]
}

/// Write both copies of the format information
pub fn draw_format_bits(modules: &mut BitMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let bits = format_bits(ec_level, mask);
    for copy in format_positions(modules.width()) {
        for (i, (x, y)) in copy.into_iter().enumerate() {
            modules.set(x, y, (bits >> i) & 1 != 0);
        }
    }
}

/// XOR a mask pattern over every data module; applying it twice restores the grid
pub fn apply_mask(modules: &mut BitMatrix, function: &BitMatrix, mask: MaskPattern) {
    for y in 0..modules.height() {
        for x in 0..modules.width() {
            if !function.get(x, y) && mask.is_masked(y, x) {
                modules.toggle(x, y);
            }
        }
    }
}

/// Function patterns of one version: their colours and the flags marking
/// which modules they occupy. Format areas are reserved light, the fixed dark
/// module is set, version information is drawn.
#[derive(Debug, Clone)]
pub struct FunctionLayout {
    version: Version,
    modules: BitMatrix,
    function: BitMatrix,
}

impl FunctionLayout {
    /// Draw every function pattern of `version`
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut layout = Self {
            version,
            modules: BitMatrix::square(size),
            function: BitMatrix::square(size),
        };

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            layout.set_function(6, i, i % 2 == 0);
            layout.set_function(i, 6, i % 2 == 0);
        }

        // Finder patterns with their separators
        layout.draw_finder(3, 3);
        layout.draw_finder(size - 4, 3);
        layout.draw_finder(3, size - 4);

        let align = alignment_pattern_positions(version);
        let last = align.len().saturating_sub(1);
        for (i, &cx) in align.iter().enumerate() {
            for (j, &cy) in align.iter().enumerate() {
                let overlaps_finder =
                    (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !overlaps_finder {
                    layout.draw_alignment(cx, cy);
                }
            }
        }

        for copy in format_positions(size) {
            for (x, y) in copy {
                layout.set_function(x, y, false);
            }
        }
        layout.set_function(8, size - 8, true);

        if version.number() >= 7 {
            let bits = version_bits(version);
            for copy in version_positions(size) {
                for (i, (x, y)) in copy.into_iter().enumerate() {
                    layout.set_function(x, y, (bits >> i) & 1 != 0);
                }
            }
        }

        layout
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.function.set(x, y, true);
    }

    fn draw_finder(&mut self, cx: usize, cy: usize) {
        let size = self.size() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let x = cx as isize + dx;
                let y = cy as isize + dy;
                if (0..size).contains(&x) && (0..size).contains(&y) {
                    let dist = dx.abs().max(dy.abs());
                    self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment(&mut self, cx: usize, cy: usize) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let x = (cx as isize + dx) as usize;
                let y = (cy as isize + dy) as usize;
                self.set_function(x, y, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    /// Version the layout was built for
    pub fn version(&self) -> Version {
        self.version
    }

    /// Modules per side
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Whether `(x, y)` is reserved for a function pattern
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function.get(x, y)
    }

    /// Function pattern colours
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Function module flags
    pub fn function_mask(&self) -> &BitMatrix {
        &self.function
    }

    /// `(modules, function mask)`
    pub fn into_parts(self) -> (BitMatrix, BitMatrix) {
        (self.modules, self.function)
    }

    /// Data module coordinates `(x, y)` in placement order: column pairs from
    /// the right edge, alternating upward and downward, skipping the vertical
    /// timing column.
    pub fn data_positions(&self) -> Vec<(usize, usize)> {
        let size = self.size() as isize;
        let mut positions = Vec::with_capacity(self.size() * self.size());
        let mut right = size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let upward = (right + 1) & 2 == 0;
            for vert in 0..size {
                let y = (if upward { size - 1 - vert } else { vert }) as usize;
                for x in [right as usize, right as usize - 1] {
                    if !self.function.get(x, y) {
                        positions.push((x, y));
                    }
                }
            }
            right -= 2;
        }
        positions
    }
}
