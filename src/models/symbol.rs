use super::{BitMatrix, ECLevel, MaskPattern, Version};

/// A finished QR symbol: the module grid plus the flags telling function
/// modules (finder, timing, alignment, format/version info) apart from data
/// modules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolMatrix {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    modules: BitMatrix,
    function: BitMatrix,
}

impl SymbolMatrix {
    pub(crate) fn from_parts(
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        modules: BitMatrix,
        function: BitMatrix,
    ) -> Self {
        Self {
            version,
            ec_level,
            mask,
            modules,
            function,
        }
    }

    /// Modules per side
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask applied to the data modules
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// True for a dark module at column `x`, row `y`
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// True when the module belongs to a function pattern
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function.get(x, y)
    }

    /// Dark/light module grid
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Function module flags
    pub fn function_modules(&self) -> &BitMatrix {
        &self.function
    }
}
