/// GF(256) arithmetic with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D)
pub struct Gf256;

const PRIMITIVE: u16 = 0x11D;

struct Tables {
    /// alpha^i, doubled so that `log a + log b` never needs a modulo
    exp: [u8; 512],
    log: [u8; 256],
}

const fn build_tables() -> Tables {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    while i < 512 {
        exp[i] = exp[i - 255];
        i += 1;
    }
    Tables { exp, log }
}

static TABLES: Tables = build_tables();

impl Gf256 {
    /// alpha^n
    #[inline]
    pub fn exp(n: usize) -> u8 {
        TABLES.exp[n % 255]
    }

    /// Discrete log of a non-zero element
    #[inline]
    pub fn log(a: u8) -> usize {
        debug_assert_ne!(a, 0, "log of zero");
        TABLES.log[a as usize] as usize
    }

    /// Product in GF(256)
    #[inline]
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        TABLES.exp[TABLES.log[a as usize] as usize + TABLES.log[b as usize] as usize]
    }

    /// `a / b`; `b` must be non-zero
    #[inline]
    pub fn div(a: u8, b: u8) -> u8 {
        debug_assert_ne!(b, 0, "division by zero");
        if a == 0 {
            return 0;
        }
        TABLES.exp[TABLES.log[a as usize] as usize + 255 - TABLES.log[b as usize] as usize]
    }

    /// Multiplicative inverse of a non-zero element
    #[inline]
    pub fn inv(a: u8) -> u8 {
        Self::div(1, a)
    }

    /// a^n
    pub fn pow(a: u8, n: usize) -> u8 {
        if n == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        Self::exp(Self::log(a) * (n % 255))
    }
}
