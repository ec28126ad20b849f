//! Reed-Solomon generator polynomials and the encoder-side division

use super::gf256::Gf256;
use std::sync::OnceLock;

/// Largest EC codewords per block used by any version/level
pub const MAX_EC_CODEWORDS: usize = 30;

static GENERATORS: OnceLock<Vec<Vec<u8>>> = OnceLock::new();

/// Generator polynomial of the given degree, highest power first, monic:
/// `(x - a^0)(x - a^1)...(x - a^(degree-1))`
pub fn generator_polynomial(degree: usize) -> &'static [u8] {
    let table = GENERATORS.get_or_init(|| {
        let mut polys = Vec::with_capacity(MAX_EC_CODEWORDS + 1);
        let mut g = vec![1u8];
        polys.push(g.clone());
        for i in 0..MAX_EC_CODEWORDS {
            let root = Gf256::exp(i);
            let mut next = vec![0u8; g.len() + 1];
            for (j, &coef) in g.iter().enumerate() {
                next[j] ^= coef;
                next[j + 1] ^= Gf256::mul(coef, root);
            }
            g = next;
            polys.push(g.clone());
        }
        polys
    });
    &table[degree.min(MAX_EC_CODEWORDS)]
}

/// Remainder of `data * x^degree` divided by the generator: the EC codewords
pub fn ec_codewords(data: &[u8], degree: usize) -> Vec<u8> {
    let generator = generator_polynomial(degree);
    let mut remainder = vec![0u8; degree];
    for &byte in data {
        let factor = byte ^ remainder.first().copied().unwrap_or(0);
        remainder.rotate_left(1);
        if let Some(last) = remainder.last_mut() {
            *last = 0;
        }
        for (slot, &coef) in remainder.iter_mut().zip(&generator[1..]) {
            *slot ^= Gf256::mul(coef, factor);
        }
    }
    remainder
}
