//! Reed-Solomon error correction for QR codes
//! QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//! and generator roots alpha^0 .. alpha^(ecc-1)

use crate::capability::gf256::Gf256;
use thiserror::Error;

/// Why a block could not be corrected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RsError {
    /// The error locator has degree above ecc / 2
    #[error("more errors than the block can correct")]
    TooManyErrors,
    /// Chien search found a different number of roots than the locator degree
    #[error("error locator roots do not match its degree")]
    LocatorMismatch,
    /// Forney's formula hit a zero derivative
    #[error("degenerate error evaluator")]
    Degenerate,
    /// Syndromes are still non-zero after applying the correction
    #[error("residual syndrome after correction")]
    ResidualSyndrome,
}

/// Reed-Solomon decoder for QR codes
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `num_ecc_codewords` EC codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` (data then EC codewords) in place. Returns the
    /// number of corrected codewords.
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, RsError> {
        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = self.find_error_locator(&syndrome)?;
        let positions = self.find_error_positions(&sigma, received.len())?;
        let values = self.find_error_values(&sigma, &syndrome, &positions, received.len())?;

        for (&pos, &value) in positions.iter().zip(&values) {
            received[pos] ^= value;
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err(RsError::ResidualSyndrome);
        }
        Ok(positions.len())
    }

    /// S_i = r(alpha^i); c[0] is the coefficient of x^(n-1)
    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        (0..self.num_ecc_codewords)
            .map(|i| {
                let x = Gf256::exp(i);
                received.iter().fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
            })
            .collect()
    }

    /// Berlekamp-Massey; the locator is returned lowest power first
    fn find_error_locator(&self, syndrome: &[u8]) -> Result<Vec<u8>, RsError> {
        let n = syndrome.len();
        let mut sigma = vec![1u8];
        let mut prev = vec![1u8];
        let mut prev_delta: u8 = 1;
        let mut l = 0;
        let mut m = 1;

        for i in 0..n {
            let mut delta = syndrome[i];
            for j in 1..=l.min(sigma.len() - 1) {
                delta ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }
            if delta == 0 {
                m += 1;
                continue;
            }

            // sigma - (delta / prev_delta) * x^m * prev
            let coef = Gf256::div(delta, prev_delta);
            let mut next = sigma.clone();
            if next.len() < prev.len() + m {
                next.resize(prev.len() + m, 0);
            }
            for (j, &p) in prev.iter().enumerate() {
                next[j + m] ^= Gf256::mul(coef, p);
            }

            if 2 * l <= i {
                prev = std::mem::replace(&mut sigma, next);
                prev_delta = delta;
                l = i + 1 - l;
                m = 1;
            } else {
                sigma = next;
                m += 1;
            }
        }

        if 2 * l > n {
            return Err(RsError::TooManyErrors);
        }
        sigma.truncate(l + 1);
        Ok(sigma)
    }

    /// Chien search: position j is in error when sigma(alpha^-(n-1-j)) = 0
    fn find_error_positions(&self, sigma: &[u8], n: usize) -> Result<Vec<usize>, RsError> {
        let degree = sigma.len() - 1;
        let positions: Vec<usize> = (0..n)
            .filter(|&j| {
                let x_inv = Gf256::inv(Gf256::exp(n - 1 - j));
                eval_ascending(sigma, x_inv) == 0
            })
            .collect();

        if positions.len() != degree {
            return Err(RsError::LocatorMismatch);
        }
        Ok(positions)
    }

    /// Forney: e_k = X_k * omega(X_k^-1) / sigma'(X_k^-1)
    fn find_error_values(
        &self,
        sigma: &[u8],
        syndrome: &[u8],
        positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, RsError> {
        // omega = syndrome * sigma mod x^(ecc)
        let mut omega = vec![0u8; syndrome.len()];
        for (i, slot) in omega.iter_mut().enumerate() {
            for (j, &s) in sigma.iter().enumerate().take(i + 1) {
                *slot ^= Gf256::mul(s, syndrome[i - j]);
            }
        }

        // Formal derivative: odd terms shifted down one power
        let sigma_prime: Vec<u8> = sigma
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
            .collect();

        positions
            .iter()
            .map(|&pos| {
                let x = Gf256::exp(n - 1 - pos);
                let x_inv = Gf256::inv(x);
                let denominator = eval_ascending(&sigma_prime, x_inv);
                if denominator == 0 {
                    return Err(RsError::Degenerate);
                }
                let numerator = eval_ascending(&omega, x_inv);
                Ok(Gf256::mul(x, Gf256::div(numerator, denominator)))
            })
            .collect()
    }
}

/// Evaluate a polynomial stored lowest power first
fn eval_ascending(poly: &[u8], x: u8) -> u8 {
    poly.iter().rev().fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::generator::ec_codewords;

    fn rs_encode(data: &[u8], num_ecc: usize) -> Vec<u8> {
        let mut codeword = data.to_vec();
        codeword.extend(ec_codewords(data, num_ecc));
        codeword
    }

    #[test]
    fn test_rs_encode_decode_no_errors() {
        let data = vec![0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
        let mut codeword = rs_encode(&data, 10);
        assert_eq!(ReedSolomonDecoder::new(10).decode(&mut codeword), Ok(0));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_correct_single_error() {
        let data = vec![0x00; 10];
        let mut codeword = rs_encode(&data, 10);
        codeword[3] ^= 0xAB;

        assert_eq!(ReedSolomonDecoder::new(10).decode(&mut codeword), Ok(1));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_correct_multiple_errors() {
        let data = vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
        let mut codeword = rs_encode(&data, 10);
        codeword[0] ^= 0xFF;
        codeword[4] ^= 0x42;
        codeword[7] ^= 0x13;

        assert_eq!(ReedSolomonDecoder::new(10).decode(&mut codeword), Ok(3));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_correct_errors_at_end() {
        let data = vec![0x01, 0x02, 0x03, 0x04, 0x05];
        let mut codeword = rs_encode(&data, 8);
        let total = codeword.len();
        codeword[total - 1] ^= 0xFF;
        codeword[total - 2] ^= 0x33;

        assert_eq!(ReedSolomonDecoder::new(8).decode(&mut codeword), Ok(2));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_threshold() {
        let data: Vec<u8> = (0..16u8).map(|i| i.wrapping_mul(37)).collect();
        let clean = rs_encode(&data, 10);

        // floor(10 / 2) = 5 errors are correctable
        let mut five = clean.clone();
        for i in [0, 5, 9, 14, 22] {
            five[i] ^= 0x5A;
        }
        assert_eq!(ReedSolomonDecoder::new(10).decode(&mut five), Ok(5));
        assert_eq!(five, clean);

        let mut six = clean.clone();
        for i in [0, 3, 5, 9, 14, 22] {
            six[i] ^= 0x5A;
        }
        assert!(ReedSolomonDecoder::new(10).decode(&mut six).is_err());
    }

    #[test]
    fn test_rs_full_size_block() {
        // Longest QR block: 123 data + 30 EC codewords (version 40-L long block)
        let data: Vec<u8> = (0..123u32).map(|i| (i * 7 + 3) as u8).collect();
        let clean = rs_encode(&data, 30);
        let mut damaged = clean.clone();
        for i in (0..15).map(|k| k * 10) {
            damaged[i] ^= 0xC3;
        }
        assert_eq!(ReedSolomonDecoder::new(30).decode(&mut damaged), Ok(15));
        assert_eq!(damaged, clean);
    }
}
