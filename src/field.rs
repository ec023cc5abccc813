//! arithmetic in the finite field GF(2^8)
//!
//! All shard bytes are treated as elements of the field of 256 elements
//! defined by the primitive polynomial $x^8 + x^4 + x^3 + x^2 + 1$, i.e.
//! `0x11D`. Addition and subtraction are both XOR, multiplication and
//! division go through exponentiation and logarithm lookup tables built once
//! at startup.
use std::sync::OnceLock;

use crate::error::TessellaError;

/// The primitive polynomial generating the field, $x^8 + x^4 + x^3 + x^2 + 1$.
const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;

/// Exponentiation and logarithm tables for GF(2^8).
///
/// The exponentiation table is built double-length: the logs of two nonzero
/// elements are each at most 254, and a division adds 255 to the difference,
/// so every index used by [`Gf256::mul`] and [`Gf256::div`] is at most 509
/// and needs no reduction modulo 255.
///
/// `log[0]` is stored as 0 by convention (the true logarithm of zero is
/// undefined) and is never read as an operand: every operation
/// short-circuits zero inputs first.
#[derive(Debug)]
pub struct Gf256 {
    exp: [u8; 510],
    log: [u8; 256],
}

impl Gf256 {
    /// Build the lookup tables by walking the powers of the generator,
    /// reducing by the primitive polynomial on each 8-bit overflow.
    pub fn new() -> Self {
        let mut exp = [0u8; 510];
        let mut log = [0u8; 256];

        let mut x: u16 = 1;
        for i in 0..255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE_POLYNOMIAL;
            }
        }
        for i in 255..510 {
            exp[i] = exp[i - 255];
        }

        Self { exp, log }
    }

    /// Addition, i.e. XOR in a field of characteristic 2.
    #[inline]
    pub fn add(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    /// Subtraction coincides with addition in a field of characteristic 2.
    #[inline]
    pub fn sub(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            0
        } else {
            self.exp[self.log[a as usize] as usize + self.log[b as usize] as usize]
        }
    }

    /// # Errors
    /// [`TessellaError::DivisionByZero`] when `b` is zero.
    #[inline]
    pub fn div(&self, a: u8, b: u8) -> Result<u8, TessellaError> {
        if b == 0 {
            Err(TessellaError::DivisionByZero)
        } else if a == 0 {
            Ok(0)
        } else {
            Ok(self.exp
                [self.log[a as usize] as usize + 255 - self.log[b as usize] as usize])
        }
    }

    /// Exponentiation by a non-negative integer.
    #[inline]
    pub fn pow(&self, a: u8, n: usize) -> u8 {
        if n == 0 {
            1
        } else if a == 0 {
            0
        } else {
            self.exp[(self.log[a as usize] as usize * n) % 255]
        }
    }

    /// The multiplicative inverse.
    ///
    /// # Errors
    /// [`TessellaError::InvalidOperation`] when `a` is zero.
    #[inline]
    pub fn inv(&self, a: u8) -> Result<u8, TessellaError> {
        if a == 0 {
            Err(TessellaError::InvalidOperation(
                "zero has no multiplicative inverse".to_string(),
            ))
        } else {
            Ok(self.exp[255 - self.log[a as usize] as usize])
        }
    }
}

impl Default for Gf256 {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide field tables.
///
/// The tables do not depend on the codec configuration, so a single instance
/// is shared by every codec. Construction happens once behind the lock,
/// before any concurrent use, and the tables are read-only afterwards.
pub fn tables() -> &'static Gf256 {
    static TABLES: OnceLock<Gf256> = OnceLock::new();
    TABLES.get_or_init(Gf256::new)
}

#[cfg(test)]
mod tests {
    use crate::error::TessellaError;

    use super::{tables, Gf256};

    #[test]
    fn exp_and_log_are_inverse_walks() {
        let gf = Gf256::new();
        // the generator walk visits every nonzero element exactly once
        for a in 1..=255u8 {
            let l = gf.log[a as usize] as usize;
            assert_eq!(gf.exp[l], a, "exp[log[{a}]] should be {a}");
        }
        // the double-length mirror
        for i in 0..255 {
            assert_eq!(gf.exp[i], gf.exp[i + 255]);
        }
    }

    #[test]
    fn addition_is_xor_and_self_inverse() {
        let gf = tables();
        assert_eq!(gf.add(0x53, 0xCA), 0x53 ^ 0xCA);
        for a in 0..=255u8 {
            assert_eq!(gf.add(a, a), 0);
            assert_eq!(gf.sub(a, a), 0);
            assert_eq!(gf.add(a, 0), a);
        }
    }

    #[test]
    fn multiplication_identities() {
        let gf = tables();
        for a in 0..=255u8 {
            assert_eq!(gf.mul(a, 0), 0);
            assert_eq!(gf.mul(0, a), 0);
            assert_eq!(gf.mul(a, 1), a);
            assert_eq!(gf.mul(1, a), a);
        }
        for a in 1..=255u8 {
            for b in 1..=255u8 {
                assert_ne!(gf.mul(a, b), 0, "nonzero product of {a} and {b}");
                assert_eq!(gf.mul(a, b), gf.mul(b, a));
            }
        }
    }

    #[test]
    fn division_inverts_multiplication() {
        let gf = tables();
        for a in 0..=255u8 {
            for b in 1..=255u8 {
                let p = gf.mul(a, b);
                assert_eq!(gf.div(p, b).unwrap(), a, "({a} * {b}) / {b}");
            }
        }
    }

    #[test]
    fn division_by_zero_fails() {
        let gf = tables();
        assert_eq!(gf.div(42, 0), Err(TessellaError::DivisionByZero));
        assert_eq!(gf.div(0, 0), Err(TessellaError::DivisionByZero));
        assert_eq!(gf.div(0, 42), Ok(0));
    }

    #[test]
    fn inverse_of_every_nonzero_element() {
        let gf = tables();
        for a in 1..=255u8 {
            let i = gf.inv(a).unwrap();
            assert_eq!(gf.mul(a, i), 1, "{a} * inv({a})");
        }
        assert!(matches!(
            gf.inv(0),
            Err(TessellaError::InvalidOperation(..))
        ));
    }

    #[test]
    fn pow_matches_repeated_multiplication() {
        let gf = tables();
        for a in 0..=255u8 {
            assert_eq!(gf.pow(a, 0), 1);
        }
        for a in 1..=255u8 {
            let mut acc = 1u8;
            for n in 1..16 {
                acc = gf.mul(acc, a);
                assert_eq!(gf.pow(a, n), acc, "{a}^{n}");
            }
        }
        assert_eq!(gf.pow(0, 3), 0);
    }
}
