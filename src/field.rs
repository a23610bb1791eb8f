use core::fmt;

use crate::utils::{is_prime, mod_inverse};

/// Errors raised when constructing a [`PrimeField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The requested modulus is not a prime number, so Z/pZ would not
    /// be a field and root search would be meaningless.
    NotPrime(u64),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NotPrime(p) => write!(f, "modulus {} is not prime", p),
        }
    }
}

impl std::error::Error for FieldError {}

/// The prime residue class field Z/pZ with a runtime modulus.
///
/// Elements are represented as `u64` values; all operations reduce into
/// the canonical range `[0, p)`. The modulus is validated as prime at
/// construction; with a composite modulus the ring has zero divisors
/// and the factorizer's root search loses its meaning.
///
/// # Example
///
/// ```
/// use restklasse::PrimeField;
///
/// let f11 = PrimeField::new(11).unwrap();
/// assert_eq!(f11.add(5, 13), 7);
/// assert_eq!(f11.mul(3, 7), 10);
/// assert_eq!(f11.pow(2, 10), 1); // Fermat: a^(p-1) = 1
///
/// assert!(PrimeField::new(15).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField {
    p: u64,
}

impl PrimeField {
    /// Create the field Z/pZ, validating that `p` is prime.
    pub fn new(p: u64) -> Result<Self, FieldError> {
        if !is_prime(p) {
            return Err(FieldError::NotPrime(p));
        }
        Ok(Self { p })
    }

    /// The field modulus `p`.
    pub const fn modulus(&self) -> u64 {
        self.p
    }

    /// Canonical representative of `a` in `[0, p)`.
    pub const fn reduce(&self, a: u64) -> u64 {
        a % self.p
    }

    pub const fn add(&self, a: u64, b: u64) -> u64 {
        (self.reduce(a) + self.reduce(b)) % self.p
    }

    pub const fn sub(&self, a: u64, b: u64) -> u64 {
        (self.reduce(a) + self.p - self.reduce(b)) % self.p
    }

    /// Multiplication with a `u128` intermediate, so large representatives
    /// cannot silently overflow before reduction.
    pub const fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.p as u128) as u64
    }

    pub const fn neg(&self, a: u64) -> u64 {
        let a = self.reduce(a);
        if a == 0 {
            0
        } else {
            self.p - a
        }
    }

    /// Compute `base^exp mod p` using square-and-multiply.
    ///
    /// Time complexity: O(log exp) multiplications.
    pub fn pow(&self, base: u64, exp: u64) -> u64 {
        let mut base = self.reduce(base);
        let mut result = 1u64;
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(result, base);
            }
            base = self.mul(base, base);
            e >>= 1;
        }
        result
    }

    /// Multiplicative inverse `a⁻¹ mod p`, if it exists.
    ///
    /// Returns `None` for the zero residue.
    pub fn inverse(&self, a: u64) -> Option<u64> {
        mod_inverse(a, self.p)
    }
}
