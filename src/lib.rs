//! Residue class field toolkit for modular arithmetic exercises.
//!
//! Two independent computational engines, as they appear in RSA and
//! Diffie-Hellman style coursework:
//!
//! - [`Factorizer`]: split a polynomial over the prime field Z/pZ into
//!   linear factors `(X - r)` by brute-force root search and synthetic
//!   division.
//! - [`crt::solve`]: solve a system of simultaneous congruences
//!   `x ≡ aᵢ (mod mᵢ)` with pairwise coprime moduli via the Chinese
//!   Remainder Theorem.
//!
//! Both are pure, synchronous computations over machine integers; the
//! extended Euclidean algorithm in [`utils`] is the shared leaf utility.
//!
//! ```
//! use restklasse::{Congruence, Factorizer, Polynomial, PrimeField};
//!
//! // Factor X^2 + 4X + 3 over Z/5Z.
//! let poly: Polynomial = "1X^2 + 4X^1 + 3X^0".parse().unwrap();
//! let factorizer = Factorizer::new(PrimeField::new(5).unwrap(), 2);
//! let factorization = factorizer.factorize(&poly).unwrap();
//! assert_eq!(factorization.roots(), &[2, 4]);
//!
//! // Solve x ≡ 1 (mod 2), x ≡ 2 (mod 3), x ≡ 3 (mod 5).
//! let system = [Congruence::new(2, 1), Congruence::new(3, 2), Congruence::new(5, 3)];
//! let solution = restklasse::crt::solve(&system).unwrap();
//! assert_eq!(solution.x, 23);
//! ```

pub mod crt;
pub mod factor;
pub mod field;
pub mod poly;
pub mod utils;

pub use crt::{Congruence, CrtError, CrtSolution};
pub use factor::{FactorError, Factorization, Factorizer};
pub use field::{FieldError, PrimeField};
pub use poly::{ParseError, Polynomial, Term};
pub use utils::{extended_gcd, gcd, is_prime, mod_inverse};
