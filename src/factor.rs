use core::fmt;

use crate::field::PrimeField;
use crate::poly::{Polynomial, Term};

/// Errors raised during factorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorError {
    /// Root search exhausted the field at the given extraction step.
    /// The remaining polynomial has no root in Z/pZ, so further
    /// division would only produce garbage.
    NoRoot { step: u32 },
    /// The requested factor count is zero or exceeds the polynomial's
    /// degree, so the contract "extract k linear factors" cannot hold.
    InvalidFactorCount { requested: u32, degree: u32 },
}

impl fmt::Display for FactorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorError::NoRoot { step } => {
                write!(f, "polynomial has no root in the field at step {}", step)
            }
            FactorError::InvalidFactorCount { requested, degree } => {
                write!(
                    f,
                    "cannot extract {} linear factors from a degree-{} polynomial",
                    requested, degree
                )
            }
        }
    }
}

impl std::error::Error for FactorError {}

/// Result of a factorization: the extracted roots in search order and
/// the quotient left after the final division.
///
/// `Display` renders the factor string of the exercise sheets, e.g.
/// `" (X - 1) (X - 3) (X - 9)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factorization {
    roots: Vec<u64>,
    remaining: Polynomial,
}

impl Factorization {
    /// The extracted roots, one per linear factor `(X - r)`.
    ///
    /// Root search always returns the smallest root of the current
    /// quotient, so the sequence is non-decreasing.
    pub fn roots(&self) -> &[u64] {
        &self.roots
    }

    /// The quotient polynomial after the last division step.
    pub fn remaining(&self) -> &Polynomial {
        &self.remaining
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for root in &self.roots {
            write!(f, " (X - {})", root)?;
        }
        Ok(())
    }
}

/// Splits polynomials over Z/pZ into linear factors by brute-force root
/// search and synthetic division.
///
/// # Example
///
/// ```
/// use restklasse::{Factorizer, Polynomial, PrimeField};
///
/// let poly: Polynomial = "1X^5 + 9X^4 + 5X^3 + 8X^2 + 5X^1 + 5X^0".parse().unwrap();
/// let factorizer = Factorizer::new(PrimeField::new(11).unwrap(), 5);
///
/// let factorization = factorizer.factorize(&poly).unwrap();
/// let s = factorization.to_string();
/// assert!(s.contains("(X - 1)"));
/// assert!(s.contains("(X - 3)"));
/// assert!(s.contains("(X - 9)"));
/// assert!(s.contains("(X - 10)"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Factorizer {
    field: PrimeField,
    max_factors: u32,
}

impl Factorizer {
    /// A factorizer over the given field that extracts at most
    /// `max_factors` linear factors per run.
    pub const fn new(field: PrimeField, max_factors: u32) -> Self {
        Self { field, max_factors }
    }

    pub const fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Brute-force root search ("Nullstelle raten"): the first candidate
    /// in `[0, p)` at which the polynomial evaluates to zero.
    ///
    /// `None` means the polynomial has no root in the field.
    pub fn find_root(&self, poly: &Polynomial) -> Option<u64> {
        (0..self.field.modulus()).find(|&x| poly.eval(&self.field, x) == 0)
    }

    /// Synthetic division of `poly` by the linear factor `(X - root)`.
    ///
    /// Runs the bring-down recurrence `carriedₖ₊₁ = cₖ₊₁ + carriedₖ·root
    /// (mod p)` over the dense coefficient sequence, emitting one quotient
    /// term per step. The final carried value is the remainder; it is
    /// dropped, and is zero whenever `root` actually is a root.
    ///
    /// Missing intermediate degrees are treated as zero coefficients, and
    /// all coefficients are reduced mod p. Dividing a constant or zero
    /// polynomial yields the zero polynomial.
    pub fn divide_by_root(&self, poly: &Polynomial, root: u64) -> Polynomial {
        let coeffs = poly.dense_coeffs(&self.field);
        if coeffs.len() < 2 {
            return Polynomial::zero();
        }

        let degree = coeffs.len() as u32 - 1;
        let root = self.field.reduce(root);

        let mut quotient = Vec::with_capacity(coeffs.len() - 1);
        let mut carried = coeffs[0];
        for (i, &next) in coeffs.iter().enumerate().skip(1) {
            quotient.push(Term::new(degree - i as u32, carried));
            carried = self.field.add(next, self.field.mul(carried, root));
        }

        debug_assert!(
            poly.eval(&self.field, root) != 0 || carried == 0,
            "non-zero remainder when dividing by a verified root"
        );

        Polynomial::from_terms(quotient)
    }

    /// Extract exactly `max_factors` linear factors.
    ///
    /// Each round finds the smallest root of the current quotient and
    /// divides it out. A round without a root halts the whole run with
    /// [`FactorError::NoRoot`] rather than dividing by a sentinel.
    pub fn factorize(&self, poly: &Polynomial) -> Result<Factorization, FactorError> {
        let degree = poly.degree().unwrap_or(0);
        if self.max_factors == 0 || self.max_factors > degree {
            return Err(FactorError::InvalidFactorCount {
                requested: self.max_factors,
                degree,
            });
        }

        let mut roots = Vec::with_capacity(self.max_factors as usize);
        let mut quotient = poly.clone();

        for step in 0..self.max_factors {
            let root = self
                .find_root(&quotient)
                .ok_or(FactorError::NoRoot { step })?;
            roots.push(root);
            quotient = self.divide_by_root(&quotient, root);
        }

        Ok(Factorization {
            roots,
            remaining: quotient,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factorizer(p: u64, max_factors: u32) -> Factorizer {
        Factorizer::new(PrimeField::new(p).unwrap(), max_factors)
    }

    fn poly(s: &str) -> Polynomial {
        s.parse().unwrap()
    }

    #[test]
    fn finds_root_of_linear_polynomial() {
        let f = factorizer(11, 1);
        assert_eq!(f.find_root(&poly("5X^1 + 5X^0")), Some(10));
    }

    #[test]
    fn find_root_none_when_irreducible() {
        // X^2 + 1 has no root mod 3 (0→1, 1→2, 2→2).
        let f = factorizer(3, 1);
        assert_eq!(f.find_root(&poly("1X^2 + 1X^0")), None);
    }

    #[test]
    fn divides_probeklausur_polynomial_by_root_one() {
        let f = factorizer(11, 5);
        let quotient = f.divide_by_root(&poly("1X^5 + 9X^4 + 5X^3 + 8X^2 + 5X^1 + 5X^0"), 1);
        assert_eq!(quotient, poly("1X^4 + 10X^3 + 4X^2 + 1X^1 + 6X^0"));
    }

    #[test]
    fn division_pads_missing_degrees() {
        // X^3 + 5X + 17 over Z/19Z has a gap at X^2; dividing by the
        // root 12 must treat that coefficient as zero.
        let f = factorizer(19, 1);
        let p = poly("1X^3 + 5X^1 + 17X^0");
        assert_eq!(p.eval(f.field(), 12), 0);
        let quotient = f.divide_by_root(&p, 12);
        assert_eq!(quotient, poly("1X^2 + 12X^1 + 16X^0"));
    }

    #[test]
    fn division_of_constant_is_zero() {
        let f = factorizer(11, 1);
        assert!(f.divide_by_root(&poly("5X^0"), 3).is_zero());
        assert!(f.divide_by_root(&Polynomial::zero(), 3).is_zero());
    }

    #[test]
    fn factorizes_probeklausur_2021() {
        let f = factorizer(11, 5);
        let factorization = f
            .factorize(&poly("1X^5 + 9X^4 + 5X^3 + 8X^2 + 5X^1 + 5X^0"))
            .unwrap();

        let s = factorization.to_string();
        assert!(s.contains("(X - 1)"));
        assert!(s.contains("(X - 3)"));
        assert!(s.contains("(X - 9)"));
        assert!(s.contains("(X - 10)"));
        // Degree 5, five factors extracted: the quotient is fully reduced.
        assert_eq!(factorization.roots().len(), 5);
        assert!(factorization.remaining().degree() <= Some(0));
    }

    #[test]
    fn factorizes_klaukry_20190215() {
        let f = factorizer(19, 5);
        let factorization = f
            .factorize(&poly("1X^5 + 0X^4 + 5X^3 + 17X^2 + 0X^1 + 0X^0"))
            .unwrap();

        let s = factorization.to_string();
        assert!(s.contains("(X - 0)"));
        assert!(s.contains("(X - 12)"));
        assert!(s.contains("(X - 14)"));
    }

    #[test]
    fn factorizes_klaukry_20190722() {
        let f = factorizer(5, 5);
        let factorization = f
            .factorize(&poly("1X^5 + 4X^4 + 2X^3 + 1X^2 + 2X^1 + 0X^0"))
            .unwrap();

        assert_eq!(factorization.roots(), &[0, 1, 2, 4, 4]);
        let s = factorization.to_string();
        assert!(s.contains("(X - 0)"));
        assert!(s.contains("(X - 1)"));
        assert!(s.contains("(X - 2)"));
        assert!(s.contains("(X - 4)"));
    }

    #[test]
    fn factorizes_klaukry_20200217() {
        let f = factorizer(7, 5);
        let factorization = f
            .factorize(&poly("1X^5 + 3X^4 + 1X^3 + 4X^2 + 5X^1 + 0X^0"))
            .unwrap();

        let s = factorization.to_string();
        assert!(s.contains("(X - 0)"));
        assert!(s.contains("(X - 1)"));
        assert!(s.contains("(X - 5)"));
        assert!(s.contains("(X - 6)"));
    }

    #[test]
    fn factorizes_klaukry_20201006() {
        let f = factorizer(7, 5);
        let factorization = f
            .factorize(&poly("1X^5 + 4X^4 + 1X^3 + 0X^2 + 4X^1 + 0X^0"))
            .unwrap();

        let s = factorization.to_string();
        assert!(s.contains("(X - 0)"));
        assert!(s.contains("(X - 2)"));
        assert!(s.contains("(X - 4)"));
    }

    #[test]
    fn factor_string_format_matches_reference() {
        let f = factorizer(5, 2);
        let factorization = f.factorize(&poly("1X^2 + 4X^1 + 3X^0")).unwrap();
        assert_eq!(factorization.to_string(), " (X - 2) (X - 4)");
    }

    #[test]
    fn roots_come_out_sorted() {
        let f = factorizer(11, 5);
        let factorization = f
            .factorize(&poly("1X^5 + 9X^4 + 5X^3 + 8X^2 + 5X^1 + 5X^0"))
            .unwrap();
        let mut sorted = factorization.roots().to_vec();
        sorted.sort_unstable();
        assert_eq!(factorization.roots(), sorted.as_slice());
    }

    #[test]
    fn no_root_halts_factorization() {
        // X^2 + 1 is irreducible over Z/3Z.
        let f = factorizer(3, 2);
        assert_eq!(
            f.factorize(&poly("1X^2 + 1X^0")),
            Err(FactorError::NoRoot { step: 0 })
        );
    }

    #[test]
    fn no_root_mid_run_reports_the_step() {
        // (X - 1)(X^2 + 1) over Z/3Z: one root, then stuck.
        // (X - 1)(X^2 + 1) = X^3 - X^2 + X - 1 ≡ X^3 + 2X^2 + X + 2.
        let f = factorizer(3, 2);
        assert_eq!(
            f.factorize(&poly("1X^3 + 2X^2 + 1X^1 + 2X^0")),
            Err(FactorError::NoRoot { step: 1 })
        );
    }

    #[test]
    fn factor_count_must_fit_degree() {
        let f = factorizer(11, 3);
        assert_eq!(
            f.factorize(&poly("1X^2 + 4X^1 + 3X^0")),
            Err(FactorError::InvalidFactorCount {
                requested: 3,
                degree: 2
            })
        );

        let f = factorizer(11, 0);
        assert!(matches!(
            f.factorize(&poly("1X^2 + 4X^1 + 3X^0")),
            Err(FactorError::InvalidFactorCount { requested: 0, .. })
        ));

        let f = factorizer(11, 1);
        assert!(matches!(
            f.factorize(&Polynomial::zero()),
            Err(FactorError::InvalidFactorCount { degree: 0, .. })
        ));
    }

    #[test]
    fn partial_extraction_leaves_quotient() {
        let f = factorizer(11, 2);
        let factorization = f
            .factorize(&poly("1X^5 + 9X^4 + 5X^3 + 8X^2 + 5X^1 + 5X^0"))
            .unwrap();
        assert_eq!(factorization.roots().len(), 2);
        assert_eq!(factorization.remaining().degree(), Some(3));
    }
}
