use core::fmt;
use core::str::FromStr;

use crate::field::PrimeField;

/// Errors raised when parsing a polynomial string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A summand did not match the `<coefficient>X^<exponent>` shape.
    /// Carries the offending term text so the caller can point at it.
    InvalidTerm(String),
    /// The input contained no terms at all.
    Empty,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidTerm(term) => {
                write!(f, "invalid polynomial term {:?}, expected <int>X^<int>", term)
            }
            ParseError::Empty => write!(f, "empty polynomial input"),
        }
    }
}

impl std::error::Error for ParseError {}

/// One summand `value·X^grad` of a polynomial.
///
/// The coefficient is semantically a residue mod the field size, but
/// reduction is not enforced at construction; the factorizer reduces
/// on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    /// Non-negative exponent ("Grad").
    pub grad: u32,
    /// Coefficient.
    pub value: u64,
}

impl Term {
    pub const fn new(grad: u32, value: u64) -> Self {
        Self { grad, value }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}X^{}", self.value, self.grad)
    }
}

/// A polynomial over Z/pZ as an ordered sequence of terms.
///
/// Terms are kept sorted by descending `grad` with at most one term per
/// exponent (duplicates are merged at construction). Missing intermediate
/// degrees stay missing, so the parsed representation mirrors the input;
/// synthetic division densifies them with zero coefficients.
///
/// # Example
///
/// ```
/// use restklasse::Polynomial;
///
/// let p: Polynomial = "11X^5 + 5X^4 + 1X^3 + 5X^1 + 10X^0".parse().unwrap();
/// assert_eq!(p.degree(), Some(5));
/// assert_eq!(p.to_string(), "11X^5 + 5X^4 + 1X^3 + 5X^1 + 10X^0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    terms: Vec<Term>,
}

impl Polynomial {
    /// Build a polynomial from a term list in any order.
    ///
    /// Terms are sorted into descending-degree order; terms sharing an
    /// exponent are merged by summing their coefficients.
    pub fn from_terms(terms: Vec<Term>) -> Self {
        let mut terms = terms;
        terms.sort_by(|a, b| b.grad.cmp(&a.grad));

        let mut merged: Vec<Term> = Vec::with_capacity(terms.len());
        for term in terms {
            match merged.last_mut() {
                Some(last) if last.grad == term.grad => last.value += term.value,
                _ => merged.push(term),
            }
        }

        Self { terms: merged }
    }

    /// The zero polynomial (no terms).
    pub const fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// Terms in descending-degree order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Highest exponent present, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<u32> {
        self.terms.first().map(|t| t.grad)
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate the polynomial at `x` under field arithmetic.
    ///
    /// Each term contributes `value · x^grad mod p` via modular
    /// exponentiation, so large coefficients and exponents cannot
    /// overflow before reduction.
    ///
    /// # Example
    ///
    /// ```
    /// use restklasse::{Polynomial, PrimeField};
    ///
    /// let f11 = PrimeField::new(11).unwrap();
    /// let p: Polynomial = "5X^1 + 5X^0".parse().unwrap();
    /// assert_eq!(p.eval(&f11, 10), 0); // 10 is a root
    /// assert_eq!(p.eval(&f11, 1), 10);
    /// ```
    pub fn eval(&self, field: &PrimeField, x: u64) -> u64 {
        let mut sum = 0;
        for term in &self.terms {
            let power = field.pow(x, term.grad as u64);
            sum = field.add(sum, field.mul(field.reduce(term.value), power));
        }
        sum
    }

    /// Coefficients in descending-degree order with missing exponents
    /// filled in as zero, reduced mod p. Empty for the zero polynomial.
    pub(crate) fn dense_coeffs(&self, field: &PrimeField) -> Vec<u64> {
        let degree = match self.degree() {
            Some(d) => d,
            None => return Vec::new(),
        };

        let mut coeffs = vec![0u64; degree as usize + 1];
        for term in &self.terms {
            let idx = (degree - term.grad) as usize;
            coeffs[idx] = field.add(coeffs[idx], term.value);
        }
        coeffs
    }
}

impl FromStr for Polynomial {
    type Err = ParseError;

    /// Parse the `"<int>X^<int> + <int>X^<int> + …"` grammar.
    ///
    /// Whitespace is ignored. A summand that does not match the exact
    /// term shape is an error; there is no silent zero-term fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut terms = Vec::new();
        for part in cleaned.split('+') {
            terms.push(parse_term(part)?);
        }

        Ok(Self::from_terms(terms))
    }
}

fn parse_term(part: &str) -> Result<Term, ParseError> {
    let invalid = || ParseError::InvalidTerm(part.to_owned());

    let (coeff, exponent) = part.split_once("X^").ok_or_else(invalid)?;
    if coeff.is_empty() || exponent.is_empty() {
        return Err(invalid());
    }

    let value: u64 = coeff.parse().map_err(|_| invalid())?;
    let grad: u32 = exponent.parse().map_err(|_| invalid())?;
    Ok(Term::new(grad, value))
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0X^0");
        }

        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Polynomial {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as (grad, value) pairs in descending-degree order.
        let pairs: Vec<(u32, u64)> = self.terms.iter().map(|t| (t.grad, t.value)).collect();
        pairs.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Polynomial {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let pairs = Vec::<(u32, u64)>::deserialize(deserializer)?;
        let terms = pairs
            .into_iter()
            .map(|(grad, value)| Term::new(grad, value))
            .collect();
        Ok(Self::from_terms(terms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_input_string_sorted_descending() {
        let p: Polynomial = "11X^5 + 5X^4 + 1X^3 + 5X^1 + 10X^0".parse().unwrap();
        assert_eq!(
            p.terms(),
            &[
                Term::new(5, 11),
                Term::new(4, 5),
                Term::new(3, 1),
                Term::new(1, 5),
                Term::new(0, 10),
            ]
        );
    }

    #[test]
    fn parses_single_term() {
        let p: Polynomial = "15X^2".parse().unwrap();
        assert_eq!(p.terms(), &[Term::new(2, 15)]);
    }

    #[test]
    fn parse_sorts_unordered_input() {
        let p: Polynomial = "3X^0 + 1X^2 + 2X^1".parse().unwrap();
        assert_eq!(
            p.terms(),
            &[Term::new(2, 1), Term::new(1, 2), Term::new(0, 3)]
        );
    }

    #[test]
    fn parse_merges_duplicate_grads() {
        let p: Polynomial = "2X^1 + 3X^1".parse().unwrap();
        assert_eq!(p.terms(), &[Term::new(1, 5)]);
    }

    #[test]
    fn malformed_term_is_an_error() {
        // No silent zero-term fallback for malformed summands.
        let cases = ["ist egal.", "1X^2 + foo", "X^2", "2X^", "2Y^3", "1X^2 +"];
        for case in cases {
            let result: Result<Polynomial, _> = case.parse();
            assert!(
                matches!(result, Err(ParseError::InvalidTerm(_))),
                "{:?} should fail to parse",
                case
            );
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!("".parse::<Polynomial>(), Err(ParseError::Empty));
        assert_eq!("   ".parse::<Polynomial>(), Err(ParseError::Empty));
    }

    #[test]
    fn display_round_trips() {
        let src = "11X^5 + 5X^4 + 1X^3 + 5X^1 + 10X^0";
        let p: Polynomial = src.parse().unwrap();
        assert_eq!(p.to_string(), src);
        assert_eq!(p.to_string().parse::<Polynomial>().unwrap(), p);
    }

    #[test]
    fn display_zero() {
        assert_eq!(Polynomial::zero().to_string(), "0X^0");
    }

    #[test]
    fn degree_and_zero() {
        let p: Polynomial = "4X^3 + 1X^0".parse().unwrap();
        assert_eq!(p.degree(), Some(3));
        assert!(!p.is_zero());

        let z = Polynomial::zero();
        assert_eq!(z.degree(), None);
        assert!(z.is_zero());
    }

    #[test]
    fn eval_guesses_root_fixture() {
        // 5X + 5 over Z/11Z vanishes at 10.
        let f11 = PrimeField::new(11).unwrap();
        let p: Polynomial = "5X^1 + 5X^0".parse().unwrap();
        assert_eq!(p.eval(&f11, 10), 0);
        for x in 0..10 {
            assert_ne!(p.eval(&f11, x), 0);
        }
    }

    #[test]
    fn eval_reduces_unreduced_coefficients() {
        let f11 = PrimeField::new(11).unwrap();
        // 15X^2 ≡ 4X^2 (mod 11)
        let p: Polynomial = "15X^2".parse().unwrap();
        let q: Polynomial = "4X^2".parse().unwrap();
        for x in 0..11 {
            assert_eq!(p.eval(&f11, x), q.eval(&f11, x));
        }
    }

    #[test]
    fn eval_zero_polynomial() {
        let f11 = PrimeField::new(11).unwrap();
        assert_eq!(Polynomial::zero().eval(&f11, 7), 0);
    }

    #[test]
    fn dense_coeffs_pads_gaps() {
        let f11 = PrimeField::new(11).unwrap();
        let p: Polynomial = "1X^3 + 5X^0".parse().unwrap();
        assert_eq!(p.dense_coeffs(&f11), vec![1, 0, 0, 5]);
        assert!(Polynomial::zero().dense_coeffs(&f11).is_empty());
    }
}
