//! Simultaneous congruence solving via the Chinese Remainder Theorem,
//! as used for DH/RSA style exercises with big-ish moduli.

use core::fmt;

use crate::utils::{gcd, mod_inverse};

/// One congruence `x ≡ value (mod modulus)`.
///
/// The residue is not required to be pre-reduced; it is reduced when
/// the solution is combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Congruence {
    /// Positive modulus ("Modul").
    pub modulus: u64,
    /// Residue of `x` modulo `modulus`.
    pub value: u64,
}

impl Congruence {
    pub const fn new(modulus: u64, value: u64) -> Self {
        Self { modulus, value }
    }
}

impl fmt::Display for Congruence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x ≡ {} (mod {})", self.value, self.modulus)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Congruence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (self.modulus, self.value).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Congruence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (modulus, value) = <(u64, u64)>::deserialize(deserializer)?;
        Ok(Self::new(modulus, value))
    }
}

/// Errors raised by [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrtError {
    /// The system contains no congruences.
    Empty,
    /// A congruence has modulus zero.
    InvalidModulus { index: usize },
    /// Two moduli share a common factor, so no unique solution mod the
    /// product exists. Carries the offending pair and their gcd.
    NotCoprime { first: usize, second: usize, gcd: u64 },
    /// The modulus product does not fit into the native integer range.
    Overflow,
}

impl fmt::Display for CrtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrtError::Empty => write!(f, "empty congruence system"),
            CrtError::InvalidModulus { index } => {
                write!(f, "congruence {} has modulus 0", index)
            }
            CrtError::NotCoprime { first, second, gcd } => {
                write!(
                    f,
                    "moduli of congruences {} and {} are not coprime (gcd {})",
                    first, second, gcd
                )
            }
            CrtError::Overflow => write!(f, "modulus product exceeds the u64 range"),
        }
    }
}

impl std::error::Error for CrtError {}

/// Solution record of a congruence system, with all intermediate values
/// kept for diagnostic display.
///
/// `Display` renders the worked combination line of the exercise sheets:
/// `(v₁ · M₁⁻¹ · M₁) + … (mod M) = x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrtSolution {
    /// The unique solution in `[0, modulus_product)`.
    pub x: u64,
    /// `M`, the product of all moduli.
    pub modulus_product: u64,
    /// `Mᵢ = M / mᵢ` per congruence, in input order.
    pub partial_products: Vec<u64>,
    /// `Mᵢ⁻¹ mod mᵢ` per congruence, in input order.
    pub inverses: Vec<u64>,
    /// The input system, in input order.
    pub congruences: Vec<Congruence>,
}

impl fmt::Display for CrtSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x = ")?;
        for (i, congruence) in self.congruences.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(
                f,
                "({} * {} * {})",
                congruence.value, self.inverses[i], self.partial_products[i]
            )?;
        }
        write!(f, " (mod {}) = {}", self.modulus_product, self.x)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CrtSolution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CrtSolution", 5)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("modulus_product", &self.modulus_product)?;
        state.serialize_field("partial_products", &self.partial_products)?;
        state.serialize_field("inverses", &self.inverses)?;
        state.serialize_field("congruences", &self.congruences)?;
        state.end()
    }
}

/// Verify that all moduli are pairwise coprime.
///
/// Every pair is checked, not only adjacent ones. A chain of adjacent
/// checks misses systems like `(2, 3, 4)` where the first and last
/// moduli collide.
pub fn check_pairwise_coprime(congruences: &[Congruence]) -> Result<(), CrtError> {
    for (index, congruence) in congruences.iter().enumerate() {
        if congruence.modulus == 0 {
            return Err(CrtError::InvalidModulus { index });
        }
    }

    for i in 0..congruences.len() {
        for j in (i + 1)..congruences.len() {
            let g = gcd(congruences[i].modulus, congruences[j].modulus);
            if g != 1 {
                return Err(CrtError::NotCoprime {
                    first: i,
                    second: j,
                    gcd: g,
                });
            }
        }
    }

    Ok(())
}

/// Solve a system of simultaneous congruences.
///
/// Returns the unique `x mod M` satisfying every congruence, where `M`
/// is the product of all moduli, together with the per-congruence
/// partial products and modular inverses.
///
/// # Example
///
/// ```
/// use restklasse::{crt, Congruence};
///
/// let system = [
///     Congruence::new(10, 4),
///     Congruence::new(9, 1),
///     Congruence::new(13, 11),
///     Congruence::new(7, 1),
/// ];
/// let solution = crt::solve(&system).unwrap();
/// assert_eq!(solution.modulus_product, 8190);
/// assert_eq!(solution.x, 1324);
/// ```
pub fn solve(congruences: &[Congruence]) -> Result<CrtSolution, CrtError> {
    if congruences.is_empty() {
        return Err(CrtError::Empty);
    }
    check_pairwise_coprime(congruences)?;

    // Step 2: M = Π mᵢ.
    let mut modulus_product: u64 = 1;
    for congruence in congruences {
        modulus_product = modulus_product
            .checked_mul(congruence.modulus)
            .ok_or(CrtError::Overflow)?;
    }

    // Step 3: Mᵢ = M / mᵢ, exact by construction.
    let partial_products: Vec<u64> = congruences
        .iter()
        .map(|c| modulus_product / c.modulus)
        .collect();

    // Step 4: Mᵢ⁻¹ mod mᵢ. Coprimality was verified above, so the
    // inverse always exists.
    let inverses: Vec<u64> = congruences
        .iter()
        .zip(&partial_products)
        .map(|(c, &partial)| {
            mod_inverse(partial % c.modulus, c.modulus)
                .expect("moduli verified pairwise coprime")
        })
        .collect();

    // Step 5: x = Σ vᵢ · Mᵢ⁻¹ · Mᵢ mod M, accumulated in u128 so the
    // summands cannot overflow before the final reduction.
    let mut x: u128 = 0;
    for (i, congruence) in congruences.iter().enumerate() {
        let value = (congruence.value % congruence.modulus) as u128;
        x += value * inverses[i] as u128 * partial_products[i] as u128;
    }
    let x = (x % modulus_product as u128) as u64;

    Ok(CrtSolution {
        x,
        modulus_product,
        partial_products,
        inverses,
        congruences: congruences.to_vec(),
    })
}
