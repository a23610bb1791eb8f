//! Leaf number-theory utilities shared by the field and CRT modules.

/// Check if `n` is a prime number.
///
/// Uses trial division up to sqrt(n). Suitable for validating field
/// moduli at construction time, not for high-performance primality
/// testing.
pub const fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Greatest common divisor via Euclid's algorithm.
///
/// `gcd(0, 0)` is defined as 0.
pub const fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` such that `g = gcd(a, b)` and `x·a + y·b = g`
/// (Bézout coefficients). The gcd is non-negative for non-negative
/// inputs; the coefficients may be negative.
///
/// # Example
///
/// ```
/// use restklasse::extended_gcd;
///
/// let (g, x, y) = extended_gcd(240, 46);
/// assert_eq!(g, 2);
/// assert_eq!(x * 240 + y * 46, g);
///
/// assert_eq!(extended_gcd(10, 9).0, 1);
/// assert_eq!(extended_gcd(12, 4).0, 4);
/// ```
pub fn extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (1i64, 0i64);
    let (mut old_y, mut y) = (0i64, 1i64);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_x, x) = (x, old_x - q * x);
        (old_y, y) = (y, old_y - q * y);
    }

    (old_r, old_x, old_y)
}

/// Multiplicative inverse of `a` modulo `m`, normalised into `[0, m)`.
///
/// Returns `None` when `gcd(a, m) != 1` (no inverse exists) or when
/// `m` is zero.
///
/// # Example
///
/// ```
/// use restklasse::mod_inverse;
///
/// assert_eq!(mod_inverse(9, 10), Some(9)); // 9 * 9 = 81 ≡ 1 (mod 10)
/// assert_eq!(mod_inverse(4, 12), None);    // gcd(4, 12) = 4
/// ```
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m == 0 {
        return None;
    }
    let (g, x, _) = extended_gcd((a % m) as i64, m as i64);
    if g != 1 {
        return None;
    }
    Some(x.rem_euclid(m as i64) as u64)
}
