//! GF(2^8) arithmetic
//!
//! The field used by AES: polynomials over GF(2) reduced modulo
//! x^8 + x^4 + x^3 + x + 1 (0x11B). Multiplication and division go through
//! log/exp tables generated at compile time from the generator 3.
//!
//! Every function here is total over its domain. Division by zero and the
//! inverse of zero panic; the sharing layer validates its inputs so neither
//! is reachable from a public operation.

/// Reduction polynomial x^8 + x^4 + x^3 + x + 1
pub const POLYNOMIAL: u16 = 0x11B;

/// Generator of the multiplicative group used to build the tables
pub const GENERATOR: u8 = 0x03;

const TABLES: ([u8; 256], [u8; 510]) = build_tables();

/// log[x] = discrete log of x base 3 (log[0] is unused)
static LOG: [u8; 256] = TABLES.0;

/// exp[i] = 3^i, stored twice so sums of two logs need no reduction
static EXP: [u8; 510] = TABLES.1;

const fn build_tables() -> ([u8; 256], [u8; 510]) {
    let mut log = [0u8; 256];
    let mut exp = [0u8; 510];

    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        exp[i + 255] = x as u8;
        log[x as usize] = i as u8;

        // x * 3 == (x * 2) ^ x
        let mut doubled = x << 1;
        if doubled & 0x100 != 0 {
            doubled ^= POLYNOMIAL;
        }
        x = doubled ^ x;
        i += 1;
    }

    (log, exp)
}

/// Field addition (XOR)
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Field subtraction, identical to addition in characteristic 2
#[inline]
pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Field multiplication
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP[LOG[a as usize] as usize + LOG[b as usize] as usize]
}

/// Multiplicative inverse
///
/// # Panics
///
/// Panics if `a == 0`.
#[inline]
pub fn inv(a: u8) -> u8 {
    assert!(a != 0, "zero has no inverse in GF(256)");
    EXP[255 - LOG[a as usize] as usize]
}

/// Field division, `a * inv(b)`
///
/// # Panics
///
/// Panics if `b == 0`.
#[inline]
pub fn div(a: u8, b: u8) -> u8 {
    assert!(b != 0, "division by zero in GF(256)");
    if a == 0 {
        return 0;
    }
    EXP[LOG[a as usize] as usize + 255 - LOG[b as usize] as usize]
}

/// Evaluate a polynomial at `x` using Horner's method.
///
/// `coefficients[0]` is the constant term.
pub fn eval_polynomial(coefficients: &[u8], x: u8) -> u8 {
    coefficients
        .iter()
        .rev()
        .fold(0u8, |acc, &c| add(mul(acc, x), c))
}

/// Lagrange basis polynomials evaluated at zero.
///
/// For distinct, non-zero x-coordinates `xs`, returns `l_i(0)` for each
/// `i`, so that `f(0) = sum(l_i(0) * y_i)` for any polynomial of degree
/// below `xs.len()`. The basis only depends on the x-coordinates, which lets
/// a caller reuse it across every byte of a multi-byte secret.
///
/// # Panics
///
/// Panics if two x-coordinates are equal.
pub fn lagrange_basis_at_zero(xs: &[u8]) -> Vec<u8> {
    xs.iter()
        .enumerate()
        .map(|(i, &xi)| {
            let mut numerator = 1u8;
            let mut denominator = 1u8;
            for (j, &xj) in xs.iter().enumerate() {
                if i != j {
                    numerator = mul(numerator, xj);
                    denominator = mul(denominator, sub(xj, xi));
                }
            }
            div(numerator, denominator)
        })
        .collect()
}

/// Recover `f(0)` from `(x, y)` points.
pub fn interpolate_at_zero(points: &[(u8, u8)]) -> u8 {
    let xs: Vec<u8> = points.iter().map(|&(x, _)| x).collect();
    lagrange_basis_at_zero(&xs)
        .iter()
        .zip(points)
        .fold(0u8, |acc, (&l, &(_, y))| add(acc, mul(l, y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shift-and-add multiplication, independent of the tables
    fn slow_mul(mut a: u8, mut b: u8) -> u8 {
        let mut result = 0u8;
        while b != 0 {
            if b & 1 != 0 {
                result ^= a;
            }
            let carry = a & 0x80;
            a <<= 1;
            if carry != 0 {
                a ^= (POLYNOMIAL & 0xFF) as u8;
            }
            b >>= 1;
        }
        result
    }

    #[test]
    fn test_fips197_vectors() {
        assert_eq!(mul(0x57, 0x83), 0xC1);
        assert_eq!(mul(0x57, 0x13), 0xFE);
        assert_eq!(add(0x57, 0x83), 0xD4);
    }

    #[test]
    fn test_mul_matches_reference() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(mul(a, b), slow_mul(a, b), "{a} * {b}");
            }
        }
    }

    #[test]
    fn test_inverse() {
        for a in 1..=255u8 {
            assert_eq!(mul(a, inv(a)), 1, "inverse of {a}");
            assert_eq!(div(a, a), 1);
        }
        assert_eq!(div(0, 7), 0);
    }

    #[test]
    fn test_div_undoes_mul() {
        for a in 0..=255u8 {
            for b in 1..=255u8 {
                assert_eq!(div(mul(a, b), b), a);
            }
        }
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_div_by_zero_panics() {
        div(5, 0);
    }

    #[test]
    fn test_eval_polynomial() {
        // f(x) = 7 + 3x
        assert_eq!(eval_polynomial(&[7, 3], 0), 7);
        assert_eq!(eval_polynomial(&[7, 3], 1), 7 ^ 3);
        assert_eq!(eval_polynomial(&[7, 3], 2), 7 ^ mul(3, 2));
        assert_eq!(eval_polynomial(&[], 9), 0);
    }

    #[test]
    fn test_interpolate_recovers_constant_term() {
        let coefficients = [0x42, 0x17, 0xA9];
        let points: Vec<(u8, u8)> = [1u8, 5, 200]
            .iter()
            .map(|&x| (x, eval_polynomial(&coefficients, x)))
            .collect();
        assert_eq!(interpolate_at_zero(&points), 0x42);
    }
}
