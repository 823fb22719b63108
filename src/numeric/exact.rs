// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use rug::Rational;

use crate::numeric::sign::Sign;

/// Converts a finite `f64` into its exact rational value.
///
/// Every coordinate reaching the predicates has been checked for finiteness
/// when the mesh was built, so the non-finite arm only guards the type.
#[inline]
pub fn rational(v: f64) -> Rational {
    debug_assert!(v.is_finite(), "non-finite coordinate in exact predicate");
    Rational::from_f64(v).unwrap_or_default()
}

#[inline]
pub fn add(a: &Rational, b: &Rational) -> Rational {
    let mut result = a.clone();
    result += b;
    result
}

#[inline]
pub fn sub(a: &Rational, b: &Rational) -> Rational {
    let mut result = a.clone();
    result -= b;
    result
}

#[inline]
pub fn mul(a: &Rational, b: &Rational) -> Rational {
    let mut result = a.clone();
    result *= b;
    result
}

#[inline]
pub fn neg(a: &Rational) -> Rational {
    Rational::from(-a)
}

#[inline]
pub fn sign(v: &Rational) -> Sign {
    Sign::from_ordering(v.cmp0())
}

/// `a * d - b * c`
#[inline]
pub fn det2(a: &Rational, b: &Rational, c: &Rational, d: &Rational) -> Rational {
    sub(&mul(a, d), &mul(b, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_is_exact() {
        let tenth = rational(0.1);
        // 0.1 is not representable; the rational keeps the binary value.
        assert_ne!(tenth, Rational::from((1, 10)));
        assert_eq!(sub(&add(&tenth, &tenth), &mul(&tenth, &Rational::from(2))), 0);
    }

    #[test]
    fn det2_sign() {
        let one = rational(1.0);
        let two = rational(2.0);
        assert_eq!(sign(&det2(&one, &two, &two, &one)), Sign::Negative);
        assert_eq!(sign(&det2(&two, &one, &one, &two)), Sign::Positive);
        assert_eq!(sign(&det2(&one, &one, &one, &one)), Sign::Zero);
        assert_eq!(sign(&neg(&one)), Sign::Negative);
    }
}
