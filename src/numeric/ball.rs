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

use std::ops::{Add, Mul, Neg, Sub};

use crate::numeric::sign::{FilteredSign, Sign};

/// Midpoint-radius interval over `f64`: the true value lies in `[m - r, m + r]`.
///
/// Every operation captures the rounding error of the midpoint exactly
/// (`two_sum`/`two_prod`) and pushes the radius upward, so the enclosure stays
/// valid under round-to-nearest without switching the FPU rounding mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ball {
    pub m: f64,
    pub r: f64,
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = f64::mul_add(a, b, -p);
    (p, err)
}

/// Inflates a radius computed with a handful of rounded operations so it is an
/// upper bound of the exact radius. The absolute term covers underflow.
#[inline]
fn round_up(r: f64) -> f64 {
    (r + f64::MIN_POSITIVE) * (1.0 + 4.0 * f64::EPSILON)
}

impl Ball {
    #[inline]
    pub fn from_f64(x: f64) -> Self {
        Ball { m: x, r: 0.0 }
    }

    #[inline]
    pub fn unknown() -> Self {
        Ball {
            m: 0.0,
            r: f64::INFINITY,
        }
    }

    #[inline]
    pub fn lower(self) -> f64 {
        self.m - self.r
    }

    #[inline]
    pub fn upper(self) -> f64 {
        self.m + self.r
    }

    #[inline]
    pub fn square(self) -> Self {
        self * self
    }

    /// Tier-1 sign: definite only when the whole interval sits on one side of
    /// zero, or collapses onto zero exactly.
    #[inline]
    pub fn sign(self) -> FilteredSign {
        if !self.m.is_finite() || !self.r.is_finite() {
            return FilteredSign::Indeterminate;
        }
        if self.m > self.r {
            FilteredSign::Definite(Sign::Positive)
        } else if self.m < -self.r {
            FilteredSign::Definite(Sign::Negative)
        } else if self.m == 0.0 && self.r == 0.0 {
            FilteredSign::Definite(Sign::Zero)
        } else {
            FilteredSign::Indeterminate
        }
    }
}

impl Add for Ball {
    type Output = Ball;
    #[inline]
    fn add(self, o: Ball) -> Ball {
        let (s, e) = two_sum(self.m, o.m);
        let r = self.r + o.r + e.abs();
        Ball {
            m: s,
            r: if r == 0.0 { 0.0 } else { round_up(r) },
        }
    }
}

impl Sub for Ball {
    type Output = Ball;
    #[inline]
    fn sub(self, o: Ball) -> Ball {
        self + (-o)
    }
}

impl Neg for Ball {
    type Output = Ball;
    #[inline]
    fn neg(self) -> Ball {
        Ball {
            m: -self.m,
            r: self.r,
        }
    }
}

impl Mul for Ball {
    type Output = Ball;
    #[inline]
    fn mul(self, o: Ball) -> Ball {
        let (p, e) = two_prod(self.m, o.m);
        let r = self.m.abs() * o.r + o.m.abs() * self.r + self.r * o.r + e.abs();
        Ball {
            m: p,
            r: if r == 0.0 { 0.0 } else { round_up(r) },
        }
    }
}

impl From<f64> for Ball {
    fn from(x: f64) -> Self {
        Ball::from_f64(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_operations_keep_zero_radius() {
        let a = Ball::from_f64(3.0);
        let b = Ball::from_f64(0.5);
        let c = a * b - Ball::from_f64(1.5);
        assert_eq!(c.m, 0.0);
        assert_eq!(c.r, 0.0);
        assert_eq!(c.sign(), FilteredSign::Definite(Sign::Zero));
    }

    #[test]
    fn rounding_error_widens_the_interval() {
        let a = Ball::from_f64(0.1);
        let b = Ball::from_f64(0.2);
        let s = a + b;
        assert!(s.r > 0.0);
        assert!(s.lower() <= 0.30000000000000004 && s.upper() >= 0.3);
    }

    #[test]
    fn cancellation_is_indeterminate() {
        // 1e16 + 1 rounds to 1e16; the error term must stay in the radius.
        let big = Ball::from_f64(1e16);
        let one = Ball::from_f64(1.0);
        let d = (big + one) - big - one;
        assert_eq!(d.sign(), FilteredSign::Indeterminate);
    }

    #[test]
    fn unknown_is_never_definite() {
        assert_eq!(Ball::unknown().sign(), FilteredSign::Indeterminate);
        let overflow = Ball::from_f64(f64::MAX) * Ball::from_f64(4.0);
        assert_eq!(overflow.sign(), FilteredSign::Indeterminate);
    }
}
