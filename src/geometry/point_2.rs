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

use std::cmp::Ordering;

use num_traits::Float;

/// Floating-point coordinate accepted by the public API.
///
/// Both implementors convert to `f64` without loss, so the predicates only
/// ever see `f64` values and their exact rational images.
pub trait Coordinate: Float + Into<f64> + std::fmt::Debug {}

impl<T: Float + Into<f64> + std::fmt::Debug> Coordinate for T {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T: Coordinate> Point2<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_f64(&self) -> Point2<f64> {
        Point2 {
            x: self.x.into(),
            y: self.y.into(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Ordered key for a point value, used by the dedup map.
///
/// Orders lexicographically with `total_cmp`; `-0.0` is folded into `0.0` so
/// both zeros name the same point.
#[derive(Debug, Clone, Copy)]
pub struct PointKey {
    x: f64,
    y: f64,
}

impl PointKey {
    #[inline]
    pub fn new(p: &Point2<f64>) -> Self {
        // adding +0.0 turns -0.0 into +0.0 and leaves everything else alone
        PointKey {
            x: p.x + 0.0,
            y: p.y + 0.0,
        }
    }
}

impl PartialEq for PointKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PointKey {}

impl PartialOrd for PointKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_zeros_share_a_key() {
        let a = PointKey::new(&Point2::new(-0.0, 1.0));
        let b = PointKey::new(&Point2::new(0.0, 1.0));
        assert_eq!(a, b);
    }

    #[test]
    fn keys_order_lexicographically() {
        let a = PointKey::new(&Point2::new(0.0, 5.0));
        let b = PointKey::new(&Point2::new(1.0, -5.0));
        let c = PointKey::new(&Point2::new(1.0, 0.0));
        assert!(a < b && b < c);
    }

    #[test]
    fn f32_widens_losslessly() {
        let p = Point2::new(0.1f32, -3.5f32);
        let q = p.to_f64();
        assert_eq!(q.x as f32, 0.1f32);
        assert_eq!(q.y, -3.5);
    }
}
