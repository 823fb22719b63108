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

use std::cell::Cell;

use once_cell::unsync::OnceCell;
use rug::Rational;

use crate::geometry::{Point2, Point3};
use crate::numeric::exact::rational;

/// Exact rational image of a `Point2<f64>`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExactPoint2 {
    pub x: Rational,
    pub y: Rational,
}

impl From<&Point2<f64>> for ExactPoint2 {
    fn from(p: &Point2<f64>) -> Self {
        ExactPoint2 {
            x: rational(p.x),
            y: rational(p.y),
        }
    }
}

/// Exact rational image of a `Point3`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExactPoint3 {
    pub x: Rational,
    pub y: Rational,
    pub z: Rational,
}

impl From<&Point3> for ExactPoint3 {
    fn from(p: &Point3) -> Self {
        ExactPoint3 {
            x: rational(p.x),
            y: rational(p.y),
            z: rational(p.z),
        }
    }
}

/// Per-index cache of exact coordinates.
///
/// Conversion happens the first time an index is requested and is reused for
/// every later exact evaluation. The cache is not tied to the point storage:
/// callers pass the point alongside its index, and must keep the pairing
/// stable for the cache's lifetime.
#[derive(Debug, Default)]
pub struct ExactPoints {
    cache: Vec<OnceCell<ExactPoint2>>,
    conversions: Cell<usize>,
}

impl ExactPoints {
    pub fn with_len(len: usize) -> Self {
        ExactPoints {
            cache: (0..len).map(|_| OnceCell::new()).collect(),
            conversions: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize, p: &Point2<f64>) -> &ExactPoint2 {
        self.cache[index].get_or_init(|| {
            self.conversions.set(self.conversions.get() + 1);
            ExactPoint2::from(p)
        })
    }

    /// Number of float-to-rational conversions performed so far.
    pub fn conversions(&self) -> usize {
        self.conversions.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_index_once() {
        let pts = [Point2::new(0.5, 0.25), Point2::new(-1.0, 3.0)];
        let cache = ExactPoints::with_len(pts.len());
        let first = cache.get(1, &pts[1]).clone();
        let again = cache.get(1, &pts[1]);
        assert_eq!(&first, again);
        assert_eq!(cache.conversions(), 1);
        assert_eq!(cache.get(0, &pts[0]).x, Rational::from((1, 2)));
        assert_eq!(cache.conversions(), 2);
    }
}
