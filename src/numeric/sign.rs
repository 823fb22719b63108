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
use std::ops::Neg;

/// Sign of a predicate determinant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn from_ordering(o: Ordering) -> Self {
        match o {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }

    /// Returns -1, 0, or +1.
    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Sign::Positive
    }
    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }
    pub fn is_zero(self) -> bool {
        self == Sign::Zero
    }
}

impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// Outcome of the floating-point filter.
///
/// `Indeterminate` means the interval touches or straddles zero and the
/// caller must re-evaluate with exact arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilteredSign {
    Definite(Sign),
    Indeterminate,
}

impl FilteredSign {
    #[inline]
    pub fn definite(self) -> Option<Sign> {
        match self {
            FilteredSign::Definite(s) => Some(s),
            FilteredSign::Indeterminate => None,
        }
    }

    /// Resolves the sign, running `exact` only when the filter failed.
    #[inline]
    pub fn or_exact<F: FnOnce() -> Sign>(self, exact: F) -> Sign {
        match self {
            FilteredSign::Definite(s) => s,
            FilteredSign::Indeterminate => exact(),
        }
    }
}

impl Neg for FilteredSign {
    type Output = FilteredSign;
    fn neg(self) -> FilteredSign {
        match self {
            FilteredSign::Definite(s) => FilteredSign::Definite(-s),
            FilteredSign::Indeterminate => FilteredSign::Indeterminate,
        }
    }
}
