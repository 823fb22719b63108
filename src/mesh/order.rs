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

use rayon::prelude::*;

use crate::error::Result;
use crate::geometry::Point2;

const HILBERT_ORDER: u32 = 16;

/// Hilbert index of a cell on a `2^HILBERT_ORDER` grid.
fn hilbert_index(mut x: u32, mut y: u32) -> u64 {
    let n: u32 = 1 << HILBERT_ORDER;
    let mut d: u64 = 0;
    let mut s = n / 2;
    while s > 0 {
        let rx = u32::from(x & s > 0);
        let ry = u32::from(y & s > 0);
        d += u64::from(s) * u64::from(s) * u64::from((3 * rx) ^ ry);
        if ry == 0 {
            if rx == 1 {
                x = n - 1 - x;
                y = n - 1 - y;
            }
            std::mem::swap(&mut x, &mut y);
        }
        s /= 2;
    }
    d
}

fn cell(v: f64, lo: f64, inv: f64) -> u32 {
    let max = ((1u32 << HILBERT_ORDER) - 1) as f64;
    ((v - lo) * inv).clamp(0.0, max) as u32
}

/// Orders point indices along a Hilbert curve over their bounding box, so
/// that consecutive insertions land near each other and point location walks
/// stay short. Ties keep index order, which makes the result deterministic.
///
/// With `threads > 1` the keys are computed and sorted on a dedicated pool of
/// that many workers.
pub fn insertion_order(points: &[Point2<f64>], threads: usize) -> Result<Vec<usize>> {
    if points.is_empty() {
        return Ok(Vec::new());
    }
    let (mut minx, mut miny) = (f64::INFINITY, f64::INFINITY);
    let (mut maxx, mut maxy) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        minx = minx.min(p.x);
        miny = miny.min(p.y);
        maxx = maxx.max(p.x);
        maxy = maxy.max(p.y);
    }
    let extent = (maxx - minx).max(maxy - miny);
    let scale = ((1u32 << HILBERT_ORDER) - 1) as f64;
    let inv = if extent > 0.0 && extent.is_finite() {
        scale / extent
    } else {
        0.0
    };
    let key = |i: usize| {
        let p = &points[i];
        (hilbert_index(cell(p.x, minx, inv), cell(p.y, miny, inv)), i)
    };

    if threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(pool.install(|| {
            let mut keyed: Vec<(u64, usize)> = (0..points.len()).into_par_iter().map(key).collect();
            keyed.par_sort_unstable();
            keyed.into_iter().map(|(_, i)| i).collect()
        }))
    } else {
        let mut keyed: Vec<(u64, usize)> = (0..points.len()).map(key).collect();
        keyed.sort_unstable();
        Ok(keyed.into_iter().map(|(_, i)| i).collect())
    }
}
