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

//! Two-tier 2D predicates.
//!
//! Each predicate evaluates its determinant first on [`Ball`] intervals. Only
//! when the interval touches zero is the identical expression re-evaluated on
//! exact rationals, which always decides. Rationals grow as needed, so no
//! fixed word budget has to be sized for the worst-case expression.

use crate::geometry::Point2;
use crate::kernel::exact_points::ExactPoint2;
use crate::numeric::exact::{add, det2, mul, sign, sub};
use crate::numeric::{Ball, FilteredSign, Sign};

#[inline]
fn ball(p: &Point2<f64>) -> (Ball, Ball) {
    (Ball::from_f64(p.x), Ball::from_f64(p.y))
}

/* ========= orient2d ========= */

/// Tier 1 of [`orient2d`].
#[inline]
pub fn orient2d_filter(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> FilteredSign {
    let (ax, ay) = ball(a);
    let (bx, by) = ball(b);
    let (cx, cy) = ball(c);
    ((bx - ax) * (cy - ay) - (by - ay) * (cx - ax)).sign()
}

/// Tier 2 of [`orient2d`].
pub fn orient2d_exact(a: &ExactPoint2, b: &ExactPoint2, c: &ExactPoint2) -> Sign {
    let bax = sub(&b.x, &a.x);
    let bay = sub(&b.y, &a.y);
    let cax = sub(&c.x, &a.x);
    let cay = sub(&c.y, &a.y);
    sign(&det2(&bax, &bay, &cax, &cay))
}

/// Returns:
/// - `Positive` if `a, b, c` turn counter-clockwise (`c` left of `a -> b`)
/// - `Negative` if they turn clockwise
/// - `Zero` if collinear
pub fn orient2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> Sign {
    orient2d_filter(a, b, c).or_exact(|| {
        orient2d_exact(&ExactPoint2::from(a), &ExactPoint2::from(b), &ExactPoint2::from(c))
    })
}

/// [`orient2d`] with caller-supplied exact coordinates, fetched only when the
/// filter fails.
#[inline]
pub fn orient2d_with<'e, F>(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>, exact: F) -> Sign
where
    F: FnOnce() -> [&'e ExactPoint2; 3],
{
    orient2d_filter(a, b, c).or_exact(|| {
        let [ea, eb, ec] = exact();
        orient2d_exact(ea, eb, ec)
    })
}

/// Side of `p` relative to the directed line `v0 -> v1`: `Positive` on the
/// right, `Negative` on the left, `Zero` on the line.
pub fn to_line(p: &Point2<f64>, v0: &Point2<f64>, v1: &Point2<f64>) -> Sign {
    -orient2d(v0, v1, p)
}

/* ========= incircle ========= */

/// Tier 1 of [`incircle`].
pub fn incircle_filter(
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
    d: &Point2<f64>,
) -> FilteredSign {
    let (ax, ay) = ball(a);
    let (bx, by) = ball(b);
    let (cx, cy) = ball(c);
    let (dx, dy) = ball(d);

    let adx = ax - dx;
    let ady = ay - dy;
    let bdx = bx - dx;
    let bdy = by - dy;
    let cdx = cx - dx;
    let cdy = cy - dy;

    let alift = adx.square() + ady.square();
    let blift = bdx.square() + bdy.square();
    let clift = cdx.square() + cdy.square();

    let det = alift * (bdx * cdy - cdx * bdy)
        + blift * (cdx * ady - adx * cdy)
        + clift * (adx * bdy - bdx * ady);
    det.sign()
}

/// Tier 2 of [`incircle`].
pub fn incircle_exact(
    a: &ExactPoint2,
    b: &ExactPoint2,
    c: &ExactPoint2,
    d: &ExactPoint2,
) -> Sign {
    let adx = sub(&a.x, &d.x);
    let ady = sub(&a.y, &d.y);
    let bdx = sub(&b.x, &d.x);
    let bdy = sub(&b.y, &d.y);
    let cdx = sub(&c.x, &d.x);
    let cdy = sub(&c.y, &d.y);

    let alift = add(&mul(&adx, &adx), &mul(&ady, &ady));
    let blift = add(&mul(&bdx, &bdx), &mul(&bdy, &bdy));
    let clift = add(&mul(&cdx, &cdx), &mul(&cdy, &cdy));

    let t0 = mul(&alift, &det2(&bdx, &cdx, &bdy, &cdy));
    let t1 = mul(&blift, &det2(&cdx, &adx, &cdy, &ady));
    let t2 = mul(&clift, &det2(&adx, &bdx, &ady, &bdy));
    sign(&add(&add(&t0, &t1), &t2))
}

/// For a counter-clockwise triangle `a, b, c`: `Positive` if `d` lies strictly
/// inside its circumcircle, `Zero` if on it, `Negative` if outside.
pub fn incircle(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>, d: &Point2<f64>) -> Sign {
    incircle_filter(a, b, c, d).or_exact(|| {
        incircle_exact(
            &ExactPoint2::from(a),
            &ExactPoint2::from(b),
            &ExactPoint2::from(c),
            &ExactPoint2::from(d),
        )
    })
}

/// [`incircle`] with caller-supplied exact coordinates.
#[inline]
pub fn incircle_with<'e, F>(
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
    d: &Point2<f64>,
    exact: F,
) -> Sign
where
    F: FnOnce() -> [&'e ExactPoint2; 4],
{
    incircle_filter(a, b, c, d).or_exact(|| {
        let [ea, eb, ec, ed] = exact();
        incircle_exact(ea, eb, ec, ed)
    })
}
