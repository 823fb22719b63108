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

//! Point-versus-tetrahedron classification, the 3D member of the two-tier
//! predicate family.
//!
//! All four face determinants are expressed through the difference vectors
//! `d_i = v_i - p` and the three cross products `c12`, `c13`, `c23`; the
//! remaining orientations reuse them by negation (`c21 = -c12`, `c32 = -c23`).
//! The exact tier mirrors the float tier node for node.

use once_cell::unsync::OnceCell;
use rug::Rational;

use crate::geometry::Point3;
use crate::kernel::exact_points::ExactPoint3;
use crate::numeric::exact::{add, mul, neg, sign, sub};
use crate::numeric::{Ball, FilteredSign, Sign};

type BallVec = [Ball; 3];
type ExactVec = [Rational; 3];

#[inline]
fn ball_diff(a: &Point3, b: &Point3) -> BallVec {
    [
        Ball::from_f64(a.x) - Ball::from_f64(b.x),
        Ball::from_f64(a.y) - Ball::from_f64(b.y),
        Ball::from_f64(a.z) - Ball::from_f64(b.z),
    ]
}

#[inline]
fn ball_cross(a: &BallVec, b: &BallVec) -> BallVec {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn ball_dot(a: &BallVec, b: &BallVec) -> Ball {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn exact_diff(a: &ExactPoint3, b: &ExactPoint3) -> ExactVec {
    [sub(&a.x, &b.x), sub(&a.y, &b.y), sub(&a.z, &b.z)]
}

fn exact_cross(a: &ExactVec, b: &ExactVec) -> ExactVec {
    [
        sub(&mul(&a[1], &b[2]), &mul(&a[2], &b[1])),
        sub(&mul(&a[2], &b[0]), &mul(&a[0], &b[2])),
        sub(&mul(&a[0], &b[1]), &mul(&a[1], &b[0])),
    ]
}

fn exact_dot(a: &ExactVec, b: &ExactVec) -> Rational {
    add(&add(&mul(&a[0], &b[0]), &mul(&a[1], &b[1])), &mul(&a[2], &b[2]))
}

/// Face values for faces `(1,2,3)`, `(0,2,1)`, `(0,1,3)`, `(0,3,2)`; each is
/// positive when `p` lies on the side of the face away from the opposite
/// vertex of a positively oriented tetrahedron.
fn face_balls(p: &Point3, v: &[Point3; 4]) -> [Ball; 4] {
    let d0 = ball_diff(&v[0], p);
    let d1 = ball_diff(&v[1], p);
    let d2 = ball_diff(&v[2], p);
    let d3 = ball_diff(&v[3], p);
    let c12 = ball_cross(&d1, &d2);
    let c13 = ball_cross(&d1, &d3);
    let c23 = ball_cross(&d2, &d3);
    [
        -ball_dot(&d1, &c23),
        ball_dot(&d0, &c12),
        -ball_dot(&d0, &c13),
        ball_dot(&d0, &c23),
    ]
}

fn face_exact(p: &ExactPoint3, v: [&ExactPoint3; 4]) -> [Rational; 4] {
    let d0 = exact_diff(v[0], p);
    let d1 = exact_diff(v[1], p);
    let d2 = exact_diff(v[2], p);
    let d3 = exact_diff(v[3], p);
    let c12 = exact_cross(&d1, &d2);
    let c13 = exact_cross(&d1, &d3);
    let c23 = exact_cross(&d2, &d3);
    [
        neg(&exact_dot(&d1, &c23)),
        exact_dot(&d0, &c12),
        neg(&exact_dot(&d0, &c13)),
        exact_dot(&d0, &c23),
    ]
}

/// The face values sum to minus the tetrahedron's signed volume (times six).
#[inline]
fn orientation_ball(faces: &[Ball; 4]) -> Ball {
    -(faces[0] + faces[1] + faces[2] + faces[3])
}

fn orientation_exact(faces: &[Rational; 4]) -> Rational {
    neg(&add(&add(&faces[0], &faces[1]), &add(&faces[2], &faces[3])))
}

fn classify(orientation: Sign, faces: [Sign; 4]) -> Sign {
    let faces = if orientation.is_negative() {
        faces.map(|s| -s)
    } else {
        faces
    };
    if faces.iter().any(|s| s.is_positive()) {
        Sign::Positive
    } else if faces.iter().all(|s| s.is_negative()) {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

/// Signed volume test: `Positive` when `d` lies on the side of the plane
/// through `a, b, c` that `(b - a) x (c - a)` points to.
pub fn orient3d(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> Sign {
    let ab = ball_diff(b, a);
    let ac = ball_diff(c, a);
    let ad = ball_diff(d, a);
    ball_dot(&ball_cross(&ab, &ac), &ad).sign().or_exact(|| {
        let (ea, eb, ec, ed) = (
            ExactPoint3::from(a),
            ExactPoint3::from(b),
            ExactPoint3::from(c),
            ExactPoint3::from(d),
        );
        let ab = exact_diff(&eb, &ea);
        let ac = exact_diff(&ec, &ea);
        let ad = exact_diff(&ed, &ea);
        sign(&exact_dot(&exact_cross(&ab, &ac), &ad))
    })
}

/// Side of `p` relative to the plane through `v`: `Positive` on the side the
/// normal `(v1 - v0) x (v2 - v0)` points to.
pub fn to_plane(p: &Point3, v: &[Point3; 3]) -> Sign {
    orient3d(&v[0], &v[1], &v[2], p)
}

/// Classifies `p` against the tetrahedron `v`:
/// - `Positive` if `p` is strictly outside at least one face
/// - `Negative` if `p` is strictly inside every face
/// - `Zero` if `p` is on-or-inside every face and on at least one
///
/// Either vertex order is accepted. A flat tetrahedron has no interior, so it
/// never yields `Negative`.
pub fn to_tetrahedron(p: &Point3, v: &[Point3; 4]) -> Sign {
    let fallback: OnceCell<(ExactPoint3, [ExactPoint3; 4])> = OnceCell::new();
    to_tetrahedron_with(p, v, || {
        let cached = fallback
            .get_or_init(|| (ExactPoint3::from(p), v.each_ref().map(ExactPoint3::from)));
        (&cached.0, cached.1.each_ref())
    })
}

/// [`to_tetrahedron`] with caller-supplied exact coordinates for `p` and the
/// four vertices, requested only if the float tier cannot decide.
pub fn to_tetrahedron_with<'e, F>(p: &Point3, v: &[Point3; 4], exact: F) -> Sign
where
    F: FnOnce() -> (&'e ExactPoint3, [&'e ExactPoint3; 4]),
{
    let faces = face_balls(p, v);
    let orientation = orientation_ball(&faces).sign();
    let face_signs = faces.map(|f| f.sign());

    if let FilteredSign::Definite(o) = orientation {
        let oriented = |s: Sign| if o.is_negative() { -s } else { s };
        if face_signs
            .iter()
            .any(|f| matches!(f, FilteredSign::Definite(s) if oriented(*s).is_positive()))
        {
            return Sign::Positive;
        }
        if let [Some(a), Some(b), Some(c), Some(d)] = face_signs.map(|f| f.definite()) {
            return classify(o, [a, b, c, d]);
        }
    }

    let (ep, ev) = exact();
    let exact_faces = face_exact(ep, ev);
    let o = orientation.or_exact(|| sign(&orientation_exact(&exact_faces)));
    let mut signs = [Sign::Zero; 4];
    for (i, s) in signs.iter_mut().enumerate() {
        *s = face_signs[i].or_exact(|| sign(&exact_faces[i]));
    }
    classify(o, signs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> [Point3; 4] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn orientation_3d_signs() {
        let [a, b, c, d] = unit();
        assert_eq!(orient3d(&a, &b, &c, &d), Sign::Positive);
        assert_eq!(orient3d(&a, &c, &b, &d), Sign::Negative);
        assert_eq!(orient3d(&a, &b, &c, &Point3::new(1.0, 1.0, 0.0)), Sign::Zero);
    }

    #[test]
    fn plane_side_follows_the_normal() {
        let [a, b, c, _] = unit();
        let plane = [a, b, c];
        assert_eq!(to_plane(&Point3::new(0.3, 0.3, 2.0), &plane), Sign::Positive);
        assert_eq!(to_plane(&Point3::new(0.3, 0.3, -1e-300), &plane), Sign::Negative);
        assert_eq!(to_plane(&Point3::new(7.0, -3.0, 0.0), &plane), Sign::Zero);
    }

    #[test]
    fn classifies_interior_exterior_and_boundary() {
        let t = unit();
        assert_eq!(to_tetrahedron(&Point3::new(0.1, 0.1, 0.1), &t), Sign::Negative);
        assert_eq!(to_tetrahedron(&Point3::new(1.0, 1.0, 1.0), &t), Sign::Positive);
        assert_eq!(to_tetrahedron(&Point3::new(0.0, 0.3, 0.3), &t), Sign::Zero);
        assert_eq!(to_tetrahedron(&t[2], &t), Sign::Zero);
        assert_eq!(to_tetrahedron(&Point3::new(-0.0, 2.0, 0.0), &t), Sign::Positive);
    }

    #[test]
    fn vertex_order_does_not_matter() {
        let [a, b, c, d] = unit();
        let flipped = [a, c, b, d];
        for p in [
            Point3::new(0.2, 0.2, 0.2),
            Point3::new(0.5, 0.5, 0.0),
            Point3::new(0.6, 0.6, 0.6),
        ] {
            assert_eq!(to_tetrahedron(&p, &unit()), to_tetrahedron(&p, &flipped));
        }
    }

    #[test]
    fn flat_tetrahedron_has_no_interior() {
        let flat = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        assert_ne!(to_tetrahedron(&Point3::new(0.25, 0.25, 0.0), &flat), Sign::Negative);
        assert_eq!(to_tetrahedron(&Point3::new(0.25, 0.25, 1.0), &flat), Sign::Positive);
    }
}
