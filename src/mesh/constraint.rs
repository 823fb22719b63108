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

use smallvec::SmallVec;

use crate::error::{CdtError, Result};
use crate::mesh::cdt::ConstrainedDelaunay;
use crate::mesh::triangle::EdgeKey;

type Chain = SmallVec<[usize; 16]>;

impl ConstrainedDelaunay {
    /// Forces the segment `v0 -> v1` into the mesh and marks it constrained.
    ///
    /// Returns the vertices the segment ends up passing through, starting with
    /// `v0` and ending with `v1`. Every input vertex lying exactly on the open
    /// segment splits it, so the result has more than two entries whenever the
    /// segment runs through existing vertices. A segment that crosses an already
    /// constrained edge at an interior point is rejected.
    pub fn insert_constrained_edge(&mut self, v0: usize, v1: usize) -> Result<Vec<usize>> {
        let len = self.num_input_points();
        for index in [v0, v1] {
            if index >= len {
                return Err(CdtError::InvalidPointIndex { index, len });
            }
        }
        if v0 == v1 {
            return Err(CdtError::DegenerateEdge(v0));
        }
        if self.dimension() < 2 {
            return Err(CdtError::Dimension(self.dimension()));
        }

        let mut path = vec![v0];
        let mut cur = v0;
        while cur != v1 {
            if path.len() > len {
                return Err(CdtError::Topology("constraint walk does not advance"));
            }
            let next = self.insert_segment(cur, v1)?;
            self.mark_constrained(cur, next);
            path.push(next);
            cur = next;
        }
        Ok(path)
    }

    /// Makes `a` adjacent to the first vertex met along `a -> b` and returns
    /// that vertex.
    fn insert_segment(&mut self, a: usize, b: usize) -> Result<usize> {
        if self.edge(a, b).is_some() {
            return Ok(b);
        }

        // Triangle (a, r, l) of the star whose wedge contains the segment, or
        // a neighbour lying on the segment itself.
        let mut wedge = None;
        for t in self.star(a)? {
            let [_, u, w] = self.rotated(t, a)?;
            for x in [u, w] {
                if self.orient(a, b, x).is_zero() && self.same_direction(a, b, x) {
                    return Ok(x);
                }
            }
            if self.orient(a, u, b).is_positive() && self.orient(a, w, b).is_negative() {
                wedge = Some((t, u, w));
            }
        }
        let (first, mut r, mut l) =
            wedge.ok_or(CdtError::Topology("segment leaves the star of its origin"))?;

        let mut crossed: SmallVec<[usize; 16]> = SmallVec::new();
        crossed.push(first);
        let mut left: Chain = SmallVec::new();
        let mut right: Chain = SmallVec::new();
        left.push(l);
        right.push(r);

        let end = loop {
            if self.is_constrained(EdgeKey::new(l, r)) {
                return Err(CdtError::CrossingConstraints {
                    from: a,
                    to: b,
                    crossed: (l.min(r), l.max(r)),
                });
            }
            let t = self.neighbor(l, r)?;
            let [_, _, x] = self.rotated(t, l)?;
            crossed.push(t);
            if x == b {
                break b;
            }
            let side = self.orient(a, b, x);
            if side.is_zero() {
                break x;
            } else if side.is_positive() {
                left.push(x);
                l = x;
            } else {
                right.push(x);
                r = x;
            }
        };

        for t in crossed {
            self.kill_triangle(t);
        }
        right.reverse();
        self.fill_pseudo_polygon(a, end, &left)?;
        self.fill_pseudo_polygon(end, a, &right)?;
        Ok(end)
    }

    /// Triangulates the polygon closed by the base `pa -> pb` and `chain`,
    /// whose vertices lie to the left of the base and run from the `pa` end
    /// to the `pb` end.
    fn fill_pseudo_polygon(&mut self, pa: usize, pb: usize, chain: &[usize]) -> Result<()> {
        let Some(&first) = chain.first() else {
            return Ok(());
        };
        let mut ci = 0;
        let mut c = first;
        for (i, &v) in chain.iter().enumerate().skip(1) {
            if self.in_circle(pa, pb, c, v).is_positive() {
                ci = i;
                c = v;
            }
        }
        self.fill_pseudo_polygon(pa, c, &chain[..ci])?;
        self.fill_pseudo_polygon(c, pb, &chain[ci + 1..])?;
        self.add_triangle(pa, pb, c)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CdtError;
    use crate::geometry::Point2;
    use crate::mesh::cdt::ConstrainedDelaunay;
    use crate::mesh::triangle::EdgeKey;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn assert_ccw(mesh: &ConstrainedDelaunay) {
        for (_, t) in mesh.triangles() {
            assert!(mesh.orient(t.v[0], t.v[1], t.v[2]).is_positive());
        }
    }

    #[test]
    fn forces_a_non_delaunay_edge() {
        let p = pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 1.0), (5.0, -1.0)]);
        let mut mesh = ConstrainedDelaunay::build(&p).unwrap();
        assert!(mesh.edge(2, 3).is_some());
        assert!(mesh.edge(0, 1).is_none());

        let path = mesh.insert_constrained_edge(0, 1).unwrap();
        assert_eq!(path, vec![0, 1]);
        assert!(mesh.edge(0, 1).is_some());
        assert!(mesh.edge(2, 3).is_none());
        assert!(mesh.is_constrained(EdgeKey::new(1, 0)));
        assert_eq!(mesh.real_triangles().count(), 2);
        assert_ccw(&mesh);
    }

    #[test]
    fn existing_edge_is_only_marked() {
        let p = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let mut mesh = ConstrainedDelaunay::build(&p).unwrap();
        let before = mesh.num_triangles();
        assert_eq!(mesh.insert_constrained_edge(2, 0).unwrap(), vec![2, 0]);
        assert_eq!(mesh.num_triangles(), before);
        assert!(mesh.is_constrained(EdgeKey::new(0, 2)));
    }

    #[test]
    fn splits_at_collinear_vertices() {
        let p = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 1.0), (1.0, -1.0)]);
        let mut mesh = ConstrainedDelaunay::build(&p).unwrap();
        let path = mesh.insert_constrained_edge(0, 2).unwrap();
        assert_eq!(path, vec![0, 1, 2]);
        assert!(mesh.is_constrained(EdgeKey::new(0, 1)));
        assert!(mesh.is_constrained(EdgeKey::new(1, 2)));
        assert!(!mesh.is_constrained(EdgeKey::new(0, 2)));
        assert_ccw(&mesh);
    }

    #[test]
    fn rejects_crossing_constraints() {
        let p = pts(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (1.0, -1.0)]);
        let mut mesh = ConstrainedDelaunay::build(&p).unwrap();
        mesh.insert_constrained_edge(0, 1).unwrap();
        let err = mesh.insert_constrained_edge(2, 3).unwrap_err();
        assert!(matches!(
            err,
            CdtError::CrossingConstraints {
                from: 2,
                to: 3,
                crossed: (0, 1)
            }
        ));
    }

    #[test]
    fn zero_length_edge_is_an_argument_error() {
        let p = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let mut mesh = ConstrainedDelaunay::build(&p).unwrap();
        assert!(matches!(
            mesh.insert_constrained_edge(1, 1),
            Err(CdtError::DegenerateEdge(1))
        ));
    }

    #[test]
    fn long_constraint_through_a_fan() {
        // a zigzag of points on both sides of the x axis
        let mut coords = vec![(0.0, 0.0), (20.0, 0.0)];
        for i in 1..20 {
            let y = if i % 2 == 0 { 0.5 } else { -0.7 };
            coords.push((i as f64, y * (1.0 + i as f64 * 0.01)));
        }
        let p = pts(&coords);
        let mut mesh = ConstrainedDelaunay::build(&p).unwrap();
        let path = mesh.insert_constrained_edge(0, 1).unwrap();
        assert_eq!(path, vec![0, 1]);
        assert!(mesh.edge(0, 1).is_some());
        assert_ccw(&mesh);
        let e = mesh.edge(0, 1).unwrap();
        assert!(e.t[0].is_some() && e.t[1].is_some());
    }
}
