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

use ahash::{AHashMap, AHashSet};
use smallvec::SmallVec;
use tracing::trace;

use crate::error::{CdtError, Result};
use crate::geometry::Point2;
use crate::kernel::{ExactPoints, incircle_with, orient2d_with};
use crate::mesh::order::insertion_order;
use crate::mesh::triangle::{Edge, EdgeKey, Triangle, TriangleKey};
use crate::numeric::Sign;

/// Size of the bounding triangle relative to the extent of the input.
const SUPER_SCALE: f64 = 64.0;

/// Constrained Delaunay triangulation over a fixed point set.
///
/// Points are enclosed in a bounding ("super") triangle whose three vertices
/// are appended after the input points; they stay in the mesh so that every
/// input vertex has a closed fan. Triangles are kept counter-clockwise in a
/// slot arena, and each directed edge maps to the one triangle traversing it.
#[derive(Debug)]
pub struct ConstrainedDelaunay {
    points: Vec<Point2<f64>>,
    num_input: usize,
    exact: ExactPoints,
    slots: Vec<Option<Triangle>>,
    free: Vec<usize>,
    // directed edge -> triangle traversing it
    edge_map: AHashMap<(usize, usize), usize>,
    vertex_tri: Vec<usize>,
    constrained: AHashSet<EdgeKey>,
    live: usize,
    hint: usize,
    dimension: usize,
}

impl ConstrainedDelaunay {
    /// Builds the unconstrained Delaunay triangulation of `points`.
    ///
    /// The returned mesh reports the affine dimension of the point set. Only a
    /// two-dimensional set is triangulated; for lower dimensions the mesh is
    /// left empty and callers are expected to check [`Self::dimension`].
    pub fn build(points: &[Point2<f64>]) -> Result<Self> {
        Self::build_with_threads(points, 1)
    }

    /// [`Self::build`] with the insertion-order sort spread over `threads`
    /// workers. Point insertion itself is sequential.
    pub fn build_with_threads(points: &[Point2<f64>], threads: usize) -> Result<Self> {
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(CdtError::NonFinitePoint(i));
        }
        let n = points.len();
        let mut mesh = ConstrainedDelaunay {
            points: points.to_vec(),
            num_input: n,
            exact: ExactPoints::with_len(n + 3),
            slots: Vec::new(),
            free: Vec::new(),
            edge_map: AHashMap::with_capacity(n * 6),
            vertex_tri: vec![usize::MAX; n + 3],
            constrained: AHashSet::default(),
            live: 0,
            hint: 0,
            dimension: 0,
        };
        mesh.dimension = mesh.compute_dimension();
        if mesh.dimension < 2 {
            return Ok(mesh);
        }

        let [s0, s1, s2] = super_triangle(points)?;
        mesh.points.extend([s0, s1, s2]);
        mesh.add_triangle(n, n + 1, n + 2)?;

        for i in insertion_order(points, threads)? {
            mesh.insert_point(i)?;
        }
        trace!(
            triangles = mesh.live,
            exact_conversions = mesh.exact.conversions(),
            "delaunay triangulation built"
        );
        Ok(mesh)
    }

    /* ========= Queries ========= */

    /// 0 for a single point, 1 for collinear points, 2 otherwise.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn num_input_points(&self) -> usize {
        self.num_input
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points[..self.num_input]
    }

    #[inline]
    pub fn is_super_vertex(&self, v: usize) -> bool {
        v >= self.num_input
    }

    pub fn num_triangles(&self) -> usize {
        self.live
    }

    pub fn triangle(&self, id: usize) -> Option<&Triangle> {
        self.slots.get(id).and_then(|t| t.as_ref())
    }

    /// Live triangles with their ids, including those touching the bounding
    /// triangle.
    pub fn triangles(&self) -> impl Iterator<Item = (usize, &Triangle)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_ref().map(|t| (i, t)))
    }

    /// Live triangles whose vertices are all input points.
    pub fn real_triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.triangles()
            .map(|(_, t)| t)
            .filter(|t| t.v.iter().all(|&v| !self.is_super_vertex(v)))
    }

    /// Every undirected edge that still has a live triangle.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edge_map
            .keys()
            .filter(|&&(a, b)| a < b || !self.edge_map.contains_key(&(b, a)))
            .map(|&(a, b)| EdgeKey::new(a, b))
    }

    pub fn edge(&self, v0: usize, v1: usize) -> Option<Edge> {
        let key = EdgeKey::new(v0, v1);
        let fwd = self.edge_map.get(&(key.0, key.1)).copied();
        let bwd = self.edge_map.get(&(key.1, key.0)).copied();
        let t = match (fwd, bwd) {
            (None, None) => return None,
            (Some(a), b) => [Some(a), b],
            (None, b) => [b, None],
        };
        Some(Edge {
            v: [key.0, key.1],
            t,
        })
    }

    /// Triangle on the far side of edge `i` (from `v[i]` to `v[i + 1]`) of
    /// triangle `id`.
    pub fn adjacent(&self, id: usize, i: usize) -> Option<usize> {
        let t = self.triangle(id)?;
        let (a, b) = t.edges()[i % 3];
        self.edge_map.get(&(b, a)).copied()
    }

    pub fn find(&self, key: &TriangleKey) -> Option<usize> {
        let [a, b, _] = key.vertices();
        let id = *self.edge_map.get(&(a, b))?;
        match self.triangle(id) {
            Some(t) if t.key() == *key => Some(id),
            _ => None,
        }
    }

    pub fn is_constrained(&self, e: EdgeKey) -> bool {
        self.constrained.contains(&e)
    }

    pub fn constrained_edges(&self) -> impl Iterator<Item = &EdgeKey> + '_ {
        self.constrained.iter()
    }

    /* ========= Mutation ========= */

    /// Removes a triangle by key. Returns `false` if it is not in the mesh.
    ///
    /// Removal punches holes into the fan structure, so constrained edges
    /// must all be inserted before any triangle is removed.
    pub fn remove(&mut self, key: &TriangleKey) -> bool {
        match self.find(key) {
            Some(id) => self.kill_triangle(id).is_some(),
            None => false,
        }
    }

    /// Drops every triangle. Points and constraint bookkeeping stay.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.edge_map.clear();
        self.vertex_tri.fill(usize::MAX);
        self.live = 0;
        self.hint = 0;
    }

    /* ========= Predicates by index ========= */

    #[inline]
    pub(crate) fn orient(&self, a: usize, b: usize, c: usize) -> Sign {
        let p = &self.points;
        orient2d_with(&p[a], &p[b], &p[c], || {
            [
                self.exact.get(a, &p[a]),
                self.exact.get(b, &p[b]),
                self.exact.get(c, &p[c]),
            ]
        })
    }

    /// `Positive` if `d` is strictly inside the circumcircle of the
    /// counter-clockwise triangle `a, b, c`.
    #[inline]
    pub(crate) fn in_circle(&self, a: usize, b: usize, c: usize, d: usize) -> Sign {
        let p = &self.points;
        incircle_with(&p[a], &p[b], &p[c], &p[d], || {
            [
                self.exact.get(a, &p[a]),
                self.exact.get(b, &p[b]),
                self.exact.get(c, &p[c]),
                self.exact.get(d, &p[d]),
            ]
        })
    }

    /// Whether `c`, known to be collinear with `a -> b`, lies on the ray from
    /// `a` through `b`. Float comparisons are exact, so no predicate is needed.
    #[inline]
    pub(crate) fn same_direction(&self, a: usize, b: usize, c: usize) -> bool {
        let (pa, pb, pc) = (&self.points[a], &self.points[b], &self.points[c]);
        if pa.x != pb.x {
            (pc.x > pa.x) == (pb.x > pa.x) && pc.x != pa.x
        } else {
            (pc.y > pa.y) == (pb.y > pa.y) && pc.y != pa.y
        }
    }

    /* ========= Internal topology ========= */

    pub(crate) fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> Result<usize> {
        let t = Triangle::new(a, b, c);
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(t);
                id
            }
            None => {
                self.slots.push(Some(t));
                self.slots.len() - 1
            }
        };
        for e in t.edges() {
            if self.edge_map.insert(e, id).is_some() {
                return Err(CdtError::Topology("directed edge used by two triangles"));
            }
        }
        for v in t.v {
            self.vertex_tri[v] = id;
        }
        self.live += 1;
        self.hint = id;
        Ok(id)
    }

    pub(crate) fn kill_triangle(&mut self, id: usize) -> Option<Triangle> {
        let t = self.slots.get_mut(id)?.take()?;
        for e in t.edges() {
            self.edge_map.remove(&e);
        }
        self.free.push(id);
        self.live -= 1;
        Some(t)
    }

    /// Triangles around vertex `a`, counter-clockwise where the fan is closed.
    pub(crate) fn star(&self, a: usize) -> Result<SmallVec<[usize; 8]>> {
        let start = match self.triangle(self.vertex_tri[a]) {
            Some(t) if t.contains(a) => self.vertex_tri[a],
            _ => self
                .triangles()
                .find(|(_, t)| t.contains(a))
                .map(|(id, _)| id)
                .ok_or(CdtError::Topology("vertex has no incident triangle"))?,
        };
        let mut out: SmallVec<[usize; 8]> = SmallVec::new();
        out.push(start);

        // counter-clockwise: across the edge (w, a) of (a, u, w)
        let mut t = start;
        loop {
            let [_, _, w] = self.rotated(t, a)?;
            match self.edge_map.get(&(a, w)) {
                Some(&n) if n == start => return Ok(out),
                Some(&n) => {
                    out.push(n);
                    t = n;
                }
                None => break,
            }
        }
        // open fan: walk clockwise from the start as well
        t = start;
        loop {
            let [_, u, _] = self.rotated(t, a)?;
            match self.edge_map.get(&(u, a)) {
                Some(&n) if n != start => {
                    out.push(n);
                    t = n;
                }
                _ => return Ok(out),
            }
        }
    }

    #[inline]
    pub(crate) fn rotated(&self, id: usize, a: usize) -> Result<[usize; 3]> {
        self.triangle(id)
            .and_then(|t| t.rotated_to(a))
            .ok_or(CdtError::Topology("triangle does not contain vertex"))
    }

    pub(crate) fn neighbor(&self, from: usize, to: usize) -> Result<usize> {
        self.edge_map
            .get(&(from, to))
            .copied()
            .ok_or(CdtError::Topology("missing triangle across edge"))
    }

    pub(crate) fn mark_constrained(&mut self, a: usize, b: usize) {
        self.constrained.insert(EdgeKey::new(a, b));
    }

    /* ========= Delaunay construction ========= */

    fn compute_dimension(&self) -> usize {
        let n = self.points.len();
        let Some(first) = self.points.first() else {
            return 0;
        };
        let Some(b) = (1..n).find(|&i| self.points[i] != *first) else {
            return 0;
        };
        let p = &self.points;
        let collinear = (1..n).all(|c| {
            c == b
                || orient2d_with(&p[0], &p[b], &p[c], || {
                    [
                        self.exact.get(0, &p[0]),
                        self.exact.get(b, &p[b]),
                        self.exact.get(c, &p[c]),
                    ]
                })
                .is_zero()
        });
        if collinear { 1 } else { 2 }
    }

    /// A triangle whose closure contains point `p`.
    fn locate(&self, p: usize) -> Result<usize> {
        let mut t = if self.triangle(self.hint).is_some() {
            self.hint
        } else {
            self.triangles()
                .next()
                .map(|(id, _)| id)
                .ok_or(CdtError::Topology("empty mesh"))?
        };

        // Visibility walk. Terminates on Delaunay meshes; the step bound and
        // the scan below cover anything else.
        let max_steps = 4 * self.live + 16;
        for step in 0..max_steps {
            let tri = self.triangle(t).ok_or(CdtError::Topology("walk left the mesh"))?;
            let edges = tri.edges();
            let mut next = None;
            for k in 0..3 {
                let (a, b) = edges[(k + step) % 3];
                if self.orient(a, b, p).is_negative() {
                    next = Some(self.neighbor(b, a)?);
                    break;
                }
            }
            match next {
                Some(n) => t = n,
                None => return Ok(t),
            }
        }

        self.triangles()
            .find(|(_, tri)| tri.edges().iter().all(|&(a, b)| !self.orient(a, b, p).is_negative()))
            .map(|(id, _)| id)
            .ok_or(CdtError::Topology("point outside the bounding triangle"))
    }

    /// Bowyer-Watson insertion of input point `p`.
    fn insert_point(&mut self, p: usize) -> Result<()> {
        let start = self.locate(p)?;
        if let Some(tri) = self.triangle(start) {
            if let Some(&q) = tri.v.iter().find(|&&q| self.points[q] == self.points[p]) {
                return Err(CdtError::DuplicatePoint(q, p));
            }
        }

        let mut cavity: Vec<usize> = vec![start];
        let mut in_cavity: AHashSet<usize> = AHashSet::default();
        in_cavity.insert(start);
        let mut boundary: Vec<(usize, usize)> = Vec::new();
        let mut i = 0;
        while i < cavity.len() {
            let tri = *self
                .triangle(cavity[i])
                .ok_or(CdtError::Topology("cavity triangle vanished"))?;
            i += 1;
            for (a, b) in tri.edges() {
                match self.edge_map.get(&(b, a)).copied() {
                    Some(n) if in_cavity.contains(&n) => {}
                    Some(n) => {
                        let [x, y, z] = self
                            .triangle(n)
                            .ok_or(CdtError::Topology("dangling edge entry"))?
                            .v;
                        if self.in_circle(x, y, z, p).is_positive() {
                            in_cavity.insert(n);
                            cavity.push(n);
                        } else {
                            boundary.push((a, b));
                        }
                    }
                    None => boundary.push((a, b)),
                }
            }
        }

        for &(a, b) in &boundary {
            if !self.orient(a, b, p).is_positive() {
                return Err(CdtError::Topology("insertion cavity is not star-shaped"));
            }
        }
        for &t in &cavity {
            self.kill_triangle(t);
        }
        for (a, b) in boundary {
            self.add_triangle(a, b, p)?;
        }
        Ok(())
    }
}

fn super_triangle(points: &[Point2<f64>]) -> Result<[Point2<f64>; 3]> {
    let (mut minx, mut miny) = (f64::INFINITY, f64::INFINITY);
    let (mut maxx, mut maxy) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        minx = minx.min(p.x);
        miny = miny.min(p.y);
        maxx = maxx.max(p.x);
        maxy = maxy.max(p.y);
    }
    let r = (maxx - minx).max(maxy - miny).max(f64::MIN_POSITIVE);
    let cx = minx + (maxx - minx) * 0.5;
    let cy = miny + (maxy - miny) * 0.5;
    let k = SUPER_SCALE * r;
    let pts = [
        Point2::new(cx - 2.0 * k, cy - k),
        Point2::new(cx + 2.0 * k, cy - k),
        Point2::new(cx, cy + 2.0 * k),
    ];
    if r.is_finite() && pts.iter().all(|p| p.is_finite()) {
        Ok(pts)
    } else {
        Err(CdtError::CoordinateRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize) -> Vec<Point2<f64>> {
        let mut pts = Vec::new();
        for i in 0..n {
            for j in 0..n {
                pts.push(Point2::new(i as f64, j as f64));
            }
        }
        pts
    }

    fn is_delaunay(mesh: &ConstrainedDelaunay) -> bool {
        for (_, t) in mesh.triangles() {
            for q in 0..mesh.num_input_points() {
                if !t.contains(q) && mesh.in_circle(t.v[0], t.v[1], t.v[2], q).is_positive() {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn square_has_two_real_triangles() {
        let pts = grid(2);
        let mesh = ConstrainedDelaunay::build(&pts).unwrap();
        assert_eq!(mesh.dimension(), 2);
        assert_eq!(mesh.real_triangles().count(), 2);
        for t in mesh.real_triangles() {
            assert!(mesh.orient(t.v[0], t.v[1], t.v[2]).is_positive());
        }
    }

    #[test]
    fn cocircular_grid_stays_delaunay() {
        let mesh = ConstrainedDelaunay::build(&grid(5)).unwrap();
        // 4x4 cells, two triangles each
        assert_eq!(mesh.real_triangles().count(), 32);
        assert!(is_delaunay(&mesh));
    }

    #[test]
    fn collinear_points_report_dimension_one() {
        let pts: Vec<_> = (0..4).map(|i| Point2::new(i as f64, 2.0 * i as f64)).collect();
        let mesh = ConstrainedDelaunay::build(&pts).unwrap();
        assert_eq!(mesh.dimension(), 1);
        assert_eq!(mesh.num_triangles(), 0);
    }

    #[test]
    fn duplicates_are_rejected() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 0.0),
        ];
        assert!(matches!(
            ConstrainedDelaunay::build(&pts),
            Err(CdtError::DuplicatePoint(_, _))
        ));
    }

    #[test]
    fn edge_view_and_adjacency_agree() {
        let mesh = ConstrainedDelaunay::build(&grid(3)).unwrap();
        for (id, t) in mesh.triangles() {
            for (i, (a, b)) in t.edges().into_iter().enumerate() {
                let e = mesh.edge(a, b).unwrap();
                assert!(e.t.contains(&Some(id)));
                if let Some(n) = mesh.adjacent(id, i) {
                    assert_eq!(mesh.triangle(n).unwrap().which_side_of_edge(a, b), -1);
                }
            }
        }
    }

    #[test]
    fn remove_and_clear() {
        let mut mesh = ConstrainedDelaunay::build(&grid(2)).unwrap();
        let before = mesh.num_triangles();
        let key = mesh.real_triangles().next().unwrap().key();
        assert!(mesh.remove(&key));
        assert!(!mesh.remove(&key));
        assert_eq!(mesh.num_triangles(), before - 1);
        mesh.clear();
        assert_eq!(mesh.num_triangles(), 0);
        assert_eq!(mesh.edges().count(), 0);
    }
}
