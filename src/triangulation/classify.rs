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

use std::collections::VecDeque;

use ahash::AHashSet;
use tracing::trace;

use crate::error::{CdtError, Result};
use crate::mesh::{ConstrainedDelaunay, Edge, EdgeKey, TriangleKey};
use crate::tree::{Node, PolygonTreeEx};

/// Per-call state of the region classification.
///
/// `walls` is the full set of boundary edges and stays fixed: every flood fill
/// stops at every boundary, including those of descendants. `pending` starts
/// as a copy and loses each node's edges once that node is harvested; it has
/// to end up empty.
pub(crate) struct Classifier<'a> {
    mesh: &'a mut ConstrainedDelaunay,
    walls: &'a AHashSet<EdgeKey>,
    pending: AHashSet<EdgeKey>,
}

impl<'a> Classifier<'a> {
    pub(crate) fn new(mesh: &'a mut ConstrainedDelaunay, walls: &'a AHashSet<EdgeKey>) -> Self {
        Classifier {
            mesh,
            walls,
            pending: walls.clone(),
        }
    }

    /// Carves every node's region out of the mesh, children before parents,
    /// and stores it in the node's `triangulation`.
    pub(crate) fn run(mut self, tree: &mut PolygonTreeEx) -> Result<()> {
        // post-order walk: a node is harvested once all of its children are
        let mut stack: Vec<(usize, bool)> = tree.roots().rev().map(|r| (r, false)).collect();
        while let Some((index, expanded)) = stack.pop() {
            if expanded {
                self.harvest_node(tree, index)?;
                continue;
            }
            stack.push((index, true));
            stack.extend(tree.nodes[index].children().rev().map(|c| (c, false)));
        }

        if !self.pending.is_empty() {
            return Err(CdtError::LeftoverConstraints(self.pending.len()));
        }
        Ok(())
    }

    fn harvest_node(&mut self, tree: &mut PolygonTreeEx, index: usize) -> Result<()> {
        let node = &tree.nodes[index];
        let region = self.flood(node)?;

        let mut triangulation: Vec<[usize; 3]> = Vec::with_capacity(region.len());
        for [a, b, c] in region {
            if !self.mesh.remove(&TriangleKey::new(a, b, c)) {
                return Err(CdtError::Topology("region triangle is no longer in the mesh"));
            }
            triangulation.push(if node.chirality < 0 { [a, c, b] } else { [a, b, c] });
        }
        for (a, b) in node.edges() {
            self.pending.remove(&EdgeKey::new(a, b));
        }

        trace!(
            node = index,
            chirality = node.chirality,
            triangles = triangulation.len(),
            "classified region"
        );
        tree.nodes[index].triangulation = triangulation;
        Ok(())
    }

    /// Triangles of the region bounded by `node`'s polygon, in breadth-first
    /// order from the seeds.
    fn flood(&self, node: &Node) -> Result<Vec<[usize; 3]>> {
        let mut visited: AHashSet<usize> = AHashSet::default();
        let mut queue: VecDeque<usize> = VecDeque::new();

        for (v0, v1) in node.edges() {
            if !self.walls.contains(&EdgeKey::new(v0, v1)) {
                return Err(CdtError::MissingEdge(v0, v1));
            }
            let edge = self.mesh.edge(v0, v1).ok_or(CdtError::MissingEdge(v0, v1))?;
            let seed = self.seed(&edge, v0, v1, node.chirality)?;
            if visited.insert(seed) {
                queue.push_back(seed);
            }
        }

        let mut region: Vec<[usize; 3]> = Vec::new();
        while let Some(id) = queue.pop_front() {
            let tri = *self
                .mesh
                .triangle(id)
                .ok_or(CdtError::Topology("flood fill reached a removed triangle"))?;
            if tri.v.iter().any(|&v| self.mesh.is_super_vertex(v)) {
                return Err(CdtError::UnboundedRegion(node.index));
            }
            region.push(tri.v);
            for (i, (a, b)) in tri.edges().into_iter().enumerate() {
                if self.walls.contains(&EdgeKey::new(a, b)) {
                    continue;
                }
                if let Some(n) = self.mesh.adjacent(id, i) {
                    if visited.insert(n) {
                        queue.push_back(n);
                    }
                }
            }
        }
        Ok(region)
    }

    /// The triangle of `edge` that runs `v0 -> v1` in the direction given by
    /// `chirality`, or the other one when that side is already gone.
    fn seed(&self, edge: &Edge, v0: usize, v1: usize, chirality: i8) -> Result<usize> {
        let mut live = edge.t.iter().flatten().copied();
        let first = live.next().ok_or(CdtError::MissingEdge(v0, v1))?;
        let on_side = |t: usize| {
            self.mesh
                .triangle(t)
                .is_some_and(|tri| tri.which_side_of_edge(v0, v1) == chirality)
        };
        if on_side(first) {
            return Ok(first);
        }
        Ok(live.next().unwrap_or(first))
    }
}
