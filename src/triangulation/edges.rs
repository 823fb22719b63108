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

use ahash::AHashSet;
use tracing::debug;

use crate::error::{CdtError, Result};
use crate::mesh::{ConstrainedDelaunay, EdgeKey};
use crate::tree::PolygonTreeEx;

/// Inserts every boundary edge of every node, breadth-first, as a constrained
/// edge of `mesh`.
///
/// When an edge runs through other input vertices the node's polygon gets
/// those vertices spliced in, so afterwards each polygon edge is a literal
/// mesh edge. Edges collapsed to a point by deduplication are dropped.
/// Returns the undirected keys of all boundary edges.
pub(crate) fn insert_boundary_edges(
    mesh: &mut ConstrainedDelaunay,
    tree: &mut PolygonTreeEx,
) -> Result<AHashSet<EdgeKey>> {
    let mut walls: AHashSet<EdgeKey> = AHashSet::default();
    let mut subdivided = 0usize;

    for node in tree.nodes.iter_mut() {
        let mut polygon: Vec<usize> = Vec::with_capacity(node.polygon.len());
        for (i0, i1) in node.edges() {
            if i0 == i1 {
                continue;
            }
            let path = mesh.insert_constrained_edge(i0, i1)?;
            if path.len() > 2 {
                subdivided += 1;
            }
            polygon.extend_from_slice(&path[..path.len() - 1]);
        }
        if polygon.len() < 3 {
            return Err(CdtError::DegeneratePolygon {
                node: node.index,
                len: polygon.len(),
            });
        }
        node.polygon = polygon;
        walls.extend(node.edges().map(|(a, b)| EdgeKey::new(a, b)));
    }

    debug!(
        constrained = walls.len(),
        subdivided, "inserted boundary edges"
    );
    Ok(walls)
}
