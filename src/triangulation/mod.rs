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

//! Polygon-forest triangulation.
//!
//! The pipeline flattens the forest, deduplicates the referenced points,
//! builds a Delaunay mesh over them, forces every boundary edge into it, then
//! flood-fills each node's region between the constrained edges (children
//! first) and sorts the resulting triangles into the output lists. All indices
//! in the result refer to the caller's point array.

mod classify;
mod edges;
mod harvest;

use tracing::{debug, debug_span};

use crate::error::{CdtError, Result};
use crate::geometry::{Coordinate, Point2};
use crate::mesh::ConstrainedDelaunay;
use crate::tree::{PolygonTree, PolygonTreeEx, remap_polygon_tree, restore_polygon_tree};

use classify::Classifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangulateOptions {
    /// Workers for the insertion-order sort of the Delaunay step. Must be a
    /// nonzero power of two; `1` keeps everything on the calling thread.
    pub threads: usize,
}

impl Default for TriangulateOptions {
    fn default() -> Self {
        TriangulateOptions { threads: 1 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Triangulator {
    options: TriangulateOptions,
}

impl Triangulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TriangulateOptions) -> Self {
        Triangulator { options }
    }

    pub fn options(&self) -> &TriangulateOptions {
        &self.options
    }

    /// Triangulates every region of `forest` over `points`.
    ///
    /// Roots must be counter-clockwise and each level below alternates
    /// winding. Polygons may share vertices and edges, and distinct indices
    /// may name the same coordinates. Two boundary edges crossing at an
    /// interior point are not supported and fail with
    /// [`CdtError::CrossingConstraints`].
    pub fn triangulate<T: Coordinate>(
        &self,
        points: &[Point2<T>],
        forest: &[PolygonTree],
    ) -> Result<PolygonTreeEx> {
        let _span = debug_span!("triangulate", points = points.len(), roots = forest.len()).entered();

        let threads = self.options.threads;
        if !threads.is_power_of_two() {
            return Err(CdtError::InvalidThreadCount(threads));
        }
        if points.len() < 3 {
            return Err(CdtError::NotEnoughPoints(points.len()));
        }
        if forest.is_empty() {
            return Err(CdtError::EmptyForest);
        }
        let points: Vec<Point2<f64>> = points.iter().map(Point2::to_f64).collect();

        let mut tree = PolygonTreeEx::from_forest(forest);
        validate(&points, &tree)?;
        debug!(nodes = tree.nodes.len(), "normalized polygon forest");

        let (deduped, remapping) = remap_polygon_tree(&points, &mut tree)?;
        debug!(
            input = points.len(),
            distinct = deduped.len(),
            "deduplicated points"
        );

        let mut mesh = ConstrainedDelaunay::build_with_threads(&deduped, threads)?;
        if mesh.dimension() != 2 {
            return Err(CdtError::Dimension(mesh.dimension()));
        }

        let walls = edges::insert_boundary_edges(&mut mesh, &mut tree)?;
        tree.all_triangles = mesh.real_triangles().map(|t| t.v).collect();

        Classifier::new(&mut mesh, &walls).run(&mut tree)?;
        harvest::harvest(&mut mesh, &mut tree);
        debug!(
            all = tree.all_triangles.len(),
            interior = tree.interior_triangles.len(),
            exterior = tree.exterior_triangles.len(),
            outside = tree.outside_triangles.len(),
            "classified triangles"
        );

        restore_polygon_tree(&mut tree, &remapping);
        Ok(tree)
    }
}

fn validate(points: &[Point2<f64>], tree: &PolygonTreeEx) -> Result<()> {
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(CdtError::NonFinitePoint(i));
    }
    let len = points.len();
    for node in &tree.nodes {
        if node.polygon.len() < 3 {
            return Err(CdtError::DegeneratePolygon {
                node: node.index,
                len: node.polygon.len(),
            });
        }
        if let Some(&index) = node.polygon.iter().find(|&&v| v >= len) {
            return Err(CdtError::InvalidPointIndex { index, len });
        }
    }
    Ok(())
}

/// [`Triangulator::triangulate`] with default options.
pub fn triangulate<T: Coordinate>(
    points: &[Point2<T>],
    forest: &[PolygonTree],
) -> Result<PolygonTreeEx> {
    Triangulator::new().triangulate(points, forest)
}

/// Triangulates a single-rooted polygon tree.
pub fn triangulate_tree<T: Coordinate>(
    points: &[Point2<T>],
    tree: &PolygonTree,
) -> Result<PolygonTreeEx> {
    triangulate(points, std::slice::from_ref(tree))
}
