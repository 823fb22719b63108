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

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::{CdtError, Result};
use crate::geometry::{Point2, PointKey};
use crate::tree::PolygonTreeEx;

/// Replaces every polygon index of `tree` by an index into a duplicate-free
/// point array, returned together with the `remapping` that undoes it.
///
/// Distinct point values are numbered in the order the nodes (breadth-first)
/// and their polygons first reference them. `remapping[new]` starts as the
/// identity and is overwritten with the original index of every occurrence,
/// so for a point value shared by several input indices the last one visited
/// is what [`restore_polygon_tree`] puts back.
pub fn remap_polygon_tree(
    points: &[Point2<f64>],
    tree: &mut PolygonTreeEx,
) -> Result<(Vec<Point2<f64>>, Vec<usize>)> {
    let len = points.len();
    let mut remapping: Vec<usize> = (0..len).collect();
    let mut deduped: Vec<Point2<f64>> = Vec::new();
    let mut seen: BTreeMap<PointKey, usize> = BTreeMap::new();

    for node in tree.nodes.iter_mut() {
        for v in node.polygon.iter_mut() {
            let orig = *v;
            let p = points
                .get(orig)
                .ok_or(CdtError::InvalidPointIndex { index: orig, len })?;
            match seen.entry(PointKey::new(p)) {
                Entry::Vacant(e) => {
                    let new = deduped.len();
                    deduped.push(*p);
                    remapping[new] = orig;
                    e.insert(new);
                    *v = new;
                }
                Entry::Occupied(e) => {
                    let existing = *e.get();
                    remapping[existing] = orig;
                    *v = existing;
                }
            }
        }
    }

    if deduped.len() < 3 {
        return Err(CdtError::TooFewDistinctPoints(deduped.len()));
    }
    Ok((deduped, remapping))
}

/// Rewrites every index held by `tree` through `remapping`.
pub fn restore_polygon_tree(tree: &mut PolygonTreeEx, remapping: &[usize]) {
    let restore = |t: &mut [usize; 3]| {
        for v in t.iter_mut() {
            *v = remapping[*v];
        }
    };
    for node in tree.nodes.iter_mut() {
        for v in node.polygon.iter_mut() {
            *v = remapping[*v];
        }
        node.triangulation.iter_mut().for_each(restore);
    }
    for list in [
        &mut tree.interior_triangles,
        &mut tree.exterior_triangles,
        &mut tree.inside_triangles,
        &mut tree.outside_triangles,
        &mut tree.all_triangles,
    ] {
        list.iter_mut().for_each(restore);
    }
}
