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

use crate::mesh::ConstrainedDelaunay;
use crate::tree::PolygonTreeEx;

/// Fills the output triangle lists of `tree` once every region is carved.
///
/// Triangles still in the mesh lie outside every polygon; the mesh is cleared
/// after they are collected. Node triangulations go to the interior or the
/// exterior list by chirality, and all of them to the inside list.
pub(crate) fn harvest(mesh: &mut ConstrainedDelaunay, tree: &mut PolygonTreeEx) {
    tree.outside_triangles = mesh.real_triangles().map(|t| t.v).collect();
    mesh.clear();

    let PolygonTreeEx {
        nodes,
        interior_triangles,
        interior_node_indices,
        exterior_triangles,
        exterior_node_indices,
        inside_triangles,
        inside_node_indices,
        ..
    } = tree;
    for node in nodes.iter() {
        for &t in &node.triangulation {
            if node.is_outer() {
                interior_triangles.push(t);
                interior_node_indices.push(node.index);
            } else {
                exterior_triangles.push(t);
                exterior_node_indices.push(node.index);
            }
            inside_triangles.push(t);
            inside_node_indices.push(node.index);
        }
    }
}
