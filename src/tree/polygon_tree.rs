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
use std::ops::Range;

/// Input polygon forest node: a boundary listed as point indices plus the
/// polygons nested directly inside it.
///
/// Outer boundaries are listed counter-clockwise and the boundaries of holes
/// clockwise, alternating with depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonTree {
    pub polygon: Vec<usize>,
    pub children: Vec<PolygonTree>,
}

impl PolygonTree {
    pub fn new(polygon: Vec<usize>) -> Self {
        PolygonTree {
            polygon,
            children: Vec::new(),
        }
    }

    pub fn with_children(polygon: Vec<usize>, children: Vec<PolygonTree>) -> Self {
        PolygonTree { polygon, children }
    }

    /// Number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        let mut n = 0;
        let mut queue: VecDeque<&PolygonTree> = VecDeque::from([self]);
        while let Some(t) = queue.pop_front() {
            n += 1;
            queue.extend(t.children.iter());
        }
        n
    }
}

/// One region of the flattened forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Boundary indices; gains vertices when edge insertion subdivides it.
    pub polygon: Vec<usize>,
    pub index: usize,
    pub parent: Option<usize>,
    pub min_child: usize,
    pub sup_child: usize,
    /// `+1` for counter-clockwise outer boundaries, `-1` for holes.
    pub chirality: i8,
    /// Triangles of exactly this node's region, wound like its polygon.
    pub triangulation: Vec<[usize; 3]>,
}

impl Node {
    #[inline]
    pub fn children(&self) -> Range<usize> {
        self.min_child..self.sup_child
    }

    #[inline]
    pub fn is_outer(&self) -> bool {
        self.chirality > 0
    }

    /// Cyclic boundary edges `(polygon[i], polygon[i + 1])`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.polygon.len();
        (0..n).map(move |i| (self.polygon[i], self.polygon[(i + 1) % n]))
    }
}

/// Arena form of a polygon forest together with the classified triangles.
///
/// Nodes are laid out breadth-first: the roots take indices `0..R`, and the
/// children of every node occupy the contiguous range `min_child..sup_child`.
/// Every `*_node_indices` list runs parallel to the triangle list it names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonTreeEx {
    pub nodes: Vec<Node>,
    pub interior_triangles: Vec<[usize; 3]>,
    pub interior_node_indices: Vec<usize>,
    pub exterior_triangles: Vec<[usize; 3]>,
    pub exterior_node_indices: Vec<usize>,
    pub inside_triangles: Vec<[usize; 3]>,
    pub inside_node_indices: Vec<usize>,
    pub outside_triangles: Vec<[usize; 3]>,
    pub all_triangles: Vec<[usize; 3]>,
}

impl PolygonTreeEx {
    /// Flattens `forest` breadth-first. Roots get chirality `+1`; every child
    /// gets the negation of its parent's.
    pub fn from_forest(forest: &[PolygonTree]) -> Self {
        let total: usize = forest.iter().map(PolygonTree::node_count).sum();
        let mut nodes: Vec<Node> = Vec::with_capacity(total);

        let mut queue: VecDeque<(&PolygonTree, Option<usize>, i8)> =
            forest.iter().map(|t| (t, None, 1)).collect();
        let mut next_child = forest.len();
        while let Some((tree, parent, chirality)) = queue.pop_front() {
            let index = nodes.len();
            let min_child = next_child;
            next_child += tree.children.len();
            nodes.push(Node {
                polygon: tree.polygon.clone(),
                index,
                parent,
                min_child,
                sup_child: next_child,
                chirality,
                triangulation: Vec::new(),
            });
            for child in &tree.children {
                queue.push_back((child, Some(index), -chirality));
            }
        }

        PolygonTreeEx {
            nodes,
            ..Default::default()
        }
    }

    pub fn from_tree(tree: &PolygonTree) -> Self {
        Self::from_forest(std::slice::from_ref(tree))
    }

    /// Indices of the root nodes.
    pub fn roots(&self) -> Range<usize> {
        0..self.nodes.iter().take_while(|n| n.parent.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<PolygonTree> {
        // root A with holes B, C; B holds island D; a second root E
        let d = PolygonTree::new(vec![30, 31, 32]);
        let b = PolygonTree::with_children(vec![10, 11, 12], vec![d]);
        let c = PolygonTree::new(vec![20, 21, 22]);
        let a = PolygonTree::with_children(vec![0, 1, 2], vec![b, c]);
        let e = PolygonTree::new(vec![40, 41, 42]);
        vec![a, e]
    }

    #[test]
    fn breadth_first_layout() {
        let ex = PolygonTreeEx::from_forest(&forest());
        let polys: Vec<usize> = ex.nodes.iter().map(|n| n.polygon[0]).collect();
        assert_eq!(polys, vec![0, 40, 10, 20, 30]);
        assert_eq!(ex.roots(), 0..2);

        for (i, n) in ex.nodes.iter().enumerate() {
            assert_eq!(n.index, i);
            for c in n.children() {
                assert_eq!(ex.nodes[c].parent, Some(i));
                assert_eq!(ex.nodes[c].chirality, -n.chirality);
            }
        }
        assert_eq!(ex.nodes[0].children(), 2..4);
        assert_eq!(ex.nodes[1].children(), 4..4);
        assert_eq!(ex.nodes[2].children(), 4..5);
        assert_eq!(ex.nodes[4].chirality, 1);
    }

    #[test]
    fn node_count_covers_the_subtree() {
        let f = forest();
        assert_eq!(f[0].node_count(), 4);
        assert_eq!(f[1].node_count(), 1);
    }

    #[test]
    fn node_edges_wrap_around() {
        let ex = PolygonTreeEx::from_tree(&PolygonTree::new(vec![5, 6, 7]));
        let edges: Vec<_> = ex.nodes[0].edges().collect();
        assert_eq!(edges, vec![(5, 6), (6, 7), (7, 5)]);
    }
}
