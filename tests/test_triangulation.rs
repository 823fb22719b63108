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

use std::collections::BTreeSet;

use polytree_cdt::kernel::orient2d;
use polytree_cdt::{CdtError, Point2, PolygonTree, PolygonTreeEx, Sign, triangulate, triangulate_tree};

fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
    coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}

fn area(points: &[Point2<f64>], t: &[usize; 3]) -> f64 {
    let [a, b, c] = t.map(|i| points[i]);
    0.5 * ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x))
}

fn node_area(points: &[Point2<f64>], tree: &PolygonTreeEx, node: usize) -> f64 {
    tree.nodes[node]
        .triangulation
        .iter()
        .map(|t| area(points, t).abs())
        .sum()
}

fn assert_winding(points: &[Point2<f64>], tree: &PolygonTreeEx) {
    for node in &tree.nodes {
        let expected = if node.chirality > 0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        for t in &node.triangulation {
            assert_eq!(orient2d(&points[t[0]], &points[t[1]], &points[t[2]]), expected);
        }
    }
}

#[test]
fn test_single_square() {
    let points = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let out = triangulate_tree(&points, &PolygonTree::new(vec![0, 1, 2, 3])).unwrap();

    assert_eq!(out.nodes.len(), 1);
    assert_eq!(out.nodes[0].chirality, 1);
    assert_eq!(out.nodes[0].parent, None);
    assert_eq!(out.interior_triangles.len(), 2);
    assert_eq!(out.interior_node_indices, vec![0, 0]);
    assert!(out.exterior_triangles.is_empty());
    assert_eq!(out.inside_triangles, out.interior_triangles);
    // every hull edge is a boundary edge, so nothing is left outside
    assert!(out.outside_triangles.is_empty());
    assert_eq!(out.all_triangles.len(), 2);
    assert!((node_area(&points, &out, 0) - 1.0).abs() < 1e-12);
    assert_winding(&points, &out);
}

#[test]
fn test_square_with_hole() {
    let points = pts(&[
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 4.0),
        (0.0, 4.0),
        (1.0, 1.0),
        (1.0, 3.0),
        (3.0, 3.0),
        (3.0, 1.0),
    ]);
    let hole = PolygonTree::new(vec![4, 5, 6, 7]);
    let tree = PolygonTree::with_children(vec![0, 1, 2, 3], vec![hole]);
    let out = triangulate_tree(&points, &tree).unwrap();

    assert_eq!(out.nodes.len(), 2);
    let (outer, inner) = (&out.nodes[0], &out.nodes[1]);
    assert_eq!(outer.children(), 1..2);
    assert_eq!(inner.parent, Some(0));
    assert_eq!(inner.chirality, -1);
    assert!(!outer.triangulation.is_empty());
    assert!(!inner.triangulation.is_empty());

    assert_eq!(out.exterior_triangles, inner.triangulation);
    assert!(out.exterior_node_indices.iter().all(|&n| n == 1));
    assert_eq!(out.interior_triangles, outer.triangulation);
    assert!((node_area(&points, &out, 0) - 12.0).abs() < 1e-9);
    assert!((node_area(&points, &out, 1) - 4.0).abs() < 1e-9);
    assert!(out.outside_triangles.is_empty());
    assert_winding(&points, &out);
}

#[test]
fn test_two_triangles_sharing_an_edge() {
    // each triangle has its own copies of the shared endpoints
    let points = pts(&[
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (0.0, 0.0),
        (1.0, 1.0),
        (0.0, 1.0),
    ]);
    let forest = [PolygonTree::new(vec![0, 1, 2]), PolygonTree::new(vec![3, 4, 5])];
    let out = triangulate(&points, &forest).unwrap();

    assert_eq!(out.all_triangles.len(), 2);
    assert_eq!(out.interior_triangles.len(), 2);
    assert_eq!(out.interior_node_indices, vec![0, 1]);
    assert!(out.outside_triangles.is_empty());

    let indices: BTreeSet<usize> = out.all_triangles.iter().flatten().copied().collect();
    assert_eq!(indices.len(), 4);
    let values: BTreeSet<(u64, u64)> = indices
        .iter()
        .map(|&i| (points[i].x.to_bits(), points[i].y.to_bits()))
        .collect();
    assert_eq!(values.len(), 4);
    assert_winding(&points, &out);
}

#[test]
fn test_duplicate_point_pinches_a_polygon() {
    // two triangles touching at (1, 1), listed as one boundary that visits
    // the touching point twice under different indices
    let points = pts(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (1.0, 1.0),
        (2.0, 2.0),
        (0.0, 2.0),
        (1.0, 1.0),
    ]);
    let out = triangulate_tree(&points, &PolygonTree::new(vec![0, 1, 2, 3, 4, 5])).unwrap();

    assert_eq!(out.interior_triangles.len(), 2);
    assert!((node_area(&points, &out, 0) - 2.0).abs() < 1e-12);
    // four distinct-valued triangles in the hull: ABC, CDE, and two outside
    assert_eq!(out.all_triangles.len(), 4);
    assert_eq!(out.outside_triangles.len(), 2);

    let used: BTreeSet<usize> = out
        .all_triangles
        .iter()
        .chain(out.nodes[0].triangulation.iter())
        .flatten()
        .chain(out.nodes[0].polygon.iter())
        .copied()
        .collect();
    assert_eq!(used.len(), 5);
    // the pinch point restores to one of its two input indices; with the
    // current visiting order that is the later one
    assert!(used.contains(&5) != used.contains(&2));
    assert_eq!(out.nodes[0].polygon, vec![0, 1, 5, 3, 4, 5]);
    assert_winding(&points, &out);
}

#[test]
fn test_t_junction_subdivides_the_long_edge() {
    let points = pts(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 2.0),
        (0.0, 2.0),
        (3.0, 0.0),
        (3.0, 1.0),
        (2.0, 1.0),
        (3.0, 2.0),
    ]);
    let forest = [
        PolygonTree::new(vec![0, 1, 2, 3]),
        PolygonTree::new(vec![1, 4, 5, 6]),
        PolygonTree::new(vec![6, 5, 7, 2]),
    ];
    let out = triangulate(&points, &forest).unwrap();

    assert_eq!(out.nodes[0].polygon, vec![0, 1, 6, 2, 3]);
    assert!((node_area(&points, &out, 0) - 4.0).abs() < 1e-12);
    assert!((node_area(&points, &out, 1) - 1.0).abs() < 1e-12);
    assert!((node_area(&points, &out, 2) - 1.0).abs() < 1e-12);
    assert!(out.outside_triangles.is_empty());
    assert_winding(&points, &out);
}

#[test]
fn test_island_inside_a_hole() {
    let points = pts(&[
        (0.0, 0.0),
        (6.0, 0.0),
        (6.0, 6.0),
        (0.0, 6.0),
        (1.0, 1.0),
        (1.0, 5.0),
        (5.0, 5.0),
        (5.0, 1.0),
        (2.0, 2.0),
        (4.0, 2.0),
        (4.0, 4.0),
        (2.0, 4.0),
    ]);
    let island = PolygonTree::new(vec![8, 9, 10, 11]);
    let hole = PolygonTree::with_children(vec![4, 5, 6, 7], vec![island]);
    let tree = PolygonTree::with_children(vec![0, 1, 2, 3], vec![hole]);
    let out = triangulate_tree(&points, &tree).unwrap();

    assert_eq!(
        out.nodes.iter().map(|n| n.chirality).collect::<Vec<_>>(),
        vec![1, -1, 1]
    );
    assert!((node_area(&points, &out, 0) - 20.0).abs() < 1e-9);
    assert!((node_area(&points, &out, 1) - 12.0).abs() < 1e-9);
    assert!((node_area(&points, &out, 2) - 4.0).abs() < 1e-9);

    let interior: f64 = out.interior_triangles.iter().map(|t| area(&points, t)).sum();
    let exterior: f64 = out.exterior_triangles.iter().map(|t| area(&points, t)).sum();
    assert!((interior - 24.0).abs() < 1e-9);
    // clockwise triangles carry negative signed area
    assert!((exterior + 12.0).abs() < 1e-9);
    assert_winding(&points, &out);
}

#[test]
fn test_single_precision_coordinates() {
    let points: Vec<Point2<f32>> = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.5, 0.0),
        Point2::new(1.5, 0.1),
        Point2::new(0.0, 0.1),
    ];
    let out = triangulate_tree(&points, &PolygonTree::new(vec![0, 1, 2, 3])).unwrap();
    assert_eq!(out.interior_triangles.len(), 2);
    let wide: Vec<Point2<f64>> = points.iter().map(Point2::to_f64).collect();
    let total: f64 = out.interior_triangles.iter().map(|t| area(&wide, t)).sum();
    assert!((total - 1.5 * f64::from(0.1f32)).abs() < 1e-12);
}

#[test]
fn test_crossing_boundaries_are_rejected() {
    // two squares overlapping at interior points of their edges
    let points = pts(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 2.0),
        (0.0, 2.0),
        (1.0, 1.0),
        (3.0, 1.0),
        (3.0, 3.0),
        (1.0, 3.0),
    ]);
    let forest = [
        PolygonTree::new(vec![0, 1, 2, 3]),
        PolygonTree::new(vec![4, 5, 6, 7]),
    ];
    let err = triangulate(&points, &forest).unwrap_err();
    assert!(matches!(err, CdtError::CrossingConstraints { .. }));
    assert_eq!(err.kind(), polytree_cdt::ErrorKind::Invariant);
}

#[test]
fn test_points_outside_every_polygon_are_ignored() {
    let points = pts(&[
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (50.0, 50.0),
        (0.0, 1.0),
    ]);
    let out = triangulate_tree(&points, &PolygonTree::new(vec![0, 1, 2, 4])).unwrap();
    assert_eq!(out.interior_triangles.len(), 2);
    assert!(out.all_triangles.iter().flatten().all(|&i| i != 3));
}
