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

//! Exact-predicate constrained Delaunay triangulation of nested polygon
//! forests.
//!
//! [`triangulate`] takes a point array and a forest of [`PolygonTree`]s
//! (counter-clockwise outer boundaries, clockwise holes) and returns a
//! [`PolygonTreeEx`] with every node's region triangulated and the triangles
//! sorted into interior, exterior, inside and outside lists.
//!
//! Geometric decisions go through two-tier predicates in [`kernel`]: a
//! midpoint-radius interval evaluation first, exact rationals when the
//! interval cannot decide.

pub mod error;
pub mod geometry;
pub mod kernel;
pub mod mesh;
pub mod numeric;
pub mod tree;
pub mod triangulation;

pub use error::{CdtError, ErrorKind, Result};
pub use geometry::{Coordinate, Point2, Point3};
pub use numeric::Sign;
pub use tree::{Node, PolygonTree, PolygonTreeEx};
pub use triangulation::{TriangulateOptions, Triangulator, triangulate, triangulate_tree};
