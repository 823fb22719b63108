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

/// Undirected edge key, `0 <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub usize, pub usize);

impl EdgeKey {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a < b { EdgeKey(a, b) } else { EdgeKey(b, a) }
    }
}

/// Winding-sensitive triangle key: rotated so the smallest index comes first.
/// `(0,1,2)` and `(1,2,0)` share a key; `(0,2,1)` does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleKey(pub [usize; 3]);

impl TriangleKey {
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        if a < b && a < c {
            TriangleKey([a, b, c])
        } else if b < c {
            TriangleKey([b, c, a])
        } else {
            TriangleKey([c, a, b])
        }
    }

    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        self.0
    }
}

/// A mesh triangle. Vertices are stored counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub v: [usize; 3],
}

impl Triangle {
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Triangle { v: [a, b, c] }
    }

    #[inline]
    pub fn key(&self) -> TriangleKey {
        TriangleKey::new(self.v[0], self.v[1], self.v[2])
    }

    /// Directed edges `(v0,v1)`, `(v1,v2)`, `(v2,v0)`; edge `i` starts at `v[i]`.
    #[inline]
    pub fn edges(&self) -> [(usize, usize); 3] {
        [
            (self.v[0], self.v[1]),
            (self.v[1], self.v[2]),
            (self.v[2], self.v[0]),
        ]
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.v.contains(&v)
    }

    /// `+1` if the triangle traverses `v0 -> v1`, `-1` if it traverses
    /// `v1 -> v0`, `0` if `(v0,v1)` is not one of its edges.
    pub fn which_side_of_edge(&self, v0: usize, v1: usize) -> i8 {
        for (a, b) in self.edges() {
            if a == v0 && b == v1 {
                return 1;
            }
            if a == v1 && b == v0 {
                return -1;
            }
        }
        0
    }

    /// Vertex opposite the edge `(u,v)` in either direction.
    #[inline]
    pub fn third_vertex(&self, u: usize, v: usize) -> Option<usize> {
        if !(self.contains(u) && self.contains(v)) || u == v {
            return None;
        }
        self.v.into_iter().find(|&w| w != u && w != v)
    }

    /// The same triangle rotated so that `a` comes first.
    #[inline]
    pub fn rotated_to(&self, a: usize) -> Option<[usize; 3]> {
        let i = self.v.iter().position(|&x| x == a)?;
        Some([self.v[i], self.v[(i + 1) % 3], self.v[(i + 2) % 3]])
    }
}

/// Read-only view of a mesh edge and its live triangles.
///
/// A single remaining triangle always sits in `t[0]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub v: [usize; 2],
    pub t: [Option<usize>; 2],
}
