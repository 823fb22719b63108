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

use thiserror::Error;

/// Whether an error is the caller's fault or the triangulation's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller broke the input contract.
    Argument,
    /// The mesh ended up in a state the algorithm cannot continue from; most
    /// often two polygon edges cross at an interior point.
    Invariant,
}

#[derive(Debug, Error)]
pub enum CdtError {
    #[error("a polygon tree needs at least 3 points, got {0}")]
    NotEnoughPoints(usize),

    #[error("the polygon forest has no nodes")]
    EmptyForest,

    #[error("point {index} is out of range for {len} points")]
    InvalidPointIndex { index: usize, len: usize },

    #[error("point {0} has a non-finite coordinate")]
    NonFinitePoint(usize),

    #[error("polygon of node {node} has {len} vertices, need at least 3")]
    DegeneratePolygon { node: usize, len: usize },

    #[error("cannot constrain the zero-length edge at vertex {0}")]
    DegenerateEdge(usize),

    #[error("thread count must be a nonzero power of two, got {0}")]
    InvalidThreadCount(usize),

    #[error("a polygon tree must have at least one triangle (only {0} distinct points)")]
    TooFewDistinctPoints(usize),

    #[error("point set has dimension {0}, expected 2")]
    Dimension(usize),

    #[error("points {0} and {1} coincide")]
    DuplicatePoint(usize, usize),

    #[error("coordinate range too large to enclose in a bounding triangle")]
    CoordinateRange,

    #[error(
        "edge ({from}, {to}) crosses constrained edge ({}, {}) at an interior point",
        .crossed.0,
        .crossed.1
    )]
    CrossingConstraints {
        from: usize,
        to: usize,
        crossed: (usize, usize),
    },

    #[error("boundary edge ({0}, {1}) is not a constrained mesh edge")]
    MissingEdge(usize, usize),

    #[error("region of node {0} is not closed by constrained edges")]
    UnboundedRegion(usize),

    #[error("{0} constrained edges were not consumed by any node")]
    LeftoverConstraints(usize),

    #[error("mesh invariant violated: {0}")]
    Topology(&'static str),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CdtError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CdtError::NotEnoughPoints(_)
            | CdtError::EmptyForest
            | CdtError::InvalidPointIndex { .. }
            | CdtError::NonFinitePoint(_)
            | CdtError::DegeneratePolygon { .. }
            | CdtError::DegenerateEdge(_)
            | CdtError::InvalidThreadCount(_) => ErrorKind::Argument,
            _ => ErrorKind::Invariant,
        }
    }
}

pub type Result<T> = std::result::Result<T, CdtError>;
