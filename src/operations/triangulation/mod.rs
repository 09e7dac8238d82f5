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

use crate::{geometry::point_2::Point2, numeric::scalar::Scalar};

pub mod contour;
pub mod ear_clip;
pub mod error;
pub mod vertex_pool;

pub use contour::{
    ContourGroup, ContourSpan, MergedContour, contour_bounds, contour_face_normal, group_and_merge,
    group_contours, merge_group, normalize_winding,
};
pub use ear_clip::{
    AttributeIndices, ClipOutcome, ContourLayout, DEFAULT_POLY_SIZE, EarClipConfig,
    EarClipTriangulator, TriangleOutput, TriangleSet,
};
pub use error::{Attribute, TriangulationError};
pub use vertex_pool::{PolyVertex, VertexId, VertexPool};

pub trait Triangulate2D<T: Scalar> {
    /// Triangulates closed planar contours; holes are told apart from
    /// exteriors by bounding-box containment.
    fn triangulate_2d(&mut self, contours: &[Vec<Point2<T>>]) -> Result<Triangulation<T>, TriangulationError>;
}

#[derive(Clone, Debug)]
pub struct Triangulation<T: Scalar> {
    /// Input points after winding normalization.
    pub points: Vec<Point2<T>>,
    pub triangles: Vec<[usize; 3]>,
    /// One entry per merged exterior.
    pub outcomes: Vec<ClipOutcome>,
}

impl<T: Scalar> Triangulation<T> {
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(ClipOutcome::is_complete)
    }
}

impl<T: Scalar> Triangulate2D<T> for EarClipTriangulator<T> {
    fn triangulate_2d(&mut self, contours: &[Vec<Point2<T>>]) -> Result<Triangulation<T>, TriangulationError> {
        let mut points = Vec::with_capacity(contours.iter().map(Vec::len).sum());
        let mut spans = Vec::with_capacity(contours.len());
        for contour in contours {
            spans.push(ContourSpan::new(points.len(), points.len() + contour.len()));
            points.extend_from_slice(contour);
        }

        let merged = group_and_merge(&mut points, &spans)?;
        let normal = contour_face_normal();

        let mut triangles = Vec::new();
        let mut outcomes = Vec::with_capacity(merged.len());
        for contour in &merged {
            let set = self.triangulate_merged(&points, contour, normal)?;
            triangles.extend(set.triangles);
            outcomes.push(set.outcome);
        }

        Ok(Triangulation {
            points,
            triangles,
            outcomes,
        })
    }
}
