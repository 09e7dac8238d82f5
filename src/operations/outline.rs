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

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use log::{debug, warn};

use crate::geometry::{Aabb2, Point2};
use crate::numeric::Scalar;
use crate::operations::triangulation::{
    ContourSpan, EarClipTriangulator, TriangulationError, contour_face_normal, group_and_merge,
};

/// A flattened outline command. Curves are expected to be subdivided into
/// line segments before they get here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment<T: Scalar> {
    MoveTo(Point2<T>),
    LineTo(Point2<T>),
    Close,
}

struct ContourBuilder<T: Scalar> {
    points: Vec<Point2<T>>,
    spans: Vec<ContourSpan>,
    start: Option<usize>,
}

impl<T: Scalar> ContourBuilder<T> {
    fn open(&mut self, p: Point2<T>) {
        self.finish();
        self.start = Some(self.points.len());
        self.points.push(p);
    }

    fn line_to(&mut self, p: Point2<T>) {
        if self.start.is_none() {
            self.open(p);
        } else if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    fn finish(&mut self) {
        let Some(start) = self.start.take() else {
            return;
        };
        if self.points.len() - start >= 2 && self.points.last() == self.points.get(start) {
            self.points.pop();
        }
        if self.points.len() - start < 3 {
            self.points.truncate(start);
            return;
        }
        self.spans.push(ContourSpan::new(start, self.points.len()));
    }
}

/// Splits a path into closed contours over one shared point buffer.
///
/// Repeated consecutive points are skipped and a final point equal to the
/// contour's first is dropped. Contours left with fewer than three points
/// are discarded.
pub fn contours_from_path<T: Scalar>(segments: &[PathSegment<T>]) -> (Vec<Point2<T>>, Vec<ContourSpan>) {
    let mut builder = ContourBuilder {
        points: Vec::with_capacity(segments.len()),
        spans: Vec::new(),
        start: None,
    };
    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) => builder.open(p),
            PathSegment::LineTo(p) => builder.line_to(p),
            PathSegment::Close => builder.finish(),
        }
    }
    builder.finish();
    (builder.points, builder.spans)
}

/// Filled triangles of one outline, counter-clockwise when seen from `+Z`.
#[derive(Clone, Debug, PartialEq)]
pub struct TessellatedOutline<T: Scalar> {
    pub points: Vec<Point2<T>>,
    pub triangles: Vec<[usize; 3]>,
    /// Bounds of every contour point, `None` for an empty outline.
    pub bounds: Option<Aabb2<T>>,
    /// Exteriors (with their holes) that could not be triangulated and were left out.
    pub failed_contours: usize,
}

impl<T: Scalar> TessellatedOutline<T> {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct OutlineTessellator<T: Scalar> {
    triangulator: EarClipTriangulator<T>,
}

impl<T: Scalar> OutlineTessellator<T> {
    pub fn new() -> Self {
        Self::with_triangulator(EarClipTriangulator::new())
    }

    pub fn with_triangulator(triangulator: EarClipTriangulator<T>) -> Self {
        OutlineTessellator { triangulator }
    }

    pub fn triangulator(&mut self) -> &mut EarClipTriangulator<T> {
        &mut self.triangulator
    }

    pub fn tessellate(&mut self, segments: &[PathSegment<T>]) -> Result<TessellatedOutline<T>, TriangulationError> {
        let (mut points, spans) = contours_from_path(segments);
        let merged = group_and_merge(&mut points, &spans)?;
        let normal = contour_face_normal();

        let mut triangles = Vec::new();
        let mut failed_contours = 0;
        for contour in &merged {
            let set = self.triangulator.triangulate_merged(&points, contour, normal)?;
            if !set.outcome.is_complete() {
                warn!(
                    "cannot tessellate contour {} ({} triangles before giving up)",
                    contour.exterior,
                    set.outcome.triangle_count()
                );
                failed_contours += 1;
                continue;
            }
            triangles.extend(set.triangles.into_iter().map(|mut t| {
                t.swap(0, 2);
                t
            }));
        }

        debug!(
            "tessellated {} contours into {} triangles",
            spans.len(),
            triangles.len()
        );
        Ok(TessellatedOutline {
            bounds: Aabb2::from_points(&points),
            points,
            triangles,
            failed_contours,
        })
    }
}

/// Memoized outline tessellations, keyed for example by character.
#[derive(Debug)]
pub struct OutlineCache<K, T: Scalar> {
    tessellator: OutlineTessellator<T>,
    entries: HashMap<K, Arc<TessellatedOutline<T>>>,
}

impl<K: Eq + Hash, T: Scalar> Default for OutlineCache<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, T: Scalar> OutlineCache<K, T> {
    pub fn new() -> Self {
        OutlineCache {
            tessellator: OutlineTessellator::new(),
            entries: HashMap::new(),
        }
    }

    /// Returns the cached outline for `key`, tessellating the path produced
    /// by `path` on a miss. Errors are not cached; outlines with failed
    /// contours are.
    pub fn get_or_tessellate<F>(&mut self, key: K, path: F) -> Result<Arc<TessellatedOutline<T>>, TriangulationError>
    where
        F: FnOnce() -> Vec<PathSegment<T>>,
    {
        if let Some(outline) = self.entries.get(&key) {
            return Ok(Arc::clone(outline));
        }
        let outline = Arc::new(self.tessellator.tessellate(&path())?);
        self.entries.insert(key, Arc::clone(&outline));
        Ok(outline)
    }

    pub fn get(&self, key: &K) -> Option<Arc<TessellatedOutline<T>>> {
        self.entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached outline and the triangulator's pooled vertices.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.tessellator.triangulator().clear_cached_vertices();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    #[test]
    fn path_cleanup() {
        use PathSegment::*;
        let path = [
            LineTo(p(0.0, 0.0)),
            LineTo(p(1.0, 0.0)),
            LineTo(p(1.0, 0.0)),
            LineTo(p(1.0, 1.0)),
            LineTo(p(0.0, 0.0)),
            Close,
            MoveTo(p(5.0, 5.0)),
            LineTo(p(6.0, 5.0)),
            MoveTo(p(7.0, 7.0)),
            LineTo(p(8.0, 7.0)),
            LineTo(p(8.0, 8.0)),
        ];
        let (points, spans) = contours_from_path(&path);
        assert_eq!(spans, vec![ContourSpan::new(0, 3), ContourSpan::new(3, 6)]);
        assert_eq!(points, vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(7.0, 7.0), p(8.0, 7.0), p(8.0, 8.0)]);
    }

    #[test]
    fn empty_path_has_no_bounds() {
        let outline = OutlineTessellator::<f32>::new().tessellate(&[]).unwrap();
        assert!(outline.is_empty());
        assert_eq!(outline.bounds, None);
        assert_eq!(outline.failed_contours, 0);
    }
}
