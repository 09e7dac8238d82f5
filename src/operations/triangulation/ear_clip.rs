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

use log::{trace, warn};

use crate::geometry::{Point2, Point3, Vector3};
use crate::kernel::{is_convex, is_degenerate_triangle, point_in_triangle};
use crate::numeric::Scalar;
use crate::operations::triangulation::contour::MergedContour;
use crate::operations::triangulation::error::{Attribute, TriangulationError};
use crate::operations::triangulation::vertex_pool::{PolyVertex, VertexId, VertexPool};

pub const DEFAULT_POLY_SIZE: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EarClipConfig {
    /// Slots reserved up front in the vertex pool.
    pub initial_capacity: usize,
    /// Clip-loop iterations allowed before giving up on a contour.
    /// `None` uses `(output_triangles)^2`, where `output_triangles` is the
    /// number of triangles the output buffer can hold.
    pub iteration_limit: Option<usize>,
}

impl Default for EarClipConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_POLY_SIZE,
            iteration_limit: None,
        }
    }
}

/// Result of clipping one contour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipOutcome {
    /// The contour was fully consumed.
    Complete(usize),
    /// The iteration limit was hit. The count covers the triangles written
    /// before stopping, all of which are valid.
    Aborted(usize),
}

impl ClipOutcome {
    pub fn triangle_count(&self) -> usize {
        match *self {
            ClipOutcome::Complete(n) | ClipOutcome::Aborted(n) => n,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ClipOutcome::Complete(_))
    }

    /// Count with the sign convention of index-buffer APIs: negative when aborted.
    pub fn signed_count(&self) -> isize {
        match *self {
            ClipOutcome::Complete(n) => n as isize,
            ClipOutcome::Aborted(n) => -(n as isize),
        }
    }
}

/// Which vertices of the coordinate buffer make up the contour.
#[derive(Clone, Copy, Debug)]
pub enum ContourLayout<'a> {
    /// Vertices `first..first + count`.
    Sequential { first: usize, count: usize },
    /// Vertex indices, in contour order.
    Indexed(&'a [usize]),
}

impl ContourLayout<'_> {
    pub fn len(&self) -> usize {
        match *self {
            ContourLayout::Sequential { count, .. } => count,
            ContourLayout::Indexed(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vertex index of the `k`-th contour corner, `None` past the end or on overflow.
    pub fn vertex(&self, k: usize) -> Option<usize> {
        match *self {
            ContourLayout::Sequential { first, count } if k < count => first.checked_add(k),
            ContourLayout::Sequential { .. } => None,
            ContourLayout::Indexed(indices) => indices.get(k).copied(),
        }
    }
}

/// Optional attribute index lists, parallel to the contour's corners.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttributeIndices<'a> {
    pub normals: Option<&'a [usize]>,
    pub colors: Option<&'a [usize]>,
    pub tex_coords: Option<&'a [usize]>,
}

impl<'a> AttributeIndices<'a> {
    fn streams(&self) -> [(Attribute, Option<&'a [usize]>); 3] {
        [
            (Attribute::Normal, self.normals),
            (Attribute::Color, self.colors),
            (Attribute::TexCoord, self.tex_coords),
        ]
    }
}

/// Caller-owned index buffers receiving the triangle triples.
///
/// Triangle `k` occupies `[3k, 3k + 3)` of every buffer. Nothing is ever
/// resized: a buffer too small for the contour is a precondition error.
#[derive(Debug)]
pub struct TriangleOutput<'a> {
    pub coords: &'a mut [usize],
    pub normals: Option<&'a mut [usize]>,
    pub colors: Option<&'a mut [usize]>,
    pub tex_coords: Option<&'a mut [usize]>,
}

impl<'a> TriangleOutput<'a> {
    pub fn new(coords: &'a mut [usize]) -> Self {
        Self {
            coords,
            normals: None,
            colors: None,
            tex_coords: None,
        }
    }

    pub fn with_normals(mut self, normals: &'a mut [usize]) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_colors(mut self, colors: &'a mut [usize]) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_tex_coords(mut self, tex_coords: &'a mut [usize]) -> Self {
        self.tex_coords = Some(tex_coords);
        self
    }

    /// Number of whole triangles the coordinate buffer can hold.
    pub fn triangle_capacity(&self) -> usize {
        self.coords.len() / 3
    }

    fn stream_lens(&self) -> [(Attribute, Option<usize>); 3] {
        [
            (Attribute::Normal, self.normals.as_ref().map(|b| b.len())),
            (Attribute::Color, self.colors.as_ref().map(|b| b.len())),
            (Attribute::TexCoord, self.tex_coords.as_ref().map(|b| b.len())),
        ]
    }

    fn write<T: Scalar>(&mut self, triangle: usize, corners: [&PolyVertex<T>; 3]) {
        let base = triangle * 3;
        for (k, corner) in corners.into_iter().enumerate() {
            self.coords[base + k] = corner.vertex_index;
            if let (Some(out), Some(index)) = (self.normals.as_deref_mut(), corner.normal_index) {
                out[base + k] = index;
            }
            if let (Some(out), Some(index)) = (self.colors.as_deref_mut(), corner.color_index) {
                out[base + k] = index;
            }
            if let (Some(out), Some(index)) = (self.tex_coords.as_deref_mut(), corner.tex_coord_index) {
                out[base + k] = index;
            }
        }
    }
}

/// Triangles of one contour, collected into owned triples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriangleSet {
    pub triangles: Vec<[usize; 3]>,
    pub outcome: ClipOutcome,
}

impl TriangleSet {
    fn from_buffer(buffer: &[usize], outcome: ClipOutcome) -> Self {
        let triangles = buffer
            .chunks_exact(3)
            .take(outcome.triangle_count())
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        TriangleSet { triangles, outcome }
    }
}

/// Ear-clipping triangulator for simple, planar, possibly concave polygons.
///
/// Each instance owns its vertex pool and scratch buffers, which grow to
/// the largest contour seen and are reused by later calls. Use one
/// instance per thread.
#[derive(Debug)]
pub struct EarClipTriangulator<T: Scalar> {
    config: EarClipConfig,
    pool: VertexPool<T>,
    concave: BTreeSet<VertexId>,
    ring: Vec<VertexId>,
    face_normal: Vector3<T>,
}

impl<T: Scalar> Default for EarClipTriangulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> EarClipTriangulator<T> {
    pub fn new() -> Self {
        Self::with_config(EarClipConfig::default())
    }

    pub fn with_config(config: EarClipConfig) -> Self {
        Self {
            config,
            pool: VertexPool::with_capacity(config.initial_capacity),
            concave: BTreeSet::new(),
            ring: Vec::with_capacity(config.initial_capacity),
            face_normal: Vector3::zero(),
        }
    }

    pub fn pool(&self) -> &VertexPool<T> {
        &self.pool
    }

    /// Frees every pooled vertex slot.
    pub fn clear_cached_vertices(&mut self) {
        self.pool.reset();
        self.ring = Vec::with_capacity(self.config.initial_capacity);
    }

    /// Triangulates one contour of `coords` (a flat `xyz` buffer) into `output`.
    ///
    /// `normal` must point to the side from which the contour's convex corners
    /// turn counter-clockwise; it also picks the projection plane of the
    /// containment tests. A last vertex that repeats the first one is ignored.
    ///
    /// Triangle indices are the contour's vertex indices and attribute
    /// indices, never positions in the working list.
    pub fn triangulate(
        &mut self,
        coords: &[T],
        layout: ContourLayout<'_>,
        attributes: AttributeIndices<'_>,
        normal: Vector3<T>,
        output: &mut TriangleOutput<'_>,
    ) -> Result<ClipOutcome, TriangulationError> {
        let supplied = layout.len();
        Self::check_attributes(&attributes, output, supplied)?;

        let mut count = supplied;
        if count >= 2 {
            let first = Self::position(coords, Self::vertex_index(coords, layout, 0)?)?;
            let last = Self::position(coords, Self::vertex_index(coords, layout, count - 1)?)?;
            if first.coincides(&last) {
                count -= 1;
            }
        }

        let required = count.saturating_sub(2) * 3;
        Self::check_output(output, required)?;

        if count < 3 {
            return Ok(ClipOutcome::Complete(0));
        }

        if count == 3 {
            let corners = [
                Self::corner(coords, layout, &attributes, 0)?,
                Self::corner(coords, layout, &attributes, 1)?,
                Self::corner(coords, layout, &attributes, 2)?,
            ];
            if is_degenerate_triangle(&corners[0].position, &corners[1].position, &corners[2].position) {
                return Ok(ClipOutcome::Complete(0));
            }
            output.write(0, [&corners[0], &corners[1], &corners[2]]);
            return Ok(ClipOutcome::Complete(1));
        }

        self.face_normal = normal;
        self.build_ring(coords, layout, &attributes, count)?;
        Ok(self.clip_ears(output))
    }

    /// Convenience form of [`triangulate`](Self::triangulate) for a list of
    /// points; indices in the result are positions in `points`.
    pub fn triangulate_points(
        &mut self,
        points: &[Point3<T>],
        normal: Vector3<T>,
    ) -> Result<TriangleSet, TriangulationError> {
        let coords: Vec<T> = points.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        let mut buffer = vec![0; points.len().saturating_sub(2) * 3];
        let outcome = self.triangulate(
            &coords,
            ContourLayout::Sequential {
                first: 0,
                count: points.len(),
            },
            AttributeIndices::default(),
            normal,
            &mut TriangleOutput::new(&mut buffer),
        )?;
        Ok(TriangleSet::from_buffer(&buffer, outcome))
    }

    /// Triangulates a merged contour lying in the `z = 0` plane. Indices in
    /// the result refer to `points`, the buffer the contour was merged from.
    pub fn triangulate_merged(
        &mut self,
        points: &[Point2<T>],
        contour: &MergedContour<T>,
        normal: Vector3<T>,
    ) -> Result<TriangleSet, TriangulationError> {
        let coords: Vec<T> = points.iter().flat_map(|p| [p.x, p.y, T::zero()]).collect();
        let mut buffer = vec![0; contour.source.len().saturating_sub(2) * 3];
        let outcome = self.triangulate(
            &coords,
            ContourLayout::Indexed(&contour.source),
            AttributeIndices::default(),
            normal,
            &mut TriangleOutput::new(&mut buffer),
        )?;
        Ok(TriangleSet::from_buffer(&buffer, outcome))
    }

    fn check_attributes(
        attributes: &AttributeIndices<'_>,
        output: &TriangleOutput<'_>,
        count: usize,
    ) -> Result<(), TriangulationError> {
        let outputs = output.stream_lens();
        for ((attribute, input), (_, out)) in attributes.streams().into_iter().zip(outputs) {
            match input {
                Some(indices) if indices.len() < count => {
                    return Err(TriangulationError::AttributeTooShort {
                        attribute,
                        required: count,
                        available: indices.len(),
                    });
                }
                None if out.is_some() => {
                    return Err(TriangulationError::AttributeMismatch { attribute });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn check_output(output: &TriangleOutput<'_>, required: usize) -> Result<(), TriangulationError> {
        if output.coords.len() < required {
            return Err(TriangulationError::OutputTooSmall {
                required,
                available: output.coords.len(),
            });
        }
        for (attribute, len) in output.stream_lens() {
            match len {
                Some(available) if available < required => {
                    return Err(TriangulationError::AttributeOutputTooSmall {
                        attribute,
                        required,
                        available,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn position(coords: &[T], vertex: usize) -> Result<Point3<T>, TriangulationError> {
        Point3::from_slice(coords, vertex).ok_or(TriangulationError::VertexOutOfRange {
            vertex,
            available: coords.len() / 3,
        })
    }

    fn vertex_index(coords: &[T], layout: ContourLayout<'_>, k: usize) -> Result<usize, TriangulationError> {
        layout.vertex(k).ok_or(TriangulationError::VertexOutOfRange {
            vertex: usize::MAX,
            available: coords.len() / 3,
        })
    }

    fn corner(
        coords: &[T],
        layout: ContourLayout<'_>,
        attributes: &AttributeIndices<'_>,
        k: usize,
    ) -> Result<PolyVertex<T>, TriangulationError> {
        let vertex_index = Self::vertex_index(coords, layout, k)?;
        let mut vertex = PolyVertex::new(Self::position(coords, vertex_index)?, vertex_index);
        vertex.normal_index = attributes.normals.map(|n| n[k]);
        vertex.color_index = attributes.colors.map(|c| c[k]);
        vertex.tex_coord_index = attributes.tex_coords.map(|t| t[k]);
        Ok(vertex)
    }

    fn build_ring(
        &mut self,
        coords: &[T],
        layout: ContourLayout<'_>,
        attributes: &AttributeIndices<'_>,
        count: usize,
    ) -> Result<(), TriangulationError> {
        self.ring.clear();
        for k in 0..count {
            match Self::corner(coords, layout, attributes, k) {
                Ok(vertex) => self.ring.push(self.pool.acquire(vertex)),
                Err(e) => {
                    for &id in &self.ring {
                        self.pool.release(id);
                    }
                    self.ring.clear();
                    return Err(e);
                }
            }
        }
        self.pool.link_ring(&self.ring);

        self.concave.clear();
        for k in 0..self.ring.len() {
            let id = self.ring[k];
            if !self.is_convex_at(id) {
                self.concave.insert(id);
            }
        }
        Ok(())
    }

    fn clip_ears(&mut self, output: &mut TriangleOutput<'_>) -> ClipOutcome {
        let capacity = output.triangle_capacity();
        let limit = self
            .config
            .iteration_limit
            .unwrap_or(capacity.saturating_mul(capacity));

        let mut emitted = 0;
        let mut iterations = 0;
        let mut current = self.pool.next(self.pool.next(self.ring[0]));

        loop {
            iterations += 1;
            if iterations > limit {
                warn!(
                    "ear clipping gave up after {limit} iterations with {emitted} triangles; \
                     likely causes: face normal disagrees with the winding, non-planar or \
                     self-intersecting contour, or all vertices coincident"
                );
                self.finish(current);
                return ClipOutcome::Aborted(emitted);
            }

            if self.pool.ring_len_at_most(current, 3) <= 3 {
                if self.pool.ring_len_at_most(current, 3) == 3 {
                    let ear = self.pool.prev(current);
                    let before = self.pool.prev(ear);
                    if !self.is_degenerate_at(ear) {
                        let pool = &self.pool;
                        output.write(emitted, [&pool[before], &pool[ear], &pool[current]]);
                        emitted += 1;
                    }
                }
                self.finish(current);
                return ClipOutcome::Complete(emitted);
            }

            let ear = self.pool.prev(current);
            if !self.is_ear(ear) {
                current = self.pool.next(current);
                continue;
            }

            let before = self.pool.prev(ear);
            if self.is_degenerate_at(ear) {
                trace!("dropping zero-area ear at vertex {}", self.pool[ear].vertex_index);
            } else {
                let pool = &self.pool;
                output.write(emitted, [&pool[before], &pool[ear], &pool[current]]);
                emitted += 1;
            }

            self.pool.unlink(ear);
            self.concave.remove(&ear);
            self.pool.release(ear);

            self.reclassify(current);
            self.reclassify(before);
        }
    }

    fn finish(&mut self, current: VertexId) {
        self.concave.clear();
        self.pool.release_ring(current);
        self.ring.clear();
    }

    fn is_ear(&self, id: VertexId) -> bool {
        if self.concave.is_empty() {
            return true;
        }
        if !self.is_convex_at(id) {
            return false;
        }

        let pool = &self.pool;
        let vertex = &pool[id];
        let (prev_id, next_id) = (vertex.prev(), vertex.next());
        let (prev, p, next) = (&pool[prev_id].position, &vertex.position, &pool[next_id].position);

        !self.concave.iter().any(|&candidate| {
            if candidate == id || candidate == prev_id || candidate == next_id {
                return false;
            }
            let c = &pool[candidate].position;
            // the same point reached through a seam is not an obstruction
            if c.coincides(p) || c.coincides(prev) || c.coincides(next) {
                return false;
            }
            point_in_triangle(c, prev, p, next, &self.face_normal)
        })
    }

    fn is_convex_at(&self, id: VertexId) -> bool {
        let vertex = &self.pool[id];
        is_convex(
            &self.pool[vertex.prev()].position,
            &vertex.position,
            &self.pool[vertex.next()].position,
            &self.face_normal,
        )
    }

    fn is_degenerate_at(&self, id: VertexId) -> bool {
        let vertex = &self.pool[id];
        is_degenerate_triangle(
            &self.pool[vertex.prev()].position,
            &vertex.position,
            &self.pool[vertex.next()].position,
        )
    }

    fn reclassify(&mut self, id: VertexId) {
        if self.is_convex_at(id) {
            self.concave.remove(&id);
        } else {
            self.concave.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point3<f32>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    fn up() -> Vector3<f32> {
        Vector3::new(0.0, 0.0, 1.0)
    }

    #[test]
    fn signed_count_marks_aborts() {
        assert_eq!(ClipOutcome::Complete(3).signed_count(), 3);
        assert_eq!(ClipOutcome::Aborted(2).signed_count(), -2);
        assert_eq!(ClipOutcome::Aborted(0).triangle_count(), 0);
        assert!(!ClipOutcome::Aborted(0).is_complete());
    }

    #[test]
    fn square_returns_every_vertex_to_the_pool() {
        let mut triangulator = EarClipTriangulator::new();
        let set = triangulator.triangulate_points(&square(), up()).unwrap();
        assert_eq!(set.outcome, ClipOutcome::Complete(2));
        assert_eq!(triangulator.pool().live(), 0);
        assert_eq!(triangulator.pool().capacity(), 4);

        triangulator.triangulate_points(&square(), up()).unwrap();
        assert_eq!(triangulator.pool().capacity(), 4);

        triangulator.clear_cached_vertices();
        assert_eq!(triangulator.pool().capacity(), 0);
    }

    #[test]
    fn iteration_limit_override_is_honoured() {
        let mut triangulator = EarClipTriangulator::with_config(EarClipConfig {
            iteration_limit: Some(0),
            ..EarClipConfig::default()
        });
        let set = triangulator.triangulate_points(&square(), up()).unwrap();
        assert_eq!(set.outcome, ClipOutcome::Aborted(0));
        assert!(set.triangles.is_empty());
        assert_eq!(triangulator.pool().live(), 0);
    }

    #[test]
    fn layout_addresses_vertices() {
        let indices = [4, 2, 9];
        assert_eq!(ContourLayout::Indexed(&indices).vertex(1), Some(2));
        assert_eq!(ContourLayout::Indexed(&indices).vertex(3), None);
        assert_eq!(ContourLayout::Sequential { first: 5, count: 3 }.vertex(2), Some(7));
        assert_eq!(ContourLayout::Sequential { first: 5, count: 3 }.vertex(3), None);
        assert_eq!(ContourLayout::Sequential { first: usize::MAX, count: 3 }.vertex(1), None);
        assert!(ContourLayout::Sequential { first: 5, count: 0 }.is_empty());
    }
}
