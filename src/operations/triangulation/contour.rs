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

use std::ops::Range;

use log::debug;

use crate::geometry::{Aabb2, Point2, Vector3};
use crate::kernel::{Winding, winding_of};
use crate::numeric::Scalar;
use crate::operations::triangulation::error::TriangulationError;

/// Half-open range of one closed contour inside a shared point buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContourSpan {
    pub start: usize,
    pub end: usize,
}

impl ContourSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ContourSpan { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A top-level contour together with the holes it owns, as indices into the
/// span list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContourGroup {
    pub exterior: usize,
    pub holes: Vec<usize>,
}

/// One simple boundary produced by splicing an exterior with its holes.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedContour<T: Scalar> {
    /// Index of the exterior contour in the span list.
    pub exterior: usize,
    pub points: Vec<Point2<T>>,
    /// Index in the shared buffer of every entry of `points`.
    pub source: Vec<usize>,
}

/// Face normal for contours in the `z = 0` plane after winding
/// normalization: exteriors run clockwise when seen from `+Z`.
pub fn contour_face_normal<T: Scalar>() -> Vector3<T> {
    Vector3::new(T::zero(), T::zero(), -T::one())
}

fn span_points<'a, T: Scalar>(
    points: &'a [Point2<T>],
    spans: &[ContourSpan],
    contour: usize,
) -> Result<&'a [Point2<T>], TriangulationError> {
    let span = *spans.get(contour).ok_or(TriangulationError::UnknownContour {
        contour,
        available: spans.len(),
    })?;
    let slice = points
        .get(span.range())
        .ok_or(TriangulationError::ContourOutOfRange {
            contour,
            start: span.start,
            end: span.end,
            available: points.len(),
        })?;
    if slice.is_empty() {
        return Err(TriangulationError::EmptyContour { contour });
    }
    Ok(slice)
}

/// Bounding box of every contour, in span order.
pub fn contour_bounds<T: Scalar>(
    points: &[Point2<T>],
    spans: &[ContourSpan],
) -> Result<Vec<Aabb2<T>>, TriangulationError> {
    (0..spans.len())
        .map(|contour| {
            let slice = span_points(points, spans, contour)?;
            Aabb2::from_points(slice).ok_or(TriangulationError::EmptyContour { contour })
        })
        .collect()
}

/// Sorts contours into exteriors and holes by bounding-box containment.
///
/// A contour whose box lies strictly inside another's is a hole and never
/// heads a group. Every exterior owns all contours its box strictly contains,
/// so an island inside a hole lands in the outer group as a second hole. A
/// hole inside several exteriors goes to the first of them.
pub fn group_contours<T: Scalar>(
    points: &[Point2<T>],
    spans: &[ContourSpan],
) -> Result<Vec<ContourGroup>, TriangulationError> {
    let bounds = contour_bounds(points, spans)?;
    let contains = |i: usize, j: usize| i != j && bounds[i].strictly_contains(&bounds[j]);

    let is_hole: Vec<bool> = (0..bounds.len())
        .map(|j| (0..bounds.len()).any(|i| contains(i, j)))
        .collect();

    let mut assigned = vec![false; bounds.len()];
    let mut groups = Vec::new();
    for exterior in (0..bounds.len()).filter(|&i| !is_hole[i]) {
        let mut holes = Vec::new();
        for j in 0..bounds.len() {
            if !assigned[j] && contains(exterior, j) {
                assigned[j] = true;
                holes.push(j);
            }
        }
        groups.push(ContourGroup { exterior, holes });
    }

    debug!(
        "grouped {} contours into {} exteriors with {} holes",
        spans.len(),
        groups.len(),
        groups.iter().map(|g| g.holes.len()).sum::<usize>()
    );
    Ok(groups)
}

fn enforce_winding<T: Scalar>(contour: &mut [Point2<T>], wanted: Winding) {
    if winding_of(contour) != wanted {
        contour.reverse();
    }
}

/// Reverses contours in place so exteriors run clockwise and holes
/// counter-clockwise.
pub fn normalize_winding<T: Scalar>(
    points: &mut [Point2<T>],
    spans: &[ContourSpan],
    groups: &[ContourGroup],
) -> Result<(), TriangulationError> {
    for group in groups {
        for (contour, wanted) in std::iter::once((group.exterior, Winding::Clockwise))
            .chain(group.holes.iter().map(|&h| (h, Winding::CounterClockwise)))
        {
            // validates the span before slicing mutably
            span_points(points, spans, contour)?;
            enforce_winding(&mut points[spans[contour].range()], wanted);
        }
    }
    Ok(())
}

/// Splices a group's holes into its exterior.
///
/// Each hole is bridged from the exterior vertex nearest its first vertex;
/// holes sharing a seam keep their group order. The seam vertex and the
/// hole's first vertex both appear twice, forming a zero-width bridge.
pub fn merge_group<T: Scalar>(
    points: &[Point2<T>],
    spans: &[ContourSpan],
    group: &ContourGroup,
) -> Result<MergedContour<T>, TriangulationError> {
    let parent = span_points(points, spans, group.exterior)?;
    let parent_start = spans[group.exterior].start;

    let mut bridges = Vec::with_capacity(group.holes.len());
    for &hole in &group.holes {
        let anchor = span_points(points, spans, hole)?[0];
        let seam = parent
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let (da, db) = (a.distance_squared_to(&anchor), b.distance_squared_to(&anchor));
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(k, _)| k)
            .unwrap_or(0);
        bridges.push((seam, hole));
    }
    bridges.sort_by_key(|&(seam, _)| seam);

    let mut source = Vec::with_capacity(
        parent.len() + group.holes.iter().map(|&h| spans[h].len() + 2).sum::<usize>(),
    );
    let mut cursor = 0;
    for &(seam, hole) in &bridges {
        source.extend(parent_start + cursor..=parent_start + seam);
        source.extend(spans[hole].range());
        source.push(spans[hole].start);
        cursor = seam;
    }
    source.extend(parent_start + cursor..parent_start + parent.len());

    Ok(MergedContour {
        exterior: group.exterior,
        points: source.iter().map(|&i| points[i]).collect(),
        source,
    })
}

/// Groups, normalizes and merges all contours of `points`.
pub fn group_and_merge<T: Scalar>(
    points: &mut [Point2<T>],
    spans: &[ContourSpan],
) -> Result<Vec<MergedContour<T>>, TriangulationError> {
    let groups = group_contours(points, spans)?;
    normalize_winding(points, spans, &groups)?;
    groups
        .iter()
        .map(|group| merge_group(points, spans, group))
        .collect()
}
