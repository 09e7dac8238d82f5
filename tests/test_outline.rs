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

use polytess::kernel::orient2d;
use polytess::operations::triangulation::{EarClipConfig, EarClipTriangulator};
use polytess::{Aabb2, OutlineCache, OutlineTessellator, PathSegment, Point2};

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new(x, y)
}

fn polygon(path: &mut Vec<PathSegment<f64>>, corners: &[(f64, f64)]) {
    let (first, rest) = corners.split_first().unwrap();
    path.push(PathSegment::MoveTo((*first).into()));
    path.extend(rest.iter().map(|&c| PathSegment::LineTo(c.into())));
    path.push(PathSegment::Close);
}

fn letter_o() -> Vec<PathSegment<f64>> {
    let mut path = Vec::new();
    polygon(&mut path, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    polygon(&mut path, &[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)]);
    path
}

fn area(points: &[Point2<f64>], triangles: &[[usize; 3]]) -> f64 {
    triangles
        .iter()
        .map(|t| orient2d(&points[t[0]], &points[t[1]], &points[t[2]]) / 2.0)
        .sum()
}

#[test]
fn test_letter_o() {
    let mut tessellator = OutlineTessellator::new();
    let outline = tessellator.tessellate(&letter_o()).unwrap();

    assert_eq!(outline.failed_contours, 0);
    assert_eq!(outline.triangles.len(), 8);
    assert_eq!(outline.bounds, Some(Aabb2::new(p(0.0, 0.0), p(10.0, 10.0))));
    for t in &outline.triangles {
        assert!(orient2d(&outline.points[t[0]], &outline.points[t[1]], &outline.points[t[2]]) > 0.0);
    }
    assert!((area(&outline.points, &outline.triangles) - 84.0).abs() < 1e-12);
}

#[test]
fn test_duplicate_points_in_path() {
    let path = vec![
        PathSegment::MoveTo(p(0.0, 0.0)),
        PathSegment::LineTo(p(10.0, 0.0)),
        PathSegment::LineTo(p(10.0, 0.0)),
        PathSegment::LineTo(p(10.0, 2.0)),
        PathSegment::LineTo(p(0.0, 2.0)),
        PathSegment::LineTo(p(0.0, 2.0)),
        PathSegment::LineTo(p(0.0, 0.0)),
        PathSegment::Close,
    ];
    let outline = OutlineTessellator::new().tessellate(&path).unwrap();
    assert_eq!(outline.points.len(), 4);
    assert_eq!(outline.triangles.len(), 2);
    assert!((area(&outline.points, &outline.triangles) - 20.0).abs() < 1e-12);
}

#[test]
fn test_failed_contour_is_skipped() {
    let mut path = letter_o();
    polygon(&mut path, &[(20.0, 0.0), (30.0, 0.0), (30.0, 2.0), (20.0, 2.0)]);

    // too few iterations for the "O", enough for the bar
    let triangulator = EarClipTriangulator::with_config(EarClipConfig {
        iteration_limit: Some(3),
        ..EarClipConfig::default()
    });
    let outline = OutlineTessellator::with_triangulator(triangulator)
        .tessellate(&path)
        .unwrap();

    assert_eq!(outline.failed_contours, 1);
    assert_eq!(outline.triangles.len(), 2);
    assert!(outline.triangles.iter().flatten().all(|&i| i >= 8));
}

#[test]
fn test_cache_reuses_outlines() {
    let mut cache = OutlineCache::new();
    let mut builds = 0;

    let first = cache
        .get_or_tessellate('O', || {
            builds += 1;
            letter_o()
        })
        .unwrap();
    let second = cache
        .get_or_tessellate('O', || {
            builds += 1;
            letter_o()
        })
        .unwrap();

    assert_eq!(builds, 1);
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&'x').is_none());

    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.get(&'O').is_none());
}
