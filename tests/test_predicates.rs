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

use polytess::geometry::Axis;
use polytess::kernel::{barycentric_coords, is_degenerate_triangle, point_in_triangle};
use polytess::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn on_plane(origin: &Point3<f64>, u: &Vector3<f64>, v: &Vector3<f64>, s: f64, t: f64) -> Point3<f64> {
    Point3::new(
        origin.x + s * u.x + t * v.x,
        origin.y + s * u.y + t * v.y,
        origin.z + s * u.z + t * v.z,
    )
}

fn check_against_barycentric(u: Vector3<f64>, v: Vector3<f64>, axis: Axis, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let origin = Point3::new(0.5, -1.0, 2.0);
    let mut triangles = 0;

    while triangles < 5 {
        let [a, b, c] = [(); 3].map(|_| {
            on_plane(&origin, &u, &v, rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0))
        });
        let normal = (b - a).cross(&(c - a));
        if normal.dot(&normal) < 1e-2 {
            continue;
        }
        assert_eq!(normal.dominant_axis(), axis);
        triangles += 1;

        let (ab, ac) = (b - a, c - a);
        let mut checked = 0;
        while checked < 1000 {
            let (s, t) = (rng.random_range(-0.5..1.5), rng.random_range(-0.5..1.5));
            let q = on_plane(&a, &ab, &ac, s, t);
            let Some((wu, wv, ww)) = barycentric_coords(&q, &a, &b, &c) else {
                panic!("non-degenerate triangle has no barycentric frame");
            };
            if [wu, wv, ww].iter().any(|w| w.abs() < 1e-6) {
                continue;
            }
            let inside = wu > 0.0 && wv > 0.0 && ww > 0.0;
            assert_eq!(point_in_triangle(&q, &a, &b, &c, &normal), inside, "{q:?}");
            // orientation of the triangle does not matter
            assert_eq!(point_in_triangle(&q, &a, &c, &b, &normal), inside, "{q:?}");
            checked += 1;
        }
    }
}

#[test]
fn test_point_in_triangle_x_dominant() {
    check_against_barycentric(Vector3::new(0.2, 1.0, 0.1), Vector3::new(0.1, -0.3, 1.0), Axis::X, 1);
}

#[test]
fn test_point_in_triangle_y_dominant() {
    check_against_barycentric(Vector3::new(1.0, 0.2, 0.1), Vector3::new(0.1, 0.3, 1.0), Axis::Y, 2);
}

#[test]
fn test_point_in_triangle_z_dominant() {
    check_against_barycentric(Vector3::new(1.0, 0.1, 0.2), Vector3::new(0.2, 1.0, 0.3), Axis::Z, 3);
}

#[test]
fn test_coincident_vertices_are_degenerate() {
    let a = Point3::new(1.5, -2.0, 0.25);
    let b = Point3::new(3.0, 4.0, -1.0);
    assert!(is_degenerate_triangle(&a, &a, &b));
    assert!(is_degenerate_triangle(&a, &b, &a));
    assert!(is_degenerate_triangle(&b, &a, &a));
    assert!(!is_degenerate_triangle(&a, &b, &Point3::new(0.0, 0.0, 0.0)));
}

