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

use crate::geometry::{Point3, Vector3};
use crate::numeric::Scalar;

/// Whether `p` is a convex corner of the path `prev -> p -> next` as seen
/// along `normal`.
///
/// Collinear corners (zero dot product) count as convex, which lets flat ears
/// be clipped instead of stalling the clipper.
pub fn is_convex<T: Scalar>(
    prev: &Point3<T>,
    p: &Point3<T>,
    next: &Point3<T>,
    normal: &Vector3<T>,
) -> bool {
    let e1 = prev.vector_to(p);
    let e2 = p.vector_to(next);
    e1.cross(&e2).dot(normal) >= T::zero()
}

/// Crossing-number test of `point` against the triangle `a, b, c`, evaluated
/// on the coordinate plane obtained by dropping the dominant axis of `normal`.
///
/// The point is assumed to lie in the triangle's plane.
pub fn point_in_triangle<T: Scalar>(
    point: &Point3<T>,
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    normal: &Vector3<T>,
) -> bool {
    let zero = T::zero();
    let (u, v) = normal.dominant_axis().projection_axes();

    // project and move the query point to the origin
    let corners = [a, b, c].map(|q| (q[u] - point[u], q[v] - point[v]));
    let side = |value: T| if value < zero { -1 } else { 1 };

    let mut sign = side(corners[0].1);
    let mut crossings = 0;
    for i in 0..3 {
        let (ua, va) = corners[i];
        let (ub, vb) = corners[(i + 1) % 3];
        let next_sign = side(vb);
        if sign == next_sign {
            continue;
        }

        if ua > zero && ub > zero {
            crossings += 1;
        } else if ua > zero || ub > zero {
            // edge straddles the V axis, intersect it with U
            let dist = ua - va * (ub - ua) / (vb - va);
            if dist > zero {
                crossings += 1;
            }
        }
        sign = next_sign;
    }

    crossings % 2 == 1
}

/// True iff the corner at `p` has an exactly zero cross product: its three
/// points are collinear or coincident. Thin slivers are not caught.
pub fn is_degenerate_triangle<T: Scalar>(prev: &Point3<T>, p: &Point3<T>, next: &Point3<T>) -> bool {
    let e1 = prev.vector_to(p);
    let e2 = next.vector_to(p);
    e1.cross(&e2).is_zero()
}

/// Barycentric weights `(u, v, w)` of `p` for `a, b, c`, so that
/// `p = u*a + v*b + w*c` when `p` lies in the triangle's plane.
pub fn barycentric_coords<T: Scalar>(
    p: &Point3<T>,
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
) -> Option<(T, T, T)> {
    let v0 = a.vector_to(b);
    let v1 = a.vector_to(c);
    let v2 = a.vector_to(p);

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    if denom == T::zero() {
        return None; // degenerate triangle
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = T::one() - v - w;

    Some((u, v, w))
}
