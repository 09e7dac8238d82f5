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

use std::ops::{Index, Sub};

use crate::geometry::Vector3;
use crate::numeric::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3<T: Scalar> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Scalar> Point3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Reads vertex `vertex` out of a flat `xyz` coordinate buffer.
    pub fn from_slice(coords: &[T], vertex: usize) -> Option<Self> {
        let start = vertex.checked_mul(3)?;
        match coords.get(start..start.checked_add(3)?)? {
            [x, y, z] => Some(Point3::new(*x, *y, *z)),
            _ => None,
        }
    }

    /// Vector from `self` to `other`.
    pub fn vector_to(&self, other: &Self) -> Vector3<T> {
        Vector3::new(other.x - self.x, other.y - self.y, other.z - self.z)
    }

    /// Exact positional equality, no tolerance.
    pub fn coincides(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl<T: Scalar> Index<usize> for Point3<T> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Point3 index {i} out of range"),
        }
    }
}

impl<T: Scalar> Sub for Point3<T> {
    type Output = Vector3<T>;
    fn sub(self, rhs: Point3<T>) -> Vector3<T> {
        rhs.vector_to(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::Point3;

    #[test]
    fn reads_vertices_from_flat_buffer() {
        let coords = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(Point3::from_slice(&coords, 1), Some(Point3::new(3.0, 4.0, 5.0)));
        assert_eq!(Point3::from_slice(&coords, 2), None);
        assert_eq!(Point3::from_slice(&coords, usize::MAX), None);
    }

    #[test]
    fn subtraction_matches_vector_to() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 8.0);
        assert_eq!(b - a, a.vector_to(&b));
        assert_eq!(a[0] + a[1] + a[2], 6.0);
    }
}
