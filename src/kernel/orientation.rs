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

use crate::geometry::Point2;
use crate::numeric::Scalar;

/// Returns:
/// - >0 if counter-clockwise
/// - <0 if clockwise
/// - =0 if collinear
///
/// The magnitude is twice the triangle's area.
pub fn orient2d<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Shoelace area of a closed contour. Negative means clockwise.
pub fn signed_area<T: Scalar>(points: &[Point2<T>]) -> T {
    let Some((first, rest)) = points.split_first() else {
        return T::zero();
    };
    let doubled = rest
        .windows(2)
        .fold(T::zero(), |acc, pair| acc + orient2d(first, &pair[0], &pair[1]));
    doubled / T::two()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Winding of a closed contour. Zero-area contours report counter-clockwise.
pub fn winding_of<T: Scalar>(points: &[Point2<T>]) -> Winding {
    if signed_area(points) < T::zero() {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ]
    }

    #[test]
    fn ccw_test() {
        let a = Point2 { x: 0.0, y: 0.0 };
        let b = Point2 { x: 1.0, y: 0.0 };
        let c = Point2 { x: 0.0, y: 1.0 };

        assert!(orient2d(&a, &b, &c) > 0.0); // Counter-clockwise
        assert!(orient2d(&a, &c, &b) < 0.0);
    }

    #[test]
    fn shoelace_sign_follows_winding() {
        let mut points = square();
        assert_eq!(signed_area(&points), 4.0);
        assert_eq!(winding_of(&points), Winding::CounterClockwise);

        points.reverse();
        assert_eq!(signed_area(&points), -4.0);
        assert_eq!(winding_of(&points), Winding::Clockwise);
    }

    #[test]
    fn degenerate_contours_have_no_area() {
        assert_eq!(signed_area::<f32>(&[]), 0.0);
        assert_eq!(signed_area(&[Point2::new(1.0f32, 1.0)]), 0.0);
        assert_eq!(winding_of(&[Point2::new(0.0f32, 0.0), Point2::new(1.0, 1.0)]), Winding::CounterClockwise);
    }
}
