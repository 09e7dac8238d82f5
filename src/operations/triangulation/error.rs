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

use std::fmt;

/// Per-vertex attribute streams that travel alongside positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Normal,
    Color,
    TexCoord,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Normal => "normal",
            Attribute::Color => "color",
            Attribute::TexCoord => "texture coordinate",
        })
    }
}

/// Argument-shape violations. Malformed geometry is not an error; it is
/// reported through [`ClipOutcome::Aborted`](super::ClipOutcome::Aborted).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriangulationError {
    #[error("output buffer holds {available} indices but {required} are required")]
    OutputTooSmall { required: usize, available: usize },
    #[error("{attribute} output buffer holds {available} indices but {required} are required")]
    AttributeOutputTooSmall {
        attribute: Attribute,
        required: usize,
        available: usize,
    },
    #[error("vertex {vertex} is outside a coordinate buffer of {available} vertices")]
    VertexOutOfRange { vertex: usize, available: usize },
    #[error("{attribute} index list has {available} entries for a contour of {required} vertices")]
    AttributeTooShort {
        attribute: Attribute,
        required: usize,
        available: usize,
    },
    #[error("{attribute} output requested without {attribute} input indices")]
    AttributeMismatch { attribute: Attribute },
    #[error("contour {contour} spans {start}..{end} but only {available} points exist")]
    ContourOutOfRange {
        contour: usize,
        start: usize,
        end: usize,
        available: usize,
    },
    #[error("contour {contour} does not exist, only {available} contours were given")]
    UnknownContour { contour: usize, available: usize },
    #[error("contour {contour} has no points")]
    EmptyContour { contour: usize },
}
