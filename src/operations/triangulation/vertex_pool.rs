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

use std::ops::Index;

use crate::geometry::Point3;
use crate::numeric::Scalar;

/// Handle of a slot in a [`VertexPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(usize);

impl VertexId {
    /// Link value of a node that is not part of any ring.
    pub const NONE: VertexId = VertexId(usize::MAX);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One polygon corner while a contour is being clipped.
///
/// The attribute indices point into the caller's external arrays and are
/// copied verbatim into the output triples.
#[derive(Clone, Debug)]
pub struct PolyVertex<T: Scalar> {
    pub position: Point3<T>,
    pub vertex_index: usize,
    pub normal_index: Option<usize>,
    pub color_index: Option<usize>,
    pub tex_coord_index: Option<usize>,
    next: VertexId,
    prev: VertexId,
}

impl<T: Scalar> PolyVertex<T> {
    pub fn new(position: Point3<T>, vertex_index: usize) -> Self {
        Self {
            position,
            vertex_index,
            normal_index: None,
            color_index: None,
            tex_coord_index: None,
            next: VertexId::NONE,
            prev: VertexId::NONE,
        }
    }

    pub fn next(&self) -> VertexId {
        self.next
    }

    pub fn prev(&self) -> VertexId {
        self.prev
    }
}

/// Arena of ring nodes with a free list.
///
/// Released slots are recycled by later [`acquire`](VertexPool::acquire)
/// calls, so repeated triangulations on one pool stop allocating once the
/// largest contour has been seen. The pool only grows until [`reset`](VertexPool::reset).
#[derive(Clone, Debug, Default)]
pub struct VertexPool<T: Scalar> {
    slots: Vec<PolyVertex<T>>,
    free: Vec<VertexId>,
}

impl<T: Scalar> VertexPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
        }
    }

    /// Stores `vertex` in a free slot, or a fresh one when none is free.
    /// The stored node starts unlinked.
    pub fn acquire(&mut self, mut vertex: PolyVertex<T>) -> VertexId {
        vertex.next = VertexId::NONE;
        vertex.prev = VertexId::NONE;
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = vertex;
                id
            }
            None => {
                self.slots.push(vertex);
                VertexId(self.slots.len() - 1)
            }
        }
    }

    /// Returns a slot to the free list. Only the links are cleared.
    pub fn release(&mut self, id: VertexId) {
        let slot = &mut self.slots[id.0];
        slot.next = VertexId::NONE;
        slot.prev = VertexId::NONE;
        self.free.push(id);
    }

    pub fn next(&self, id: VertexId) -> VertexId {
        self.slots[id.0].next
    }

    pub fn prev(&self, id: VertexId) -> VertexId {
        self.slots[id.0].prev
    }

    /// Links `ids` into a circular list in the given order.
    pub fn link_ring(&mut self, ids: &[VertexId]) {
        let count = ids.len();
        for (k, &id) in ids.iter().enumerate() {
            let slot = &mut self.slots[id.0];
            slot.next = ids[(k + 1) % count];
            slot.prev = ids[(k + count - 1) % count];
        }
    }

    /// Splices `id` out of its ring. Its own links are left in place until it is released.
    pub fn unlink(&mut self, id: VertexId) {
        let (prev, next) = (self.prev(id), self.next(id));
        self.slots[prev.0].next = next;
        self.slots[next.0].prev = prev;
    }

    /// Size of the ring through `start`, counting no further than `limit + 1`.
    pub fn ring_len_at_most(&self, start: VertexId, limit: usize) -> usize {
        let mut len = 1;
        let mut id = self.next(start);
        while id != start && len <= limit {
            len += 1;
            id = self.next(id);
        }
        len
    }

    /// Releases every node of the ring through `start`.
    pub fn release_ring(&mut self, start: VertexId) {
        let mut id = start;
        loop {
            let next = self.next(id);
            self.release(id);
            if next == start || next == VertexId::NONE {
                break;
            }
            id = next;
        }
    }

    /// Number of slots currently checked out.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots ever allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drops every slot, live or free.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T: Scalar> Index<VertexId> for VertexPool<T> {
    type Output = PolyVertex<T>;
    fn index(&self, id: VertexId) -> &Self::Output {
        &self.slots[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(i: usize) -> PolyVertex<f32> {
        PolyVertex::new(Point3::new(i as f32, 0.0, 0.0), i)
    }

    fn ring(pool: &mut VertexPool<f32>, n: usize) -> Vec<VertexId> {
        let ids: Vec<_> = (0..n).map(|i| pool.acquire(vertex(i))).collect();
        pool.link_ring(&ids);
        ids
    }

    #[test]
    fn released_slots_are_reused() {
        let mut pool = VertexPool::with_capacity(2);
        let a = pool.acquire(vertex(0));
        let b = pool.acquire(vertex(1));
        assert_eq!(pool.live(), 2);

        pool.release(a);
        assert_eq!(pool.live(), 1);

        let c = pool.acquire(vertex(7));
        assert_eq!(c, a);
        assert_ne!(c, b);
        assert_eq!(pool[c].vertex_index, 7);
        assert_eq!(pool[c].next(), VertexId::NONE);
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn ring_links_both_directions() {
        let mut pool = VertexPool::default();
        let ids = ring(&mut pool, 4);
        assert_eq!(pool.next(ids[3]), ids[0]);
        assert_eq!(pool.prev(ids[0]), ids[3]);
        assert_eq!(pool.next(ids[1]), ids[2]);
        assert_eq!(pool.ring_len_at_most(ids[0], 3), 4);
        assert_eq!(pool.ring_len_at_most(ids[0], 10), 4);
    }

    #[test]
    fn unlink_shrinks_the_ring() {
        let mut pool = VertexPool::default();
        let ids = ring(&mut pool, 4);

        pool.unlink(ids[1]);
        pool.release(ids[1]);
        assert_eq!(pool.next(ids[0]), ids[2]);
        assert_eq!(pool.prev(ids[2]), ids[0]);
        assert_eq!(pool.ring_len_at_most(ids[2], 3), 3);

        pool.release_ring(ids[2]);
        assert_eq!(pool.live(), 0);
        assert_eq!(pool.capacity(), 4);
    }

    #[test]
    fn reset_drops_everything() {
        let mut pool = VertexPool::default();
        ring(&mut pool, 5);
        pool.reset();
        assert_eq!(pool.live(), 0);
        assert_eq!(pool.capacity(), 0);
    }
}
