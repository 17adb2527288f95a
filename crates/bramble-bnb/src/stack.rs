// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// A frame-structured LIFO stack of pending candidates.
///
/// `SearchStack` stores all enqueued candidates linearly and uses a `frames`
/// index stack to mark the boundary of each tree level. Popping a frame
/// truncates `entries` back to the recorded start index, which discards any
/// candidates of that level that were never visited.
#[derive(Clone, Debug)]
pub struct SearchStack<E> {
    /// The linear stack of pending candidates.
    entries: Vec<E>,
    /// `frames[i]` stores the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl<E> Default for SearchStack<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SearchStack<E> {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a stack sized for a tree of the given depth and fan-out.
    #[inline]
    pub fn preallocated(max_depth: usize, max_branching: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_depth.saturating_mul(max_branching)),
            frames: Vec::with_capacity(max_depth.saturating_add(1)),
        }
    }

    /// Ensures the stack can hold a tree of the given depth and fan-out.
    #[inline]
    pub fn ensure_capacity(&mut self, max_depth: usize, max_branching: usize) {
        let entry_capacity = max_depth.saturating_mul(max_branching);
        let frame_capacity = max_depth.saturating_add(1);
        if self.entries.capacity() < entry_capacity {
            self.entries.reserve(entry_capacity - self.entries.len());
        }
        if self.frames.capacity() < frame_capacity {
            self.frames.reserve(frame_capacity - self.frames.len());
        }
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// The number of open frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Marks the start of a new level.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Closes the current level, dropping its unvisited candidates.
    #[inline]
    pub fn pop_frame(&mut self) -> Option<()> {
        let start = self.frames.pop()?;
        self.entries.truncate(start);
        Some(())
    }

    #[inline]
    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = E>,
    {
        self.entries.extend(iter);
    }

    /// Pops the next candidate of the current level.
    #[inline]
    pub fn pop(&mut self) -> Option<E> {
        if self.is_current_level_empty() {
            return None;
        }
        self.entries.pop()
    }

    #[inline]
    pub fn is_current_level_empty(&self) -> bool {
        match self.frames.last() {
            Some(&start) => self.entries.len() == start,
            None => true,
        }
    }

    /// The candidates still pending on the current level, last one next.
    #[inline]
    pub fn current_frame_entries(&self) -> &[E] {
        match self.frames.last() {
            Some(&start) => &self.entries[start..],
            None => &[],
        }
    }

    /// Drops every pending candidate of the current level and returns how
    /// many were dropped. The frame itself stays open.
    #[inline]
    pub fn clear_current_level(&mut self) -> usize {
        let Some(&start) = self.frames.last() else {
            return 0;
        };
        let dropped = self.entries.len() - start;
        self.entries.truncate(start);
        dropped
    }

    /// Clears all entries and frames, keeping the allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<E>()
            + self.frames.capacity() * std::mem::size_of::<usize>()
    }
}

impl<E> std::fmt::Display for SearchStack<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchStack(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}
