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

/// A linear undo log with frame markers for backtracking.
///
/// Every decision applied to the search state leaves an undo token here.
/// Typical usage:
/// 1. Call `push_frame()` before applying a decision,
/// 2. `record` the undo token returned by the problem,
/// 3. On prune or completion, call `backtrack(..)` to revert everything the
///    frame recorded, newest first.
///
/// Prefer `preallocated` to reduce reallocations in deep searches.
#[derive(Debug, Clone)]
pub struct SearchTrail<U> {
    /// The linear history of all changes made to the state.
    entries: Vec<U>,
    /// `frames[i]` stores the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl<U> Default for SearchTrail<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> SearchTrail<U> {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a trail with room for a path of `max_depth` decisions.
    #[inline]
    pub fn preallocated(max_depth: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_depth),
            frames: Vec::with_capacity(max_depth.saturating_add(1)),
        }
    }

    /// Ensures the trail can hold a path of `max_depth` decisions.
    #[inline]
    pub fn ensure_capacity(&mut self, max_depth: usize) {
        if self.entries.capacity() < max_depth {
            self.entries.reserve(max_depth - self.entries.len());
        }
        let frames = max_depth.saturating_add(1);
        if self.frames.capacity() < frames {
            self.frames.reserve(frames - self.frames.len());
        }
    }

    /// The number of open frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.entries.is_empty()
    }

    /// Opens a new frame at the current end of the log.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Records an undo token in the current frame.
    #[inline]
    pub fn record(&mut self, entry: U) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::record` without an open frame"
        );
        self.entries.push(entry);
    }

    /// Closes the current frame, handing its tokens to `revert` newest first.
    /// Returns `false` if there was no frame to close.
    #[inline]
    pub fn backtrack<F>(&mut self, mut revert: F) -> bool
    where
        F: FnMut(U),
    {
        let Some(start) = self.frames.pop() else {
            return false;
        };
        while self.entries.len() > start {
            if let Some(entry) = self.entries.pop() {
                revert(entry);
            }
        }
        true
    }

    /// Clears all entries and frames, keeping the allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    /// The allocated memory of the trail in bytes.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<U>()
            + self.frames.capacity() * std::mem::size_of::<usize>()
    }
}

impl<U> std::fmt::Display for SearchTrail<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}
