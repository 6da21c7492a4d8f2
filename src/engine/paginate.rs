// src/engine/paginate.rs

use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 5;

/// 1-based page cursor over an ordered sequence.
///
/// The cursor is not tied to a particular sequence: after a reload or a sort
/// it keeps its page, and a page past the end yields an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginator {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl Paginator {
    /// Advances only while at least one item lies beyond the current window.
    /// Returns whether the page changed.
    pub fn next(&mut self, total_items: usize) -> bool {
        if self.page * self.page_size < total_items {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Steps back, never below page 1.
    pub fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Items at `[(page-1)*size, page*size)`, clipped to the sequence.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.page.saturating_sub(1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn page_count(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }
}
