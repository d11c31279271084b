//! Per-sheet style pool
//!
//! Cells and columns reference styles by index. Styles are built up by
//! merging fragments on top of what a cell already has, so the pool works in
//! terms of "base index + fragment -> index" and remembers the results: a
//! hundred cells styled from the same row style and directive resolve once.

use super::StyleDescriptor;
use ahash::AHashMap;
use std::hash::{Hash, Hasher};

fn style_hash(style: &StyleDescriptor) -> u64 {
    let mut hasher = ahash::AHasher::default();
    style.hash(&mut hasher);
    hasher.finish()
}

/// Deduplicated styles of one worksheet
///
/// Index 0 is always the empty style.
#[derive(Debug, Clone)]
pub struct StylePool {
    styles: Vec<StyleDescriptor>,
    /// Style hash -> indices with that hash
    by_hash: AHashMap<u64, Vec<u32>>,
    /// (base index, fragment hash) -> fragment and the index of the merge
    merges: AHashMap<(u32, u64), Vec<(StyleDescriptor, u32)>>,
}

impl StylePool {
    /// Create a pool holding only the empty style
    pub fn new() -> Self {
        let mut pool = Self {
            styles: Vec::with_capacity(16),
            by_hash: AHashMap::with_capacity(16),
            merges: AHashMap::new(),
        };
        pool.intern(StyleDescriptor::default());
        pool
    }

    /// Index of `style`, adding it if no equal style is pooled
    pub fn intern(&mut self, style: StyleDescriptor) -> u32 {
        let bucket = self.by_hash.entry(style_hash(&style)).or_default();
        if let Some(&idx) = bucket.iter().find(|&&i| self.styles[i as usize] == style) {
            return idx;
        }

        let idx = self.styles.len() as u32;
        bucket.push(idx);
        self.styles.push(style);
        idx
    }

    /// Index of the style at `base` with `fragment` merged on top
    ///
    /// Unknown base indices start from the empty style.
    pub fn merge_into(&mut self, base: u32, fragment: &StyleDescriptor) -> u32 {
        if fragment.is_empty() && self.get(base).is_some() {
            return base;
        }

        let key = (base, style_hash(fragment));
        if let Some(hits) = self.merges.get(&key) {
            if let Some(&(_, idx)) = hits.iter().find(|(f, _)| f == fragment) {
                return idx;
            }
        }

        let merged = self.get(base).cloned().unwrap_or_default().merged(fragment);
        let idx = self.intern(merged);
        self.merges
            .entry(key)
            .or_default()
            .push((fragment.clone(), idx));
        idx
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&StyleDescriptor> {
        self.styles.get(index as usize)
    }

    /// The empty style at index 0
    pub fn default_style(&self) -> &StyleDescriptor {
        &self.styles[0]
    }

    /// Number of styles, including the empty one
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the pool only holds the empty style
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_empty_pool() {
        let pool = StylePool::new();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(0), Some(&StyleDescriptor::default()));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_intern_dedupes() {
        let mut pool = StylePool::new();

        let bold = pool.intern(StyleDescriptor::new().bold(true));
        assert_eq!(pool.intern(StyleDescriptor::new().bold(true)), bold);
        assert_ne!(pool.intern(StyleDescriptor::new().italic(true)), bold);
        assert_eq!(pool.intern(StyleDescriptor::new()), 0);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_merge_into_layers_fragments() {
        let mut pool = StylePool::new();
        let header = pool.merge_into(0, &StyleDescriptor::new().bold(true));
        let red_header = pool.merge_into(header, &StyleDescriptor::new().fill_color(Color::RED));

        assert_eq!(
            pool.get(red_header),
            Some(&StyleDescriptor::new().bold(true).fill_color(Color::RED))
        );
        // same layering in another order lands on the same entry
        let red = pool.merge_into(0, &StyleDescriptor::new().fill_color(Color::RED));
        assert_eq!(pool.merge_into(red, &StyleDescriptor::new().bold(true)), red_header);
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_merge_into_repeats_are_cached() {
        let mut pool = StylePool::new();
        let fragment = StyleDescriptor::new().number_format("0.00");

        let first = pool.merge_into(0, &fragment);
        let len = pool.len();
        for _ in 0..10 {
            assert_eq!(pool.merge_into(0, &fragment), first);
        }
        assert_eq!(pool.len(), len);
        assert_eq!(pool.merge_into(first, &StyleDescriptor::new()), first);
    }

    #[test]
    fn test_float_fields_hash_by_bits() {
        let mut pool = StylePool::new();
        let style = StyleDescriptor::new().font_size(14.0).fill_color(Color::RED);

        let idx = pool.intern(style.clone());
        assert_eq!(pool.intern(style.clone()), idx);
        assert_ne!(pool.intern(style.font_size(14.5)), idx);
    }
}
