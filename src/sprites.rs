/// Shared sprite behaviour and the ordered container every entity type
/// lives in.

use std::collections::VecDeque;

/// Axis-aligned rectangle in play-field pixels (top-left origin).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Center with integer half-extents, matching how sprites are laid out
    /// on the sheet (all sizes are even).
    pub fn center(&self) -> (f32, f32) {
        (
            self.x + (self.w as i32 / 2) as f32,
            self.y + (self.h as i32 / 2) as f32,
        )
    }
}

/// A source region on a sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub bank: u8,
    pub u: u16,
    pub v: u16,
    pub w: u16,
    pub h: u16,
    /// Palette index treated as transparent.
    pub colkey: Option<u8>,
}

/// Behaviour common to every on-screen entity.
pub trait Sprite {
    const WIDTH: i32;
    const HEIGHT: i32;

    /// Top-left corner.
    fn position(&self) -> (f32, f32);

    /// Advance one frame: move, then recompute the animation frame.
    fn tick(&mut self);

    fn animation_frame(&self) -> u32;

    /// Sheet region for the current animation frame.
    fn region(&self) -> Region;

    fn bounding_box(&self) -> Rect {
        let (x, y) = self.position();
        Rect::new(x, y, Self::WIDTH as f32, Self::HEIGHT as f32)
    }

    /// True once the sprite has fully left the field on the left.
    fn is_off_left(&self) -> bool {
        self.position().0 < -(Self::WIDTH as f32)
    }
}

/// Ordered, owning collection of one sprite type.
///
/// Insertion order is spawn order. Removal never reorders survivors.
#[derive(Clone, Debug)]
pub struct SpriteQueue<T> {
    items: VecDeque<T>,
    capacity: Option<usize>,
}

impl<T> Default for SpriteQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpriteQueue<T> {
    /// Unbounded queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            capacity: None,
        }
    }

    /// Queue that drops pushes once `capacity` members are live.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Append at the end. Returns `false` (and drops `item`) when full.
    pub fn push(&mut self, item: T) -> bool {
        if let Some(cap) = self.capacity {
            if self.items.len() >= cap {
                return false;
            }
        }
        self.items.push_back(item);
        true
    }

    /// Remove members from the front for as long as `pred` holds.
    /// Returns how many were removed.
    pub fn pop_front_while(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        while self.items.front().is_some_and(&mut pred) {
            self.items.pop_front();
            removed += 1;
        }
        removed
    }

    /// Second phase of a scan-then-remove pass. Indices may be unsorted or
    /// repeated; out-of-range indices are ignored.
    pub fn remove_indices(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let mut i = 0;
        self.items.retain(|_| {
            let keep = !indices.contains(&i);
            i += 1;
            keep
        });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.items.len() >= cap)
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}

impl<'a, T> IntoIterator for &'a SpriteQueue<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
