//! Destination carousel position.

/// Scroll position over a fixed strip of cards, `visible` of which fit on
/// screen at once. `index` never leaves `0..=items - visible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    items: usize,
    visible: usize,
}

impl Carousel {
    pub fn new(items: usize, visible: usize) -> Self {
        Self {
            index: 0,
            items,
            visible: visible.clamp(1, items.max(1)),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn last_index(&self) -> usize {
        self.items.saturating_sub(self.visible)
    }

    pub fn can_go_prev(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index < self.last_index()
    }

    /// Moves one card right. Returns false at the end.
    pub fn next(&mut self) -> bool {
        if self.can_go_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Moves one card left. Returns false at the start.
    pub fn prev(&mut self) -> bool {
        if self.can_go_prev() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Auto-scroll tick: advance, wrapping to the start after the last position.
    pub fn advance(&mut self) {
        if !self.next() {
            self.index = 0;
        }
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(6, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let mut carousel = Carousel::default();
        assert!(!carousel.can_go_prev());
        assert!(!carousel.prev());

        for _ in 0..10 {
            carousel.next();
        }
        assert_eq!(carousel.index(), 3);
        assert!(!carousel.can_go_next());
        assert!(carousel.prev());
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn test_advance_wraps() {
        let mut carousel = Carousel::default();
        let seen: Vec<usize> = (0..5)
            .map(|_| {
                carousel.advance();
                carousel.index()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_fewer_items_than_visible() {
        let mut carousel = Carousel::new(2, 3);
        assert!(!carousel.can_go_next());
        carousel.advance();
        assert_eq!(carousel.index(), 0);
    }
}
