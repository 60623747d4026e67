//! Box, Boxa - Rectangle regions
//!
//! These structures represent rectangular regions in an image.

mod draw;

/// A rectangle region
///
/// A simple Copy type since it's small and frequently copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &Box) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the intersection of two boxes
    pub fn intersect(&self, other: &Box) -> Option<Box> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Box {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }

    /// Clip the box to fit within `[0, width) x [0, height)`
    pub fn clip(&self, width: i32, height: i32) -> Option<Box> {
        self.intersect(&Box::new_unchecked(0, 0, width, height))
    }
}

/// Array of boxes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boxa {
    boxes: Vec<Box>,
}

impl Boxa {
    /// Get the number of boxes
    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Sum of the areas of all boxes
    pub fn total_area(&self) -> i64 {
        self.boxes.iter().map(Box::area).sum()
    }

    /// Check whether any two boxes overlap
    pub fn has_overlap(&self) -> bool {
        self.boxes
            .iter()
            .enumerate()
            .any(|(i, a)| self.boxes[i + 1..].iter().any(|b| a.overlaps(b)))
    }

    /// Iterate over boxes
    pub fn iter(&self) -> impl Iterator<Item = &Box> {
        self.boxes.iter()
    }
}

impl FromIterator<Box> for Boxa {
    fn from_iter<I: IntoIterator<Item = Box>>(iter: I) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Boxa {
    type Item = &'a Box;
    type IntoIter = std::slice::Iter<'a, Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_extent() {
        let b = Box::new_unchecked(10, 20, 30, 40);
        assert_eq!(b.right(), 40);
        assert_eq!(b.bottom(), 60);
        assert_eq!(b.area(), 1200);
        assert!(!b.is_empty());
        assert!(Box::new_unchecked(3, 3, 0, 5).is_empty());
    }

    #[test]
    fn test_box_intersect_and_clip() {
        let a = Box::new_unchecked(0, 0, 4, 4);
        let b = Box::new_unchecked(2, 2, 4, 4);
        assert_eq!(a.intersect(&b), Some(Box::new_unchecked(2, 2, 2, 2)));
        // Touching edges do not overlap
        let c = Box::new_unchecked(4, 0, 2, 2);
        assert!(!a.overlaps(&c));
        assert_eq!(a.intersect(&c), None);
        assert_eq!(b.clip(5, 5), Some(Box::new_unchecked(2, 2, 3, 3)));
        assert_eq!(Box::new_unchecked(9, 9, 1, 1).clip(5, 5), None);
    }

    #[test]
    fn test_boxa_tiling_helpers() {
        let halves = [Box::new_unchecked(0, 0, 2, 4), Box::new_unchecked(2, 0, 2, 4)];
        let boxa: Boxa = halves.into_iter().collect();
        assert_eq!(boxa.len(), 2);
        assert_eq!(boxa.total_area(), 16);
        assert!(!boxa.has_overlap());
        assert_eq!((&boxa).into_iter().count(), 2);

        let overlapping: Boxa = boxa
            .iter()
            .copied()
            .chain([Box::new_unchecked(1, 1, 1, 1)])
            .collect();
        assert!(overlapping.has_overlap());
    }
}
