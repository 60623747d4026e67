//! Box painting and outline drawing
//!
//! Functions for filling boxes with a constant gray value and for
//! drawing one-pixel box outlines. Boxes are clipped to the image.

use crate::box_::Box;
use crate::pix::PixMut;

/// Clip a box to image bounds in signed coordinates, returning
/// `(x, y, x_end, y_end)` as `u32` or `None` if no intersection.
fn clip_box_to_image(b: &Box, img_w: u32, img_h: u32) -> Option<(u32, u32, u32, u32)> {
    let clipped = b.clip(img_w as i32, img_h as i32)?;
    Some((
        clipped.x as u32,
        clipped.y as u32,
        clipped.right() as u32,
        clipped.bottom() as u32,
    ))
}

impl PixMut {
    /// Fill a box with a constant gray value.
    ///
    /// Returns the number of pixels written.
    pub fn paint_box(&mut self, b: &Box, val: u8) -> usize {
        let Some((x, y, x_end, y_end)) = clip_box_to_image(b, self.width(), self.height()) else {
            return 0;
        };
        for py in y..y_end {
            self.row_data_mut(py)[x as usize..x_end as usize].fill(val);
        }
        (x_end - x) as usize * (y_end - y) as usize
    }

    /// Draw the one-pixel outline of a box: its top and bottom rows and
    /// its leftmost and rightmost columns. Interior pixels are untouched.
    ///
    /// Outline pixels that fall outside the image are skipped.
    pub fn draw_box_outline(&mut self, b: &Box, val: u8) {
        if b.is_empty() {
            return;
        }
        let (w, h) = (self.width() as i32, self.height() as i32);
        let mut plot = |px: i32, py: i32| {
            if px >= 0 && py >= 0 && px < w && py < h {
                self.set_pixel_unchecked(px as u32, py as u32, val as u32);
            }
        };
        for px in b.x..b.right() {
            plot(px, b.y);
            plot(px, b.bottom() - 1);
        }
        for py in b.y..b.bottom() {
            plot(b.x, py);
            plot(b.right() - 1, py);
        }
    }
}
