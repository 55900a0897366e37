//! Off-screen pixel buffer
//!
//! 84x48 pixels, one bit each, in the controller's native page layout:
//! byte `page * WIDTH + x` holds column `x` of rows `page * 8 ..= page * 8 + 7`,
//! least significant bit on top. A page is therefore exactly one data burst.

use crate::font::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Width in pixels
pub const WIDTH: usize = 84;

/// Height in pixels
pub const HEIGHT: usize = 48;

/// Rows of 8 pixels
pub const PAGES: usize = HEIGHT / 8;

/// Backing store length in bytes
pub const BUFFER_LEN: usize = WIDTH * HEIGHT / 8;

/// 1 bpp frame buffer
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bytes: [u8; BUFFER_LEN],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self.bytes.iter().map(|b| b.count_ones()).sum::<u32>();
        f.debug_struct("PixelBuffer").field("lit", &lit).finish()
    }
}

impl PixelBuffer {
    /// Create a blank buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_LEN],
        }
    }

    /// Set every pixel on or off
    pub fn fill(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Set one pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((idx, mask)) = Self::locate(x, y) {
            if on {
                self.bytes[idx] |= mask;
            } else {
                self.bytes[idx] &= !mask;
            }
        }
    }

    /// Read one pixel; out-of-range coordinates read as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::locate(x, y).is_some_and(|(idx, mask)| self.bytes[idx] & mask != 0)
    }

    /// Render `text` with its top-left corner at (`x`, `y`)
    ///
    /// Only lit glyph pixels are written, so text draws over whatever is
    /// already there. Glyphs entirely off the buffer are skipped; partially
    /// visible ones are clipped per pixel. No wrapping.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.draw_chars(text.chars(), x, y);
    }

    /// [`draw_text`](Self::draw_text) for any character sequence
    pub fn draw_chars<I: IntoIterator<Item = char>>(&mut self, chars: I, x: i32, y: i32) {
        let top = y;
        let bottom = y.saturating_add(GLYPH_HEIGHT as i32);
        if bottom <= 0 || top >= HEIGHT as i32 {
            return;
        }

        let mut left = x;
        for ch in chars {
            if left >= WIDTH as i32 {
                break;
            }
            let right = left.saturating_add(GLYPH_WIDTH as i32);
            if right > 0 {
                self.blit(glyph(ch), left, top);
            }
            left = right;
        }
    }

    /// One page-row of bytes, as sent in a single data burst
    ///
    /// # Panics
    ///
    /// Panics if `index >= PAGES`.
    pub fn page(&self, index: usize) -> &[u8] {
        &self.bytes[index * WIDTH..(index + 1) * WIDTH]
    }

    /// Whole backing store
    pub fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.bytes
    }

    fn blit(&mut self, columns: &[u8; GLYPH_WIDTH], left: i32, top: i32) {
        for (dx, column) in columns.iter().enumerate() {
            for dy in 0..GLYPH_HEIGHT {
                if column & (1 << dy) != 0 {
                    self.set_pixel(left + dx as i32, top + dy as i32, true);
                }
            }
        }
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if !(0..WIDTH as i32).contains(&x) || !(0..HEIGHT as i32).contains(&y) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * WIDTH + x, 1 << (y % 8)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(buffer: &PixelBuffer) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..HEIGHT as i32)
            .flat_map(|y| (0..WIDTH as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer.pixel(x, y))
    }

    #[test]
    fn test_page_layout() {
        let mut buffer = PixelBuffer::new();
        buffer.set_pixel(5, 0, true);
        buffer.set_pixel(5, 7, true);
        buffer.set_pixel(83, 47, true);

        assert_eq!(buffer.as_bytes()[5], 0b1000_0001);
        assert_eq!(buffer.page(5)[83], 0b1000_0000);
        assert_eq!(buffer.as_bytes().len(), BUFFER_LEN);
    }

    #[test]
    fn test_fill() {
        let mut buffer = PixelBuffer::new();
        buffer.fill(true);
        assert!(buffer.as_bytes().iter().all(|&b| b == 0xFF));
        buffer.fill(false);
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut buffer = PixelBuffer::new();
        buffer.set_pixel(-1, 0, true);
        buffer.set_pixel(WIDTH as i32, 0, true);
        buffer.set_pixel(0, HEIGHT as i32, true);

        assert_eq!(lit_pixels(&buffer).count(), 0);
        assert!(!buffer.pixel(-3, -3));
    }

    #[test]
    fn test_clear_pixel() {
        let mut buffer = PixelBuffer::new();
        buffer.fill(true);
        buffer.set_pixel(10, 10, false);
        assert!(!buffer.pixel(10, 10));
        assert!(buffer.pixel(10, 11));
    }

    #[test]
    fn test_draw_text_stays_in_cells() {
        let mut buffer = PixelBuffer::new();
        buffer.draw_text("AB", 0, 0);

        let lit: Vec<_> = lit_pixels(&buffer).collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(x, y)| x < 12 && y < 8));
        // Both cells have ink
        assert!(lit.iter().any(|&(x, _)| x < 6));
        assert!(lit.iter().any(|&(x, _)| x >= 6));
    }

    #[test]
    fn test_draw_text_clips_partial_glyphs() {
        let mut buffer = PixelBuffer::new();
        // 'A' column 0 is 0x7E; starting at x = -1 drops it
        buffer.draw_text("A", -1, 0);
        assert_eq!(buffer.as_bytes()[0], 0x11);
        assert_eq!(buffer.as_bytes()[4], 0x00);

        // Half the glyph below the bottom edge
        let mut buffer = PixelBuffer::new();
        buffer.draw_text("A", 0, HEIGHT as i32 - 4);
        assert!(lit_pixels(&buffer).all(|(_, y)| y >= HEIGHT as i32 - 4));
        assert!(lit_pixels(&buffer).count() > 0);
    }

    #[test]
    fn test_draw_text_off_buffer_is_noop() {
        let mut buffer = PixelBuffer::new();
        buffer.draw_text("Hello", 0, -8);
        buffer.draw_text("Hello", 0, HEIGHT as i32);
        buffer.draw_text("Hello", WIDTH as i32, 0);
        buffer.draw_text("Hello", -30, 0);
        buffer.draw_text("A", 0, i32::MAX);
        buffer.draw_text("A", 0, i32::MIN);
        buffer.draw_text("A", i32::MAX, 0);
        buffer.draw_text("AAAA", i32::MIN, 0);
        assert_eq!(lit_pixels(&buffer).count(), 0);
    }

    #[test]
    fn test_draw_chars_matches_draw_text() {
        let mut from_str = PixelBuffer::new();
        from_str.draw_text("Up:1s", 3, 10);
        let mut from_chars = PixelBuffer::new();
        from_chars.draw_chars("Up:1s".chars(), 3, 10);
        assert_eq!(from_str, from_chars);
    }

    #[test]
    fn test_draw_text_does_not_wrap() {
        let mut buffer = PixelBuffer::new();
        buffer.draw_text("WWWWWWWWWWWWWWWWWWWW", 0, 0);
        assert!(lit_pixels(&buffer).all(|(_, y)| y < 8));
    }
}
