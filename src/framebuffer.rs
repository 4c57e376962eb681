/// screen width in pixels
pub const DISPLAY_WIDTH: usize = 64;
/// screen height in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// The 64x32 monochrome frame buffer, one cell per pixel (0 or 1).
///
/// Only the clear and draw instructions mutate it. The dirty flag records
/// that the buffer changed since the display last read it, so the renderer
/// only redraws on change.
pub struct FrameBuffer {
    pixels: [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT],
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    /// switch every pixel off (00E0)
    pub fn clear(&mut self) {
        self.pixels = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// Xor-blit a sprite, one byte per row, at (x, y).
    ///
    /// The start coordinates and every addressed pixel wrap around the screen
    /// edges; a sprite drawn at x=60 continues at column 0 of the same row.
    /// Returns 1 if any pixel was switched off by the blit (collision).
    pub fn blit(&mut self, x: u8, y: u8, sprite: &[u8]) -> u8 {
        let x = x as usize % DISPLAY_WIDTH;
        let y = y as usize % DISPLAY_HEIGHT;
        let mut collision = 0;
        for (row, byte) in sprite.iter().enumerate() {
            for col in 0..8 {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                let px = (x + col) % DISPLAY_WIDTH;
                let py = (y + row) % DISPLAY_HEIGHT;
                let cell = &mut self.pixels[py * DISPLAY_WIDTH + px];
                if *cell == 1 {
                    collision = 1;
                }
                *cell ^= 1;
            }
        }
        self.dirty = true;
        collision
    }

    /// the buffer if it changed since last taken; clears the dirty flag
    pub fn take_frame(&mut self) -> Option<&[u8; DISPLAY_WIDTH * DISPLAY_HEIGHT]> {
        if self.dirty {
            self.dirty = false;
            Some(&self.pixels)
        } else {
            None
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * DISPLAY_WIDTH + x]
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_clean() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.is_dirty());
        assert!(fb.take_frame().is_none());
    }

    #[test]
    fn test_clear_marks_dirty() {
        let mut fb = FrameBuffer::new();
        fb.clear();
        assert!(fb.is_dirty());
    }

    #[test]
    fn test_take_frame_clears_dirty() {
        let mut fb = FrameBuffer::new();
        fb.blit(0, 0, &[0xff]);
        assert!(fb.take_frame().is_some());
        assert!(fb.take_frame().is_none());
    }

    #[test]
    fn test_blit_sets_pixels() {
        let mut fb = FrameBuffer::new();
        let collision = fb.blit(8, 4, &[0b1010_0001]);
        assert_eq!(collision, 0);
        assert_eq!(fb.pixel(8, 4), 1);
        assert_eq!(fb.pixel(9, 4), 0);
        assert_eq!(fb.pixel(10, 4), 1);
        assert_eq!(fb.pixel(15, 4), 1);
    }

    #[test]
    fn test_blit_twice_erases_and_collides() {
        let mut fb = FrameBuffer::new();
        assert_eq!(fb.blit(3, 3, &[0xf0, 0x90]), 0);
        assert_eq!(fb.blit(3, 3, &[0xf0, 0x90]), 1);
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                assert_eq!(fb.pixel(x, y), 0);
            }
        }
    }

    #[test]
    fn test_blit_wraps_horizontally() {
        let mut fb = FrameBuffer::new();
        fb.blit(60, 0, &[0xff]);
        for x in [60, 61, 62, 63, 0, 1, 2, 3] {
            assert_eq!(fb.pixel(x, 0), 1, "column {} should be lit", x);
        }
        assert_eq!(fb.pixel(4, 0), 0);
        assert_eq!(fb.pixel(59, 0), 0);
    }

    #[test]
    fn test_blit_wraps_vertically() {
        let mut fb = FrameBuffer::new();
        fb.blit(0, 30, &[0x80, 0x80, 0x80]);
        assert_eq!(fb.pixel(0, 30), 1);
        assert_eq!(fb.pixel(0, 31), 1);
        assert_eq!(fb.pixel(0, 0), 1);
    }

    #[test]
    fn test_blit_wraps_start_coordinates() {
        let mut fb = FrameBuffer::new();
        fb.blit(64, 32, &[0x80]);
        assert_eq!(fb.pixel(0, 0), 1);
    }
}
