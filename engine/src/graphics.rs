use crate::ui::{Rect, Size};

pub type Color = [u8; 4];

// Tiny 3x5 block font, no font assets.
pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    pub fn rect(self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// Pixel size of `text` rendered at `scale` (multi-line aware).
pub fn text_size(text: &str, scale: u32) -> Size {
    let scale = scale.max(1);
    let lines: Vec<&str> = text.split('\n').collect();
    let widest = lines.iter().map(|l| l.chars().count() as u32).max().unwrap_or(0);
    let w = if widest == 0 {
        0
    } else {
        widest * (GLYPH_W + 1) * scale - scale
    };
    let h = lines.len() as u32 * (GLYPH_H + 1) * scale - scale;
    Size::new(w, h)
}

/// 2D drawing interface used by every screen.
pub trait Renderer2d {
    fn size(&self) -> SurfaceSize;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Filled triangle; vertices in pixel coordinates, may lie off-surface.
    fn fill_triangle(&mut self, a: (i32, i32), b: (i32, i32), c: (i32, i32), color: Color);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn rect_outline(&mut self, rect: Rect, color: Color, thickness: u32) {
        let t = thickness.max(1).min(rect.w / 2 + 1).min(rect.h / 2 + 1);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom().saturating_sub(t), rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.right().saturating_sub(t), rect.y, t, rect.h), color);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(s.rect(), color);
    }
}

/// CPU renderer drawing into a borrowed RGBA frame.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    /// Returns `None` if `frame` is too small for `size`.
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Option<Self> {
        (frame.len() >= size.rgba_len()).then_some(Self { frame, size })
    }

    fn put(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let idx = (y as usize * self.size.width as usize + x as usize) * 4;
        self.frame[idx..idx + 4].copy_from_slice(&color);
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let max_x = rect.right().min(self.size.width);
        let max_y = rect.bottom().min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y {
            return;
        }

        let stride = self.size.width as usize * 4;
        for y in rect.y..max_y {
            let start = y as usize * stride + rect.x as usize * 4;
            let end = y as usize * stride + max_x as usize * 4;
            for px in self.frame[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }

    fn fill_triangle(&mut self, a: (i32, i32), b: (i32, i32), c: (i32, i32), color: Color) {
        let w = self.size.width as i32;
        let h = self.size.height as i32;
        let min_x = a.0.min(b.0).min(c.0).max(0);
        let max_x = a.0.max(b.0).max(c.0).min(w - 1);
        let min_y = a.1.min(b.1).min(c.1).max(0);
        let max_y = a.1.max(b.1).max(c.1).min(h - 1);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let area = edge(a, b, c);
        if area == 0 {
            return;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x, y);
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = if area > 0 {
                    w0 >= 0 && w1 >= 0 && w2 >= 0
                } else {
                    w0 <= 0 && w1 <= 0 && w2 <= 0
                };
                if inside {
                    self.put(x as u32, y as u32, color);
                }
            }
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let adv_x = (GLYPH_W + 1) * scale;
        let adv_y = (GLYPH_H + 1) * scale;

        let mut cursor_x = x;
        let mut cursor_y = y;
        for ch in text.chars() {
            if ch == '\n' {
                cursor_x = x;
                cursor_y = cursor_y.saturating_add(adv_y);
                continue;
            }
            if ch != ' ' {
                for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
                    for col in 0..GLYPH_W {
                        if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                            continue;
                        }
                        self.fill_rect(
                            Rect::new(
                                cursor_x + col * scale,
                                cursor_y + row as u32 * scale,
                                scale,
                                scale,
                            ),
                            color,
                        );
                    }
                }
            }
            cursor_x = cursor_x.saturating_add(adv_x);
        }
    }
}

fn edge(a: (i32, i32), b: (i32, i32), p: (i32, i32)) -> i64 {
    (b.0 - a.0) as i64 * (p.1 - a.1) as i64 - (b.1 - a.1) as i64 * (p.0 - a.0) as i64
}

/// Owned RGBA frame, mostly for headless rendering and tests.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = (y as usize * self.size.width as usize + x as usize) * 4;
        Some([
            self.buf[idx],
            self.buf[idx + 1],
            self.buf[idx + 2],
            self.buf[idx + 3],
        ])
    }

    pub fn count_color(&self, color: Color) -> usize {
        self.buf.chunks_exact(4).filter(|px| *px == color).count()
    }

    pub fn renderer(&mut self) -> CpuRenderer<'_> {
        CpuRenderer {
            frame: &mut self.buf,
            size: self.size,
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        // Direction glyphs for the input echo.
        '^' => [0b010, 0b111, 0b010, 0b010, 0b010],
        '<' => [0b001, 0b010, 0b100, 0b010, 0b001],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [255, 0, 0, 255];
    const WHITE: Color = [255, 255, 255, 255];

    #[test]
    fn fill_rect_clips_to_surface() {
        let mut fb = FrameBuffer::new(SurfaceSize::new(10, 10));
        fb.renderer().fill_rect(Rect::new(8, 8, 5, 5), RED);
        assert_eq!(fb.count_color(RED), 4);
        assert_eq!(fb.pixel(9, 9), Some(RED));
        assert_eq!(fb.pixel(7, 7), Some([0, 0, 0, 0]));
    }

    #[test]
    fn cpu_renderer_rejects_short_frames() {
        let mut short = vec![0u8; 10];
        assert!(CpuRenderer::new(&mut short, SurfaceSize::new(4, 4)).is_none());
    }

    #[test]
    fn triangle_fill_is_winding_independent() {
        let mut cw = FrameBuffer::new(SurfaceSize::new(20, 20));
        cw.renderer().fill_triangle((2, 2), (17, 2), (2, 17), RED);
        let mut ccw = FrameBuffer::new(SurfaceSize::new(20, 20));
        ccw.renderer().fill_triangle((2, 2), (2, 17), (17, 2), RED);

        let filled = cw.count_color(RED);
        assert!(filled > 100);
        assert_eq!(filled, ccw.count_color(RED));
        assert_eq!(cw.pixel(3, 3), Some(RED));
        assert_eq!(cw.pixel(16, 16), Some([0, 0, 0, 0]));
    }

    #[test]
    fn triangle_partially_off_surface_is_clipped() {
        let mut fb = FrameBuffer::new(SurfaceSize::new(8, 8));
        fb.renderer().fill_triangle((-20, -20), (30, -20), (4, 30), RED);
        assert!(fb.count_color(RED) > 0);
    }

    #[test]
    fn text_size_matches_rendered_extent() {
        assert_eq!(text_size("AB", 1), Size::new(7, 5));
        assert_eq!(text_size("A\nBCD", 2), Size::new(22, 22));
        assert_eq!(text_size("", 2).w, 0);
    }

    #[test]
    fn text_draws_inside_its_measured_box() {
        let mut fb = FrameBuffer::new(SurfaceSize::new(40, 20));
        fb.renderer().draw_text_scaled(1, 1, "HI", WHITE, 2);
        let size = text_size("HI", 2);
        assert!(fb.count_color(WHITE) > 0);
        for y in 0..20 {
            for x in 0..40 {
                if fb.pixel(x, y) == Some(WHITE) {
                    assert!(x >= 1 && x < 1 + size.w && y >= 1 && y < 1 + size.h);
                }
            }
        }
    }

    #[test]
    fn outline_leaves_interior_untouched() {
        let mut fb = FrameBuffer::new(SurfaceSize::new(10, 10));
        fb.renderer().rect_outline(Rect::new(0, 0, 10, 10), RED, 1);
        assert_eq!(fb.count_color(RED), 36);
        assert_eq!(fb.pixel(5, 5), Some([0, 0, 0, 0]));
    }
}
