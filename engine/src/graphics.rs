use crate::{surface::SurfaceSize, ui::Rect};

pub type Color = [u8; 4];

// 3x5 block font, one `u8` per row with the 3 low bits used.
pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

pub fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

pub fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel width of the widest line of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.lines()
        .map(|line| {
            let n = line.chars().count() as u32;
            // Drop the trailing spacing column after the last glyph.
            (n * glyph_advance_x(scale)).saturating_sub(scale.max(1))
        })
        .max()
        .unwrap_or(0)
}

/// 2D drawing interface used by all game screens.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Blends `color` over existing content with the given alpha.
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn rect_outline(&mut self, rect: Rect, thickness: u32, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        let t = thickness.max(1).min(rect.w).min(rect.h);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - t, rect.y, t, rect.h), color);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// Software renderer writing straight into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Visible part of `rect` as `(x0, y0, x1, y1)`, or `None` if nothing is on screen
    /// or the buffer is too small for the declared size.
    fn clip(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        if self.frame.len() < self.size.rgba_len() {
            return None;
        }
        let x1 = rect.right().min(self.size.width);
        let y1 = rect.bottom().min(self.size.height);
        if rect.x >= x1 || rect.y >= y1 {
            return None;
        }
        Some((rect.x as usize, rect.y as usize, x1 as usize, y1 as usize))
    }

    fn for_each_px(&mut self, rect: Rect, mut f: impl FnMut(&mut [u8])) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let stride = self.size.width as usize * 4;
        for y in y0..y1 {
            let row = &mut self.frame[y * stride + x0 * 4..y * stride + x1 * 4];
            for px in row.chunks_exact_mut(4) {
                f(px);
            }
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.for_each_px(rect, |px| px.copy_from_slice(&color));
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        match alpha {
            0 => {}
            255 => self.fill_rect(rect, color),
            _ => {
                let a = alpha as u32;
                let inv = 255 - a;
                self.for_each_px(rect, |px| {
                    for c in 0..3 {
                        px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                    }
                    px[3] = 255;
                });
            }
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            if cursor_y >= self.size.height {
                break;
            }
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(line_advance_y(scale));
                }
                ' ' => cursor_x = cursor_x.saturating_add(glyph_advance_x(scale)),
                _ => {
                    for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
                        for col in 0..GLYPH_W {
                            if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                                continue;
                            }
                            let px = Rect::new(
                                cursor_x.saturating_add(col * scale),
                                cursor_y.saturating_add(row as u32 * scale),
                                scale,
                                scale,
                            );
                            self.fill_rect(px, color);
                        }
                    }
                    cursor_x = cursor_x.saturating_add(glyph_advance_x(scale));
                }
            }
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
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010],
    }
}
