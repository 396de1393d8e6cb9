//! Layout primitives: a `Rect` plus helpers for insets, anchored placement and
//! slicing a region into rows or evenly spaced cells.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Inner content area. Oversized insets saturate the size to 0.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w: self.w.saturating_sub(insets.left.saturating_add(insets.right)),
            h: self.h.saturating_sub(insets.top.saturating_add(insets.bottom)),
        }
    }

    /// Places a child of `size` inside this rect. `size` is clamped to fit.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        let free_w = self.w - w;
        let free_h = self.h - h;

        let x = match anchor {
            Anchor::TopLeft | Anchor::CenterLeft => self.x,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => self.x + free_w / 2,
            Anchor::CenterRight => self.x + free_w,
        };
        let y = match anchor {
            Anchor::TopLeft | Anchor::TopCenter => self.y,
            Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight => self.y + free_h / 2,
            Anchor::BottomCenter => self.y + free_h,
        };

        Self { x, y, w, h }
    }

    /// Splits off a strip of height `h` from the top; returns `(strip, rest)`.
    pub fn split_top(&self, h: u32) -> (Self, Self) {
        let h = h.min(self.h);
        (
            Self::new(self.x, self.y, self.w, h),
            Self::new(self.x, self.y + h, self.w, self.h - h),
        )
    }

    /// Lays out `count` square cells of side `cell` separated by `gap`, centred
    /// horizontally and vertically. Cells shrink when the row would not fit.
    pub fn centered_row(&self, count: usize, cell: u32, gap: u32) -> Vec<Self> {
        if count == 0 {
            return Vec::new();
        }
        let n = count as u32;
        let gaps = gap.saturating_mul(n - 1);
        let fit = self.w.saturating_sub(gaps) / n;
        let side = cell.min(fit).min(self.h);
        let total = side.saturating_mul(n).saturating_add(gaps);
        let row = self.place(Size::new(total, side), Anchor::Center);

        (0..n)
            .map(|i| Self::new(row.x + i * (side + gap), row.y, side, side))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    pub fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    CenterLeft,
    Center,
    CenterRight,
    BottomCenter,
}
