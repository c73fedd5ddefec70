//! Layout primitives: a pixel `Rect`, anchored placement and clickable buttons.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Inner area after removing `insets`; saturates to an empty rect.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w: self
                .w
                .saturating_sub(insets.left.saturating_add(insets.right)),
            h: self
                .h
                .saturating_sub(insets.top.saturating_add(insets.bottom)),
        }
    }

    /// Places a child of `size` inside this rect; oversized children are clamped to fit.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        let free_w = self.w - w;
        let free_h = self.h - h;

        let (fx, fy) = match anchor {
            Anchor::TopRight => (free_w, 0),
            Anchor::Center => (free_w / 2, free_h / 2),
            Anchor::BottomCenter => (free_w / 2, free_h),
        };

        Self {
            x: self.x + fx,
            y: self.y + fy,
            w,
            h,
        }
    }

    /// Splits off a horizontal band of height `h` from the top; returns `(band, rest)`.
    pub fn take_top(&self, h: u32) -> (Self, Self) {
        let h = h.min(self.h);
        (
            Self::new(self.x, self.y, self.w, h),
            Self::new(self.x, self.y + h, self.w, self.h - h),
        )
    }

    /// Splits off a horizontal band of height `h` from the bottom; returns `(rest, band)`.
    pub fn take_bottom(&self, h: u32) -> (Self, Self) {
        let h = h.min(self.h);
        (
            Self::new(self.x, self.y, self.w, self.h - h),
            Self::new(self.x, self.y + self.h - h, self.w, h),
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn square(side: u32) -> Self {
        Self { w: side, h: side }
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
    pub const fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopRight,
    Center,
    BottomCenter,
}

/// A clickable area that reports `action` when hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button<A> {
    pub rect: Rect,
    pub action: A,
}

impl<A: Copy> Button<A> {
    pub fn new(rect: Rect, action: A) -> Self {
        Self { rect, action }
    }
}

/// Topmost (last drawn) button under the cursor.
pub fn hit_test<A: Copy>(buttons: &[Button<A>], x: u32, y: u32) -> Option<A> {
    buttons
        .iter()
        .rev()
        .find(|b| b.rect.contains(x, y))
        .map(|b| b.action)
}
