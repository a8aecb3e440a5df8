/// Desktop stand-in for the 128x256 e-paper module. The real panel can only
/// show black, white and red, and only text, lines and rectangles; the
/// simulated canvas enforces the same vocabulary so UI work translates
/// straight to the hardware build.
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Black,
    White,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Rect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        ink: Ink,
        filled: bool,
    },
    Line {
        x0: u32,
        y0: u32,
        x1: u32,
        y1: u32,
        ink: Ink,
    },
    Text {
        x: u32,
        y: u32,
        text: String,
        ink: Ink,
    },
}

/// One frame under construction. Ops are recorded in draw order; a refresh
/// on the hardware build replays them against the panel driver, and tests
/// inspect them directly.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    ops: Vec<DrawOp>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn rect(&mut self, x: u32, y: u32, width: u32, height: u32, ink: Ink, filled: bool) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            ink,
            filled,
        });
    }

    pub fn line(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, ink: Ink) {
        self.ops.push(DrawOp::Line { x0, y0, x1, y1, ink });
    }

    pub fn text(&mut self, x: u32, y: u32, text: impl Into<String>, ink: Ink) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            ink,
        });
    }

    pub fn border(&mut self) {
        self.rect(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT, Ink::Black, false);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Every text op in draw order, top to bottom as it appears on screen.
    pub fn text_lines(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
