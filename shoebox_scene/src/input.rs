// Plain input state written by the host's event adapters and read by the
// animation driver.
//
// Adapters only store values: pointer moves become a normalised target in
// [-1, 1]² (Y up), scrolls store the raw offset, resizes store the new
// viewport and raise a flag the host consumes to resize its camera and
// output buffer. Nothing here triggers recomputation; the driver picks the
// values up on its next frame. Last write wins.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Zero dimensions are bumped to 1 so aspect ratios stay finite.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputState {
    /// Latest pointer position, normalised.
    pub pointer_target: Vec2,
    /// Low-pass filtered pointer used for parallax.
    pub pointer: Vec2,
    /// Vertical scroll offset in pixels.
    pub scroll_y: f32,
    pub viewport: Viewport,
    resized: bool,
}

impl InputState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pointer_target: Vec2::ZERO,
            pointer: Vec2::ZERO,
            scroll_y: 0.0,
            viewport,
            resized: false,
        }
    }

    /// Pointer moved to pixel `(x, y)` within the viewport.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let nx = x / self.viewport.width as f32 * 2.0 - 1.0;
        let ny = -(y / self.viewport.height as f32 * 2.0 - 1.0);
        self.pointer_target = Vec2::new(nx, ny).clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Page scrolled to vertical offset `y`. Overscroll above the top is
    /// treated as zero.
    pub fn on_scroll(&mut self, y: f32) {
        self.scroll_y = y.max(0.0);
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.resized = true;
    }

    /// Returns the new viewport once per resize.
    pub fn take_resize(&mut self) -> Option<Viewport> {
        std::mem::take(&mut self.resized).then_some(self.viewport)
    }

    /// One step of first-order smoothing toward the target.
    pub fn smooth_pointer(&mut self, factor: f32) {
        self.pointer += (self.pointer_target - self.pointer) * factor;
    }
}
