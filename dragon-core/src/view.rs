//! Zoom state and the world → screen mapping derived from it.

use glam::Vec2;

/// Growth factor per zoom step.
pub const ZOOM_BASE: f32 = 1.5;

/// World coordinates a pass may map, in canvas widths from the origin.
/// Generated fractals stay well inside two canvas widths.
const MAPPED_EXTENT: f32 = 8.0;

/// Pointer input that affects the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary activation: zoom in.
    Primary,
    /// Secondary activation: zoom out, never below zero.
    Secondary,
    /// Regenerate the fractal, keeping the zoom.
    Reset,
}

/// The only mutable state shared between input handling and rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub zoom: u32,
}

impl ViewState {
    pub fn zoom_in(&mut self) {
        self.zoom = self.zoom.saturating_add(1);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1);
    }

    /// Applies a zoom event. Returns `true` if the event was a zoom event.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Primary => self.zoom_in(),
            InputEvent::Secondary => self.zoom_out(),
            InputEvent::Reset => return false,
        }
        true
    }

    pub fn viewport(&self, canvas_width: f32) -> Viewport {
        Viewport::new(self.zoom, canvas_width)
    }
}

/// Per-frame transform: `z = 1.5^zoom`, `t = (z - 1) * canvas_width / 3`.
///
/// World x maps to `x * z - 2t`, world y to `y * z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub shift: f32,
    pub canvas_width: f32,
}

impl Viewport {
    pub fn new(zoom: u32, canvas_width: f32) -> Self {
        let exp = i32::try_from(zoom).unwrap_or(i32::MAX);
        let scale = ZOOM_BASE.powi(exp);
        let shift = (scale - 1.0) * (canvas_width / 3.0);
        Self {
            scale,
            shift,
            canvas_width,
        }
    }

    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x * self.scale - 2.0 * self.shift, world.y * self.scale)
    }

    /// Scales a world length.
    #[inline]
    pub fn scaled(&self, len: f32) -> f32 {
        len * self.scale
    }

    /// `false` once the zoom is so deep that mapped coordinates could
    /// overflow `f32`.
    ///
    /// Checks the largest magnitude a pass produces, a point
    /// `MAPPED_EXTENT` canvas widths out, rather than `scale` alone:
    /// `2 * shift` overflows a few zoom steps before `scale` does.
    pub fn is_finite(&self) -> bool {
        let extent = self.canvas_width * MAPPED_EXTENT;
        self.scale.is_finite()
            && (2.0 * self.shift).is_finite()
            && (extent * self.scale + 2.0 * self.shift).is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_out_clamps_at_zero() {
        let mut view = ViewState::default();
        assert!(view.apply(InputEvent::Secondary));
        assert_eq!(view.zoom, 0);
    }

    #[test]
    fn zoom_in_keeps_counting() {
        let mut view = ViewState::default();
        for _ in 0..50 {
            view.apply(InputEvent::Primary);
        }
        assert_eq!(view.zoom, 50);
        view.apply(InputEvent::Secondary);
        assert_eq!(view.zoom, 49);
    }

    #[test]
    fn zoom_saturates_instead_of_overflowing() {
        let mut view = ViewState { zoom: u32::MAX };
        view.zoom_in();
        assert_eq!(view.zoom, u32::MAX);
        assert!(!view.viewport(1280.0).is_finite());
    }

    #[test]
    fn guard_trips_before_mapped_x_overflows() {
        for zoom in 190..=230 {
            let vp = Viewport::new(zoom, 1280.0);
            if vp.is_finite() {
                let far = vp.to_screen(Vec2::new(1280.0 * 2.0, 1280.0 * 2.0));
                assert!(far.is_finite(), "zoom {zoom} maps to {far:?}");
            }
        }
        assert!(!Viewport::new(202, 1280.0).is_finite());
        assert!(Viewport::new(150, 1280.0).is_finite());
    }

    #[test]
    fn reset_is_not_a_zoom_event() {
        let mut view = ViewState { zoom: 3 };
        assert!(!view.apply(InputEvent::Reset));
        assert_eq!(view.zoom, 3);
    }

    #[test]
    fn zero_zoom_is_identity() {
        let vp = ViewState::default().viewport(1280.0);
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.shift, 0.0);
        let p = Vec2::new(625.0, 340.0);
        assert_eq!(vp.to_screen(p), p);
    }

    #[test]
    fn one_step_scales_and_shifts_x_only() {
        let vp = Viewport::new(1, 1280.0);
        assert_eq!(vp.scale, 1.5);
        let t = 0.5 * 1280.0 / 3.0;
        assert!((vp.shift - t).abs() < 1e-3);

        let s = vp.to_screen(Vec2::new(100.0, 100.0));
        assert!((s.x - (150.0 - 2.0 * t)).abs() < 1e-3);
        assert_eq!(s.y, 150.0);
    }
}
