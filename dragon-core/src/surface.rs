//! The drawing-surface seam.
//!
//! [`Surface`] mirrors a small immediate-mode 2-D canvas: path building,
//! a save/restore transform stack, and sprite blits. Sprites are referred to
//! by [`Sprite`] key; the surface owns whatever raster handle backs each key
//! and silently skips keys whose pixels are not available yet.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Head,
    Body,
    Connector,
}

impl Sprite {
    pub const ALL: [Sprite; 3] = [Sprite::Head, Sprite::Body, Sprite::Connector];

    pub fn name(self) -> &'static str {
        match self {
            Sprite::Head => "head",
            Sprite::Body => "body",
            Sprite::Connector => "connector",
        }
    }
}

/// File name and intrinsic pixel size of a sprite asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteSpec {
    pub file: PathBuf,
    pub size: Vec2,
}

impl SpriteSpec {
    pub fn new(file: impl Into<PathBuf>, size: Vec2) -> Self {
        Self {
            file: file.into(),
            size,
        }
    }
}

/// Destination rectangle in the surface's current (transformed) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageRect {
    pub min: Vec2,
    pub size: Vec2,
}

impl ImageRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.min + self.size;
        [
            self.min,
            Vec2::new(max.x, self.min.y),
            max,
            Vec2::new(self.min.x, max.y),
        ]
    }
}

pub trait Surface {
    /// Logical size in pixels.
    fn size(&self) -> Vec2;

    /// Clears an axis-aligned region, ignoring the current transform.
    fn clear_rect(&mut self, min: Vec2, size: Vec2);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    fn stroke(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);

    /// Draws `sprite` stretched over `dst`. A sprite without pixels is a no-op.
    fn draw_image(&mut self, sprite: Sprite, dst: ImageRect);
}

/// Save/restore stack of affine transforms, in the way canvas contexts keep
/// theirs. Surfaces embed one and map every point through [`Self::apply`].
#[derive(Clone, Debug)]
pub struct TransformStack {
    current: Affine2,
    saved: Vec<Affine2>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            current: Affine2::IDENTITY,
            saved: Vec::new(),
        }
    }
}

impl TransformStack {
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pops the last saved transform. Restoring with nothing saved is a no-op.
    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.current = t;
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.current = self.current * Affine2::from_translation(offset);
    }

    pub fn rotate(&mut self, radians: f32) {
        self.current = self.current * Affine2::from_angle(radians);
    }

    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        self.current.transform_point2(p)
    }

    pub fn current(&self) -> Affine2 {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn reset(&mut self) {
        self.current = Affine2::IDENTITY;
        self.saved.clear();
    }
}

/// Scoped `save()`; the matching `restore()` runs on drop, also on unwinding.
pub struct SavedState<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> SavedState<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
