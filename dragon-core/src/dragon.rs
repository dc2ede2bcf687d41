//! A single branch element ("dragon") and how it is derived from its parent.

use crate::{
    sampler::Sampler,
    types::{Anchor, Direction, DragonId},
};
use glam::Vec2;

/// Orientation of the root, in degrees.
pub const ROOT_DEGREE: f32 = 180.0;

/// Position of a child's body along the parent-anchor → head segment.
pub const BODY_LERP: f32 = 0.6;

/// Where a head sprite is drawn: a center plus full extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadRect {
    pub center: Vec2,
    pub size: Vec2,
}

impl HeadRect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Top-left corner, i.e. center minus half-extent.
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.center - self.half_size()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }
}

#[derive(Clone, Debug)]
pub struct Dragon {
    /// `None` for the root, whose synthetic parent only supplied its head.
    pub parent: Option<DragonId>,
    pub level: usize,
    pub direction: Direction,
    /// Absolute rotation in degrees.
    pub degree: f32,
    pub head: HeadRect,
    /// Body anchor center. The root's body sits on its head center.
    pub body: Vec2,
}

impl Dragon {
    pub fn new_root(head: HeadRect) -> Self {
        Self {
            parent: None,
            level: 0,
            direction: Direction::Center,
            degree: ROOT_DEGREE,
            head,
            body: head.center,
        }
    }

    /// Center of the requested anchor on this dragon.
    #[inline]
    pub fn anchor_center(&self, anchor: Anchor) -> Vec2 {
        match anchor {
            Anchor::Head => self.head.center,
            Anchor::Body => self.body,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Derives a child of `parent` (stored at `parent_id`) in `direction`.
    ///
    /// The child rotates away from the parent by a random delta whose window
    /// is shifted by a depth-dependent jitter, then sits at a random distance
    /// proportional to the parent's head width, measured from the parent
    /// anchor matching `direction`. Its head is half the parent's.
    ///
    /// ### Parameters
    /// - `parent` - The dragon being extended.
    /// - `parent_id` - Where `parent` lives in its [`crate::levels::Levels`].
    /// - `direction` - One of the four branching directions. Generation never
    ///   passes [`Direction::Center`]; if given, it is treated as a
    ///   head-attached child with a zero angular delta, still placed at a
    ///   random distance along the parent's heading and halved in size.
    /// - `sampler` - Source of the uniform draws.
    pub fn extend(
        parent: &Dragon,
        parent_id: DragonId,
        direction: Direction,
        sampler: &mut impl Sampler,
    ) -> Self {
        let level = parent.level + 1;

        // No jitter on the first ring, so the root's children spread evenly.
        let d = if level > 1 { sampler.uniform_int(50, 70) } else { 0 };
        let bd = d + 110 - if level > 2 { sampler.uniform_int(10, 20) } else { 0 };

        let delta = match direction {
            Direction::HeadLeft => sampler.uniform_int(-80 + d, -90 + d),
            Direction::HeadRight => sampler.uniform_int(80 - d, 90 - d),
            Direction::BodyLeft => sampler.uniform_int(-80 + bd, -90 + bd),
            Direction::BodyRight => sampler.uniform_int(80 - bd, 90 - bd),
            Direction::Center => 0,
        };
        let degree = parent.degree + delta as f32;

        let anchor = parent.anchor_center(direction.anchor());
        let distance = parent.head.width() * sampler.uniform(0.8, 1.1) + 10.0;
        let (sin, cos) = degree.to_radians().sin_cos();
        let offset = Vec2::new(sin, cos) * distance;

        Self {
            parent: Some(parent_id),
            level,
            direction,
            degree,
            head: HeadRect::new(anchor + offset, parent.head.size * 0.5),
            body: anchor + offset * BODY_LERP,
        }
    }
}
