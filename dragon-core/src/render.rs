//! One full render pass of the fractal.
//!
//! Every pass starts from a cleared surface and re-derives all screen-space
//! geometry from the static [`Levels`] plus the current [`ViewState`], so two
//! passes under the same zoom draw exactly the same thing.

use crate::{
    config::Config,
    dragon::Dragon,
    levels::Levels,
    surface::{ImageRect, SavedState, Sprite, Surface},
    view::{ViewState, Viewport},
};
use glam::Vec2;

/// Connector sprite width as a fraction of the head width.
const CONNECTOR_WIDTH: f32 = 0.65;
/// Extra connector length (unscaled) as a fraction of the head width.
const CONNECTOR_OVERLAP: f32 = 0.2;

/// Everything a render pass reads.
#[derive(Clone, Copy, Debug)]
pub struct RenderInput<'a> {
    pub levels: &'a Levels,
    pub view: ViewState,
    pub config: &'a Config,
}

/// Clears `surface` and draws every dragon deepest-first, then the
/// foreground body sprite on top.
///
/// For each dragon the pass builds the link path to its parent anchor
/// (stroked only when [`Config::stroke_links`] is set), then moves the
/// origin to the head's screen center, rotates by `180° - degree`, and
/// draws the connector stretched back towards the parent followed by the
/// head itself. The transform is restored before the next dragon.
///
/// ### Returns
/// The viewport used for the pass.
pub fn render<S: Surface + ?Sized>(input: RenderInput<'_>, surface: &mut S) -> Viewport {
    let canvas = input.config.canvas_size;
    let vp = input.view.viewport(canvas.x);

    surface.clear_rect(Vec2::ZERO, canvas);

    if !vp.is_finite() {
        tracing::warn!(zoom = input.view.zoom, "zoom factor overflowed; skipping frame");
        return vp;
    }

    for bucket in input.levels.draw_order() {
        for dragon in bucket {
            draw_dragon(input, &vp, dragon, surface);
        }
    }

    let body = &input.config.sprites.body;
    let origin = vp.to_screen(input.config.foreground_origin);
    surface.draw_image(
        Sprite::Body,
        ImageRect::new(
            origin.x,
            origin.y,
            vp.scaled(body.size.x),
            vp.scaled(body.size.y),
        ),
    );

    vp
}

fn draw_dragon<S: Surface + ?Sized>(
    input: RenderInput<'_>,
    vp: &Viewport,
    dragon: &Dragon,
    surface: &mut S,
) {
    let anchor = input.levels.parent_anchor(dragon);
    let head_screen = vp.to_screen(dragon.head.center);
    if !head_screen.is_finite() {
        return;
    }

    surface.begin_path();
    surface.move_to(head_screen);
    surface.line_to(vp.to_screen(anchor));
    if input.config.stroke_links {
        surface.stroke();
    }

    let mut s = SavedState::new(surface);
    s.translate(head_screen);
    s.rotate((180.0 - dragon.degree).to_radians());

    let w = dragon.head.width();
    let half = dragon.head.half_size();
    let distance = dragon.head.center.distance(anchor);

    s.draw_image(
        Sprite::Connector,
        ImageRect::new(
            -vp.scaled(w / 3.0),
            0.0,
            vp.scaled(w * CONNECTOR_WIDTH),
            vp.scaled(distance) + w * CONNECTOR_OVERLAP,
        ),
    );
    s.draw_image(
        Sprite::Head,
        ImageRect::new(
            -vp.scaled(half.x),
            -vp.scaled(half.y),
            vp.scaled(w),
            vp.scaled(dragon.head.height()),
        ),
    );
}
