use crate::{
    config::Config,
    display_list::DisplayList,
    levels::Levels,
    render::{RenderInput, render},
    sampler::Sampler,
    schedule::{RedrawReason, RedrawScheduler},
    view::{InputEvent, ViewState},
};

/// The generated fractal together with its view and redraw bookkeeping.
///
/// The tree is immutable between resets; input only touches the zoom.
/// [`Scene::frame`] runs a render pass into the scene's [`DisplayList`]
/// whenever the scheduler says one is due, and the host replays that list
/// until the next pass.
#[derive(Debug)]
pub struct Scene {
    config: Config,
    levels: Levels,
    view: ViewState,
    scheduler: RedrawScheduler,
    frame: DisplayList,
    passes: u64,
}

impl Scene {
    pub fn new(config: Config, sampler: &mut impl Sampler) -> Self {
        let levels = Levels::generate(config.generation_depth(), config.root_head(), sampler);
        let scheduler = RedrawScheduler::new(config.refresh_interval_secs);
        let frame = DisplayList::new(config.canvas_size);
        Self {
            config,
            levels,
            view: ViewState::default(),
            scheduler,
            frame,
            passes: 0,
        }
    }

    /// Regenerates the fractal from `sampler`, keeping the current zoom.
    pub fn reset(&mut self, sampler: &mut impl Sampler) {
        self.levels = Levels::generate(self.config.generation_depth(), self.config.root_head(), sampler);
        self.scheduler.request();
    }

    /// Applies an input event and schedules an immediate redraw.
    pub fn handle_input(&mut self, event: InputEvent, sampler: &mut impl Sampler) {
        if !self.view.apply(event) {
            self.reset(sampler);
            tracing::info!(dragons = self.levels.len(), "regenerated fractal");
            return;
        }
        tracing::debug!(?event, zoom = self.view.zoom, "zoom changed");
        self.scheduler.request();
    }

    /// Runs a render pass if one is due at `now` (seconds).
    pub fn frame(&mut self, now: f64) -> Option<RedrawReason> {
        let reason = self.scheduler.poll(now)?;
        render(
            RenderInput {
                levels: &self.levels,
                view: self.view,
                config: &self.config,
            },
            &mut self.frame,
        );
        self.passes += 1;
        tracing::trace!(?reason, pass = self.passes, "rendered frame");
        Some(reason)
    }

    /// Seconds until the next timer-driven pass.
    pub fn time_until_next(&self, now: f64) -> f64 {
        self.scheduler.time_until_next(now)
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.frame
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of render passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Sprite;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scene() -> (Scene, StdRng) {
        let mut rng = StdRng::seed_from_u64(8);
        let cfg = Config {
            max_depth: 3,
            ..Config::default()
        };
        (Scene::new(cfg, &mut rng), rng)
    }

    #[test]
    fn first_frame_renders_on_tick() {
        let (mut scene, _) = scene();
        assert_eq!(scene.frame(0.0), Some(RedrawReason::Tick));
        assert_eq!(scene.passes(), 1);
        assert_eq!(scene.display_list().images(Sprite::Head).count(), scene.levels().len());
        assert_eq!(scene.frame(0.3), None);
    }

    #[test]
    fn clicks_zoom_and_redraw_immediately() {
        let (mut scene, mut rng) = scene();
        scene.frame(0.0);

        scene.handle_input(InputEvent::Primary, &mut rng);
        assert_eq!(scene.view().zoom, 1);
        assert_eq!(scene.frame(0.1), Some(RedrawReason::Input));

        scene.handle_input(InputEvent::Secondary, &mut rng);
        scene.handle_input(InputEvent::Secondary, &mut rng);
        assert_eq!(scene.view().zoom, 0);
        assert_eq!(scene.frame(0.2), Some(RedrawReason::Input));
    }

    #[test]
    fn tick_redraw_without_input_is_identical() {
        let (mut scene, _) = scene();
        scene.frame(0.0);
        let before = scene.display_list().commands().to_vec();
        assert_eq!(scene.frame(1.0), Some(RedrawReason::Tick));
        assert_eq!(scene.display_list().commands(), before.as_slice());
    }

    #[test]
    fn unvalidated_depth_is_clamped() {
        let cfg = Config {
            max_depth: 40,
            ..Config::default()
        };
        assert_eq!(cfg.generation_depth(), crate::config::MAX_DEPTH_LIMIT);
    }

    #[test]
    fn reset_regenerates_and_keeps_zoom() {
        let (mut scene, mut rng) = scene();
        scene.handle_input(InputEvent::Primary, &mut rng);
        let old_first = scene.levels().bucket(1)[0].head.center;

        scene.handle_input(InputEvent::Reset, &mut rng);
        assert_eq!(scene.view().zoom, 1);
        assert_eq!(scene.levels().len(), 1 + 2 + 8);
        assert_ne!(scene.levels().bucket(1)[0].head.center, old_first);
        assert_eq!(scene.frame(0.0), Some(RedrawReason::Input));
    }
}
