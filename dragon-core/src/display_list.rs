use crate::surface::{ImageRect, Sprite, Surface, TransformStack};
use glam::Vec2;

/// A recorded drawing operation, already mapped to surface space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { min: Vec2, size: Vec2 },
    Stroke { points: Vec<Vec2> },
    /// Corners of the transformed destination rectangle, in
    /// [`ImageRect::corners`] order.
    Image { sprite: Sprite, quad: [Vec2; 4] },
}

/// A [`Surface`] that records commands instead of rasterizing them.
///
/// The viewer renders into one of these and replays it every UI frame;
/// tests inspect it directly.
#[derive(Debug)]
pub struct DisplayList {
    size: Vec2,
    commands: Vec<DrawCommand>,
    transform: TransformStack,
    path: Vec<Vec<Vec2>>,
}

impl DisplayList {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
            transform: TransformStack::default(),
            path: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops all commands and resets transform and path state.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.transform.reset();
        self.path.clear();
    }

    /// Number of transforms still saved; zero after a balanced pass.
    pub fn saved_depth(&self) -> usize {
        self.transform.depth()
    }

    pub fn images(&self, sprite: Sprite) -> impl Iterator<Item = &[Vec2; 4]> + '_ {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Image { sprite: s, quad } if *s == sprite => Some(quad),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear_rect(&mut self, min: Vec2, size: Vec2) {
        // Everything recorded so far is hidden by a full clear.
        if min.cmple(Vec2::ZERO).all() && (min + size).cmpge(self.size).all() {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear { min, size });
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Vec2) {
        self.path.push(vec![self.transform.apply(p)]);
    }

    fn line_to(&mut self, p: Vec2) {
        let p = self.transform.apply(p);
        match self.path.last_mut() {
            Some(sub) => sub.push(p),
            None => self.path.push(vec![p]),
        }
    }

    fn stroke(&mut self) {
        for sub in self.path.iter().filter(|s| s.len() >= 2) {
            self.commands.push(DrawCommand::Stroke { points: sub.clone() });
        }
    }

    fn save(&mut self) {
        self.transform.save();
    }

    fn restore(&mut self) {
        self.transform.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform.translate(offset);
    }

    fn rotate(&mut self, radians: f32) {
        self.transform.rotate(radians);
    }

    fn draw_image(&mut self, sprite: Sprite, dst: ImageRect) {
        let quad = dst.corners().map(|c| self.transform.apply(c));
        self.commands.push(DrawCommand::Image { sprite, quad });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SavedState;

    #[test]
    fn path_is_only_recorded_when_stroked() {
        let mut list = DisplayList::new(Vec2::new(100.0, 100.0));
        list.begin_path();
        list.move_to(Vec2::new(0.0, 0.0));
        list.line_to(Vec2::new(10.0, 0.0));
        assert!(list.commands().is_empty());

        list.stroke();
        assert_eq!(
            list.commands(),
            &[DrawCommand::Stroke {
                points: vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]
            }]
        );
    }

    #[test]
    fn images_are_recorded_in_transformed_space() {
        let mut list = DisplayList::new(Vec2::new(100.0, 100.0));
        {
            let mut s = SavedState::new(&mut list);
            s.translate(Vec2::new(50.0, 50.0));
            s.draw_image(Sprite::Head, ImageRect::new(-5.0, -5.0, 10.0, 10.0));
        }
        assert_eq!(list.saved_depth(), 0);

        let quad = list.images(Sprite::Head).next().unwrap();
        assert_eq!(quad[0], Vec2::new(45.0, 45.0));
        assert_eq!(quad[2], Vec2::new(55.0, 55.0));
    }

    #[test]
    fn full_clear_discards_earlier_commands() {
        let mut list = DisplayList::new(Vec2::new(100.0, 100.0));
        list.draw_image(Sprite::Body, ImageRect::new(0.0, 0.0, 1.0, 1.0));
        list.clear_rect(Vec2::ZERO, Vec2::new(100.0, 100.0));
        assert_eq!(list.commands().len(), 1);
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn saved_state_restores_during_unwind() {
        let mut list = DisplayList::new(Vec2::new(10.0, 10.0));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut s = SavedState::new(&mut list);
            s.translate(Vec2::new(1.0, 1.0));
            panic!("draw failed");
        }));
        assert!(result.is_err());
        assert_eq!(list.saved_depth(), 0);
    }
}
