/// Identifier for a [`crate::dragon::Dragon`] inside [`crate::levels::Levels`].
///
/// `level` selects the depth bucket and `index` the position inside it, in
/// creation order. Ids are only meaningful within the `Levels` instance that
/// produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DragonId {
    pub level: usize,
    pub index: usize,
}

impl DragonId {
    pub const ROOT: DragonId = DragonId { level: 0, index: 0 };

    pub fn new(level: usize, index: usize) -> Self {
        Self { level, index }
    }
}

/// Which parent point a dragon hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Head,
    Body,
}

/// How a dragon was derived from its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Center,
    HeadLeft,
    HeadRight,
    BodyLeft,
    BodyRight,
}

impl Direction {
    /// Children of a non-root dragon, in insertion order.
    pub const BRANCHING: [Direction; 4] = [
        Direction::BodyLeft,
        Direction::BodyRight,
        Direction::HeadLeft,
        Direction::HeadRight,
    ];

    /// The parent anchor this direction attaches to. The root counts as
    /// head-attached to its synthetic parent.
    pub fn anchor(self) -> Anchor {
        match self {
            Direction::BodyLeft | Direction::BodyRight => Anchor::Body,
            Direction::Center | Direction::HeadLeft | Direction::HeadRight => Anchor::Head,
        }
    }

    pub fn is_body(self) -> bool {
        self.anchor() == Anchor::Body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_follows_direction_prefix() {
        assert_eq!(Direction::Center.anchor(), Anchor::Head);
        assert_eq!(Direction::HeadLeft.anchor(), Anchor::Head);
        assert_eq!(Direction::HeadRight.anchor(), Anchor::Head);
        assert_eq!(Direction::BodyLeft.anchor(), Anchor::Body);
        assert_eq!(Direction::BodyRight.anchor(), Anchor::Body);
    }

    #[test]
    fn branching_order_is_body_then_head() {
        let body: Vec<bool> = Direction::BRANCHING.iter().map(|d| d.is_body()).collect();
        assert_eq!(body, vec![true, true, false, false]);
    }
}
