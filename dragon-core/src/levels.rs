use crate::{
    dragon::{Dragon, HeadRect},
    sampler::Sampler,
    types::{Direction, DragonId},
};
use glam::Vec2;

/// All dragons of one generated fractal, grouped by depth.
///
/// `buckets[k]` holds every dragon with `level == k`, in creation order.
/// Drawing walks the buckets deepest-first (see [`Levels::draw_order`]) so
/// shallower dragons land on top of their descendants.
#[derive(Debug)]
pub struct Levels {
    buckets: Vec<Vec<Dragon>>,
}

impl Levels {
    /// Creates the bucket structure with a single root dragon and no children.
    ///
    /// `max_depth` is clamped to at least one bucket.
    pub fn new(max_depth: usize, root_head: HeadRect) -> Self {
        let mut buckets: Vec<Vec<Dragon>> = (0..max_depth.max(1)).map(|_| Vec::new()).collect();
        buckets[0].push(Dragon::new_root(root_head));
        Self { buckets }
    }

    /// Builds the full fractal.
    ///
    /// Starting from the root, every dragon in buckets `0..max_depth - 1`
    /// spawns its children into the next bucket, in insertion order. A
    /// `max_depth` of 0 or 1 yields just the root.
    ///
    /// ### Parameters
    /// - `max_depth` - Number of depth buckets.
    /// - `root_head` - Head rectangle of the root dragon.
    /// - `sampler` - Source of every random draw.
    pub fn generate(max_depth: usize, root_head: HeadRect, sampler: &mut impl Sampler) -> Self {
        let mut levels = Self::new(max_depth, root_head);
        for level in 0..levels.depth().saturating_sub(1) {
            for index in 0..levels.buckets[level].len() {
                levels.create_children(DragonId::new(level, index), sampler);
            }
        }

        tracing::debug!(
            depth = levels.depth(),
            dragons = levels.len(),
            "generated dragon fractal"
        );
        levels
    }

    /// Appends the children of `id` to the next bucket.
    ///
    /// Non-root dragons get `body-left, body-right` first; every dragon then
    /// gets `head-left, head-right`. Does nothing if `id` is in the deepest
    /// bucket.
    pub fn create_children(&mut self, id: DragonId, sampler: &mut impl Sampler) {
        let next = id.level + 1;
        if next >= self.buckets.len() {
            return;
        }

        let directions: &[Direction] = if id.level > 0 {
            &Direction::BRANCHING
        } else {
            &Direction::BRANCHING[2..]
        };

        for &direction in directions {
            let child = Dragon::extend(self.get(id), id, direction, sampler);
            self.buckets[next].push(child);
        }
    }

    #[inline]
    pub fn get(&self, id: DragonId) -> &Dragon {
        &self.buckets[id.level][id.index]
    }

    pub fn root(&self) -> &Dragon {
        self.get(DragonId::ROOT)
    }

    /// Number of depth buckets.
    pub fn depth(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of dragons.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dragons created at `level`, in creation order.
    pub fn bucket(&self, level: usize) -> &[Dragon] {
        self.buckets.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Buckets deepest-first, root bucket last.
    pub fn draw_order(&self) -> impl Iterator<Item = &[Dragon]> + '_ {
        self.buckets.iter().rev().map(Vec::as_slice)
    }

    /// Ids of the children of `id`, in insertion order.
    pub fn children(&self, id: DragonId) -> Vec<DragonId> {
        self.bucket(id.level + 1)
            .iter()
            .enumerate()
            .filter(|(_, d)| d.parent == Some(id))
            .map(|(index, _)| DragonId::new(id.level + 1, index))
            .collect()
    }

    /// Parent-side point `dragon` hangs from.
    ///
    /// For the root this is its own head center, which is exactly what its
    /// synthetic parent supplied.
    pub fn parent_anchor(&self, dragon: &Dragon) -> Vec2 {
        match dragon.parent {
            Some(pid) => self.get(pid).anchor_center(dragon.direction.anchor()),
            None => dragon.head.center,
        }
    }
}
