//! Interfaces between the cull gate and a scene-graph traversal.

use glam::{DMat4, DVec3};

use crate::BoundingSphere;

/// Kind of traversal pass visiting a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Visibility-determining pass; the only pass horizon culling acts on.
    Cull,
    /// Per-frame update pass.
    Update,
    /// Input/event dispatch pass.
    Event,
}

/// The traversal state the gate reads when a node is visited.
pub trait CullVisitor {
    /// Which pass is running.
    fn pass(&self) -> PassKind;

    /// The current view point, in the visited node's local space.
    fn view_point(&self) -> DVec3;

    /// Accumulated local-to-world transform of the current node path.
    fn local_to_world(&self) -> DMat4;
}

/// Anything with a bounding sphere in its local space.
pub trait Bounded {
    /// Local-space bounding sphere.
    fn bound(&self) -> BoundingSphere;
}

impl Bounded for BoundingSphere {
    fn bound(&self) -> BoundingSphere {
        *self
    }
}

/// Whether a traversal should descend into a node's subtree.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Visit the node's children.
    Continue,
    /// Skip the node and everything below it for this pass.
    Skip,
}

impl Traversal {
    /// `Continue` when `visible`, `Skip` otherwise.
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Traversal::Continue
        } else {
            Traversal::Skip
        }
    }

    /// Whether the traversal descends.
    pub fn is_continue(self) -> bool {
        self == Traversal::Continue
    }
}
