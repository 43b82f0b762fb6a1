//! Synthetic patch hierarchy and a cull traversal driven by the gate.
//!
//! The planet root holds one node per latitude band, each band holds its
//! surface patches. Patches carry a translation to their surface point and
//! a bound centered on their local origin, so every visit goes through the
//! gate's local-to-world handling.

use glam::{DMat4, DVec3};
use horizon_cull::{
    Bounded, BoundingSphere, CullVisitor, Ellipsoid, HorizonCullGate, PassKind, Traversal,
};

/// A node in the synthetic scene.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Node name, for logging.
    pub name: String,
    /// Transform from this node's space to its parent's.
    pub transform: DMat4,
    /// Bounding sphere in this node's space.
    pub bound: BoundingSphere,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Count leaf nodes in the subtree.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(SceneNode::leaf_count).sum()
        }
    }
}

impl Bounded for SceneNode {
    fn bound(&self) -> BoundingSphere {
        self.bound
    }
}

/// Point on the ellipsoid surface at parametric latitude/longitude (radians).
fn surface_point(ellipsoid: &Ellipsoid, lat: f64, lon: f64) -> DVec3 {
    DVec3::new(
        ellipsoid.radius_equator() * lat.cos() * lon.cos(),
        ellipsoid.radius_equator() * lat.cos() * lon.sin(),
        ellipsoid.radius_polar() * lat.sin(),
    )
}

/// Upper bound on latitude bands; keeps the patch count and `2·bands` in range.
pub const MAX_BANDS: u32 = 1024;

/// Requested band count clamped to `1..=MAX_BANDS`.
pub fn band_count(requested: u32) -> u32 {
    if requested > MAX_BANDS {
        tracing::warn!(requested, max = MAX_BANDS, "grid resolution clamped");
    }
    requested.clamp(1, MAX_BANDS)
}

/// Build a planet covered by `bands × 2·bands` patches of `patch_radius`.
pub fn build_planet(ellipsoid: &Ellipsoid, bands: u32, patch_radius: f64) -> SceneNode {
    let bands = band_count(bands);
    let columns = bands * 2;
    let lat_step = std::f64::consts::PI / bands as f64;
    let lon_step = std::f64::consts::TAU / columns as f64;

    let children = (0..bands)
        .map(|band| {
            let lat = -std::f64::consts::FRAC_PI_2 + (band as f64 + 0.5) * lat_step;
            let ring_radius = ellipsoid.radius_equator() * lat.cos();
            let ring_height = ellipsoid.radius_polar() * lat.sin();

            let patches = (0..columns)
                .map(|column| {
                    let lon = column as f64 * lon_step;
                    SceneNode {
                        name: format!("patch_{band}_{column}"),
                        transform: DMat4::from_translation(surface_point(ellipsoid, lat, lon)),
                        bound: BoundingSphere::new(DVec3::ZERO, patch_radius),
                        children: Vec::new(),
                    }
                })
                .collect();

            SceneNode {
                name: format!("band_{band}"),
                transform: DMat4::IDENTITY,
                bound: BoundingSphere::new(
                    DVec3::new(0.0, 0.0, ring_height),
                    ring_radius + patch_radius,
                ),
                children: patches,
            }
        })
        .collect();

    SceneNode {
        name: "planet".to_string(),
        transform: DMat4::IDENTITY,
        bound: BoundingSphere::new(DVec3::ZERO, ellipsoid.max_radius() + patch_radius),
        children,
    }
}

/// Cull-pass state: the world-space eye and the current node path's transform stack.
pub struct CullPass {
    eye: DVec3,
    stack: Vec<DMat4>,
}

impl CullPass {
    /// A cull pass for a world-space eye.
    pub fn new(eye: DVec3) -> Self {
        Self {
            eye,
            stack: vec![DMat4::IDENTITY],
        }
    }

    fn push(&mut self, transform: DMat4) {
        let top = self.local_to_world();
        self.stack.push(top * transform);
    }

    fn pop(&mut self) {
        self.stack.pop();
    }
}

impl CullVisitor for CullPass {
    fn pass(&self) -> PassKind {
        PassKind::Cull
    }

    fn view_point(&self) -> DVec3 {
        self.local_to_world().inverse().transform_point3(self.eye)
    }

    fn local_to_world(&self) -> DMat4 {
        self.stack.last().copied().unwrap_or(DMat4::IDENTITY)
    }
}

/// Counters from one cull pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CullStats {
    /// Nodes the gate was asked about.
    pub visited: usize,
    /// Nodes whose subtree was skipped.
    pub culled: usize,
    /// Leaf patches that passed the gate.
    pub visible_leaves: usize,
}

/// Traverse `root` from `eye`, descending only where the gate allows.
pub fn cull_scene(gate: &HorizonCullGate, root: &SceneNode, eye: DVec3) -> CullStats {
    let mut pass = CullPass::new(eye);
    let mut stats = CullStats::default();
    cull_node(gate, root, &mut pass, &mut stats);
    stats
}

fn cull_node(
    gate: &HorizonCullGate,
    node: &SceneNode,
    pass: &mut CullPass,
    stats: &mut CullStats,
) {
    pass.push(node.transform);
    stats.visited += 1;

    match gate.visit(Some(node), &*pass) {
        Traversal::Continue => {
            if node.children.is_empty() {
                stats.visible_leaves += 1;
            }
            for child in &node.children {
                cull_node(gate, child, pass, stats);
            }
        }
        Traversal::Skip => {
            tracing::trace!(node = %node.name, "culled below horizon");
            stats.culled += 1;
        }
    }

    pass.pop();
}
