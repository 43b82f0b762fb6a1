//! Traversal-time horizon culling.
//!
//! [`HorizonCullGate`] holds a template [`HorizonTest`] that is never
//! mutated during traversal. Each visit copies the template, moves the
//! copy's eye to the visitor's view point, and tests the node's bounds,
//! so concurrent cull passes can share one gate without locking.

use glam::DVec3;

use crate::{Bounded, CullVisitor, Ellipsoid, HorizonTest, PassKind, Traversal};

/// Gates descent into scene nodes hidden behind the horizon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizonCullGate {
    horizon: HorizonTest,
    enabled: bool,
}

impl HorizonCullGate {
    /// An enabled gate for the WGS84 ellipsoid.
    pub fn new() -> Self {
        Self::with_horizon(HorizonTest::default())
    }

    /// An enabled gate using a copy of `horizon` as its template.
    pub fn with_horizon(horizon: HorizonTest) -> Self {
        Self {
            horizon,
            enabled: true,
        }
    }

    /// The template horizon test.
    pub fn horizon(&self) -> &HorizonTest {
        &self.horizon
    }

    /// Replace the template horizon test.
    pub fn set_horizon(&mut self, horizon: HorizonTest) {
        self.horizon = horizon;
    }

    /// The ellipsoid the template is configured for.
    pub fn ellipsoid(&self) -> &Ellipsoid {
        self.horizon.ellipsoid()
    }

    /// Reconfigure the template for a new ellipsoid.
    pub fn set_ellipsoid(&mut self, ellipsoid: &Ellipsoid) {
        self.horizon.set_ellipsoid(ellipsoid);
    }

    /// Whether culling is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable culling. A disabled gate always descends.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Decide whether `node` may be visible to `visitor`.
    ///
    /// Disabled gates, non-cull passes and missing nodes are treated as
    /// visible, as is any visit whose eye has no horizon (inside the body).
    pub fn is_visible<N, V>(&self, node: Option<&N>, visitor: &V) -> bool
    where
        N: Bounded + ?Sized,
        V: CullVisitor + ?Sized,
    {
        let Some(node) = node else {
            return true;
        };
        if !self.enabled || visitor.pass() != PassKind::Cull {
            return true;
        }

        let local_to_world = visitor.local_to_world();
        let eye: DVec3 = local_to_world.transform_point3(visitor.view_point());
        let bound = node.bound().transformed(&local_to_world);

        // Private copy per visit; the template stays read-only.
        let horizon = self.horizon.with_eye(eye);
        match horizon.try_is_visible(bound.center, bound.radius) {
            Ok(visible) => {
                if !visible {
                    tracing::trace!(
                        center = ?bound.center,
                        radius = bound.radius,
                        "node below horizon"
                    );
                }
                visible
            }
            Err(err) => {
                tracing::trace!(%err, "horizon test indeterminate, keeping node");
                true
            }
        }
    }

    /// The traversal decision for `node`.
    pub fn visit<N, V>(&self, node: Option<&N>, visitor: &V) -> Traversal
    where
        N: Bounded + ?Sized,
        V: CullVisitor + ?Sized,
    {
        Traversal::from_visible(self.is_visible(node, visitor))
    }

    /// Run `descend` if `node` passes the gate, and return the decision.
    pub fn cull<N, V, F>(&self, node: Option<&N>, visitor: &V, descend: F) -> Traversal
    where
        N: Bounded + ?Sized,
        V: CullVisitor + ?Sized,
        F: FnOnce(),
    {
        let decision = self.visit(node, visitor);
        if decision.is_continue() {
            descend();
        }
        decision
    }
}

impl Default for HorizonCullGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundingSphere;
    use glam::DMat4;

    struct TestVisitor {
        pass: PassKind,
        view_point: DVec3,
        local_to_world: DMat4,
    }

    impl TestVisitor {
        fn cull(view_point: DVec3) -> Self {
            Self {
                pass: PassKind::Cull,
                view_point,
                local_to_world: DMat4::IDENTITY,
            }
        }
    }

    impl CullVisitor for TestVisitor {
        fn pass(&self) -> PassKind {
            self.pass
        }

        fn view_point(&self) -> DVec3 {
            self.view_point
        }

        fn local_to_world(&self) -> DMat4 {
            self.local_to_world
        }
    }

    fn unit_gate() -> HorizonCullGate {
        HorizonCullGate::with_horizon(HorizonTest::new(&Ellipsoid::sphere(1.0).unwrap()))
    }

    fn far_side() -> BoundingSphere {
        BoundingSphere::new(DVec3::new(-1.0, 0.0, 0.0), 0.1)
    }

    #[test]
    fn test_default_gate_is_enabled_wgs84() {
        let gate = HorizonCullGate::default();
        assert!(gate.is_enabled());
        assert_eq!(*gate.ellipsoid(), Ellipsoid::WGS84);
    }

    #[test]
    fn test_far_side_node_is_skipped() {
        let gate = unit_gate();
        let visitor = TestVisitor::cull(DVec3::new(3.0, 0.0, 0.0));
        assert_eq!(gate.visit(Some(&far_side()), &visitor), Traversal::Skip);

        let near_side = BoundingSphere::new(DVec3::new(1.0, 0.0, 0.0), 0.1);
        assert_eq!(gate.visit(Some(&near_side), &visitor), Traversal::Continue);
    }

    #[test]
    fn test_disabled_gate_always_descends() {
        let mut gate = unit_gate();
        gate.set_enabled(false);
        assert!(!gate.is_enabled());
        let visitor = TestVisitor::cull(DVec3::new(3.0, 0.0, 0.0));
        assert_eq!(gate.visit(Some(&far_side()), &visitor), Traversal::Continue);
    }

    #[test]
    fn test_non_cull_pass_always_descends() {
        let gate = unit_gate();
        for pass in [PassKind::Update, PassKind::Event] {
            let visitor = TestVisitor {
                pass,
                ..TestVisitor::cull(DVec3::new(3.0, 0.0, 0.0))
            };
            assert_eq!(gate.visit(Some(&far_side()), &visitor), Traversal::Continue);
        }
    }

    #[test]
    fn test_missing_node_descends() {
        let gate = unit_gate();
        let visitor = TestVisitor::cull(DVec3::new(3.0, 0.0, 0.0));
        assert!(gate.is_visible(None::<&BoundingSphere>, &visitor));
    }

    #[test]
    fn test_eye_inside_body_fails_open() {
        let gate = unit_gate();
        let visitor = TestVisitor::cull(DVec3::new(0.2, 0.0, 0.0));
        assert!(gate.is_visible(Some(&far_side()), &visitor));
    }

    #[test]
    fn test_local_to_world_applies_to_eye_and_bounds() {
        let gate = unit_gate();
        // Node space is world space rotated 180° about Z: local +X is world -X.
        let local_to_world = DMat4::from_rotation_z(std::f64::consts::PI);
        let visitor = TestVisitor {
            local_to_world,
            ..TestVisitor::cull(DVec3::new(-3.0, 0.0, 0.0))
        };
        // World eye is (3,0,0); local (1,0,0) maps to the far side.
        let local_far = BoundingSphere::new(DVec3::new(1.0, 0.0, 0.0), 0.1);
        assert_eq!(gate.visit(Some(&local_far), &visitor), Traversal::Skip);

        let local_near = BoundingSphere::new(DVec3::new(-1.0, 0.0, 0.0), 0.1);
        assert_eq!(gate.visit(Some(&local_near), &visitor), Traversal::Continue);
    }

    #[test]
    fn test_cull_runs_descend_only_when_visible() {
        let gate = unit_gate();
        let visitor = TestVisitor::cull(DVec3::new(3.0, 0.0, 0.0));

        let mut descended = false;
        let decision = gate.cull(Some(&far_side()), &visitor, || descended = true);
        assert_eq!(decision, Traversal::Skip);
        assert!(!descended);

        let near = BoundingSphere::new(DVec3::new(1.0, 0.0, 0.0), 0.0);
        let decision = gate.cull(Some(&near), &visitor, || descended = true);
        assert_eq!(decision, Traversal::Continue);
        assert!(descended);
    }

    #[test]
    fn test_visit_does_not_mutate_template() {
        let gate = unit_gate();
        let before = *gate.horizon();
        let visitor = TestVisitor::cull(DVec3::new(0.0, 5.0, 0.0));
        let _ = gate.visit(Some(&far_side()), &visitor);
        assert_eq!(*gate.horizon(), before);
    }

    #[test]
    fn test_set_ellipsoid_and_horizon() {
        let mut gate = HorizonCullGate::new();
        let small = Ellipsoid::sphere(1.0).unwrap();
        gate.set_ellipsoid(&small);
        assert_eq!(*gate.ellipsoid(), small);

        let flat = Ellipsoid::new(2.0, 1.0).unwrap();
        gate.set_horizon(HorizonTest::new(&flat));
        assert_eq!(*gate.ellipsoid(), flat);
    }
}
