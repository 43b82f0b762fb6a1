//! Concurrent cull passes sharing one gate.

use std::thread;

use glam::{DMat4, DQuat, DVec3};
use horizon_cull::{
    BoundingSphere, CullVisitor, Ellipsoid, HorizonCullGate, HorizonTest, PassKind, Traversal,
};

struct View {
    eye: DVec3,
}

impl CullVisitor for View {
    fn pass(&self) -> PassKind {
        PassKind::Cull
    }

    fn view_point(&self) -> DVec3 {
        self.eye
    }

    fn local_to_world(&self) -> DMat4 {
        DMat4::IDENTITY
    }
}

/// Patches on the equator of a sphere of radius `radius`.
fn equator_patches(radius: f64, count: usize) -> Vec<BoundingSphere> {
    (0..count)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / count as f64;
            BoundingSphere::new(
                DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0),
                radius * 0.01,
            )
        })
        .collect()
}

#[test]
fn concurrent_views_match_sequential_results() {
    let radius = 6_371_000.0;
    let gate =
        HorizonCullGate::with_horizon(HorizonTest::new(&Ellipsoid::sphere(radius).unwrap()));
    let patches = equator_patches(radius, 360);
    let eyes: Vec<DVec3> = (0..8)
        .map(|i| DQuat::from_rotation_z(i as f64 * 0.8) * DVec3::new(radius * 1.5, 0.0, 0.0))
        .collect();

    let sequential: Vec<usize> = eyes
        .iter()
        .map(|&eye| {
            let view = View { eye };
            patches
                .iter()
                .filter(|p| gate.visit(Some(*p), &view) == Traversal::Continue)
                .count()
        })
        .collect();

    let parallel: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = eyes
            .iter()
            .map(|&eye| {
                let gate = &gate;
                let patches = &patches;
                scope.spawn(move || {
                    let view = View { eye };
                    patches
                        .iter()
                        .filter(|p| gate.visit(Some(*p), &view) == Traversal::Continue)
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
    for visible in parallel {
        // From 1.5 radii the visible cap spans acos(1/1.5) ≈ 48° either side.
        assert!(visible > 80 && visible < 120, "unexpected visible count {visible}");
    }
}

#[test]
fn per_thread_copies_are_independent() {
    let template = HorizonTest::new(&Ellipsoid::sphere(1.0).unwrap());
    let target = DVec3::new(-1.0, 0.0, 0.0);

    let results: Vec<bool> = thread::scope(|scope| {
        let near = scope.spawn(|| {
            template
                .with_eye(DVec3::new(-3.0, 0.0, 0.0))
                .is_visible(target, 0.0)
        });
        let far = scope.spawn(|| {
            template
                .with_eye(DVec3::new(3.0, 0.0, 0.0))
                .is_visible(target, 0.0)
        });
        vec![near.join().unwrap(), far.join().unwrap()]
    });

    assert_eq!(results, vec![true, false]);
    assert_eq!(template, HorizonTest::new(&Ellipsoid::sphere(1.0).unwrap()));
}
