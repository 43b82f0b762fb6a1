//! Horizon culling for ellipsoidal bodies: a closed-form occlusion test
//! ([`HorizonTest`]) and the traversal hook that applies it
//! ([`HorizonCullGate`]).

mod bounds;
mod ellipsoid;
mod error;
mod gate;
mod horizon;
mod plane;
mod traversal;

pub use bounds::BoundingSphere;
pub use ellipsoid::Ellipsoid;
pub use error::HorizonError;
pub use gate::HorizonCullGate;
pub use horizon::HorizonTest;
pub use plane::Plane;
pub use traversal::{Bounded, CullVisitor, PassKind, Traversal};
