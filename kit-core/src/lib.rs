//! kit-core: shared primitives for the kit designer.
//!
//! Design rules:
//! - Colors are typed, parsed once at the edge, and always written back as `#rrggbb`.
//! - Placements always exist, even when the decal they position is absent.
//! - Every scalar that comes from a slider goes through [`Bounded`].

pub mod bounded;
pub mod color;
pub mod placement;

pub use bounded::{Bounded, BoundsError};
pub use color::{ColorError, KitColor};
pub use placement::{Placement, Side, Vec3, SURFACE_DEPTH};
