//! The animated starfield.
//!
//! A [`Starfield`] owns a fixed set of twinkling [`Star`]s, the
//! [`ShootingStar`]s currently crossing the sky, and the [`Focus`] animation
//! that swells one chosen star and then fires the reveal exactly once.
//!
//! The field is painted through the [`Canvas`] trait so it can run against a
//! browser canvas, a native surface, or a recording [`DisplayList`].

mod canvas;
mod config;
mod field;
mod focus;
mod shooting;
mod star;

pub use canvas::*;
pub use config::*;
pub use field::*;
pub use focus::*;
pub use shooting::*;
pub use star::*;
