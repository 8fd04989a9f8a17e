//! Toolchain layout verifier.
//!
//! Builds byte images of `#[repr(C)]` aggregates that mix unions, nested
//! unions and fields of different widths. An image captured on a trusted
//! build is compared against one from the build under test; any difference
//! means the two toolchains pad or overlay aggregates differently.
mod aggregates;
pub mod error;
mod image;
pub mod manifest;
mod stamp;
mod verify;

pub use image::{compare, LayoutDiff, LayoutImage};
pub use verify::{all_images, verify_layout, verify_particle_config_layout, verify_struct_layout};
