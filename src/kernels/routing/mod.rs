//! # Routing Module
//!
//! Dispatch helpers that walk a resolved broadcast plan and apply a kernel
//! function to every aligned pair of operand elements.

pub mod binary_map;

pub use binary_map::binary_map;
