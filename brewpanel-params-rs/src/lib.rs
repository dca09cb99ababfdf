//! Bounded operating parameters of the brew controller.
//!
//! See [`parameters`] for the data model and the repository seam used by
//! the menu.

#![no_std]

pub mod parameters;
