//! Interactive penguin measurements dashboard.
//!
//! The library holds everything below the UI: the [`data`] layer, the
//! [`reactive`] primitives, the per-user [`session`] with its cached
//! [`bindings`], plus the egui shell in [`app`] and [`ui`].

pub mod app;
pub mod bindings;
pub mod color;
pub mod config;
pub mod data;
pub mod reactive;
pub mod session;
pub mod state;
pub mod ui;
