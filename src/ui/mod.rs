//! UI shell: thin egui glue that renders the session's display bindings and
//! forwards control changes back to it.

pub mod grid;
pub mod panels;
pub mod plot;
