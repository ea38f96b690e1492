//! IDE features module.

pub mod backend;
pub mod completion;
pub mod decoration;
mod handlers;
pub mod hover;
pub mod render;
pub mod state;
