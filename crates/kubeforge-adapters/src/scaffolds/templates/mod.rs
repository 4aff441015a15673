//! Built-in template bodies. Rendered by the template engine port; see
//! `crate::engine` for the helpers they may call.

pub mod api;
pub mod controller;
pub mod project;
pub mod webhook;
