//! # Vigil Core
//!
//! Name-keyed registries through which the engine resolves a monitor's or
//! notification's `type` to a plugin implementation. The engine never
//! branches on a concrete plugin; it only looks names up here.

pub mod registry;

pub use registry::{MonitorTypeRegistry, NotificationTypeRegistry};
