//! Template engine registry seam.
//!
//! The extension map does not render anything. It only asks an
//! [`EngineRegistry`] which [`EngineClass`] handles an extension, and then
//! asks that class one capability question: does it need its JavaScript
//! module graph walked to discover build dependencies.
//!
//! The registry is asynchronous because engine classes may be loaded lazily
//! (for example from plugins). Futures are boxed so the registry can be held
//! as `Arc<dyn EngineRegistry>`.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::config::ExtensionRegistration;

/// Shared handle to an engine class.
pub type EngineClassRef = Arc<dyn EngineClass>;

/// Static capabilities of a template engine implementation.
pub trait EngineClass: Send + Sync {
    /// Engine name for diagnostics.
    fn name(&self) -> &str;

    /// Whether files handled by this engine need dependency spidering.
    ///
    /// `entry` is the custom registration for the extension being resolved,
    /// or `None` for built-in extensions.
    fn should_spider_javascript_dependencies(&self, entry: Option<&ExtensionRegistration>) -> bool;
}

/// Lookup service from extension to engine class.
pub trait EngineRegistry: Send + Sync {
    /// Resolve the engine class bound to `extension`, if any.
    fn engine_class_by_extension<'a>(
        &'a self,
        extension: &'a str,
    ) -> BoxFuture<'a, Option<EngineClassRef>>;

    /// Forget previously resolved engine classes.
    fn reset(&self);
}
