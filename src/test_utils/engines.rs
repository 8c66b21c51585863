//! Engine registry double.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::config::ExtensionRegistration;
use crate::engine::{EngineClass, EngineClassRef, EngineRegistry};

/// Engine class with a fixed spidering answer.
///
/// A custom registration carrying an explicit
/// `compile_options.spider_javascript_dependencies` overrides the default,
/// the way a user-defined engine honours its registration options.
#[derive(Debug, Clone)]
pub struct StaticEngineClass {
    name: String,
    spiders: bool,
}

impl StaticEngineClass {
    /// Engine that never spiders unless its registration asks it to.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spiders: false,
        }
    }

    /// Engine that spiders by default.
    pub fn spidering(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spiders: true,
        }
    }

    /// Wrap in an [`EngineClassRef`].
    pub fn into_ref(self) -> EngineClassRef {
        Arc::new(self)
    }
}

impl EngineClass for StaticEngineClass {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_spider_javascript_dependencies(&self, entry: Option<&ExtensionRegistration>) -> bool {
        entry
            .and_then(ExtensionRegistration::spider_javascript_dependencies)
            .unwrap_or(self.spiders)
    }
}

/// Engine registry that resolves from a fixed map and counts lookups.
#[derive(Default)]
pub struct CountingEngineRegistry {
    engines: HashMap<String, EngineClassRef>,
    lookups: Mutex<HashMap<String, usize>>,
    resets: AtomicUsize,
}

impl CountingEngineRegistry {
    /// Empty registry: every lookup resolves nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in engines bound to the built-in extensions.
    ///
    /// Only the `11ty.js` family spiders.
    pub fn with_builtin_engines() -> Self {
        let javascript = StaticEngineClass::spidering("JavaScript").into_ref();
        Self::new()
            .with_engine("md", StaticEngineClass::new("Markdown").into_ref())
            .with_engine("html", StaticEngineClass::new("Html").into_ref())
            .with_engine("njk", StaticEngineClass::new("Nunjucks").into_ref())
            .with_engine("liquid", StaticEngineClass::new("Liquid").into_ref())
            .with_engine("11ty.js", Arc::clone(&javascript))
            .with_engine("11ty.cjs", Arc::clone(&javascript))
            .with_engine("11ty.mjs", javascript)
    }

    /// Bind `extension` to `class`.
    #[must_use]
    pub fn with_engine(mut self, extension: impl Into<String>, class: EngineClassRef) -> Self {
        self.engines.insert(extension.into(), class);
        self
    }

    /// Number of lookups made for `extension`.
    pub fn lookups_for(&self, extension: &str) -> usize {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(extension)
            .copied()
            .unwrap_or(0)
    }

    /// Number of lookups made for any extension.
    pub fn total_lookups(&self) -> usize {
        self.lookups.lock().unwrap_or_else(PoisonError::into_inner).values().sum()
    }

    /// Number of `reset` calls.
    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl EngineRegistry for CountingEngineRegistry {
    fn engine_class_by_extension<'a>(
        &'a self,
        extension: &'a str,
    ) -> BoxFuture<'a, Option<EngineClassRef>> {
        async move {
            *self
                .lookups
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(extension.to_string())
                .or_insert(0) += 1;
            tokio::task::yield_now().await;
            self.engines.get(extension).cloned()
        }
        .boxed()
    }

    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}
