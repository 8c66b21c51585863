//! Build configuration and extension map fixtures.

use std::sync::Arc;

use crate::config::{BuildConfig, CompileOptions, ExtensionRegistration, TemplateConfig};
use crate::extension_map::ExtensionMap;

use super::CountingEngineRegistry;

/// Configuration with a handful of typical custom registrations.
///
/// - `scss` -> `scss` (a stylesheet engine)
/// - `11ty.ts` -> `11ty.js` with spidering disabled explicitly
/// - `jsx` -> `11ty.js`
pub fn custom_build_config() -> BuildConfig {
    let options = CompileOptions {
        spider_javascript_dependencies: Some(false),
    };
    BuildConfig {
        extension_map: Some(vec![
            ExtensionRegistration::new("scss", "scss"),
            ExtensionRegistration::new("11ty.ts", "11ty.js").with_compile_options(options),
            ExtensionRegistration::new("jsx", "11ty.js"),
        ]),
        ..BuildConfig::default()
    }
}

/// Extension map over `config` with built-in engines, no formats set.
pub fn extension_map_with_config(
    config: BuildConfig,
) -> (ExtensionMap, Arc<CountingEngineRegistry>, Arc<TemplateConfig>) {
    let store = Arc::new(TemplateConfig::new(config));
    let engines = Arc::new(CountingEngineRegistry::with_builtin_engines());
    let map = ExtensionMap::new(store.clone(), engines.clone())
        .unwrap_or_else(|e| panic!("fixture store is bound: {e}"));
    (map, engines, store)
}

/// Extension map over the default configuration with `formats` active.
pub fn extension_map_with_formats(formats: &[&str]) -> (ExtensionMap, Arc<CountingEngineRegistry>) {
    let (mut map, engines, _) = extension_map_with_config(BuildConfig::default());
    map.set_formats(formats);
    (map, engines)
}
