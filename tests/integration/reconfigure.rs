//! Integration tests for configuration changes and resets.

use std::sync::Arc;

use template_extension_map::config::{BuildConfig, ConfigStore, TemplateConfig};
use template_extension_map::core::ExtensionMapError;
use template_extension_map::extension_map::ExtensionMap;
use template_extension_map::test_utils::CountingEngineRegistry;

#[test]
fn test_store_update_rebuilds_table_but_not_formats() {
    let store = Arc::new(TemplateConfig::new(BuildConfig::default()));
    let engines = Arc::new(CountingEngineRegistry::new());
    let mut map = ExtensionMap::new(store.clone(), engines).unwrap();
    map.set_formats(["md", "vue"]);
    assert_eq!(map.passthrough_copy_keys(), ["vue"]);

    store.update(|config| config.add_extension("vue", "vue")).unwrap();

    // the table follows the new snapshot immediately
    assert!(map.has_extension("vue"));
    assert_eq!(map.get_key("App.vue").as_deref(), Some("vue"));
    // the classification is only recomputed by set_formats
    assert_eq!(map.passthrough_copy_keys(), ["vue"]);

    map.set_formats(["md", "vue"]);
    assert_eq!(map.valid_template_language_keys(), ["md", "vue"]);
    assert!(map.passthrough_copy_keys().is_empty());
}

#[test]
fn test_rejected_update_keeps_current_table() {
    let store = Arc::new(TemplateConfig::new(BuildConfig::default()));
    let engines = Arc::new(CountingEngineRegistry::new());
    let map = ExtensionMap::new(store.clone(), engines).unwrap();
    let table = map.extension_table();

    let result = store.update(|config| {
        config.add_extension("vue", "vue")?;
        config.add_extension("Svelte", "svelte")
    });

    assert!(matches!(result, Err(ExtensionMapError::InvalidRegistration { .. })));
    assert!(!map.has_extension("vue"));
    assert!(Arc::ptr_eq(&table, &map.extension_table()));
}

#[test]
fn test_store_reset_drops_custom_extensions() {
    let mut config = BuildConfig::default();
    config.add_extension("vue", "vue").unwrap();
    let store = Arc::new(TemplateConfig::new(config));
    let engines = Arc::new(CountingEngineRegistry::new());
    let map = ExtensionMap::new(store.clone(), engines).unwrap();
    assert!(map.has_engine("App.vue"));

    store.reset();
    assert!(!map.has_engine("App.vue"));
}

#[test]
fn test_map_reset_only_resets_engines() {
    let store = Arc::new(TemplateConfig::new(BuildConfig::default()));
    let engines = Arc::new(CountingEngineRegistry::new());
    let map = ExtensionMap::new(store, engines.clone()).unwrap();
    let keys = map.get_all_template_keys();
    let table = map.extension_table();

    map.reset();
    map.reset();

    assert_eq!(engines.reset_count(), 2);
    assert!(Arc::ptr_eq(&table, &map.extension_table()));
    assert_eq!(map.get_all_template_keys(), keys);
}

#[test]
fn test_shared_snapshot_store() {
    let mut config = BuildConfig::default();
    config.add_extension("11ty.ts", "11ty.js").unwrap();
    let snapshot = Arc::new(config);
    assert!(snapshot.snapshot().is_some());

    let engines = Arc::new(CountingEngineRegistry::new());
    let map = ExtensionMap::new(Arc::new(snapshot), engines).unwrap();
    assert_eq!(
        map.get_extensions_from_key("11ty.js"),
        ["11ty.js", "11ty.cjs", "11ty.mjs", "11ty.ts"]
    );
}
