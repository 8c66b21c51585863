//! Integration tests for source file discovery.

use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;
use template_extension_map::config::{BuildConfig, TemplateConfig};
use template_extension_map::core::{ExtensionMapError, user_friendly_error};
use template_extension_map::extension_map::ExtensionMap;
use template_extension_map::test_utils::{CountingEngineRegistry, init_test_logging};

const SITE_CONFIG: &str = r#"
template_formats = ["md", "njk", "scss", "png", "jpg"]

[[extension_map]]
extension = "scss"
key = "scss"

[[extension_map]]
extension = "sass"
key = "scss"
"#;

async fn load_map(content: &str) -> Result<ExtensionMap> {
    let temp = TempDir::new()?;
    let path = temp.path().join("site.toml");
    tokio::fs::write(&path, content).await?;

    let config = BuildConfig::load_from(&path).await?;
    let store = Arc::new(TemplateConfig::new(config));
    let engines = Arc::new(CountingEngineRegistry::with_builtin_engines());

    let mut map = ExtensionMap::new(store, engines)?;
    map.set_formats_from_config();
    Ok(map)
}

#[tokio::test]
async fn test_globs_from_config_file() -> Result<()> {
    init_test_logging(None);
    let map = load_map(SITE_CONFIG).await?;

    assert_eq!(map.valid_template_language_keys(), ["md", "njk", "scss"]);
    assert_eq!(map.passthrough_copy_keys(), ["png", "jpg"]);

    assert_eq!(map.get_valid_globs("src"), ["./src/**/*.{md,njk,scss,sass}"]);
    assert_eq!(map.get_passthrough_copy_globs("src"), ["./src/**/*.{png,jpg}"]);
    assert_eq!(map.get_globs("./src/"), ["./src/**/*.{md,njk,scss,sass,png,jpg}"]);
    Ok(())
}

#[tokio::test]
async fn test_classify_discovered_paths() -> Result<()> {
    let map = load_map(SITE_CONFIG).await?;

    assert!(map.is_full_template_file_path("./src/posts/hello.md"));
    assert!(map.is_full_template_file_path("./src/css/theme.sass"));
    assert!(!map.is_full_template_file_path("./src/img/logo.png"));
    // registered but not active
    assert!(!map.is_full_template_file_path("./src/index.liquid"));

    assert_eq!(map.get_key("./src/css/theme.sass").as_deref(), Some("scss"));
    assert_eq!(map.get_key("./src/index.liquid").as_deref(), Some("liquid"));
    assert!(!map.has_engine("./src/img/logo.png"));
    Ok(())
}

#[tokio::test]
async fn test_readable_extensions_include_custom() -> Result<()> {
    let map = load_map(SITE_CONFIG).await?;
    assert_eq!(
        map.get_readable_file_extensions(),
        "md html njk liquid 11ty.js 11ty.cjs 11ty.mjs scss sass"
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_registration_reported() -> Result<()> {
    let err = load_map("[[extension_map]]\nextension = \".SCSS\"\nkey = \"scss\"\n")
        .await
        .unwrap_err();

    let typed = err.downcast_ref::<ExtensionMapError>().unwrap();
    assert!(matches!(typed, ExtensionMapError::InvalidRegistration { .. }));

    let friendly = user_friendly_error(err);
    assert!(friendly.suggestion.is_some());
    Ok(())
}

#[test]
fn test_single_and_empty_globs() {
    let store = Arc::new(TemplateConfig::new(BuildConfig::default()));
    let engines = Arc::new(CountingEngineRegistry::new());
    let mut map = ExtensionMap::new(store, engines).unwrap();

    map.set_formats(["liquid"]);
    assert_eq!(map.get_globs("content"), ["./content/**/*.liquid"]);
    assert!(map.get_passthrough_copy_globs("content").is_empty());

    map.set_formats(Vec::<String>::new());
    assert!(map.get_globs("content").is_empty());
}
