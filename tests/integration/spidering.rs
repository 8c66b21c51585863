//! Integration tests for JavaScript dependency spidering decisions.

use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use template_extension_map::config::{BuildConfig, CompileOptions, TemplateConfig};
use template_extension_map::extension_map::ExtensionMap;
use template_extension_map::test_utils::{
    CountingEngineRegistry, StaticEngineClass, init_test_logging,
};

fn site_map(engines: Arc<CountingEngineRegistry>) -> Result<ExtensionMap> {
    let mut config = BuildConfig::default();
    config.add_extension("js", "js")?;
    config.add_extension_with_options(
        "11ty.tsx",
        "11ty.js",
        CompileOptions {
            spider_javascript_dependencies: Some(false),
        },
    )?;
    config.set_template_formats(["md", "11ty.js", "js"]);

    let store = Arc::new(TemplateConfig::new(config));
    let mut map = ExtensionMap::new(store, engines)?;
    map.set_formats_from_config();
    Ok(map)
}

#[tokio::test]
async fn test_longest_extension_selects_engine() -> Result<()> {
    init_test_logging(None);
    let engines = Arc::new(
        CountingEngineRegistry::with_builtin_engines()
            .with_engine("js", StaticEngineClass::new("PlainJs").into_ref()),
    );
    let map = site_map(engines.clone())?;

    assert_eq!(map.get_valid_extensions_for_path("feed.11ty.js"), ["11ty.js", "js"]);
    // `11ty.js` resolves first and spiders; `js` is never consulted
    assert!(map.should_spider_javascript_dependencies("feed.11ty.js").await);
    assert_eq!(engines.lookups_for("js"), 0);

    // plain scripts use the non-spidering engine
    assert!(!map.should_spider_javascript_dependencies("assets/app.js").await);
    assert_eq!(engines.lookups_for("js"), 1);
    Ok(())
}

#[tokio::test]
async fn test_registration_options_reach_engine() -> Result<()> {
    let javascript = StaticEngineClass::spidering("JavaScript").into_ref();
    let engines = Arc::new(CountingEngineRegistry::new().with_engine("11ty.tsx", javascript));
    let map = site_map(engines.clone())?;

    assert!(!map.should_spider_javascript_dependencies("Page.11ty.tsx").await);
    assert!(!map.should_spider_javascript_dependencies("Other.11ty.tsx").await);
    assert_eq!(engines.lookups_for("11ty.tsx"), 1);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_decisions_agree() -> Result<()> {
    let engines = Arc::new(CountingEngineRegistry::with_builtin_engines());
    let map = Arc::new(site_map(engines.clone())?);

    let tasks = (0..16).map(|i| {
        let map = Arc::clone(&map);
        tokio::spawn(async move {
            map.should_spider_javascript_dependencies(&format!("p{i}.11ty.js")).await
        })
    });
    let results: Vec<bool> = join_all(tasks).await.into_iter().collect::<Result<_, _>>()?;

    assert!(results.iter().all(|spider| *spider));
    // duplicate in-flight lookups are allowed, but the decision is cached once
    assert!(engines.lookups_for("11ty.js") >= 1);
    assert_eq!(map.spider_cache_len(), 1);

    let before = engines.lookups_for("11ty.js");
    assert!(map.should_spider_javascript_dependencies("late.11ty.js").await);
    assert_eq!(engines.lookups_for("11ty.js"), before);
    Ok(())
}
