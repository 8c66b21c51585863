//! Integration tests for layout resolution helpers.

use template_extension_map::config::BuildConfig;
use template_extension_map::test_utils::fixtures::{
    extension_map_with_config, extension_map_with_formats,
};

#[test]
fn test_layout_candidates_follow_activation_order() {
    let (map, _) = extension_map_with_formats(&["html", "md"]);
    assert_eq!(
        map.get_file_list("about", Some("layouts")),
        ["layouts/about.html", "layouts/about.md"]
    );

    let (map, _) = extension_map_with_formats(&["md", "html"]);
    assert_eq!(
        map.get_file_list("about", Some("layouts")),
        ["layouts/about.md", "layouts/about.html"]
    );
}

#[test]
fn test_layout_candidates_include_custom_aliases() {
    let mut config = BuildConfig::default();
    config.add_extension("markdown", "md").unwrap();
    let (mut map, _, _) = extension_map_with_config(config);
    map.set_formats(["md", "png"]);

    assert_eq!(
        map.get_file_list("post", Some("_layouts")),
        ["_layouts/post.md", "_layouts/post.markdown"]
    );
}

#[test]
fn test_strip_then_rebuild_layout_name() {
    let (map, _) = extension_map_with_formats(&["njk", "md"]);

    let name = map.remove_template_extension("base.njk");
    assert_eq!(name, "base");
    assert_eq!(
        map.get_file_list(name, Some("_includes")),
        ["_includes/base.njk", "_includes/base.md"]
    );
}

#[test]
fn test_strip_short_inputs() {
    let (map, _) = extension_map_with_formats(&[]);
    for input in ["", "m", "d", ".", "md", "x.md", ".njk"] {
        let stripped = map.remove_template_extension(input);
        assert!(input.starts_with(stripped), "{input:?} -> {stripped:?}");
    }
}
