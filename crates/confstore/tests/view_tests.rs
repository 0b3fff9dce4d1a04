//! Scoped views and the `Configurable` capability

use std::ptr;

use confstore::{ConfigEntry, ConfigRead, ConfigStore, Configurable, Subconfiguration};
use confstore_test_utils::ConfigDir;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn app_store(dir: &ConfigDir) -> ConfigStore {
    dir.seed(
        "app",
        &json!({
            "window": {
                "title": "Main",
                "size": {"width": 800, "height": 600}
            },
            "theme": "dark"
        }),
    );
    ConfigStore::load("app", dir.path()).unwrap()
}

fn root_name(configurable: &dyn Configurable) -> &str {
    configurable.as_configuration().name()
}

#[test]
fn test_nested_views_resolve_to_the_same_root() {
    let dir = ConfigDir::new();
    let store = app_store(&dir);

    let window = store.subconfiguration("window");
    let size = window.subconfiguration("size");

    assert!(ptr::eq(size.as_configuration(), window.as_configuration()));
    assert!(ptr::eq(size.as_configuration(), &store));
    assert!(ptr::eq(store.as_configuration(), &store));
}

#[test]
fn test_as_subconfiguration() {
    let dir = ConfigDir::new();
    let store = app_store(&dir);
    let window = store.subconfiguration("window");

    assert!(store.as_subconfiguration().is_none());
    let local = window.as_subconfiguration().unwrap();
    assert!(ptr::eq(local, &window));
    assert_eq!(local.get_as_string("title").unwrap(), "Main");
}

#[test]
fn test_dyn_configurable_reaches_root_from_any_depth() {
    let dir = ConfigDir::new();
    let store = app_store(&dir);
    let window = store.subconfiguration("window");
    let size = window.subconfiguration("size");

    assert_eq!(root_name(&store), "app");
    assert_eq!(root_name(&window), "app");
    assert_eq!(root_name(&size), "app");
}

#[test]
fn test_parent_is_the_immediate_parent() {
    let dir = ConfigDir::new();
    let store = app_store(&dir);
    let window = store.subconfiguration("window");
    let size = window.subconfiguration("size");

    let parent = size.parent().as_subconfiguration().unwrap();
    assert!(ptr::eq(parent, &window));
    assert!(window.parent().as_subconfiguration().is_none());
}

#[test]
fn test_view_reads_nested_object() {
    let dir = ConfigDir::new();
    let store = app_store(&dir);
    let size = store.subconfiguration("window").subconfiguration("size").jsonify();

    assert_eq!(Value::Object(size), json!({"width": 800, "height": 600}));
}

#[test]
fn test_view_over_missing_or_non_object_key_is_empty() {
    let dir = ConfigDir::new();
    let store = app_store(&dir);

    assert!(store.subconfiguration("missing").is_empty());
    assert!(store.subconfiguration("theme").is_empty());
}

#[test]
fn test_view_mutations_stay_local() {
    let dir = ConfigDir::new();
    let store = app_store(&dir);
    let mut window = store.subconfiguration("window");

    window
        .add("title", "Renamed")
        .add_entry(ConfigEntry::new("maximized", true))
        .remove("size");

    assert_eq!(
        Value::Object(window.jsonify()),
        json!({"title": "Renamed", "maximized": true})
    );
    assert_eq!(
        store.get("window"),
        Some(&json!({"title": "Main", "size": {"width": 800, "height": 600}}))
    );

    window.clear();
    assert!(window.is_empty());
}

#[test]
fn test_view_written_back_and_saved_through_root() {
    let dir = ConfigDir::new();
    let mut store = app_store(&dir);

    let mut window = store.subconfiguration("window");
    window.add("title", "Renamed");
    let entry = window.into_entry("window");
    store.add(entry);

    {
        let window = store.subconfiguration("window");
        let size = window.subconfiguration("size");
        size.as_configuration().save().unwrap();
    }

    assert_eq!(dir.read_json("app")["window"]["title"], json!("Renamed"));
    assert!(store.is_synced().unwrap());
}

#[test]
fn test_explicit_views_over_fresh_documents() {
    let dir = ConfigDir::new();
    let mut store = ConfigStore::load("app", dir.path()).unwrap();

    let mut plugins = Subconfiguration::new(&store);
    plugins.add("enabled", json!(["git", "lint"]));
    let mut git = Subconfiguration::new(&plugins);
    git.add("autofetch", true);
    assert!(ptr::eq(git.as_configuration(), &store));

    let git_document = git.into_document();
    plugins.add("git", Value::Object(git_document));
    let entry = plugins.into_entry("plugins");
    store.add(entry);

    assert_eq!(
        store.get("plugins"),
        Some(&json!({"enabled": ["git", "lint"], "git": {"autofetch": true}}))
    );
}

#[test]
fn test_views_do_not_touch_disk() {
    let dir = ConfigDir::new();
    let store = app_store(&dir);
    let before = dir.read_raw("app");

    let mut window = store.subconfiguration("window");
    window.add("title", "Renamed").clear();

    assert_eq!(dir.read_raw("app"), before);
}

#[test]
fn test_view_displays_as_compact_json() {
    let dir = ConfigDir::new();
    let store = app_store(&dir);

    let window = store.subconfiguration("window");
    assert_eq!(
        window.to_string(),
        r#"{"title":"Main","size":{"width":800,"height":600}}"#
    );

    let mut size = window.subconfiguration("size");
    size.remove("height");
    assert_eq!(size.to_string(), r#"{"width":800}"#);
}
