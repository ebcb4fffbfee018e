//! End-to-end tests for the `tapestry` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn tapestry_bin() -> &'static str {
    env!("CARGO_BIN_EXE_tapestry")
}

/// Run in `dir` with the user config dir pointed inside it.
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(tapestry_bin())
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn assert_success(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(0),
        "command failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn new_then_generate_writes_react_native_project() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();

    assert_success(&run(dir, &["new", "login.json", "--kinds", "header,card,>input,>button,text"]));
    let document = fs::read_to_string(dir.join("login.json")).unwrap();
    assert!(document.contains("\"kind\": \"input\""));

    let output = run(dir, &["generate", "login.json", "--out", "app"]);
    assert_success(&output);
    for path in [
        "app/src/screens/LoginScreen.js",
        "app/src/screens/LoginScreen.styles.js",
        "app/App.js",
        "app/app.json",
        "app/package.json",
    ] {
        assert!(dir.join(path).is_file(), "{} should be created", path);
    }
    let summary = stdout(&output);
    assert!(summary.contains("react-native-keyboard-aware-scroll-view"));
    assert!(summary.contains("npx expo start"));
}

#[test]
fn generate_flutter_inline_styles_with_json_summary() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    assert_success(&run(dir, &["new", "feed.json", "--kinds", "heading,image"]));

    let output = run(
        dir,
        &["generate", "feed.json", "-o", "out", "--target", "flutter", "--inline-styles", "--json"],
    );
    assert_success(&output);
    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["files"][0], "lib/screens/feed_screen.dart");
    assert!(!dir.join("out/lib/screens/feed_styles.dart").exists());
    let screen = fs::read_to_string(dir.join("out/lib/screens/feed_screen.dart")).unwrap();
    assert!(screen.contains("class AppStyles"));
    assert!(screen.contains("CachedNetworkImage("));
}

#[test]
fn local_config_sets_defaults_and_flags_override() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    fs::write(dir.join("tapestry.toml"), "[generate]\ntarget = \"react-native-ts\"\n").unwrap();
    assert_success(&run(dir, &["new", "home.json", "--kinds", "text"]));

    assert_success(&run(dir, &["generate", "home.json", "--out", "ts"]));
    assert!(dir.join("ts/src/screens/HomeScreen.tsx").is_file());
    assert!(dir.join("ts/tsconfig.json").is_file());

    assert_success(&run(dir, &["generate", "home.json", "--out", "dart", "--target", "flutter"]));
    assert!(dir.join("dart/pubspec.yaml").is_file());
}

#[test]
fn invalid_config_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    fs::write(dir.join("bad.toml"), "[editor]\nhistory_capacity = \"lots\"\n").unwrap();

    let output = run(dir, &["--config", "bad.toml", "catalog"]);
    assert_ne!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad.toml"));
}

#[test]
fn unknown_kinds_warn_but_generate() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    fs::write(
        dir.join("doc.json"),
        r#"{"name": "Home", "nodes": [{"id": "x", "kind": "carousel"}]}"#,
    )
    .unwrap();

    let output = run(dir, &["generate", "doc.json", "--out", "app"]);
    assert_success(&output);
    assert!(stdout(&output).contains("warning: node 'x' has unknown kind 'carousel'"));
}

#[test]
fn invalid_document_fails() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    fs::write(
        dir.join("doc.json"),
        r#"{"name": "Home", "nodes": [{"id": "a", "kind": "text"}, {"id": "a", "kind": "text"}]}"#,
    )
    .unwrap();

    let output = run(dir, &["generate", "doc.json", "--out", "app"]);
    assert_ne!(output.status.code(), Some(0));
    assert!(!dir.join("app").exists());
}

#[test]
fn template_save_list_load() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    assert_success(&run(dir, &["new", "profile.json", "--kinds", "avatar,heading"]));

    let saved = run(dir, &["template", "--dir", "store", "save", "Profile", "profile.json"]);
    assert_success(&saved);
    let id = stdout(&saved).trim().to_string();
    assert!(dir.join("store").join(format!("{}.json", id)).is_file());

    let listed = run(dir, &["template", "list", "--dir", "store"]);
    assert_success(&listed);
    assert!(stdout(&listed).contains(&format!("{}  Profile  (2 nodes)", id)));

    assert_success(&run(dir, &["template", "load", &id, "--dir", "store", "--out", "copy.json"]));
    let original: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("profile.json")).unwrap()).unwrap();
    let copy: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.join("copy.json")).unwrap()).unwrap();
    assert_eq!(original, copy);

    let missing = run(dir, &["template", "load", "nope", "--dir", "store"]);
    assert_ne!(missing.status.code(), Some(0));

    fs::write(dir.join("outside.json"), r#"{"name": "Outside", "document": {"name": "Outside", "nodes": []}}"#).unwrap();
    let escaped = run(dir, &["template", "load", "../outside", "--dir", "store"]);
    assert_ne!(escaped.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&escaped.stderr).contains("Invalid document id"));
}

#[test]
fn catalog_json_lists_every_kind() {
    let temp = tempfile::tempdir().unwrap();
    let output = run(temp.path(), &["catalog", "--json"]);
    assert_success(&output);
    let kinds: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(kinds.as_array().map(Vec::len), Some(16));
}
