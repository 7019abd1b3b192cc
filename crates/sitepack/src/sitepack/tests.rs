use std::path::Path;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use indoc::indoc;
use pretty_assertions::assert_eq;
use sitepack_core::diagnostic::Diagnostic;
use sitepack_core::diagnostic::Diagnostics;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_filesystem::FileSystem;
use sitepack_filesystem::MockFileSystem;

use super::*;
use crate::engine::import_scanner::scan_imports;
use crate::engine::import_scanner::ImportKind;
use crate::test_utils::make_sitepack;
use crate::test_utils::website_fs;
use crate::test_utils::website_fs_without;
use crate::test_utils::workspace_path;
use crate::test_utils::write_website;
use crate::test_utils::COMPILER_OUTPUT;
use crate::test_utils::ENTRY;
use crate::test_utils::PROJECT_ROOT;
use crate::watch::WatchEvent;
use crate::watch::WatchEventType;

fn dist(path: &str) -> PathBuf {
  Path::new(PROJECT_ROOT).join("dist").join(path)
}

fn read(fs: &dyn FileSystem, path: &Path) -> String {
  fs.read_to_string(path).unwrap()
}

#[test]
fn builds_the_website_with_the_builtin_config() {
  let fs = website_fs();
  let sitepack = make_sitepack(fs.clone(), Some(BuildMode::Development));

  let result = sitepack.build().unwrap();

  assert_eq!(result.dist_dir, dist(""));
  assert_eq!(result.externals, vec![String::from("../../../js/js.bc.js")]);
  assert_eq!(
    result.prebundled,
    vec![
      workspace_path("node_modules/react/index.js"),
      workspace_path("node_modules/react-dom/index.js"),
      workspace_path("node_modules/react-dom/client.js"),
    ]
  );
  assert_eq!(
    result
      .chunks
      .iter()
      .map(|chunk| (chunk.file_name.as_str(), chunk.is_worker))
      .collect::<Vec<_>>(),
    vec![("query.worker.js", true), ("Index.ml.js", false)]
  );

  // The compiler output is copied byte for byte
  assert_eq!(
    fs.read(&dist("_build/default/js/js.bc.js")).unwrap(),
    fs.read(&workspace_path(COMPILER_OUTPUT)).unwrap()
  );

  let html = read(&*fs, &dist("index.html"));
  assert_eq!(html.matches(r#"<div id="root"></div>"#).count(), 1);
  assert!(html.contains(r#"<script type="module" src="/assets/Index.ml.js"></script>"#));

  let chunk = read(&*fs, &dist("assets/Index.ml.js"));
  assert!(chunk.contains("import * as Jsoo from \"../../../js/js.bc.js\";"));
  assert!(chunk.contains("if (\"development\" !== \"production\")"));
  assert!(chunk.contains("new URL(\"./query.worker.js\", import.meta.url)"));
  assert!(!chunk.contains("duplicate editor"));

  let unbundled = scan_imports(&chunk)
    .into_iter()
    .filter(|import| import.kind != ImportKind::Worker)
    .map(|import| import.specifier)
    .collect::<Vec<_>>();
  assert_eq!(unbundled, vec![String::from("../../../js/js.bc.js")]);

  assert!(fs.is_file(&dist("assets/query.worker.js")));
  assert!(fs.is_file(&dist(MANIFEST_PATH)));
}

#[test]
fn unset_mode_follows_the_environment() {
  let sitepack = make_sitepack(website_fs(), None);

  let result = sitepack.build().unwrap();

  assert_eq!(result.mode, BuildMode::from_env());
}

#[test]
fn unrecognised_node_env_builds_in_development() {
  let fs = website_fs();
  let mode = BuildMode::from_env_value(Some("staging"));
  let sitepack = make_sitepack(fs.clone(), Some(mode));

  let result = sitepack.build().unwrap();
  let entry_chunk = result.chunks.iter().find(|chunk| !chunk.is_worker).unwrap();

  assert_eq!(result.mode, BuildMode::Development);
  let chunk = read(&*fs, &dist(&format!("assets/{}", entry_chunk.file_name)));
  assert!(chunk.contains("\"development\""));
  assert!(!chunk.contains("process.env.NODE_ENV"));
}

#[test]
fn production_builds_substitute_the_mode_and_hash_chunks() {
  let fs = website_fs();
  let sitepack = make_sitepack(fs.clone(), Some(BuildMode::Production));

  let result = sitepack.build().unwrap();
  let entry_chunk = result.chunks.iter().find(|chunk| !chunk.is_worker).unwrap();

  assert_ne!(entry_chunk.file_name, "Index.ml.js");
  assert!(entry_chunk.file_name.starts_with("Index.ml."));

  let chunk = read(&*fs, &dist(&format!("assets/{}", entry_chunk.file_name)));
  assert!(chunk.contains("if (\"production\" !== \"production\")"));
  assert!(!chunk.contains("process.env.NODE_ENV"));
  assert!(!chunk.contains("// _build/"));

  let html = read(&*fs, &dist("index.html"));
  assert!(html.contains(&format!("src=\"/assets/{}\"", entry_chunk.file_name)));
}

#[test]
fn missing_compiler_output_leaves_no_output_directory() {
  let fs = website_fs_without(&[COMPILER_OUTPUT]);
  let sitepack = make_sitepack(fs.clone(), Some(BuildMode::Development));

  let error = sitepack.build().unwrap_err();
  let diagnostics = error.downcast_ref::<Diagnostics>().unwrap();

  assert_eq!(
    diagnostics
      .as_ref()
      .iter()
      .map(|diagnostic| diagnostic.kind.clone())
      .collect::<Vec<_>>(),
    vec![ErrorKind::NotFound]
  );
  assert!(!fs.is_dir(&dist("")));
}

#[test]
fn failed_cleanup_keeps_the_partial_output() {
  let mut fs = MockFileSystem::new();
  fs.expect_is_dir().return_const(true);
  fs.expect_remove_directory()
    .times(1)
    .returning(|_| Err(std::io::Error::other("Device busy")));

  assert!(!remove_partial_output(&fs, &dist("")));
}

#[test]
fn cleanup_removes_the_partial_output() {
  let fs = website_fs();
  fs.write_file(&dist("index.html"), String::new());

  assert!(remove_partial_output(&*fs, &dist("")));
  assert!(!fs.is_dir(&dist("")));
  assert!(remove_partial_output(&*fs, &dist("")));
}

#[test]
fn missing_entry_and_alias_targets_are_reported_together() {
  let fs = website_fs_without(&[ENTRY]);
  fs.remove_directory(&workspace_path("node_modules/@monaco-editor/loader"))
    .unwrap();
  let sitepack = make_sitepack(fs, Some(BuildMode::Development));

  let error = sitepack.build().unwrap_err();
  let diagnostics = error.downcast_ref::<Diagnostics>().unwrap();

  assert_eq!(diagnostics.as_ref().len(), 2);
}

#[test]
fn assigning_to_the_replaced_token_fails_the_build() {
  let fs = website_fs();
  fs.write_file(
    &workspace_path(ENTRY),
    String::from("process.env.NODE_ENV = \"test\";\n"),
  );
  let sitepack = make_sitepack(fs.clone(), Some(BuildMode::Development));

  let error = sitepack.build().unwrap_err();

  assert_eq!(
    Diagnostic::from_error(&error).map(|diagnostic| diagnostic.kind.clone()),
    Some(ErrorKind::ConfigConflict)
  );
  assert!(!fs.is_dir(&dist("")));
}

#[test]
fn unresolvable_prebundled_dependencies_fail_the_build() {
  let fs = website_fs_without(&["node_modules/react-dom/client.js"]);
  let sitepack = make_sitepack(fs.clone(), Some(BuildMode::Development));

  let error = sitepack.build().unwrap_err();

  assert_eq!(
    Diagnostic::from_error(&error).map(|diagnostic| diagnostic.message.clone()),
    Some(format!(
      "Failed to resolve 'react-dom/client' from '{}'",
      workspace_path(ENTRY).display()
    ))
  );
  assert!(!fs.is_dir(&dist("")));
}

#[test]
fn rebuilding_replaces_the_previous_output() {
  let fs = website_fs();
  fs.write_file(&dist("assets/stale.js"), String::from("stale"));
  let sitepack = make_sitepack(fs.clone(), Some(BuildMode::Development));

  sitepack.build().unwrap();

  assert!(!fs.is_file(&dist("assets/stale.js")));
  assert!(fs.is_file(&dist("assets/Index.ml.js")));
}

#[test]
fn explicit_config_files_override_the_builtin_config() {
  let fs = website_fs();
  fs.write_file(
    Path::new("/ws/website/site.json5"),
    String::from(indoc! {r#"
      {
        entry: "_build/default/website/website/website/query.worker.js",
        mode: "production",
        worker: { format: "iife" },
        build: { outDir: "public" },
        plugins: [
          { html: { tags: [{ injectTo: "body-prepend", tag: "div", attrs: { id: "root" } }] } },
        ],
      }
    "#}),
  );
  let fs_ref: FileSystemRef = fs.clone();
  let sitepack = Sitepack::new(
    Some(fs_ref),
    Path::new(PROJECT_ROOT),
    SitepackOptions {
      config: Some(PathBuf::from("site.json5")),
      ..SitepackOptions::default()
    },
  )
  .unwrap();

  let result = sitepack.build().unwrap();

  assert_eq!(result.mode, BuildMode::Production);
  assert_eq!(result.worker_format, WorkerFormat::Iife);
  assert_eq!(result.dist_dir, Path::new(PROJECT_ROOT).join("public"));
  assert!(result.externals.is_empty());
  assert!(fs.is_file(&Path::new(PROJECT_ROOT).join("public/index.html")));
}

#[test]
fn options_take_precedence_over_the_config_file() {
  let fs = website_fs();
  fs.write_file(
    Path::new("/ws/website/sitepack.json5"),
    String::from(r#"{ entry: "_build/default/website/website/website/App.js", mode: "production" }"#),
  );
  let fs_ref: FileSystemRef = fs.clone();
  let sitepack = Sitepack::new(
    Some(fs_ref),
    Path::new(PROJECT_ROOT),
    SitepackOptions {
      dist_dir: Some(PathBuf::from("out")),
      mode: Some(BuildMode::Development),
      ..SitepackOptions::default()
    },
  )
  .unwrap();

  let descriptor = sitepack.descriptor().unwrap();

  assert_eq!(descriptor.mode, BuildMode::Development);
  assert_eq!(descriptor.dist_dir, Path::new(PROJECT_ROOT).join("out"));
  assert_eq!(
    descriptor.entry,
    workspace_path("website/_build/default/website/website/website/App.js")
  );
}

#[test]
fn watch_events_in_ignored_trees_do_not_rebuild() {
  let sitepack = make_sitepack(website_fs(), Some(BuildMode::Development));
  let event = |path: &str| WatchEvent {
    path: PathBuf::from(path),
    kind: WatchEventType::Update,
  };

  assert!(!sitepack
    .should_rebuild(&vec![
      event("/ws/website/.git/index"),
      event("/ws/website/_opam/lib/ocaml/stdlib.ml"),
      event("/ws/website/dist/assets/Index.ml.js"),
    ])
    .unwrap());
  assert!(sitepack
    .should_rebuild(&vec![event(
      "/ws/website/_build/default/website/website/website/Index.ml.js"
    )])
    .unwrap());
}

#[test]
fn builds_on_disk() {
  let temp_dir = TempDir::new().unwrap();
  let fs = OsFileSystem;
  write_website(&fs, temp_dir.path(), &[]);
  let sitepack = Sitepack::new(
    None,
    &temp_dir.path().join("website"),
    SitepackOptions {
      mode: Some(BuildMode::Development),
      ..SitepackOptions::default()
    },
  )
  .unwrap();

  sitepack.build().unwrap();

  let read_output =
    |path: &str| std::fs::read_to_string(temp_dir.child("website/dist").child(path).path()).unwrap();

  assert!(read_output("_build/default/js/js.bc.js").contains("globalThis.jsoo"));
  assert!(read_output("index.html").contains(r#"<div id="root"></div>"#));
  assert!(read_output("assets/Index.ml.js").contains("js.bc.js"));
}
