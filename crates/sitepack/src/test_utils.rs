use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use indoc::indoc;
use sitepack_config::PipelineDescriptor;
use sitepack_core::plugin::PluginContext;
use sitepack_core::plugin::PluginOptions;
use sitepack_core::types::BuildMode;
use sitepack_filesystem::in_memory_file_system::InMemoryFileSystem;
use sitepack_filesystem::FileSystem;
use sitepack_filesystem::FileSystemRef;

use crate::plugins::ConfigPlugins;
use crate::Sitepack;
use crate::SitepackOptions;

pub(crate) const WORKSPACE_ROOT: &str = "/ws";
pub(crate) const PROJECT_ROOT: &str = "/ws/website";
pub(crate) const ENTRY: &str = "website/_build/default/website/website/website/Index.ml.js";
pub(crate) const COMPILER_OUTPUT: &str = "website/_build/default/js/js.bc.js";

/// The query-json workspace: the website project, its compiled sources and the shared node_modules
///
/// Paths are relative to the workspace root.
pub(crate) fn website_files() -> Vec<(&'static str, String)> {
  vec![
    (
      ENTRY,
      String::from(indoc! {r#"
        import * as React from "react";
        import * as Client from "react-dom/client";
        import Editor from "@monaco-editor/react";
        import * as Jsoo from "../../../js/js.bc.js";
        import { App } from "./App.js";

        if (process.env.NODE_ENV !== "production") {
          console.log("development build");
        }

        const worker = new Worker(new URL("./query.worker.js", import.meta.url), { type: "module" });
        Client.createRoot(document.getElementById("root")).render(React.createElement(App, { Editor, Jsoo, worker }));
      "#}),
    ),
    (
      "website/_build/default/website/website/website/App.js",
      String::from(indoc! {r#"
        import * as React from "react";
        export const App = () => React.createElement("main");
      "#}),
    ),
    (
      "website/_build/default/website/website/website/query.worker.js",
      String::from("self.onmessage = (event) => self.postMessage(event.data);\n"),
    ),
    (
      COMPILER_OUTPUT,
      String::from("(function (globalThis) { globalThis.jsoo = {}; })(globalThis);\n"),
    ),
    (
      "website/index.html",
      String::from(indoc! {r#"
        <!DOCTYPE html>
        <html lang="en">
          <head>
            <meta charset="UTF-8" />
            <title>query-json playground</title>
          </head>
          <body>
          </body>
        </html>
      "#}),
    ),
    (
      "node_modules/react/package.json",
      String::from(r#"{ "name": "react", "main": "index.js" }"#),
    ),
    (
      "node_modules/react/index.js",
      String::from("export const createElement = () => null;\n"),
    ),
    (
      "node_modules/react-dom/package.json",
      String::from(r#"{ "name": "react-dom", "main": "index.js" }"#),
    ),
    (
      "node_modules/react-dom/index.js",
      String::from("export const version = \"18\";\n"),
    ),
    (
      "node_modules/react-dom/client.js",
      String::from("export const createRoot = () => ({ render() {} });\n"),
    ),
    (
      "node_modules/@monaco-editor/react/package.json",
      String::from(r#"{ "name": "@monaco-editor/react", "module": "lib/es/index.js" }"#),
    ),
    (
      "node_modules/@monaco-editor/react/lib/es/index.js",
      String::from(indoc! {r#"
        import loader from "@monaco-editor/loader";
        export default function Editor() { return loader; }
      "#}),
    ),
    (
      "node_modules/@monaco-editor/loader/package.json",
      String::from(r#"{ "name": "@monaco-editor/loader", "module": "lib/es/index.js" }"#),
    ),
    (
      "node_modules/@monaco-editor/loader/lib/es/index.js",
      String::from("export default { init() {} };\n"),
    ),
    (
      "node_modules/monaco-editor/esm/vs/editor/editor.api.js",
      String::from("export const editor = {};\n"),
    ),
    // A second copy that only the aliases keep out of the bundle
    (
      "website/node_modules/@monaco-editor/react/package.json",
      String::from(r#"{ "name": "@monaco-editor/react", "module": "index.js" }"#),
    ),
    (
      "website/node_modules/@monaco-editor/react/index.js",
      String::from("export default \"duplicate editor\";\n"),
    ),
  ]
}

pub(crate) fn write_website(fs: &dyn FileSystem, workspace_root: &Path, skip: &[&str]) {
  for (path, contents) in website_files() {
    if !skip.contains(&path) {
      fs.write(&workspace_root.join(path), contents.as_bytes())
        .unwrap();
    }
  }
}

pub(crate) fn website_fs() -> Arc<InMemoryFileSystem> {
  website_fs_without(&[])
}

pub(crate) fn website_fs_without(skip: &[&str]) -> Arc<InMemoryFileSystem> {
  let fs = InMemoryFileSystem::default();
  fs.set_current_working_directory(Path::new(PROJECT_ROOT));
  write_website(&fs, Path::new(WORKSPACE_ROOT), skip);
  Arc::new(fs)
}

pub(crate) fn make_sitepack(fs: Arc<InMemoryFileSystem>, mode: Option<BuildMode>) -> Sitepack {
  let fs: FileSystemRef = fs;
  Sitepack::new(
    Some(fs),
    Path::new(PROJECT_ROOT),
    SitepackOptions {
      mode,
      ..SitepackOptions::default()
    },
  )
  .unwrap()
}

pub(crate) fn config_plugins(sitepack: &Sitepack) -> (PipelineDescriptor, ConfigPlugins) {
  let descriptor = sitepack.descriptor().unwrap();
  let ctx = PluginContext {
    file_system: sitepack.fs.clone(),
    options: Arc::new(PluginOptions {
      mode: descriptor.mode,
      project_root: descriptor.project_root.clone(),
    }),
  };
  let plugins = ConfigPlugins::new(&descriptor, ctx).unwrap();

  (descriptor, plugins)
}

pub(crate) fn workspace_path(path: &str) -> PathBuf {
  Path::new(WORKSPACE_ROOT).join(path)
}
