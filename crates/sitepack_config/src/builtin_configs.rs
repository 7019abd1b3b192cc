use std::path::PathBuf;

use sitepack_core::diagnostic::DiagnosticError;

use crate::sitepack_rc::SitepackRc;
use crate::sitepack_rc_config_loader::parse_config;

/// Pipeline of the query-json playground website, used when no sitepack.json5 exists
pub const DEFAULT_CONFIG: &str = r#"{
  entry: "_build/default/website/website/website/Index.ml.js",
  resolve: {
    // The editor packages live in the workspace root so only one copy is ever loaded
    aliasRoot: "..",
    alias: {
      "@monaco-editor/loader": "node_modules/@monaco-editor/loader",
      "@monaco-editor/react": "node_modules/@monaco-editor/react",
      "monaco-editor": "node_modules/monaco-editor",
    },
  },
  optimizeDeps: {
    include: ["react", "react-dom", "react-dom/client"],
    exclude: ["monaco-editor", "@monaco-editor/react", "@monaco-editor/loader"],
  },
  server: {
    watch: {
      ignored: ["**/_opam/**", "**/.git/**"],
    },
  },
  worker: {
    format: "es",
  },
  build: {
    commonjsOptions: {
      esmExternals: true,
    },
    external: [{ kind: "substring", value: "js.bc.js" }],
    output: {
      manualChunks: null,
    },
  },
  plugins: [
    {
      copy: {
        targets: [{ src: "_build/default/js/js.bc.js", dest: "_build/default/js" }],
      },
    },
    {
      replace: {
        preventAssignment: true,
        values: {
          "process.env.NODE_ENV": { from: "mode" },
        },
      },
    },
    { nodeResolve: {} },
    {
      html: {
        tags: [{ injectTo: "body-prepend", tag: "div", attrs: { id: "root" } }],
      },
    },
  ],
}"#;

pub fn default_config() -> Result<SitepackRc, DiagnosticError> {
  parse_config(DEFAULT_CONFIG, PathBuf::from("<builtin>"))
}
