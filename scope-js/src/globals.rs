use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::de::Error as _;
use serde::Deserialize;
use serde::Deserializer;
use std::collections::BTreeMap;
use thiserror::Error;

// Bindings of the global object that cannot be assigned.
const READ_ONLY_BUILTINS: &[&str] = &["Infinity", "NaN", "globalThis", "undefined"];

const ECMASCRIPT_GLOBALS: &[&str] = &[
  "AggregateError",
  "Array",
  "ArrayBuffer",
  "Atomics",
  "BigInt",
  "BigInt64Array",
  "BigUint64Array",
  "Boolean",
  "DataView",
  "Date",
  "Error",
  "EvalError",
  "FinalizationRegistry",
  "Float32Array",
  "Float64Array",
  "Function",
  "Int16Array",
  "Int32Array",
  "Int8Array",
  "Intl",
  "Iterator",
  "JSON",
  "Map",
  "Math",
  "Number",
  "Object",
  "Promise",
  "Proxy",
  "RangeError",
  "ReferenceError",
  "Reflect",
  "RegExp",
  "Set",
  "SharedArrayBuffer",
  "String",
  "Symbol",
  "SyntaxError",
  "TypeError",
  "URIError",
  "Uint16Array",
  "Uint32Array",
  "Uint8Array",
  "Uint8ClampedArray",
  "WeakMap",
  "WeakRef",
  "WeakSet",
  "arguments",
  "decodeURI",
  "decodeURIComponent",
  "encodeURI",
  "encodeURIComponent",
  "escape",
  "eval",
  "isFinite",
  "isNaN",
  "parseFloat",
  "parseInt",
  "unescape",
];

const BROWSER_GLOBALS: &[&str] = &[
  "AbortController",
  "Blob",
  "CustomEvent",
  "Document",
  "Element",
  "Event",
  "EventTarget",
  "File",
  "FormData",
  "HTMLElement",
  "Headers",
  "Image",
  "MutationObserver",
  "Node",
  "Request",
  "Response",
  "TextDecoder",
  "TextEncoder",
  "URL",
  "URLSearchParams",
  "WebSocket",
  "Window",
  "Worker",
  "XMLHttpRequest",
  "alert",
  "atob",
  "btoa",
  "cancelAnimationFrame",
  "clearInterval",
  "clearTimeout",
  "console",
  "crypto",
  "document",
  "fetch",
  "history",
  "localStorage",
  "location",
  "navigator",
  "performance",
  "queueMicrotask",
  "requestAnimationFrame",
  "self",
  "sessionStorage",
  "setInterval",
  "setTimeout",
  "structuredClone",
  "window",
];

const NODE_GLOBALS: &[&str] = &[
  "Buffer",
  "__dirname",
  "__filename",
  "clearImmediate",
  "exports",
  "global",
  "module",
  "process",
  "require",
  "setImmediate",
];

// Types from the TypeScript standard library.
const TYPESCRIPT_TYPES: &[&str] = &[
  "ArrayLike",
  "Awaited",
  "ConstructorParameters",
  "Exclude",
  "Extract",
  "InstanceType",
  "Iterable",
  "IterableIterator",
  "NonNullable",
  "Omit",
  "Parameters",
  "Partial",
  "Pick",
  "PromiseLike",
  "PropertyKey",
  "Readonly",
  "ReadonlyArray",
  "ReadonlyMap",
  "ReadonlySet",
  "Record",
  "Required",
  "ReturnType",
  "TemplateStringsArray",
  "ThisParameterType",
  "ThisType",
  "Uncapitalize",
  "Capitalize",
  "Lowercase",
  "Uppercase",
];

static DEFAULT_GLOBALS: Lazy<GlobalDeclaredVariableSet> = Lazy::new(|| {
  let mut set = GlobalDeclaredVariableSet::new();
  for list in [ECMASCRIPT_GLOBALS, BROWSER_GLOBALS, NODE_GLOBALS, TYPESCRIPT_TYPES] {
    for name in list {
      set.add_global(*name, true);
    }
  }
  for name in READ_ONLY_BUILTINS {
    set.add_global(*name, false);
  }
  set
});

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GlobalVariable {
  pub writable: bool,
}

/// Names provided by the environment rather than declared in the module.
///
/// Consulted once every enclosing scope failed to resolve a use. Immutable
/// during analysis, so one set can be shared between threads behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalDeclaredVariableSet {
  variables: AHashMap<String, GlobalVariable>,
}

impl GlobalDeclaredVariableSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// ECMAScript built-ins, common browser and Node.js globals, and TypeScript library types.
  pub fn default_globals() -> Self {
    DEFAULT_GLOBALS.clone()
  }

  /// Adds or replaces a global.
  pub fn add_global(&mut self, name: impl Into<String>, writable: bool) {
    self.variables.insert(name.into(), GlobalVariable { writable });
  }

  pub fn remove(&mut self, name: &str) -> Option<GlobalVariable> {
    self.variables.remove(name)
  }

  pub fn find(&self, name: &str) -> Option<GlobalVariable> {
    self.variables.get(name).copied()
  }

  pub fn len(&self) -> usize {
    self.variables.len()
  }

  pub fn is_empty(&self) -> bool {
    self.variables.is_empty()
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid global variable name {name:?}")]
pub struct InvalidGlobalError {
  pub name: String,
}

/// One entry of a `"globals"` configuration object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GlobalSetting {
  /// `true` adds a writable global; `false` removes the name.
  Enabled(bool),
  Detailed {
    #[serde(default = "default_writable")]
    writable: bool,
  },
}

fn default_writable() -> bool {
  true
}

/// The `{ "name": true | false | { "writable": bool } }` configuration shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct GlobalsConfig(pub BTreeMap<String, GlobalSetting>);

impl GlobalsConfig {
  /// Applies each entry in name order.
  pub fn apply_to(&self, set: &mut GlobalDeclaredVariableSet) -> Result<(), InvalidGlobalError> {
    for (name, setting) in self.0.iter() {
      if name.is_empty() || name.chars().any(|c| c.is_whitespace()) {
        return Err(InvalidGlobalError { name: name.clone() });
      }
      match *setting {
        GlobalSetting::Enabled(false) => {
          set.remove(name);
        }
        GlobalSetting::Enabled(true) => set.add_global(name.as_str(), true),
        GlobalSetting::Detailed { writable } => set.add_global(name.as_str(), writable),
      }
    }
    Ok(())
  }
}

impl<'de> Deserialize<'de> for GlobalDeclaredVariableSet {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let config = GlobalsConfig::deserialize(deserializer)?;
    let mut set = GlobalDeclaredVariableSet::new();
    config.apply_to(&mut set).map_err(D::Error::custom)?;
    Ok(set)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_globals_mark_constants_read_only() {
    let globals = GlobalDeclaredVariableSet::default_globals();
    assert_eq!(globals.find("console"), Some(GlobalVariable { writable: true }));
    assert_eq!(globals.find("undefined"), Some(GlobalVariable { writable: false }));
    assert_eq!(globals.find("Partial"), Some(GlobalVariable { writable: true }));
    assert_eq!(globals.find("myVariable"), None);
  }

  #[test]
  fn add_and_remove() {
    let mut globals = GlobalDeclaredVariableSet::new();
    assert!(globals.is_empty());
    globals.add_global("jQuery", false);
    assert_eq!(globals.find("jQuery"), Some(GlobalVariable { writable: false }));
    globals.add_global("jQuery", true);
    assert_eq!(globals.len(), 1);
    assert_eq!(globals.remove("jQuery"), Some(GlobalVariable { writable: true }));
    assert_eq!(globals.find("jQuery"), None);
  }

  #[test]
  fn deserializes_configuration_shape() {
    let globals: GlobalDeclaredVariableSet = serde_json::from_str(
      r#"{ "a": true, "b": false, "c": { "writable": false }, "d": {} }"#,
    )
    .unwrap();
    assert_eq!(globals.find("a"), Some(GlobalVariable { writable: true }));
    assert_eq!(globals.find("b"), None);
    assert_eq!(globals.find("c"), Some(GlobalVariable { writable: false }));
    assert_eq!(globals.find("d"), Some(GlobalVariable { writable: true }));
  }

  #[test]
  fn config_removes_defaults() {
    let config: GlobalsConfig = serde_json::from_str(r#"{ "console": false }"#).unwrap();
    let mut globals = GlobalDeclaredVariableSet::default_globals();
    config.apply_to(&mut globals).unwrap();
    assert_eq!(globals.find("console"), None);
    assert!(globals.find("window").is_some());
  }

  #[test]
  fn rejects_blank_names() {
    let err = serde_json::from_str::<GlobalDeclaredVariableSet>(r#"{ "": true }"#).unwrap_err();
    assert!(err.to_string().contains("invalid global variable name"));
  }
}
