use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Which dialect a source file is parsed as.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum LanguageMode {
  #[serde(rename = "javascript")]
  JavaScript,
  #[default]
  #[serde(rename = "javascript-jsx")]
  JavaScriptJsx,
  #[serde(rename = "typescript", alias = "experimental-typescript")]
  TypeScript,
  #[serde(rename = "typescript-jsx", alias = "experimental-typescript-jsx")]
  TypeScriptJsx,
  /// `.d.ts` files: every declaration is implicitly ambient.
  #[serde(rename = "typescript-definition", alias = "experimental-typescript-definition")]
  TypeScriptDefinition,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown language {0:?}")]
pub struct UnknownLanguageError(pub String);

impl LanguageMode {
  pub const ALL: [LanguageMode; 5] = [
    LanguageMode::JavaScript,
    LanguageMode::JavaScriptJsx,
    LanguageMode::TypeScript,
    LanguageMode::TypeScriptJsx,
    LanguageMode::TypeScriptDefinition,
  ];

  pub const fn as_str(&self) -> &'static str {
    match self {
      LanguageMode::JavaScript => "javascript",
      LanguageMode::JavaScriptJsx => "javascript-jsx",
      LanguageMode::TypeScript => "typescript",
      LanguageMode::TypeScriptJsx => "typescript-jsx",
      LanguageMode::TypeScriptDefinition => "typescript-definition",
    }
  }

  pub const fn is_typescript(&self) -> bool {
    matches!(
      self,
      LanguageMode::TypeScript | LanguageMode::TypeScriptJsx | LanguageMode::TypeScriptDefinition
    )
  }

  pub const fn allows_jsx(&self) -> bool {
    matches!(self, LanguageMode::JavaScriptJsx | LanguageMode::TypeScriptJsx)
  }

  pub const fn is_definition(&self) -> bool {
    matches!(self, LanguageMode::TypeScriptDefinition)
  }

  /// Guesses the mode from a file name. Anything unrecognised is treated as JavaScript with JSX.
  pub fn from_path(path: impl AsRef<Path>) -> LanguageMode {
    let path = path.as_ref();
    let name = path
      .file_name()
      .and_then(|n| n.to_str())
      .unwrap_or_default()
      .to_ascii_lowercase();
    if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts") {
      return LanguageMode::TypeScriptDefinition;
    }
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
      Some("ts" | "mts" | "cts") => LanguageMode::TypeScript,
      Some("tsx") => LanguageMode::TypeScriptJsx,
      _ => LanguageMode::JavaScriptJsx,
    }
  }
}

impl Display for LanguageMode {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for LanguageMode {
  type Err = UnknownLanguageError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    // Older configurations spell TypeScript modes with an `experimental-` prefix.
    let name = s.strip_prefix("experimental-").unwrap_or(s);
    LanguageMode::ALL
      .into_iter()
      .find(|mode| mode.as_str() == name)
      .ok_or_else(|| UnknownLanguageError(s.to_string()))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptions {
  pub language: LanguageMode,
  /// Nesting depth after which the parser stops descending and reports [`diagnostics_js::DiagKind::DepthLimitExceeded`].
  pub max_depth: u32,
}

impl ParserOptions {
  pub const DEFAULT_MAX_DEPTH: u32 = 128;

  pub fn new(language: LanguageMode) -> Self {
    Self {
      language,
      max_depth: Self::DEFAULT_MAX_DEPTH,
    }
  }
}

impl Default for ParserOptions {
  fn default() -> Self {
    Self::new(LanguageMode::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_mode_names() {
    for mode in LanguageMode::ALL {
      assert_eq!(mode.as_str().parse::<LanguageMode>(), Ok(mode));
    }
    assert_eq!(
      "experimental-typescript-jsx".parse::<LanguageMode>(),
      Ok(LanguageMode::TypeScriptJsx)
    );
    assert_eq!(
      "coffeescript".parse::<LanguageMode>(),
      Err(UnknownLanguageError("coffeescript".into()))
    );
  }

  #[test]
  fn guesses_mode_from_path() {
    assert_eq!(LanguageMode::from_path("a/b.ts"), LanguageMode::TypeScript);
    assert_eq!(LanguageMode::from_path("b.TSX"), LanguageMode::TypeScriptJsx);
    assert_eq!(LanguageMode::from_path("lib.d.ts"), LanguageMode::TypeScriptDefinition);
    assert_eq!(LanguageMode::from_path("x.mjs"), LanguageMode::JavaScriptJsx);
    assert_eq!(LanguageMode::from_path("Makefile"), LanguageMode::JavaScriptJsx);
  }

  #[test]
  fn serializes_mode_names() {
    let json = serde_json::to_string(&LanguageMode::TypeScriptDefinition).unwrap();
    assert_eq!(json, "\"typescript-definition\"");
  }
}
