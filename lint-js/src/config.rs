use parse_events_js::options::LanguageMode;
use scope_js::GlobalDeclaredVariableSet;
use scope_js::GlobalsConfig;
use scope_js::InvalidGlobalError;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid configuration: {0}")]
  Json(#[from] serde_json::Error),
  #[error(transparent)]
  Globals(#[from] InvalidGlobalError),
}

/// Per-document settings, as found in a JSON configuration file.
///
/// ```json
/// { "language": "typescript", "globals": { "jQuery": true, "console": false } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LintOptions {
  pub language: LanguageMode,
  /// Applied on top of the default globals, or of nothing if those are excluded.
  pub globals: GlobalsConfig,
  pub include_default_globals: bool,
}

impl Default for LintOptions {
  fn default() -> Self {
    LintOptions {
      language: LanguageMode::default(),
      globals: GlobalsConfig::default(),
      include_default_globals: true,
    }
  }
}

impl LintOptions {
  pub fn new(language: LanguageMode) -> Self {
    LintOptions {
      language,
      ..LintOptions::default()
    }
  }

  pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(json)?)
  }

  /// Builds the global set these options describe. Build it once and share it between documents.
  pub fn build_globals(&self) -> Result<GlobalDeclaredVariableSet, ConfigError> {
    let mut globals = if self.include_default_globals {
      GlobalDeclaredVariableSet::default_globals()
    } else {
      GlobalDeclaredVariableSet::new()
    };
    self.globals.apply_to(&mut globals)?;
    Ok(globals)
  }
}
