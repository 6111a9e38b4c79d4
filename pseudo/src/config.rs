// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use serde::Deserialize;

use crate::lexer::DEFAULT_RANGE_SYMBOL;

/// Contents of `pdc.toml`. Every section and field may be left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigRoot {
    pub log: ConfigSectionLog,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionLog {
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ParserConfig {
    /// The token between the bounds of a `dla` loop.
    pub range_symbol: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            range_symbol: DEFAULT_RANGE_SYMBOL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: ConfigRoot = toml::from_str("").unwrap();
        assert_eq!(config, ConfigRoot::default());
        assert_eq!(config.parser.range_symbol, "...");
    }

    #[test]
    fn sections_are_kebab_case() {
        let config: ConfigRoot = toml::from_str("[log]\ndebug = true\n\n[parser]\nrange-symbol = \"..\"\n").unwrap();
        assert!(config.log.debug);
        assert_eq!(config.parser.range_symbol, "..");
    }
}
