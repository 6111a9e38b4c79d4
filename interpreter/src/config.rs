// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{fs, io, path::{Path, PathBuf}};

use log::debug;
use pseudo::ConfigRoot;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "pdc.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads the `pdc.toml` that sits next to `source_file`, if there is one.
pub fn load_for(source_file: &Path) -> Result<ConfigRoot, ConfigError> {
    let path = source_file.parent()
        .unwrap_or_else(|| Path::new(""))
        .join(CONFIG_FILE_NAME);

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No configuration at {}", path.display());
            return Ok(ConfigRoot::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config = toml::from_str(&text)
        .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;

    debug!("Loaded configuration from {}: {config:?}", path.display());
    Ok(config)
}
