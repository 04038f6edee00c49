// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

//! Custody client config locations and YAML load/save.
pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use error::{CustodyConfigError, CustodyConfigResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

const CUSTODY_DIR: &str = ".custody";

/// Environment variable overriding the config directory.
pub const CUSTODY_CONFIG_DIR_ENV: &str = "CUSTODY_CONFIG_DIR";

/// Client config filename inside the config directory.
pub const CUSTODY_CLIENT_CONFIG: &str = "client.yaml";

/// returns the custody dir set by env or $HOME/.custody, creating it if needed
pub fn custody_config_dir() -> CustodyConfigResult<PathBuf> {
    match std::env::var_os(CUSTODY_CONFIG_DIR_ENV) {
        Some(config_env) => Ok(config_env.into()),
        None => match dirs::home_dir() {
            Some(home) => Ok(home.join(CUSTODY_DIR)),
            None => Err(CustodyConfigError::HomeDirectoryError),
        },
    }
    .and_then(|dir| {
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(|e| CustodyConfigError::CreateDirectoryError(e.to_string()))?;
        }
        Ok(dir)
    })
}

pub trait Config
where
    Self: DeserializeOwned + Serialize,
{
    fn load<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        trace!("Reading config from {}", path.display());
        let reader = fs::File::open(path)
            .with_context(|| format!("Unable to load config from {}", path.display()))?;
        serde_yaml::from_reader(reader)
            .with_context(|| format!("Malformed config at {}", path.display()))
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), anyhow::Error> {
        let path = path.as_ref();
        trace!("Writing config to {}", path.display());
        let config = serde_yaml::to_string(&self)?;
        fs::write(path, config)
            .with_context(|| format!("Unable to save config to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        retries: u32,
    }

    impl Config for Sample {}

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CUSTODY_CLIENT_CONFIG);

        Sample { name: "testnet".into(), retries: 0 }.save(&path).unwrap();

        let loaded = Sample::load(&path).unwrap();
        assert_eq!(loaded, Sample { name: "testnet".into(), retries: 0 });
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = Sample::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"), "{err}");
    }

    #[test]
    fn test_config_dir_from_env_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("custody");
        std::env::set_var(CUSTODY_CONFIG_DIR_ENV, &nested);
        let resolved = custody_config_dir().unwrap();
        std::env::remove_var(CUSTODY_CONFIG_DIR_ENV);

        assert_eq!(resolved, nested);
        assert!(nested.is_dir());
    }
}
