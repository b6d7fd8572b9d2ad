use anyhow::bail;

use super::structure::{ConciergeConfigInner, ConciergeConfigTOML};
use std::{
    ops::Deref,
    path::PathBuf,
};

#[derive(Debug, Clone)]
pub struct ConciergeConfig {
    path: PathBuf,
    cached: ConciergeConfigTOML,
}

impl ConciergeConfig {
    pub fn read(path: PathBuf) -> Result<Self, anyhow::Error> {
        let path = match path.is_dir() {
            true => path.join("config.toml"),
            false => path,
        };

        if !path.exists() {
            log::info!("no config at {}, writing defaults", path.display());
            return Self::new(path);
        }

        if !path.is_file() {
            bail!(
                "Given path exists and is not a file... either change the path or delete the file."
            );
        }

        let config_str = std::fs::read_to_string(&path)?;

        Ok(Self {
            path,
            cached: toml::from_str(&config_str)?,
        })
    }

    fn new(path: PathBuf) -> Result<Self, anyhow::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let config = Self {
            path,
            cached: ConciergeConfigTOML::default(),
        };

        config.save()?;

        Ok(config)
    }

    fn save(&self) -> Result<(), anyhow::Error> {
        std::fs::write(&self.path, toml::to_string(&self.cached)?)?;

        Ok(())
    }
}

impl Deref for ConciergeConfig {
    type Target = ConciergeConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.cached.config
    }
}

impl PartialEq for ConciergeConfig {
    fn eq(&self, other: &Self) -> bool {
        self.cached.config == other.cached.config
    }
}
