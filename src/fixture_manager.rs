use crate::{
    data::InteractionData, error::Error, interaction_manager::InteractionManager, substitution,
};
use log::{info, warn};
use serde_json::Value;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// File-backed fixture store. One instance is bound to exactly one fixture file.
#[derive(Debug)]
pub struct FixtureManager {
    path: PathBuf,
}

impl FixtureManager {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self, variables: &HashMap<String, Value>) -> Result<Vec<InteractionData>, Error> {
        if !self.path.exists() {
            warn!("Fixture file {} not found", self.path.display());
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let resolved = substitution::apply_variables(&contents, variables);
        let interactions: Vec<InteractionData> =
            serde_json::from_str(&resolved).map_err(|e| Error::FixtureParseError {
                path: self.path.display().to_string(),
                source: e,
            })?;
        info!(
            "Read {} interactions from {}",
            interactions.len(),
            self.path.display()
        );

        Ok(interactions)
    }

    fn save(&self, interactions: &[InteractionData]) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(interactions)?;
        fs::write(&self.path, json)?;
        info!(
            "Recorded {} interactions to {}",
            interactions.len(),
            self.path.display()
        );

        Ok(())
    }
}

impl InteractionManager for FixtureManager {
    fn load_interactions(
        &self,
        variables: &HashMap<String, Value>,
    ) -> Result<Vec<InteractionData>, Box<dyn std::error::Error + Send + Sync>> {
        self.load(variables).map_err(Into::into)
    }

    fn save_interactions(
        &self,
        interactions: &[InteractionData],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.save(interactions).map_err(Into::into)
    }
}
