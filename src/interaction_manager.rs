use crate::data::InteractionData;
use serde_json::Value;
use std::{collections::HashMap, fmt::Debug};

pub trait InteractionManager: Debug {
    /// Loads the ordered interaction sequence, resolving `${name}` placeholders
    /// against the given variable table first. A missing fixture yields an
    /// empty sequence, not an error.
    fn load_interactions(
        &self,
        variables: &HashMap<String, Value>,
    ) -> Result<Vec<InteractionData>, Box<dyn std::error::Error + Send + Sync>>;

    fn save_interactions(
        &self,
        interactions: &[InteractionData],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
