use lazy_static::lazy_static;
use std::{collections::HashSet, sync::RwLock};

pub const MASK: &str = "********";

lazy_static! {
    static ref HEADER_POLICY: RwLock<HeaderPolicy> = RwLock::new(HeaderPolicy::default());
}

#[derive(Debug, Clone)]
pub struct HeaderPolicy {
    included: HashSet<String>,
    sensitive: HashSet<String>,
}

impl HeaderPolicy {
    pub fn new<S1, I1, S2, I2>(included: I1, sensitive: I2) -> Self
    where
        S1: Into<String>,
        I1: IntoIterator<Item = S1>,
        S2: Into<String>,
        I2: IntoIterator<Item = S2>,
    {
        Self {
            included: included.into_iter().map(lowercased).collect(),
            sensitive: sensitive.into_iter().map(lowercased).collect(),
        }
    }

    pub fn includes(&self, header_name: &str) -> bool {
        self.included.contains(&header_name.to_lowercase())
    }

    pub fn is_sensitive(&self, header_name: &str) -> bool {
        self.sensitive.contains(&header_name.to_lowercase())
    }
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self::new(vec!["content-type"], vec!["authorization"])
    }
}

fn lowercased<S: Into<String>>(name: S) -> String {
    name.into().to_lowercase()
}

/// Replaces the process-wide header policy. Intended to be called once at startup,
/// before any tape is created.
pub fn set_header_policy(policy: HeaderPolicy) {
    let mut guard = HEADER_POLICY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = policy;
}

pub(crate) fn header_policy() -> HeaderPolicy {
    HEADER_POLICY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}
