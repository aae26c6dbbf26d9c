use serde::{Deserialize, Serialize};

/// A hero as exposed to the page's hero list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    /// Canonical display name (e.g., "Anti-Mage")
    pub localized_name: String,

    /// Icon URL, only known when the data provider supplies images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Hero {
    pub fn named(name: &str) -> Self {
        Self {
            localized_name: name.to_string(),
            icon: None,
        }
    }
}
