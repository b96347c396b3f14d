//! Recipe files: an ordered list of operations stored as JSON.
//!
//! ```
//! use ketav::recipe::Recipe;
//!
//! let recipe = Recipe::from_json(r#"{
//!     "steps": [
//!         { "op": "merge_headers", "source": "h4", "target": "h5", "exclude": "index" },
//!         {
//!             "op": "replace_in_headers",
//!             "scope": "all",
//!             "find": "Chapter (\\d+)",
//!             "replace": "Ch. $1"
//!         },
//!         { "op": "split", "tag": "h2", "book_name": "Book" },
//!         { "op": "normalize_hierarchy", "skip": ["h1"] }
//!     ]
//! }"#).unwrap();
//! assert_eq!(recipe.steps.len(), 4);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::batch::{Batch, Operation};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub steps: Vec<Operation>,
}

impl Recipe {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply every step in order, stopping at the first failure.
    pub fn run(&self, batch: &mut Batch) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            info!(step = i + 1, op = step.label(), "running recipe step");
            batch.apply(step)?;
        }
        Ok(())
    }
}
