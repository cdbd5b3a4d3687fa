//! CSV import configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};

/// Bulk import settings used by the `seed` command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Rows inserted per transaction
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

impl Validatable for ImportConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.batch_size, "batch_size", self.domain_name())
    }

    fn domain_name(&self) -> &'static str {
        "import"
    }
}

fn default_batch_size() -> usize {
    1000
}
