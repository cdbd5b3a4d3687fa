//! Query builder limits

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};

/// Page size limits applied to incoming sales queries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size used when a request omits it
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Upper bound applied to requested page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl Validatable for QueryConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.default_page_size, "default_page_size", self.domain_name())?;
        validate_positive(self.max_page_size, "max_page_size", self.domain_name())?;

        if self.default_page_size > self.max_page_size {
            return Err(self.validation_error("default_page_size cannot be greater than max_page_size"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "query"
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}
