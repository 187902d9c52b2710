use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output syntax of a rendered card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VcardDialect {
    #[serde(rename = "2.1")]
    Legacy,
    #[default]
    #[serde(rename = "3.0")]
    Modern,
}

impl VcardDialect {
    pub fn version(self) -> &'static str {
        match self {
            VcardDialect::Legacy => "2.1",
            VcardDialect::Modern => "3.0",
        }
    }
}

impl fmt::Display for VcardDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.version())
    }
}

impl FromStr for VcardDialect {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "2.1" => Ok(VcardDialect::Legacy),
            "3.0" => Ok(VcardDialect::Modern),
            other => Err(CoreError::InvalidDialect(other.to_string())),
        }
    }
}
