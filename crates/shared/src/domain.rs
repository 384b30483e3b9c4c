use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownGene;

/// Upper bound on an uploaded sequence file, 200 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// Filename suffixes the prediction service accepts. Matched case-sensitively.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".fasta", ".fa"];

/// Genes the prediction service has models for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gene {
    #[default]
    #[serde(rename = "PTEN")]
    Pten,
    #[serde(rename = "BRCA1")]
    Brca1,
    #[serde(rename = "TP53")]
    Tp53,
}

impl Gene {
    /// Every supported gene, in the order a picker should list them.
    pub const ALL: [Gene; 3] = [Gene::Pten, Gene::Brca1, Gene::Tp53];

    pub fn as_str(self) -> &'static str {
        match self {
            Gene::Pten => "PTEN",
            Gene::Brca1 => "BRCA1",
            Gene::Tp53 => "TP53",
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gene {
    type Err = UnknownGene;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Gene::ALL
            .into_iter()
            .find(|gene| gene.as_str() == value.trim())
            .ok_or_else(|| UnknownGene(value.to_string()))
    }
}

pub fn has_accepted_extension(filename: &str) -> bool {
    ACCEPTED_EXTENSIONS
        .iter()
        .any(|extension| filename.ends_with(extension))
}
