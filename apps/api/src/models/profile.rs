//! Candidate and target-position inputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MIN_YEARS_OF_SERVICE: u8 = 1;
pub const MAX_YEARS_OF_SERVICE: u8 = 30;

fn default_years_of_service() -> u8 {
    9
}

/// Enlisted pay grade of the candidate. Drives the ghostwriter skill set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rank {
    E4,
    E5,
    E6,
    E7,
    E8,
}

impl Rank {
    pub const ALL: [Rank; 5] = [Rank::E4, Rank::E5, Rank::E6, Rank::E7, Rank::E8];

    /// Pay grade only, e.g. `E-6`.
    pub fn code(self) -> &'static str {
        match self {
            Rank::E4 => "E-4",
            Rank::E5 => "E-5",
            Rank::E6 => "E-6",
            Rank::E7 => "E-7",
            Rank::E8 => "E-8",
        }
    }

    /// Pay grade with the Army rank abbreviation, e.g. `E-6 (SSG)`.
    pub fn label(self) -> &'static str {
        match self {
            Rank::E4 => "E-4 (SPC)",
            Rank::E5 => "E-5 (SGT)",
            Rank::E6 => "E-6 (SSG)",
            Rank::E7 => "E-7 (SFC)",
            Rank::E8 => "E-8 (MSG)",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rank {
    type Err = String;

    /// Accepts `E-6 (SSG)`, `E-6`, `e6` and the like; only the pay grade is read.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.split_whitespace().next().unwrap_or_default();
        Rank::ALL
            .into_iter()
            .find(|rank| {
                rank.code().eq_ignore_ascii_case(code)
                    || rank.code().replace('-', "").eq_ignore_ascii_case(code)
            })
            .ok_or_else(|| format!("Unsupported rank '{s}'. Expected one of E-4 through E-8."))
    }
}

impl TryFrom<String> for Rank {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        rank.label().to_string()
    }
}

/// Target industry. Selects the tone paragraph and the project section header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Industry {
    #[default]
    Corporate,
    DefenseContractor,
    Federal,
    TechSaas,
}

impl Industry {
    pub const ALL: [Industry; 4] = [
        Industry::Corporate,
        Industry::DefenseContractor,
        Industry::Federal,
        Industry::TechSaas,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Industry::Corporate => "Corporate (General)",
            Industry::DefenseContractor => "Defense Contractor",
            Industry::Federal => "Federal (USAJOBS)",
            Industry::TechSaas => "Tech / SaaS",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if let Some(industry) = Industry::ALL
            .into_iter()
            .find(|i| i.label().eq_ignore_ascii_case(needle))
        {
            return Ok(industry);
        }
        match needle.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "corporate" | "corporate_general" => Ok(Industry::Corporate),
            "defense" | "defense_contractor" => Ok(Industry::DefenseContractor),
            "federal" | "usajobs" | "federal_usajobs" => Ok(Industry::Federal),
            "tech" | "saas" | "tech_saas" => Ok(Industry::TechSaas),
            _ => Err(format!("Unsupported industry '{s}'")),
        }
    }
}

impl TryFrom<String> for Industry {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Industry> for String {
    fn from(industry: Industry) -> Self {
        industry.label().to_string()
    }
}

/// Who the documents are written for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub rank: Rank,
    #[serde(default = "default_years_of_service")]
    pub years_of_service: u8,
    /// Uploaded resume text, pasted NCOER bullets, or nothing at all.
    #[serde(default)]
    pub experience: Option<String>,
}

impl CandidateProfile {
    /// Experience text with surrounding whitespace removed; `None` when blank.
    pub fn experience_text(&self) -> Option<&str> {
        self.experience
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// The job being applied for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetPosition {
    #[serde(default)]
    pub industry: Industry,
    pub title: String,
    pub job_description: String,
}
