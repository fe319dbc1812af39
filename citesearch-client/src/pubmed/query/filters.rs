//! Publication type filters for structured queries

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// PubMed publication types offered as study-type filters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StudyType {
    RandomizedControlledTrial,
    ClinicalTrial,
    MetaAnalysis,
    SystematicReview,
    Review,
    CaseReports,
    ObservationalStudy,
    Guideline,
    /// Any other publication type label, passed through unchanged
    Other(String),
}

impl StudyType {
    /// The publication type label as PubMed spells it
    pub fn label(&self) -> &str {
        match self {
            StudyType::RandomizedControlledTrial => "Randomized Controlled Trial",
            StudyType::ClinicalTrial => "Clinical Trial",
            StudyType::MetaAnalysis => "Meta-Analysis",
            StudyType::SystematicReview => "Systematic Review",
            StudyType::Review => "Review",
            StudyType::CaseReports => "Case Reports",
            StudyType::ObservationalStudy => "Observational Study",
            StudyType::Guideline => "Guideline",
            StudyType::Other(label) => label,
        }
    }

    pub fn to_query_string(&self) -> String {
        format!("{}[Publication Type]", self.label())
    }
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StudyType {
    type Err = Infallible;

    /// Case-insensitive; accepts labels, kebab/snake case and common short forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        let study_type = match normalized.as_str() {
            "randomized controlled trial" | "rct" => StudyType::RandomizedControlledTrial,
            "clinical trial" => StudyType::ClinicalTrial,
            "meta analysis" => StudyType::MetaAnalysis,
            "systematic review" => StudyType::SystematicReview,
            "review" => StudyType::Review,
            "case reports" | "case report" => StudyType::CaseReports,
            "observational study" => StudyType::ObservationalStudy,
            "guideline" | "practice guideline" => StudyType::Guideline,
            _ => StudyType::Other(s.trim().to_string()),
        };
        Ok(study_type)
    }
}
