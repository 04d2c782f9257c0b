use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Chair-level attributes parsed from the section above `THESIS OPPORTUNITIES:`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChairInfo {
    pub name: Option<String>,
    pub website: Option<String>,
    pub general_contact: Option<String>,
    pub application_process: Option<String>,
    pub general_requirements: Option<String>,
    pub research_areas: Vec<String>,
    /// Any other `- Key: Value` attribute, keyed by its label.
    pub other: BTreeMap<String, String>,
}

/// Kind of thesis work advertised by an opportunity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThesisType {
    Bachelor,
    Master,
    Project,
    #[default]
    Unspecified,
}

impl ThesisType {
    /// Classifies a free-text type label such as "Master thesis" or "Student Project".
    /// The earliest matching keyword wins, so "Master/Bachelor thesis" is `Master`.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        [
            ("bachelor", ThesisType::Bachelor),
            ("master", ThesisType::Master),
            ("project", ThesisType::Project),
        ]
        .into_iter()
        .filter_map(|(keyword, kind)| lower.find(keyword).map(|pos| (pos, kind)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, kind)| kind)
        .unwrap_or(ThesisType::Unspecified)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThesisType::Bachelor => "Bachelor thesis",
            ThesisType::Master => "Master thesis",
            ThesisType::Project => "Project",
            ThesisType::Unspecified => "Unspecified",
        }
    }
}

/// One advertised thesis topic.
///
/// Fixed shape: every field the chair report format defines is always present.
/// `None` is the missing sentinel for values the source text lacks or marks
/// as "Not provided" / "Not explicitly mentioned".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThesisOpportunity {
    pub thesis_type: ThesisType,
    /// Type label exactly as written in the document.
    pub type_label: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub contact_person: Option<String>,
    pub research_fields: Option<Vec<String>>,
    pub technical_requirements: Option<String>,
    pub academic_requirements: Option<String>,
    pub timeline: Option<String>,
    pub additional_information: Option<String>,

    // Denormalized from the parent chair.
    pub chair_name: String,
    pub chair_contact: String,
    pub chair_website: String,
    pub chair_research_areas: Vec<String>,

    /// Labels outside the known field list.
    pub extra: BTreeMap<String, String>,
}

impl ThesisOpportunity {
    /// Creates an empty record seeded with the chair back-references.
    pub fn for_chair(chair: &ChairInfo) -> Self {
        Self {
            chair_name: chair.name.clone().unwrap_or_default(),
            chair_contact: chair.general_contact.clone().unwrap_or_default(),
            chair_website: chair.website.clone().unwrap_or_default(),
            chair_research_areas: chair.research_areas.clone(),
            ..Default::default()
        }
    }

    /// Title for display, falling back to a fixed label when missing.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    /// Contact for display: the opportunity's own contact person, else the chair contact.
    pub fn display_contact(&self) -> &str {
        self.contact_person
            .as_deref()
            .unwrap_or(self.chair_contact.as_str())
    }
}

/// Placeholder rendered for missing values in prompts and reports.
pub const NOT_SPECIFIED: &str = "Not specified";
