//! Chair document parser — splits one chair report into a `ChairInfo` and its
//! thesis opportunities.
//!
//! Document shape:
//!
//! ```text
//! CHAIR INFORMATION:
//! - Chair/Department Name: ...
//! - Research Areas: AI, Robotics
//!
//! THESIS OPPORTUNITIES:
//! **Opportunity 1**
//! - Type: Master thesis
//! - Title: ...
//! ```
//!
//! Structure is enforced only at the delimiter level. Individual lines that do
//! not look like `- Key: Value` are skipped.

use thiserror::Error;

use crate::chairs::models::{ChairInfo, ThesisOpportunity, ThesisType};

pub const OPPORTUNITIES_DELIMITER: &str = "THESIS OPPORTUNITIES:";
const OPPORTUNITY_MARKER: &str = "**Opportunity";
const NOTE_PREFIX: &str = "Note:";
const NOT_PROVIDED: &str = "Not provided";
const NOT_MENTIONED: &str = "Not explicitly mentioned";

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error(
        "Malformed chair document: expected exactly one 'THESIS OPPORTUNITIES:' delimiter, found {found}"
    )]
    MalformedDocument { found: usize },
}

/// Parses one chair document into chair info and its ordered opportunities.
pub fn parse_chair_document(
    content: &str,
) -> Result<(ChairInfo, Vec<ThesisOpportunity>), ParseError> {
    let found = content.matches(OPPORTUNITIES_DELIMITER).count();
    let Some((chair_section, opportunities_section)) = content
        .split_once(OPPORTUNITIES_DELIMITER)
        .filter(|_| found == 1)
    else {
        return Err(ParseError::MalformedDocument { found });
    };

    let chair = parse_chair_section(chair_section);
    let opportunities = parse_opportunities_section(opportunities_section, &chair);
    Ok((chair, opportunities))
}

fn parse_chair_section(section: &str) -> ChairInfo {
    let mut chair = ChairInfo::default();

    for (key, value) in section.lines().filter_map(split_field_line) {
        let value = strip_markdown_link(value).to_string();
        match key {
            "Chair/Department Name" => chair.name = Some(value),
            "Website" => chair.website = Some(value),
            "General Contact" => chair.general_contact = Some(value),
            "Application Process" => chair.application_process = Some(value),
            "General Requirements" => chair.general_requirements = Some(value),
            "Research Areas" => chair.research_areas = split_list(&value),
            _ => {
                chair.other.insert(key.to_string(), value);
            }
        }
    }

    chair
}

fn parse_opportunities_section(section: &str, chair: &ChairInfo) -> Vec<ThesisOpportunity> {
    let mut opportunities = Vec::new();
    let mut current: Option<ThesisOpportunity> = None;

    for line in section.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(NOTE_PREFIX) {
            continue;
        }

        if line.starts_with(OPPORTUNITY_MARKER) {
            if let Some(done) = current.replace(ThesisOpportunity::for_chair(chair)) {
                opportunities.push(done);
            }
            continue;
        }

        // Field lines before the first marker belong to no opportunity.
        let (Some(opportunity), Some((key, value))) = (current.as_mut(), split_field_line(line))
        else {
            continue;
        };
        apply_field(opportunity, key, value);
    }

    opportunities.extend(current);
    opportunities
}

fn apply_field(opportunity: &mut ThesisOpportunity, key: &str, value: &str) {
    if key == "Research Fields" {
        opportunity.research_fields = normalize(value).map(split_list);
        return;
    }

    let value = normalize(value).map(str::to_string);
    match key {
        "Type" => {
            opportunity.thesis_type = value
                .as_deref()
                .map(ThesisType::from_label)
                .unwrap_or_default();
            opportunity.type_label = value;
        }
        "Title" => opportunity.title = value,
        "Description" => opportunity.description = value,
        "URL" => opportunity.url = value,
        "Contact Person" => opportunity.contact_person = value,
        "Technical Requirements" => opportunity.technical_requirements = value,
        "Academic Requirements" => opportunity.academic_requirements = value,
        "Timeline" => opportunity.timeline = value,
        "Additional Information" => opportunity.additional_information = value,
        _ => {
            if let Some(value) = value {
                opportunity.extra.insert(key.to_string(), value);
            }
        }
    }
}

/// Splits a `- Key: Value` line into trimmed key and value.
fn split_field_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix("- ")?;
    let (key, value) = rest.split_once(": ")?;
    Some((key.trim(), value.trim()))
}

/// Keeps only the display text of a markdown link: `[text](url)` becomes `text`.
fn strip_markdown_link(value: &str) -> &str {
    if !(value.contains('[') && value.contains(']')) {
        return value;
    }
    value
        .split("](")
        .next()
        .unwrap_or(value)
        .trim_matches(|c| c == '[' || c == ']')
        .trim()
}

fn normalize(value: &str) -> Option<&str> {
    match value {
        NOT_PROVIDED | NOT_MENTIONED => None,
        other => Some(other),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
