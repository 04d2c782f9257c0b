//! Matching report: plain-text writer and the reader that splits it back into
//! profile lines and per-match sections for display.
//!
//! The two halves share a contract: the "TOP THESIS MATCHES" heading and the
//! 80-dash separator after every match block.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::chairs::models::NOT_SPECIFIED;
use crate::matching::scorer::Match;
use crate::student::models::StudentProfile;

pub const MATCHES_HEADING: &str = "TOP THESIS MATCHES";
pub const TOP_MATCHES: usize = 5;

/// Separator written after every match block. Readers split on it.
pub const SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

const GENERATED_ON: &str = "Generated on";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("Report has no 'TOP THESIS MATCHES' section")]
    MissingMatchesSection,
}

// ────────────────────────────────────────────────────────────────────────────
// Writer
// ────────────────────────────────────────────────────────────────────────────

/// Renders the report for already-ranked matches. Only the first five are written.
pub fn generate_report(
    student: &StudentProfile,
    ranked: &[Match],
    generated_at: NaiveDateTime,
) -> String {
    let mut report = String::new();

    report.push_str("THESIS MATCHING REPORT\n");
    report.push_str(&format!(
        "{GENERATED_ON}: {}\n\n",
        generated_at.format(TIMESTAMP_FORMAT)
    ));
    report.push_str("STUDENT PROFILE SUMMARY\n----------------------\n");
    report.push_str(&format!("Interests: {}\n", student.interests.join(", ")));
    report.push_str(&format!("Skills: {}\n", student.skills.join(", ")));
    report.push_str(&format!(
        "Preferred Topics: {}\n\n",
        student.preferred_topics.join(", ")
    ));
    report.push_str(&format!("{MATCHES_HEADING}\n-----------------\n\n"));

    for (position, matched) in ranked.iter().take(TOP_MATCHES).enumerate() {
        let opportunity = &matched.opportunity;
        report.push_str(&format!(
            "\n{}. {} ({}% Match)\n",
            matched.rank.unwrap_or(position + 1),
            opportunity.display_title(),
            matched.score
        ));
        report.push_str(&format!("Chair: {}\n", opportunity.chair_name));
        report.push_str(&format!(
            "URL: {}\n",
            opportunity.url.as_deref().unwrap_or(NOT_SPECIFIED)
        ));
        report.push_str(&format!("\nAnalysis:\n{}\n", matched.analysis));
        report.push_str(&format!("{SEPARATOR}\n"));
    }

    report
}

// ────────────────────────────────────────────────────────────────────────────
// Reader
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileLine {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSection {
    pub heading: String,
    pub body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMatch {
    pub rank: usize,
    pub title: String,
    /// Score digits exactly as written.
    pub raw_score: String,
    /// Last two digits of the raw score, the value shown to students.
    pub display_score: String,
    pub chair: Option<String>,
    pub url: Option<String>,
    pub sections: Vec<AnalysisSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub profile: Vec<ProfileLine>,
    pub matches: Vec<ReportMatch>,
}

pub fn read_report(text: &str) -> Result<ReportView, ReportError> {
    let (header, body) = text
        .split_once(MATCHES_HEADING)
        .ok_or(ReportError::MissingMatchesSection)?;

    let profile = header
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with(GENERATED_ON))
        .filter_map(|line| line.split_once(':'))
        .filter(|(key, _)| !key.contains("SUMMARY") && !key.contains("---"))
        .map(|(key, value)| ProfileLine {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        })
        .collect();

    let matches = body
        .split(SEPARATOR)
        .filter(|block| !block.trim().is_empty())
        .filter_map(read_match_block)
        .collect();

    Ok(ReportView { profile, matches })
}

fn read_match_block(block: &str) -> Option<ReportMatch> {
    let mut lines = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.chars().all(|c| c == '-'));

    let (rank, title, raw_score) = parse_title_line(lines.next()?)?;
    let display_score = raw_score
        .get(raw_score.len().saturating_sub(2)..)
        .unwrap_or_default()
        .to_string();

    let mut chair = None;
    let mut url = None;
    let mut sections: Vec<AnalysisSection> = Vec::new();

    for line in lines {
        if sections.is_empty() {
            if let Some(value) = line.strip_prefix("Chair:") {
                chair = Some(value.trim().to_string());
                continue;
            }
            if let Some(value) = line.strip_prefix("URL:") {
                url = Some(value.trim().to_string());
                continue;
            }
        }

        if let Some(section) = parse_section_heading(line) {
            sections.push(section);
        } else if let Some(current) = sections.last_mut() {
            current.body.push(line.to_string());
        }
    }

    Some(ReportMatch {
        rank,
        title,
        raw_score,
        display_score,
        chair,
        url,
        sections,
    })
}

/// `"{rank}. {title} ({score}% Match)"`
fn parse_title_line(line: &str) -> Option<(usize, String, String)> {
    let (rank, rest) = line.split_once(". ")?;
    let rank = rank.parse().ok()?;
    let open = rest.rfind(" (")?;
    let title = rest[..open].trim().to_string();
    let score = rest[open + 2..].split_once('%')?.0.trim();
    if score.is_empty() || !score.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((rank, title, score.to_string()))
}

/// Numbered analysis headings 1 to 5, optionally wrapped in markdown emphasis or
/// heading marks, e.g. `"2. Key Strengths:"` or `"**3. Potential Gaps**"`.
fn parse_section_heading(line: &str) -> Option<AnalysisSection> {
    let unmarked = line.trim_start_matches(['#', '*', ' ']);
    let (number, rest) = unmarked.split_once('.')?;
    if !matches!(number, "1" | "2" | "3" | "4" | "5") {
        return None;
    }

    let (heading, trailing) = match rest.split_once(':') {
        Some((heading, trailing)) => (heading, trailing),
        None => (rest, ""),
    };
    let heading = heading.trim_matches(['*', ' ']).to_string();
    if heading.is_empty() {
        return None;
    }

    let trailing = trailing.trim_matches(['*', ' ']);
    let body = if trailing.is_empty() {
        Vec::new()
    } else {
        vec![trailing.to_string()]
    };
    Some(AnalysisSection { heading, body })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::chairs::models::ThesisOpportunity;

    const ANALYSIS: &str = "1. Match Score (0-100): 85\n\n2. Key Strengths:\n- Strong ROS background\n- Robotics: 1.3\n\n3. Potential Gaps: limited ML theory\n\n**4. Recommendations**\n- Take the deep learning lab\n\n5. Detailed Analysis:\nGood overall fit.";

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap()
    }

    fn student() -> StudentProfile {
        StudentProfile {
            interests: vec!["AI".into(), "Robotics".into()],
            skills: vec!["Python".into(), "ROS".into()],
            preferred_topics: vec!["Grasping".into()],
            ..Default::default()
        }
    }

    fn ranked(title: Option<&str>, score: u64, rank: usize) -> Match {
        Match {
            opportunity: ThesisOpportunity {
                title: title.map(str::to_string),
                url: title.map(|t| format!("https://uni.example/{}", t.to_lowercase())),
                chair_name: "Chair of Robotics".into(),
                ..Default::default()
            },
            analysis: ANALYSIS.to_string(),
            score,
            rank: Some(rank),
        }
    }

    #[test]
    fn test_report_header_layout() {
        let report = generate_report(&student(), &[], generated_at());
        assert_eq!(
            report,
            "THESIS MATCHING REPORT\n\
             Generated on: 2024-03-05 14:07:09\n\
             \n\
             STUDENT PROFILE SUMMARY\n\
             ----------------------\n\
             Interests: AI, Robotics\n\
             Skills: Python, ROS\n\
             Preferred Topics: Grasping\n\
             \n\
             TOP THESIS MATCHES\n\
             -----------------\n\
             \n"
        );
    }

    #[test]
    fn test_single_match_splits_into_two_parts() {
        let report = generate_report(&student(), &[ranked(Some("Grasp"), 85, 1)], generated_at());
        let parts: Vec<&str> = report.split(SEPARATOR).collect();

        assert_eq!(SEPARATOR.len(), 80);
        assert_eq!(parts.len(), 2);
        assert!(parts[0].contains("1. Grasp (85% Match)\nChair: Chair of Robotics\nURL: https://uni.example/grasp\n\nAnalysis:\n1. Match Score"));
        assert!(parts[1].trim().is_empty());
    }

    #[test]
    fn test_only_top_five_written() {
        let matches: Vec<Match> = (1..=7)
            .map(|i| ranked(Some(format!("T{i}").as_str()), 100 - i as u64, i))
            .collect();
        let report = generate_report(&student(), &matches, generated_at());

        assert_eq!(report.matches(SEPARATOR).count(), TOP_MATCHES);
        assert!(report.contains("5. T5 ("));
        assert!(!report.contains("6. T6 ("));
    }

    #[test]
    fn test_missing_title_and_url_render_placeholder() {
        let report = generate_report(&student(), &[ranked(None, 0, 1)], generated_at());
        assert!(report.contains("1. Not specified (0% Match)"));
        assert!(report.contains("URL: Not specified"));
    }

    #[test]
    fn test_read_report_round_trip() {
        let report = generate_report(
            &student(),
            &[ranked(Some("Grasp"), 1_010_085, 1), ranked(Some("SLAM"), 40, 2)],
            generated_at(),
        );
        let view = read_report(&report).unwrap();

        assert_eq!(
            view.profile,
            vec![
                ProfileLine { key: "Interests".into(), value: "AI, Robotics".into() },
                ProfileLine { key: "Skills".into(), value: "Python, ROS".into() },
                ProfileLine { key: "Preferred Topics".into(), value: "Grasping".into() },
            ]
        );

        assert_eq!(view.matches.len(), 2);
        let first = &view.matches[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.title, "Grasp");
        assert_eq!(first.raw_score, "1010085");
        assert_eq!(first.display_score, "85");
        assert_eq!(first.chair.as_deref(), Some("Chair of Robotics"));
        assert_eq!(first.url.as_deref(), Some("https://uni.example/grasp"));

        let headings: Vec<&str> = first.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "Match Score (0-100)",
                "Key Strengths",
                "Potential Gaps",
                "Recommendations",
                "Detailed Analysis"
            ]
        );
        assert_eq!(first.sections[0].body, vec!["85"]);
        assert_eq!(
            first.sections[1].body,
            vec!["- Strong ROS background", "- Robotics: 1.3"]
        );
        assert_eq!(first.sections[2].body, vec!["limited ML theory"]);
        assert_eq!(first.sections[4].body, vec!["Good overall fit."]);

        assert_eq!(view.matches[1].display_score, "40");
    }

    #[test]
    fn test_read_report_single_digit_score() {
        let report = generate_report(&student(), &[ranked(Some("Grasp"), 7, 1)], generated_at());
        let view = read_report(&report).unwrap();
        assert_eq!(view.matches[0].display_score, "7");
    }

    #[test]
    fn test_read_report_without_matches_heading() {
        assert_eq!(
            read_report("THESIS MATCHING REPORT\nInterests: AI"),
            Err(ReportError::MissingMatchesSection)
        );
    }

    #[test]
    fn test_title_with_parentheses() {
        assert_eq!(
            parse_title_line("2. Grasping (sim-to-real) (91% Match)"),
            Some((2, "Grasping (sim-to-real)".to_string(), "91".to_string()))
        );
        assert_eq!(parse_title_line("Analysis:"), None);
    }
}
