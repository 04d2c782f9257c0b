use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::matching::error::MatchingError;
use crate::student::models::{StudentProfile, StudentRecord};

pub const STUDENT_DATA_FILE: &str = "student_data.json";
pub const CV_SUMMARY_FILE: &str = "cv_summary.txt";
pub const TRANSCRIPT_SUMMARY_FILE: &str = "transcript_summary.txt";
const KEY_AREAS_HEADING: &str = "Key Areas of Study:";

/// Assembles a `StudentProfile` from a student directory.
///
/// The directory and `student_data.json` are required. The CV and transcript
/// summaries are optional and default to empty text.
pub async fn load_student_profile(dir: &Path) -> Result<StudentProfile, MatchingError> {
    if !tokio::fs::try_exists(dir).await? {
        return Err(MatchingError::MissingInputData(format!(
            "student directory {}",
            dir.display()
        )));
    }

    let record_path = dir.join(STUDENT_DATA_FILE);
    let raw = match tokio::fs::read_to_string(&record_path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(MatchingError::MissingInputData(
                record_path.display().to_string(),
            ))
        }
        Err(e) => return Err(MatchingError::Io(e)),
    };
    let record: StudentRecord = serde_json::from_str(&raw)
        .map_err(|e| MatchingError::InvalidInputData(format!("{STUDENT_DATA_FILE}: {e}")))?;

    let cv_summary = read_optional(&dir.join(CV_SUMMARY_FILE)).await?;
    let transcript_summary = read_optional(&dir.join(TRANSCRIPT_SUMMARY_FILE)).await?;
    let key_areas = extract_key_areas(&transcript_summary);

    info!(
        "Loaded student profile from {} ({} interests, {} skills, {} courses)",
        dir.display(),
        record.interests.len(),
        record.skills.len(),
        record.courses.len()
    );

    Ok(StudentProfile {
        interests: record.interests,
        skills: record.skills,
        courses: record.courses,
        preferred_topics: record.preferred_topics,
        cv_summary,
        transcript_summary,
        gpa: record.gpa,
        key_areas,
        personal_info: record.personal_info,
        motivation_letter_text: record.motivation_letter_text,
        advisor_preferences: record.advisor_preferences,
    })
}

async fn read_optional(path: &Path) -> Result<String, MatchingError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text.trim().to_string()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Optional student file {} not found", path.display());
            Ok(String::new())
        }
        Err(e) => Err(MatchingError::Io(e)),
    }
}

/// Bullet lines directly under "Key Areas of Study:", up to the next non-bullet line.
pub fn extract_key_areas(transcript_summary: &str) -> Vec<String> {
    let Some((_, rest)) = transcript_summary.split_once(KEY_AREAS_HEADING) else {
        return Vec::new();
    };

    rest.lines()
        .map(str::trim)
        .skip_while(|line| line.is_empty())
        .take_while(|line| line.starts_with('-'))
        .map(|line| line.trim_matches(|c| c == '-' || c == ' ').to_string())
        .filter(|area| !area.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::models::Gpa;

    const TRANSCRIPT: &str = "Transcript Analysis:\n\nCourses and Grades:\n- Robotics: 1.3\n\nOverall GPA: 1.5\n\nKey Areas of Study:\n- Robotics\n- Machine Learning\n\nHonors and Distinctions:\n- Dean's list\n";

    fn write(dir: &Path, file: &str, content: &str) {
        std::fs::write(dir.join(file), content).unwrap();
    }

    #[tokio::test]
    async fn test_full_profile_loads_all_sources() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            STUDENT_DATA_FILE,
            r#"{"interests": ["AI"], "skills": ["Python"], "preferred_topics": ["Robot learning"], "gpa": "1.5", "courses": [{"name": "Robotics", "grade": "1.3"}]}"#,
        );
        write(dir.path(), CV_SUMMARY_FILE, "  MSc student with ROS experience \n");
        write(dir.path(), TRANSCRIPT_SUMMARY_FILE, TRANSCRIPT);

        let profile = load_student_profile(dir.path()).await.unwrap();
        assert_eq!(profile.interests, vec!["AI"]);
        assert_eq!(profile.gpa, Gpa::Value(1.5));
        assert_eq!(profile.cv_summary, "MSc student with ROS experience");
        assert_eq!(profile.key_areas, vec!["Robotics", "Machine Learning"]);
        assert_eq!(profile.courses[0].name, "Robotics");
    }

    #[tokio::test]
    async fn test_missing_summaries_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), STUDENT_DATA_FILE, "{}");

        let profile = load_student_profile(dir.path()).await.unwrap();
        assert!(profile.cv_summary.is_empty());
        assert!(profile.transcript_summary.is_empty());
        assert!(profile.key_areas.is_empty());
        assert_eq!(profile.gpa, Gpa::Unavailable);
    }

    #[tokio::test]
    async fn test_missing_directory_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_student_profile(&dir.path().join("nobody")).await;
        assert!(matches!(result, Err(MatchingError::MissingInputData(msg)) if msg.contains("nobody")));
    }

    #[tokio::test]
    async fn test_unreadable_directory_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "plain_file", "not a directory");
        let result = load_student_profile(&dir.path().join("plain_file").join("student")).await;
        assert!(matches!(result, Err(MatchingError::Io(_))));
    }

    #[tokio::test]
    async fn test_missing_record_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CV_SUMMARY_FILE, "cv");
        let result = load_student_profile(dir.path()).await;
        assert!(
            matches!(result, Err(MatchingError::MissingInputData(msg)) if msg.contains(STUDENT_DATA_FILE))
        );
    }

    #[tokio::test]
    async fn test_broken_record_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), STUDENT_DATA_FILE, "{ not json");
        let result = load_student_profile(dir.path()).await;
        assert!(matches!(result, Err(MatchingError::InvalidInputData(_))));
    }

    #[test]
    fn test_key_areas_stop_at_next_heading() {
        assert_eq!(
            extract_key_areas(TRANSCRIPT),
            vec!["Robotics", "Machine Learning"]
        );
        assert!(extract_key_areas("no heading").is_empty());
    }
}
