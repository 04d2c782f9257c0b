use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const GPA_UNAVAILABLE: &str = "Not available";

/// Grade point average: a number, or explicitly unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Gpa {
    Value(f64),
    #[default]
    Unavailable,
}

impl Gpa {
    /// Accepts a JSON number, a numeric string, `null`, or any other string
    /// (treated as unavailable).
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map(Gpa::Value).unwrap_or_default(),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Gpa::Value)
                .unwrap_or_default(),
            _ => Gpa::Unavailable,
        }
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gpa::Value(v) => write!(f, "{v}"),
            Gpa::Unavailable => f.write_str(GPA_UNAVAILABLE),
        }
    }
}

impl Serialize for Gpa {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Gpa::Value(v) => serializer.serialize_f64(*v),
            Gpa::Unavailable => serializer.serialize_str(GPA_UNAVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Gpa {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(Gpa::from_json(value.as_ref()))
    }
}

/// One transcript line: course name and grade as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub grade: String,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(other) if !other.is_null() => other.to_string(),
        _ => String::new(),
    })
}

/// Shape of `student_data.json`. Every field is optional on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentRecord {
    pub interests: Vec<String>,
    pub preferred_topics: Vec<String>,
    pub skills: Vec<String>,
    pub courses: Vec<Course>,
    pub gpa: Gpa,
    pub personal_info: serde_json::Map<String, Value>,
    pub motivation_letter_text: Option<String>,
    pub advisor_preferences: Option<String>,
    pub additional_notes: Vec<String>,
    pub status: Option<String>,
    pub confirmation_time: Option<String>,
}

/// Everything the scorer knows about a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentProfile {
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub courses: Vec<Course>,
    pub preferred_topics: Vec<String>,
    pub cv_summary: String,
    pub transcript_summary: String,
    pub gpa: Gpa,
    /// Areas listed under "Key Areas of Study:" in the transcript summary.
    pub key_areas: Vec<String>,
    pub personal_info: serde_json::Map<String, Value>,
    pub motivation_letter_text: Option<String>,
    pub advisor_preferences: Option<String>,
}
