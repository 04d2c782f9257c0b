use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::student::loader::{CV_SUMMARY_FILE, STUDENT_DATA_FILE, TRANSCRIPT_SUMMARY_FILE};
use crate::student::models::StudentRecord;
use crate::student::transcript::{format_transcript_summary, TranscriptAnalysis};

const CONFIRM_KEYWORD: &str = "confirm";
const KEY_COURSES_SHOWN: usize = 3;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Both the CV and the transcript must be uploaded before answering questions")]
    DocumentsRequired,

    #[error("The profile has already been confirmed")]
    AlreadyConfirmed,

    #[error("Failed to persist student profile: {0}")]
    Io(#[from] std::io::Error),
}

/// Conversation stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStage {
    Initial,
    CvUploaded,
    InterestsShared,
    TopicsShared,
    SkillsShared,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Cv,
    Transcript,
    MotivationLetter,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeReply {
    pub stage: IntakeStage,
    pub message: String,
    pub confirmed: bool,
}

/// One student's intake conversation.
///
/// Stage transitions:
///   Initial --(cv + transcript uploaded)--> CvUploaded
///   CvUploaded --answer--> InterestsShared --answer--> TopicsShared
///   TopicsShared --answer--> SkillsShared --answer--> Completed
///   Completed --"confirm"--> confirmed
#[derive(Debug, Clone)]
pub struct IntakeSession {
    pub student_id: Uuid,
    pub stage: IntakeStage,
    pub cv_summary: Option<String>,
    pub transcript_summary: Option<String>,
    pub record: StudentRecord,
    pub confirmed: bool,
}

impl IntakeSession {
    pub fn new(student_id: Uuid) -> Self {
        Self {
            student_id,
            stage: IntakeStage::Initial,
            cv_summary: None,
            transcript_summary: None,
            record: StudentRecord::default(),
            confirmed: false,
        }
    }

    /// Stores a processed document. Leaves `Initial` once both the CV and the
    /// transcript are present.
    pub fn record_upload(
        &mut self,
        kind: UploadKind,
        summary: String,
    ) -> Result<IntakeReply, IntakeError> {
        if self.confirmed {
            return Err(IntakeError::AlreadyConfirmed);
        }

        match kind {
            UploadKind::Cv => self.cv_summary = Some(summary),
            UploadKind::Transcript => self.transcript_summary = Some(summary),
            UploadKind::MotivationLetter => self.record.motivation_letter_text = Some(summary),
        }

        let documents_ready = self.cv_summary.is_some() && self.transcript_summary.is_some();
        let message = if self.stage == IntakeStage::Initial && documents_ready {
            self.stage = IntakeStage::CvUploaded;
            format!(
                "I've processed both your CV and transcript. Here's what I understood:\n\n\
                 From your CV:\n{}\n\nFrom your transcript:\n{}\n\nNow, {}",
                self.cv_summary.as_deref().unwrap_or_default(),
                self.transcript_summary.as_deref().unwrap_or_default(),
                self.question()
            )
        } else {
            self.question()
        };

        Ok(self.reply(message))
    }

    /// Records a transcript analysis: courses and GPA go into the record, the
    /// formatted summary counts as the transcript upload.
    pub fn record_transcript(
        &mut self,
        analysis: TranscriptAnalysis,
    ) -> Result<IntakeReply, IntakeError> {
        let summary = format_transcript_summary(&analysis);
        let reply = self.record_upload(UploadKind::Transcript, summary)?;
        self.record.courses = analysis.courses;
        self.record.gpa = analysis.gpa;
        Ok(reply)
    }

    /// Applies a free-text answer to the question of the current stage and
    /// advances one stage.
    pub fn answer(&mut self, text: &str) -> Result<IntakeReply, IntakeError> {
        if self.confirmed {
            return Err(IntakeError::AlreadyConfirmed);
        }

        let next = match self.stage {
            IntakeStage::Initial => return Err(IntakeError::DocumentsRequired),
            IntakeStage::CvUploaded => {
                self.record.interests.extend(split_answer(text));
                IntakeStage::InterestsShared
            }
            IntakeStage::InterestsShared => {
                self.record.preferred_topics.extend(split_answer(text));
                IntakeStage::TopicsShared
            }
            IntakeStage::TopicsShared => {
                self.record.skills.extend(split_answer(text));
                IntakeStage::SkillsShared
            }
            IntakeStage::SkillsShared => {
                let preference = text.trim();
                if !preference.is_empty() {
                    self.record.advisor_preferences = Some(preference.to_string());
                }
                IntakeStage::Completed
            }
            IntakeStage::Completed => return Ok(self.handle_completed(text)),
        };

        self.stage = next;
        let message = self.question();
        Ok(self.reply(message))
    }

    fn handle_completed(&mut self, text: &str) -> IntakeReply {
        if text.trim().eq_ignore_ascii_case(CONFIRM_KEYWORD) {
            self.confirmed = true;
            self.record.status = Some("confirmed".to_string());
            self.record.confirmation_time = Some(chrono::Local::now().to_rfc3339());
            info!("Student {} confirmed their profile", self.student_id);
            return self.reply(
                "Thank you for confirming! Your profile is saved and ready for thesis matching."
                    .to_string(),
            );
        }

        let note = text.trim();
        if !note.is_empty() {
            self.record.additional_notes.push(note.to_string());
        }
        self.reply(
            "Noted. Please type 'confirm' when you're ready to proceed with the matching process."
                .to_string(),
        )
    }

    /// Takes back a confirmation whose profile could not be saved, so the
    /// student can confirm again.
    pub fn reopen(&mut self) {
        self.confirmed = false;
        self.record.status = None;
        self.record.confirmation_time = None;
    }

    /// The question asked in the current stage.
    pub fn question(&self) -> String {
        match self.stage {
            IntakeStage::Initial => "Hi! I'm your thesis matching assistant. To help you find the perfect thesis opportunity, I'll need to learn more about you. Please upload both your CV and academic transcript.".to_string(),
            IntakeStage::CvUploaded => "Could you tell me about your main areas of interest in your field of study?".to_string(),
            IntakeStage::InterestsShared => "What specific topics would you like to work on for your thesis? You can list multiple topics.".to_string(),
            IntakeStage::TopicsShared => "What technical skills do you have that you'd like to apply in your thesis work?".to_string(),
            IntakeStage::SkillsShared => "Is there anything specific you're looking for in a thesis advisor or research group?".to_string(),
            IntakeStage::Completed => self.completion_summary(),
        }
    }

    fn completion_summary(&self) -> String {
        let key_courses: Vec<&str> = self
            .record
            .courses
            .iter()
            .take(KEY_COURSES_SHOWN)
            .map(|c| c.name.as_str())
            .collect();

        format!(
            "Perfect! I've gathered all the necessary information about your profile. Here's a summary of what I know:\n\n\
             1. Your CV and transcript have been processed and analyzed\n\
             2. Academic Performance: {} GPA\n\
             3. Key Courses: {}\n\
             4. Interests: {}\n\
             5. Preferred Topics: {}\n\
             6. Technical Skills: {}\n\n\
             Please type 'confirm' to proceed with the matching process, or share any additional information you'd like me to consider.",
            self.record.gpa,
            key_courses.join(", "),
            self.record.interests.join(", "),
            self.record.preferred_topics.join(", "),
            self.record.skills.join(", "),
        )
    }

    fn reply(&self, message: String) -> IntakeReply {
        IntakeReply {
            stage: self.stage,
            message,
            confirmed: self.confirmed,
        }
    }

    /// Writes the profile files the student loader reads into `dir`.
    pub async fn persist(&self, dir: &Path) -> Result<(), IntakeError> {
        tokio::fs::create_dir_all(dir).await?;

        let json = serde_json::to_string_pretty(&self.record).map_err(std::io::Error::from)?;
        tokio::fs::write(dir.join(STUDENT_DATA_FILE), json).await?;
        tokio::fs::write(
            dir.join(CV_SUMMARY_FILE),
            self.cv_summary.as_deref().unwrap_or_default(),
        )
        .await?;
        tokio::fs::write(
            dir.join(TRANSCRIPT_SUMMARY_FILE),
            self.transcript_summary.as_deref().unwrap_or_default(),
        )
        .await?;

        info!("Persisted student profile to {}", dir.display());
        Ok(())
    }
}

/// Comma-separated answer items, trimmed, empties dropped.
fn split_answer(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}
