// Student intake prompt templates.

/// System prompt for CV summarization.
pub const CV_SUMMARY_SYSTEM: &str = "You are an expert at analyzing CVs. \
    Summarize the key points including education, skills, and experience.";

/// CV summarization prompt. Replace: {cv_text}
pub const CV_SUMMARY_PROMPT_TEMPLATE: &str = "Please summarize this CV:\n\n{cv_text}";

/// Transcript analysis prompt. Replace: {transcript_text}
pub const TRANSCRIPT_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert at analyzing academic transcripts. Extract and organize the following information:
1. List of all courses with their grades
2. The overall GPA if it can be determined
3. Key areas of study
4. Any honors or distinctions

Return a JSON object with exactly this structure:
{
  "courses": [{"name": "Course Name", "grade": "Grade"}],
  "gpa": "X.XX" or null,
  "key_areas": ["Area1", "Area2"],
  "honors": ["Honor1", "Honor2"]
}

TRANSCRIPT:
{transcript_text}"#;
