// Match analysis prompt templates.

pub const MATCH_ANALYSIS_SYSTEM: &str = "You are an expert at matching students with thesis projects.";

/// Replace: {cv_summary}, {transcript_summary}, {interests}, {preferred_topics},
/// {skills}, {gpa}, {key_areas}, {title}, {thesis_type}, {chair_name}, {description},
/// {research_fields}, {technical_requirements}, {academic_requirements}, {timeline}, {contact}
pub const MATCH_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze how well this student matches the thesis project. Consider all aspects carefully.

STUDENT PROFILE:
CV Summary: {cv_summary}

Academic Performance:
{transcript_summary}

Interests: {interests}
Preferred Topics: {preferred_topics}
Skills: {skills}
GPA: {gpa}
Key Areas of Study: {key_areas}

THESIS PROJECT:
Title: {title}
Type: {thesis_type}
Chair: {chair_name}
Description: {description}
Research Fields: {research_fields}
Technical Requirements: {technical_requirements}
Academic Requirements: {academic_requirements}
Timeline: {timeline}
Contact: {contact}

Provide a detailed analysis with the following structure:

1. Match Score (0-100):

2. Key Strengths:
- List the student's strongest matching points
- Highlight relevant courses and grades
- Note matching skills and interests

3. Potential Gaps:
- Identify missing requirements
- Note areas needing improvement
- Suggest preparation steps

4. Recommendations:
- Specific actions to improve match
- Suggested preparation
- Points to emphasize in application

5. Detailed Analysis:
- Academic alignment
- Technical preparation
- Research interest fit
- Experience relevance

Be specific and reference actual courses, skills, and experiences from the student's profile."#;
