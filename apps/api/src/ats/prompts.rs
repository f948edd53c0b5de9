// Prompts for the optional AI suggestions on top of the rule-based ATS score.

/// Resume text beyond this many characters is not sent to the model.
pub const MAX_RESUME_CHARS: usize = 12_000;

pub const SUGGESTIONS_SYSTEM: &str = "You are an expert resume reviewer who knows how \
    applicant tracking systems parse and rank resumes. You give concrete, specific advice \
    grounded only in the resume text you are shown.";

pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"Review the resume below and suggest improvements that would help it pass an applicant tracking system.

RESUME:
"""
{resume_text}
"""

JOB DESCRIPTION:
"""
{job_description}
"""

A rule-based checker already scored this resume {score}/100 with this feedback:
{feedback}

Guidelines:
- Give between 3 and 7 suggestions
- Each suggestion is one or two sentences and names the exact section or line to change
- Prefer suggestions the rule-based feedback does not already cover
- When a job description is provided, point out missing skills or terms from it
- Do not invent experience the candidate does not have

Return a JSON array of strings, one suggestion per element."#;
