// Prompt for skill evaluation. `{job_role}`, `{job_description}` and
// `{resume_skills}` are filled before sending.

pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are a professional hiring manager. Evaluate the following resume skills against the target job role and description.
Target Job Role: {job_role}
Job Description: {job_description}
Resume Skills: {resume_skills}

Tasks:
1. Calculate a match_score (0-100) based on how well the candidate's skills align with the role. Be fair but encouraging.
2. Identify matched_skills: list of skills from the resume that are directly or semantically relevant to the job.
3. Identify missing_skills: list of EXACTLY 4 critical skills/tools mentioned in the job description that are missing from the resume.
   Prioritize these by importance for the role. If fewer than 4 are missing, suggest related skills that would strengthen the profile.

Return a JSON object with this structure:
{
  "match_score": integer,
  "matched_skills": [string],
  "missing_skills": [exactly 4 strings, ordered by importance]
}
"#;
