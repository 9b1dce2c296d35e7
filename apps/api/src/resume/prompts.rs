// Prompt for résumé structuring. `{resume_text}` is filled before sending.

pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) parser. Extract the following details from the resume text below:
- personal: { firstName, lastName, email, phone, summary }
- education: [{ school, degree, field, year }]
- experience: [{ company, role, start, end, description }]
- projects: [{ title, techStack, description }]
- skills: [comprehensive list of technical skills, tools, and languages found across the entire resume, including those mentioned in experience or project descriptions]

Keys must be exactly as shown above.

Resume Text:
{resume_text}
"#;
