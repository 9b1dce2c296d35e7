// Prompt for roadmap generation. `{role}`, `{skills_found}` and
// `{missing_skills}` are filled before sending.

pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"You are a career coach. A user wants to become a {role}.
They already know: {skills_found}.
They are missing or need to improve: {missing_skills}.

Generate a structured 4-week learning roadmap, one week per missing skill in the order given.
Each week should have:
- week: (number 1-4)
- focus: (main topic)
- description: (brief overview)
- search_query: (a specific YouTube search query for this topic)
- tasks: (3-4 specific actionable items)
- outcomes: (2-3 learning goals)

Return a JSON object with the key "weeks" containing an array of 4 objects.
"#;
