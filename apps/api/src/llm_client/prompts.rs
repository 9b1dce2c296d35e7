// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it and appends these where the reply must be JSON.

/// Closing instruction appended to every prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY a valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences like ```json.";

/// Fills `{name}` placeholders in a prompt template in a single pass.
///
/// Substituted text is never rescanned, so user input containing `{name}`
/// stays literal. Braces that do not enclose a known key are kept as is.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let lookup = |key: &str| values.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let filled = after
            .find('}')
            .and_then(|end| lookup(&after[..end]).map(|value| (end, value)));
        match filled {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_placeholder() {
        let out = fill("{role} needs {skill} and {skill}", &[("role", "SRE"), ("skill", "Go")]);
        assert_eq!(out, "SRE needs Go and Go");
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{a} {b}", &[("a", "1")]), "1 {b}");
    }

    #[test]
    fn test_fill_does_not_expand_placeholders_inside_values() {
        let out = fill(
            "Job: {job_description}\nSkills: {resume_skills}",
            &[("job_description", "Must know {resume_skills}"), ("resume_skills", "SECRET_SKILL")],
        );
        assert_eq!(out, "Job: Must know {resume_skills}\nSkills: SECRET_SKILL");
    }

    #[test]
    fn test_fill_keeps_json_braces_in_template() {
        let out = fill(r#"Reply as {"role": "{role}", "weeks": [{}]}"#, &[("role", "SRE")]);
        assert_eq!(out, r#"Reply as {"role": "SRE", "weeks": [{}]}"#);
    }
}
