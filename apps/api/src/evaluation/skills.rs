//! Skill scoring against a job description.
//!
//! The model proposes a score and gap list; `normalize_missing_skills` forces
//! the gap list to exactly four entries. When the model call fails the
//! keyword heuristic in `fallback_evaluation` is used instead.

use serde::Deserialize;
use tracing::{info, warn};

use crate::evaluation::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::TextGenerator;

/// Number of missing skills every evaluation reports. The learning plan has
/// one week per missing skill.
pub const MISSING_SKILL_COUNT: usize = 4;

/// Pool used to pad short gap lists, in order.
const FILLER_SKILLS: [&str; 4] = ["Problem Solving", "Communication", "Time Management", "Teamwork"];

/// Gap list reported when the model could not be used.
const FALLBACK_MISSING_SKILLS: [&str; 4] = [
    "Communication",
    "Problem Solving",
    "Technical Documentation",
    "Collaboration",
];

/// Floor applied to the heuristic score whenever the candidate lists any skill.
const FALLBACK_SCORE_FLOOR: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillScore {
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelEvaluation {
    #[serde(default)]
    match_score: f64,
    #[serde(default)]
    matched_skills: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
}

/// Truncates to four entries, or pads from the filler pool (skipping skills
/// already present) until four entries or the pool runs out.
pub fn normalize_missing_skills(mut skills: Vec<String>) -> Vec<String> {
    skills.truncate(MISSING_SKILL_COUNT);
    for filler in FILLER_SKILLS {
        if skills.len() >= MISSING_SKILL_COUNT {
            break;
        }
        if !skills.iter().any(|s| s == filler) {
            skills.push(filler.to_string());
        }
    }
    skills
}

/// Keyword heuristic used when the model is unavailable.
///
/// A skill matches when its lowercase form is a substring of the lowercase
/// description, or when any of its whitespace-separated words is.
/// Score is the matched share as a percentage, floored at 20 when any skills
/// were given, and 0 when none were.
pub fn fallback_evaluation(resume_skills: &[String], job_description: &str) -> SkillScore {
    let description = job_description.to_lowercase();
    let matched_skills: Vec<String> = resume_skills
        .iter()
        .filter(|skill| {
            let skill = skill.to_lowercase();
            description.contains(&skill)
                || skill.split_whitespace().any(|word| description.contains(word))
        })
        .cloned()
        .collect();

    let score = if resume_skills.is_empty() {
        0.0
    } else {
        let share = matched_skills.len() as f64 / resume_skills.len() as f64 * 100.0;
        share.max(FALLBACK_SCORE_FLOOR)
    };

    SkillScore {
        score,
        matched_skills,
        missing_skills: FALLBACK_MISSING_SKILLS.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores `resume_skills` against the job. An empty skill list never reaches
/// the model.
pub async fn evaluate_skills(
    llm: &dyn TextGenerator,
    resume_skills: &[String],
    job_description: &str,
    job_role: &str,
) -> SkillScore {
    if resume_skills.is_empty() {
        info!("No resume skills supplied, scoring with the keyword heuristic");
        return fallback_evaluation(resume_skills, job_description);
    }

    let prompt = format!(
        "{}\n{JSON_ONLY_INSTRUCTION}",
        fill(
            EVALUATION_PROMPT_TEMPLATE,
            &[
                ("job_role", job_role),
                ("job_description", job_description),
                ("resume_skills", &resume_skills.join(", ")),
            ],
        )
    );

    let scored = match llm.call_json::<ModelEvaluation>(&prompt).await {
        Ok(model) => SkillScore {
            score: model.match_score.clamp(0.0, 100.0),
            matched_skills: model.matched_skills,
            missing_skills: normalize_missing_skills(model.missing_skills),
        },
        Err(e) => {
            warn!("Evaluation model call failed, using keyword heuristic: {e}");
            fallback_evaluation(resume_skills, job_description)
        }
    };

    SkillScore {
        score: round2(scored.score),
        ..scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedLlm;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_always_returns_four_without_duplicate_fillers() {
        let pool = ["Rust", "Go", "SQL", "Kafka", "Docker", "AWS", "Linux", "Git", "K8s", "gRPC"];
        for len in 0..=pool.len() {
            let out = normalize_missing_skills(strings(&pool[..len]));
            assert_eq!(out.len(), 4, "input length {len}");
            let mut deduped = out.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), 4, "input length {len}");
        }
    }

    #[test]
    fn test_normalize_skips_fillers_already_present() {
        let out = normalize_missing_skills(strings(&["Communication", "Rust"]));
        assert_eq!(out, strings(&["Communication", "Rust", "Problem Solving", "Time Management"]));
    }

    #[test]
    fn test_normalize_keeps_first_four_in_order() {
        let out = normalize_missing_skills(strings(&["a", "b", "c", "d", "e"]));
        assert_eq!(out, strings(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_fallback_with_no_skills_scores_zero() {
        let out = fallback_evaluation(&[], "We need Python");
        assert_eq!(out.score, 0.0);
        assert!(out.matched_skills.is_empty());
    }

    #[test]
    fn test_fallback_all_skills_present_scores_hundred() {
        let out = fallback_evaluation(&strings(&["Python", "Docker"]), "We need Python and Docker");
        assert_eq!(out.score, 100.0);
        assert_eq!(out.missing_skills, strings(&FALLBACK_MISSING_SKILLS));
    }

    #[test]
    fn test_fallback_score_is_floored_at_twenty() {
        let skills = strings(&["Haskell", "Erlang", "Cobol", "Fortran", "Python", "Ada"]);
        let out = fallback_evaluation(&skills, "Python shop");
        assert_eq!(out.matched_skills, strings(&["Python"]));
        assert_eq!(out.score, 20.0);
    }

    #[test]
    fn test_fallback_matches_on_any_word_of_skill() {
        let out = fallback_evaluation(&strings(&["Machine Learning", "Go"]), "machine vision role");
        assert_eq!(out.matched_skills, strings(&["Machine Learning"]));
        assert_eq!(out.score, 50.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.33333), 33.33);
        assert_eq!(round2(66.666), 66.67);
    }

    #[tokio::test]
    async fn test_model_reply_is_clamped_and_normalized() {
        let llm = ScriptedLlm::replying(&[
            r#"{"match_score": 140, "matched_skills": ["Rust"], "missing_skills": ["Kafka"]}"#,
        ]);
        let out = evaluate_skills(&llm, &strings(&["Rust"]), "Rust and Kafka", "Backend").await;
        assert_eq!(out.score, 100.0);
        assert_eq!(out.matched_skills, strings(&["Rust"]));
        assert_eq!(
            out.missing_skills,
            strings(&["Kafka", "Problem Solving", "Communication", "Time Management"])
        );
    }

    #[tokio::test]
    async fn test_empty_skills_never_call_the_model() {
        let llm = ScriptedLlm::replying(&[r#"{"match_score": 90}"#]);
        let out = evaluate_skills(&llm, &[], "anything", "General").await;
        assert_eq!(out.score, 0.0);
        assert_eq!(llm.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_model_failure_uses_heuristic() {
        let llm = ScriptedLlm::failing();
        let out = evaluate_skills(&llm, &strings(&["Python"]), "We need Python and Docker", "Dev").await;
        assert_eq!(out.matched_skills, strings(&["Python"]));
        assert_eq!(out.score, 100.0);
        assert_eq!(llm.prompt_count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_role_and_skills() {
        let llm = ScriptedLlm::failing();
        evaluate_skills(&llm, &strings(&["Rust", "SQL"]), "desc", "Platform Engineer").await;
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("Target Job Role: Platform Engineer"));
        assert!(prompts[0].contains("Resume Skills: Rust, SQL"));
        assert!(prompts[0].contains(JSON_ONLY_INSTRUCTION));
    }
}
