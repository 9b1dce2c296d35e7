//! Roadmap generation.
//!
//! The model drafts the weeks; `normalize_weeks` then forces exactly four
//! weeks numbered 1 to 4, none completed. Weeks the model left out, or the
//! whole plan when the model fails, come from `template_week`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::evaluation::skills::{normalize_missing_skills, MISSING_SKILL_COUNT};
use crate::llm_client::lenient::{lenient_items, lenient_string, string_items};
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::TextGenerator;
use crate::market::photos::PhotoSearch;
use crate::market::videos::{search_results_link, Video, VideoSearch};
use crate::market::MarketError;
use crate::plan::prompts::ROADMAP_PROMPT_TEMPLATE;

pub const PLAN_WEEKS: usize = MISSING_SKILL_COUNT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWeek {
    pub week: u32,
    pub focus: String,
    pub description: String,
    pub search_query: String,
    pub tasks: Vec<String>,
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Stored as `learning_plans.plan_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub weeks: Vec<PlanWeek>,
}

#[derive(Debug, Deserialize)]
struct DraftRoadmap {
    #[serde(default, deserialize_with = "lenient_items")]
    weeks: Vec<DraftWeek>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DraftWeek {
    #[serde(deserialize_with = "lenient_string")]
    focus: String,
    #[serde(deserialize_with = "lenient_string")]
    description: String,
    #[serde(deserialize_with = "lenient_string")]
    search_query: String,
    #[serde(deserialize_with = "string_items")]
    tasks: Vec<String>,
    #[serde(deserialize_with = "string_items")]
    outcomes: Vec<String>,
}

fn non_empty(value: String) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

/// Placeholder week for `topic`.
pub fn template_week(week: u32, topic: &str, role: &str) -> PlanWeek {
    PlanWeek {
        week,
        focus: topic.to_string(),
        description: format!("Build working knowledge of {topic} for the {role} role."),
        search_query: topic.to_string(),
        tasks: vec![
            format!("Study the fundamentals of {topic}"),
            format!("Complete hands-on exercises in {topic}"),
            format!("Build a small project that uses {topic}"),
        ],
        outcomes: vec![
            format!("Explain the core concepts of {topic}"),
            format!("Apply {topic} in a practical project"),
        ],
        videos: vec![],
        image: None,
        completed: false,
    }
}

/// Four template weeks, one per topic.
pub fn fallback_roadmap(topics: &[String], role: &str) -> Roadmap {
    Roadmap {
        weeks: normalize_weeks(vec![], topics, role),
    }
}

fn normalize_weeks(drafts: Vec<DraftWeek>, topics: &[String], role: &str) -> Vec<PlanWeek> {
    let mut drafts = drafts.into_iter();
    (0..PLAN_WEEKS)
        .map(|i| {
            let number = i as u32 + 1;
            let topic = topics.get(i).map(String::as_str).unwrap_or(role);
            let template = template_week(number, topic, role);
            let Some(draft) = drafts.next() else {
                return template;
            };

            let focus = non_empty(draft.focus).unwrap_or(template.focus);
            PlanWeek {
                week: number,
                search_query: non_empty(draft.search_query).unwrap_or_else(|| focus.clone()),
                description: non_empty(draft.description).unwrap_or(template.description),
                tasks: if draft.tasks.is_empty() { template.tasks } else { draft.tasks },
                outcomes: if draft.outcomes.is_empty() { template.outcomes } else { draft.outcomes },
                focus,
                videos: vec![],
                image: None,
                completed: false,
            }
        })
        .collect()
}

/// Drafts the roadmap with the model. Never fails: a model error yields the
/// template roadmap.
pub async fn draft_roadmap(
    llm: &dyn TextGenerator,
    role: &str,
    skills_found: &[String],
    missing_skills: &[String],
) -> Roadmap {
    let topics = normalize_missing_skills(missing_skills.to_vec());
    let prompt = format!(
        "{}\n{JSON_ONLY_INSTRUCTION}",
        fill(
            ROADMAP_PROMPT_TEMPLATE,
            &[
                ("role", role),
                ("skills_found", &skills_found.join(", ")),
                ("missing_skills", &topics.join(", ")),
            ],
        )
    );

    match llm.call_json::<DraftRoadmap>(&prompt).await {
        Ok(draft) => Roadmap {
            weeks: normalize_weeks(draft.weeks, &topics, role),
        },
        Err(e) => {
            warn!("Plan generation failed, using template roadmap: {e}");
            fallback_roadmap(&topics, role)
        }
    }
}

/// Tutorial videos for `query`. Without an API key a search-results link
/// stands in; any other failure gives no videos.
pub async fn videos_for(videos: &VideoSearch, query: &str) -> Vec<Video> {
    match videos.search(query, 1).await {
        Ok(found) => found,
        Err(MarketError::NotConfigured) => vec![search_results_link(query)],
        Err(e) => {
            warn!("Video search failed for {query:?}: {e}");
            vec![]
        }
    }
}

async fn image_for(photos: &PhotoSearch, query: &str) -> Option<String> {
    match photos.search(query, 1).await {
        Ok(urls) => urls.into_iter().next(),
        Err(MarketError::NotConfigured) => None,
        Err(e) => {
            warn!("Photo search failed for {query:?}: {e}");
            None
        }
    }
}

/// Attaches videos and a cover image to each week, one week at a time.
pub async fn enrich(roadmap: &mut Roadmap, videos: &VideoSearch, photos: &PhotoSearch) {
    for week in &mut roadmap.weeks {
        week.videos = videos_for(videos, &week.search_query).await;
        week.image = image_for(photos, &week.focus).await;
    }
}
