use serde::Serialize;

use crate::models::activity::QuizRow;
use crate::models::plan::LearningPlanRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressStats {
    /// Completed weeks of the most recent plan.
    pub completed_modules: usize,
    pub average_quiz_score: f64,
    pub quizzes_taken: usize,
    pub interviews_done: usize,
    pub badges: Vec<String>,
}

/// Mean quiz score rounded to one decimal, 0 with no quizzes.
pub fn average_quiz_score(quizzes: &[QuizRow]) -> f64 {
    if quizzes.is_empty() {
        return 0.0;
    }
    let total: i64 = quizzes.iter().map(|q| i64::from(q.score)).sum();
    let mean = total as f64 / quizzes.len() as f64;
    (mean * 10.0).round() / 10.0
}

pub fn compute_stats(
    latest_plan: Option<&LearningPlanRow>,
    quizzes: &[QuizRow],
    interviews_done: usize,
    badges: Vec<String>,
) -> ProgressStats {
    ProgressStats {
        completed_modules: latest_plan.map(LearningPlanRow::completed_weeks).unwrap_or(0),
        average_quiz_score: average_quiz_score(quizzes),
        quizzes_taken: quizzes.len(),
        interviews_done,
        badges,
    }
}
