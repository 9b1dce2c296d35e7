// Dashboard aggregation across plans, quizzes, interviews and badges, with
// news and exchange-rate insights.

pub mod handlers;
pub mod stats;
