//! Stats and health routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::export::skill_frequencies;
use crate::state::AppState;

/// How many skills the frequency table reports.
const TOP_SKILLS: usize = 50;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/health", get(health_check))
}

/// GET /api/stats — last batch statistics, per-field success rates, and
/// the skill frequency table.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.stats.read().clone();
    let records = state.records.read();

    let field_rates = stats.as_ref().map(|s| {
        let total = s.total_processed;
        serde_json::json!({
            "name": percentage(s.with_name, total),
            "email": percentage(s.with_email, total),
            "phone": percentage(s.with_phone, total),
            "location": percentage(s.with_location, total),
            "education": percentage(s.with_education, total),
            "skills": percentage(s.with_skills, total),
            "experience": percentage(s.with_experience, total),
        })
    });

    let top_skills: Vec<serde_json::Value> = skill_frequencies(&records, TOP_SKILLS)
        .into_iter()
        .map(|(skill, count)| serde_json::json!({ "skill": skill, "count": count }))
        .collect();

    Json(serde_json::json!({
        "batch": stats,
        "fieldSuccessRates": field_rates,
        "topSkills": top_skills,
        "uploads": count_files_in_dir(&state.config.data_paths.uploads),
        "results": count_files_in_dir(&state.config.data_paths.results),
    }))
}

/// GET /api/health — liveness plus capability availability.
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "semanticModelLoaded": state.embedder.is_available(),
        "storedResumes": state.index.len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64 * 1000.0).round() / 10.0
    }
}

fn count_files_in_dir(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                .count()
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(2, 2), 100.0);
    }
}
