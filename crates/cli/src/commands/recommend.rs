//! CLI handler for the `recommend` command.

use anyhow::Result;
use skillpath_intelligence::{
    EngineSettings, RecommendationEngine, RecommendationRequest, RecommendationResult,
    TargetSkill,
};
use std::path::PathBuf;

use super::{check_format, load_stores, OracleOverrides};

/// Handle the `recommend` command.
pub(crate) async fn handle_recommend_command(
    data: PathBuf,
    user: String,
    tenant: String,
    targets: Vec<TargetSkill>,
    limit: Option<usize>,
    overrides: OracleOverrides,
    format: String,
) -> Result<()> {
    let json = check_format(&format)?;
    let stores = load_stores(&data)?;
    let settings = overrides.apply(EngineSettings::from_env());
    let engine = RecommendationEngine::with_http_oracle(stores, settings)?;

    let mut request = RecommendationRequest::new(user, tenant).with_targets(targets);
    request.limit = limit;
    let result = engine.recommend(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_text(&result));
    }
    Ok(())
}

fn render_text(result: &RecommendationResult) -> String {
    if result.is_empty() {
        return "No recommendations.\n".to_string();
    }
    let mut out = format!("Recommendations ({}):\n", result.len());
    for (i, rec) in result.recommendations.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} [{}] by {}\n",
            i + 1,
            rec.title,
            rec.resource_id,
            rec.author.as_deref().unwrap_or(&rec.provider)
        ));
        let mut details = vec![format!("provider: {}", rec.provider)];
        if let Some(kind) = &rec.kind {
            details.push(format!("type: {kind}"));
        }
        if let Some(duration) = &rec.duration {
            details.push(format!("duration: {duration}"));
        }
        if let Some(url) = &rec.url {
            details.push(url.clone());
        }
        out.push_str(&format!("     {}\n", details.join(" | ")));
    }
    out
}
