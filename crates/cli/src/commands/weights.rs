//! CLI handler for the `weights` command.

use anyhow::Result;
use serde::Serialize;
use skillpath_intelligence::{EntityId, WeightConfig, WeightResolver, WeightTier};
use std::path::PathBuf;

use super::{check_format, load_stores};

#[derive(Debug, Serialize)]
struct WeightsReport {
    tenant: EntityId,
    tier: WeightTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    legacy_file: Option<PathBuf>,
    weights: WeightConfig,
}

/// Handle the `weights` command.
pub(crate) async fn handle_weights_command(
    data: PathBuf,
    tenant: String,
    format: String,
) -> Result<()> {
    let json = check_format(&format)?;
    let stores = load_stores(&data)?;
    let legacy_file = skillpath_state::legacy_weights_file();
    let resolver = WeightResolver::new(stores.users.clone(), legacy_file.clone());

    let tenant = EntityId::new(tenant);
    let (weights, tier) = resolver.resolve_with_tier(&tenant).await;
    let report = WeightsReport {
        tenant,
        tier,
        legacy_file,
        weights,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

fn render_text(report: &WeightsReport) -> String {
    let mut out = format!(
        "Weights for tenant {} (source: {}):\n",
        report.tenant, report.tier
    );
    for (category, weight) in report.weights.iter() {
        out.push_str(&format!("  {:<18} {:.3}\n", category.key(), weight));
    }
    out.push_str(&format!("  {:<18} {:.3}\n", "total", report.weights.total()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lists_categories_and_total() {
        let report = WeightsReport {
            tenant: "acme".into(),
            tier: WeightTier::Default,
            legacy_file: None,
            weights: WeightConfig::defaults(),
        };
        let text = render_text(&report);
        assert!(text.starts_with("Weights for tenant acme (source: default):"));
        assert!(text.contains("skill_gap"));
        assert!(text.contains("total              1.000"));
    }
}
