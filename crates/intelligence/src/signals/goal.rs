//! Goal text from the employee's development plans.

use crate::types::DevelopmentPlan;

/// Goals of the most recently created plan that is still a draft, pending or
/// approved. Rejected and completed plans are skipped entirely, so they never
/// shadow an older eligible plan. Empty when nothing qualifies.
pub fn select_goal_text(plans: &[DevelopmentPlan]) -> String {
    plans
        .iter()
        .filter(|p| p.status.is_goal_source())
        .max_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        })
        .map(|p| p.goals.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityId, PlanStatus};
    use chrono::{TimeZone, Utc};

    fn plan(id: &str, status: PlanStatus, day: u32, goals: &str) -> DevelopmentPlan {
        DevelopmentPlan {
            id: EntityId::new(id),
            employee_id: EntityId::new("emp"),
            status,
            goals: goals.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
            recommended_resources: vec![],
        }
    }

    #[test]
    fn test_newer_approved_plan_beats_older_draft() {
        let plans = vec![
            plan("p1", PlanStatus::Draft, 1, "learn sql"),
            plan("p2", PlanStatus::Approved, 5, "become a full stack developer"),
        ];
        assert_eq!(select_goal_text(&plans), "become a full stack developer");
    }

    #[test]
    fn test_order_of_input_does_not_matter() {
        let plans = vec![
            plan("p2", PlanStatus::Pending, 9, "lead the platform team"),
            plan("p1", PlanStatus::Draft, 2, "learn sql"),
        ];
        assert_eq!(select_goal_text(&plans), "lead the platform team");
    }

    #[test]
    fn test_rejected_newer_plan_does_not_supersede() {
        let plans = vec![
            plan("p1", PlanStatus::Approved, 1, "master kubernetes"),
            plan("p2", PlanStatus::Rejected, 20, "something stale"),
            plan("p3", PlanStatus::Completed, 25, "old finished goals"),
        ];
        assert_eq!(select_goal_text(&plans), "master kubernetes");
    }

    #[test]
    fn test_no_eligible_plan_yields_empty_goal() {
        assert_eq!(select_goal_text(&[]), "");
        let plans = vec![plan("p1", PlanStatus::Rejected, 1, "nope")];
        assert_eq!(select_goal_text(&plans), "");
    }
}
