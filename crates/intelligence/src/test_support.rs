//! Test fixtures for the intelligence crate.

use crate::store::Dataset;
use serde_json::json;

/// Two tenants sharing a skill taxonomy.
///
/// `acme` has an admin without weights, the requester `emp-1`, peers with and
/// without signal, and a creator `Dana` whose resources lack a provider.
/// `globex` owns a resource on the same skill that must never leak into acme.
pub(crate) fn sample_dataset() -> Dataset {
    let performance: Vec<_> = (1..=7)
        .map(|month| {
            json!({
                "_id": format!("perf-{month}"),
                "employeeId": "emp-1",
                "createdAt": format!("2024-{month:02}-15T12:00:00Z"),
                "rating": month % 5 + 1
            })
        })
        .collect();

    serde_json::from_value(json!({
        "users": [
            {"id": "admin-1", "tenantId": "acme", "name": "Ada", "role": "manager", "isAdmin": true},
            {"id": "emp-1", "tenantId": "acme", "name": "Eli",
             "skills": [{"skillId": "s1", "level": 2}, {"skillId": "s1", "level": 4}]},
            {"id": "peer-1", "tenantId": "acme", "name": "Pat",
             "skills": [{"skillId": "s1", "level": 4}, {"skillId": "s2", "level": 3}]},
            {"id": "peer-2", "tenantId": "acme", "name": "Quinn"},
            {"id": "peer-3", "tenantId": "acme", "name": "Rae"},
            {"id": "dana", "tenantId": "acme", "name": "Dana"},
            {"id": "globex-1", "tenantId": "globex", "name": "Gil",
             "skills": [{"skillId": "s1", "level": 5}]},
            {"id": "globex-admin", "tenantId": "globex", "name": "Gwen", "isAdmin": true,
             "recommendationWeights": {"collaborative": 0.9}}
        ],
        "skills": [
            {"_id": "s1", "name": "Rust", "category": "engineering"},
            {"_id": "s2", "name": "SQL", "category": "data"}
        ],
        "resources": [
            {"id": "r1", "title": "Rust in Action", "provider": "Unknown", "type": "book",
             "url": "https://example.com/r1", "duration": "12h", "skillId": "s1", "createdBy": "dana"},
            {"id": "r2", "title": "SQL Foundations", "provider": "Coursera", "type": "course",
             "duration": 240, "skillId": "s2", "createdBy": "peer-1"},
            {"id": "r3", "title": "Async Patterns", "type": "video", "skillId": "s1",
             "difficulty": "advanced", "createdBy": "dana"},
            {"id": "globex-r1", "title": "Rust for Globex", "provider": "Internal",
             "type": "course", "skillId": "s1", "createdBy": "globex-1"}
        ],
        "plans": [
            {"id": "plan-1", "employeeId": "emp-1", "status": "draft",
             "goals": "learn sql", "createdAt": "2024-01-10T00:00:00Z"},
            {"id": "plan-2", "employeeId": "emp-1", "status": "approved",
             "goals": "become a full stack developer", "createdAt": "2024-05-10T00:00:00Z",
             "recommendedResources": ["r3"]},
            {"id": "plan-3", "employeeId": "emp-1", "status": "rejected",
             "goals": "stale goals", "createdAt": "2024-08-10T00:00:00Z"},
            {"id": "plan-4", "employeeId": "peer-2", "status": "completed",
             "goals": "", "createdAt": "2024-02-01T00:00:00Z",
             "recommendedResources": ["r2", "r2"]},
            {"id": "plan-5", "employeeId": "globex-1", "status": "approved",
             "goals": "", "createdAt": "2024-02-01T00:00:00Z",
             "recommendedResources": ["globex-r1"]}
        ],
        "performance": performance
    }))
    .expect("sample dataset is valid")
}
