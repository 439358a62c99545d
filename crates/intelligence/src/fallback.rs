//! Fallback Sampler: unscored recommendations for when the oracle is down.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::reconcile::ReconcileItem;
use crate::types::{Recommendation, ResourceCandidate};

/// Pick up to `limit` candidates in random order, ignoring every signal.
///
/// Authors come from the candidate's creator. An empty catalog yields an
/// empty list, never an error.
pub fn sample_fallback<R: Rng + ?Sized>(
    candidates: &[ResourceCandidate],
    limit: usize,
    rng: &mut R,
) -> Vec<ReconcileItem> {
    let mut pool: Vec<&ResourceCandidate> = candidates.iter().collect();
    pool.shuffle(rng);
    pool.into_iter()
        .take(limit)
        .map(|c| {
            let author = c.created_by.name.trim();
            ReconcileItem {
                recommendation: Recommendation {
                    resource_id: c.id.clone(),
                    title: c.title.clone(),
                    provider: c.provider.clone(),
                    kind: c.kind.clone(),
                    url: c.url.clone(),
                    duration: c.duration.clone(),
                    author: (!author.is_empty()).then(|| author.to_string()),
                },
                identifiers: vec![c.id.clone()],
            }
        })
        .collect()
}
