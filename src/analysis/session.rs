use crate::analysis::aggregator::UsageAggregator;
use crate::analysis::champion_stats::UsageReport;
use crate::api::MatchSource;
use crate::category::MatchCategory;
use crate::error::AppError;
use crate::identity::{IdentityResolver, PlayerHandle};
use crate::rate_limit::Pacer;
use log::warn;

#[derive(Debug)]
pub struct PlayerAnalysis {
    pub handle: PlayerHandle,
    pub report: UsageReport,
    pub error: Option<AppError>,
}

/// Resolves and aggregates each handle independently, in input order.
///
/// A lookup failure yields an empty report carrying the error; it never stops
/// the remaining handles. Precondition violations are returned as-is since they
/// would fail identically for every handle.
pub fn analyze_players<S, A, P>(
    resolver: &IdentityResolver<S>,
    aggregator: &mut UsageAggregator<A, P>,
    handles: &[PlayerHandle],
    categories: &[MatchCategory],
    max_per_category: usize,
) -> Result<Vec<PlayerAnalysis>, AppError>
where
    S: MatchSource,
    A: MatchSource,
    P: Pacer,
{
    let mut results = Vec::with_capacity(handles.len());

    for handle in handles {
        let outcome = resolver
            .resolve(handle)
            .and_then(|player| aggregator.aggregate(&player, categories, max_per_category));

        match outcome {
            Ok(report) => results.push(PlayerAnalysis {
                handle: handle.clone(),
                report,
                error: None,
            }),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("Failed to analyse {}: {}", handle, e);
                results.push(PlayerAnalysis {
                    handle: handle.clone(),
                    report: UsageReport::empty(),
                    error: Some(e),
                });
            }
        }
    }

    Ok(results)
}
