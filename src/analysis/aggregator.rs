use crate::analysis::champion_stats::{ChampionStatsTracker, UsageReport};
use crate::api::endpoints::MAX_IDS_PER_PAGE;
use crate::api::MatchSource;
use crate::category::MatchCategory;
use crate::error::AppError;
use crate::identity::PlayerId;
use crate::rate_limit::{Cutoff, Pacer};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Folds a player's recent matches into a per-champion usage report.
pub struct UsageAggregator<S, P> {
    source: S,
    pacer: P,
    cutoff: Cutoff,
    progress: ProgressBar,
}

/// State owned by a single `aggregate` call.
#[derive(Default)]
struct Run {
    tracker: ChampionStatsTracker,
    seen: HashSet<String>,
    notices: Vec<String>,
    calls: u32,
    processed: usize,
    cancelled: bool,
}

impl Run {
    fn skip(&mut self, failure: AppError) {
        warn!("{}", failure);
        self.notices.push(failure.to_string());
    }
}

impl<S: MatchSource, P: Pacer> UsageAggregator<S, P> {
    pub fn new(source: S, pacer: P) -> Self {
        UsageAggregator {
            source,
            pacer,
            cutoff: Cutoff::none(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_cutoff(mut self, cutoff: Cutoff) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Only an empty category set or a zero bound fail the call. Category and
    /// match failures are logged, recorded as notices and skipped.
    pub fn aggregate(
        &mut self,
        player: &PlayerId,
        categories: &[MatchCategory],
        max_per_category: usize,
    ) -> Result<UsageReport, AppError> {
        if categories.is_empty() {
            return Err(AppError::PreconditionError(
                "at least one match category is required".to_string(),
            ));
        }
        if max_per_category == 0 {
            return Err(AppError::PreconditionError(
                "matches per category must be positive".to_string(),
            ));
        }

        let mut run = Run::default();
        self.progress.set_length(0);
        self.progress.set_position(0);

        'categories: for category in MatchCategory::dedup(categories) {
            let match_ids = match self.list_match_ids(player, category, max_per_category, &mut run) {
                Ok(ids) => ids,
                Err(e) => {
                    run.skip(AppError::RetrievalError {
                        what: format!("match ids for {}", category),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if run.cancelled {
                break;
            }

            debug!("{}: {} match ids", category, match_ids.len());
            self.progress.inc_length(match_ids.len() as u64);

            for match_id in match_ids {
                if !run.seen.insert(match_id.clone()) {
                    debug!("{} already counted, skipping", match_id);
                    self.progress.inc(1);
                    continue;
                }
                if self.cutoff.is_reached(run.calls) {
                    run.cancelled = true;
                    break 'categories;
                }

                self.pacer.pause();
                run.calls += 1;
                self.tally_match(player, &match_id, &mut run);
                self.progress.inc(1);
            }
        }

        if run.cancelled {
            warn!(
                "Cutoff reached for {} after {} calls, returning partial report",
                player.short(),
                run.calls
            );
        }
        info!(
            "Aggregated {} matches for {} ({} skipped, {} calls)",
            run.processed,
            player.short(),
            run.notices.len(),
            run.calls
        );

        Ok(UsageReport {
            rows: run.tracker.into_rows(),
            matches_processed: run.processed,
            notices: run.notices,
            cancelled: run.cancelled,
        })
    }

    /// Pages through the listing until `max` ids or a short page.
    fn list_match_ids(
        &self,
        player: &PlayerId,
        category: MatchCategory,
        max: usize,
        run: &mut Run,
    ) -> Result<Vec<String>, AppError> {
        let mut ids = Vec::new();

        while ids.len() < max {
            if self.cutoff.is_reached(run.calls) {
                run.cancelled = true;
                break;
            }

            let want = (max - ids.len()).min(MAX_IDS_PER_PAGE);
            run.calls += 1;
            let page = self.source.match_ids(player.as_str(), category, want, ids.len())?;
            let exhausted = page.len() < want;
            ids.extend(page);
            if exhausted {
                break;
            }
        }

        ids.truncate(max);
        Ok(ids)
    }

    fn tally_match(&self, player: &PlayerId, match_id: &str, run: &mut Run) {
        let detail = match self.source.match_detail(match_id) {
            Ok(detail) => detail,
            Err(e) => {
                run.skip(AppError::RetrievalError {
                    what: format!("match {}", match_id),
                    reason: e.to_string(),
                });
                return;
            }
        };

        // The detail payload's own id is authoritative when present.
        let detail_id = detail
            .metadata
            .as_ref()
            .map(|m| m.match_id.as_str())
            .unwrap_or(match_id);

        match detail.participant(player.as_str()) {
            Some(participant) => {
                debug!(
                    "{} (queue {}): {} ({})",
                    detail_id,
                    detail
                        .info
                        .queue_id
                        .map_or_else(|| "?".to_string(), |q| q.to_string()),
                    participant.champion_name,
                    if participant.win { "win" } else { "loss" }
                );
                run.tracker.add_game(&participant.champion_name, participant.win);
                run.processed += 1;
            }
            None => run.skip(AppError::SkippedMatch {
                match_id: detail_id.to_string(),
                reason: format!("player {} is not a participant", player.short()),
            }),
        }
    }
}
