//! Episode Status Reconciler
//!
//! Keeps episode records and the show rollup consistent. Runs entirely
//! inside one `ProgressTx`, in this fixed order:
//!
//! 1. upsert every episode record in the batch
//! 2. for unwatched writes, delete the user's review of that episode
//! 3. recount watched episodes
//! 4. apply [`ShowStatus::after_episode_progress`] once for the whole batch
//! 5. persist count and status on the show
//!
//! Earlier episodes are never marked implicitly; backfill is the caller's call.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::reviews::domain::ReviewItemType;
use crate::modules::tv_progress::domain::{
    entities::{EpisodeRecord, EpisodeUpdate, TrackedShow},
    repositories::ProgressTx,
    value_objects::{EpisodeKey, ShowStatus},
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

/// What to write: one episode (toggle) or a whole season batch (mark all)
#[derive(Debug, Clone)]
pub struct ReconcilePlan {
    pub user_id: String,
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episodes: Vec<EpisodeUpdate>,
    pub watched: bool,
    /// Show row to create if the user does not track the show yet
    pub adopt: Option<TrackedShow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOutcome {
    pub tracked_show_id: Uuid,
    pub watched_episodes: i32,
    pub previous_status: ShowStatus,
    pub status: ShowStatus,
    pub show_completed: bool,
    pub show_status_changed: bool,
    pub show_adopted: bool,
    /// Records whose watched flag actually flipped
    pub episodes_changed: usize,
    pub reviews_deleted: usize,
}

pub struct EpisodeStatusReconciler;

impl EpisodeStatusReconciler {
    pub fn reconcile(tx: &mut dyn ProgressTx, plan: ReconcilePlan) -> AppResult<ReconcileOutcome> {
        if plan.episodes.is_empty() {
            return Err(AppError::ValidationError(
                "At least one episode is required".to_string(),
            ));
        }

        let (show, show_adopted) = Self::get_or_adopt(tx, &plan)?;
        let now = Utc::now();

        let mut episodes_changed = 0;
        let mut reviews_deleted = 0;

        for update in &plan.episodes {
            let key = EpisodeKey::new(plan.tv_show_id, plan.season_number, update.episode_number);

            let mut record = match tx.find_episode(&plan.user_id, key)? {
                Some(existing) => existing,
                None => EpisodeRecord::new(show.id, plan.user_id.clone(), key),
            };

            if record.set_watched(plan.watched, now) {
                episodes_changed += 1;
            }
            record.refresh_metadata(update.episode_name.as_deref(), update.runtime);
            tx.save_episode(&record)?;

            if !plan.watched {
                reviews_deleted += tx.delete_review(
                    &plan.user_id,
                    ReviewItemType::Episode,
                    &key.review_item_id(),
                )?;
            }
        }

        let watched_episodes = tx.count_watched(show.id)?;
        let transition =
            show.status
                .after_episode_progress(plan.watched, watched_episodes, show.total_episodes);

        tx.update_show_progress(show.id, watched_episodes, transition.status)?;

        if transition.status != show.status {
            LogContext::status_transition(
                &plan.user_id,
                plan.tv_show_id,
                &show.status.to_string(),
                &transition.status.to_string(),
            );
        }

        Ok(ReconcileOutcome {
            tracked_show_id: show.id,
            watched_episodes,
            previous_status: show.status,
            status: transition.status,
            show_completed: transition.show_completed,
            show_status_changed: transition.show_status_changed,
            show_adopted,
            episodes_changed,
            reviews_deleted,
        })
    }

    fn get_or_adopt(
        tx: &mut dyn ProgressTx,
        plan: &ReconcilePlan,
    ) -> AppResult<(TrackedShow, bool)> {
        if let Some(show) = tx.lock_show(&plan.user_id, plan.tv_show_id)? {
            return Ok((show, false));
        }

        match &plan.adopt {
            Some(seed) if plan.watched => {
                let stored = tx.insert_show_if_absent(seed)?;
                let adopted = stored.id == seed.id;
                Ok((stored, adopted))
            }
            _ => Err(AppError::NotFound(format!(
                "TV show {} is not in your list",
                plan.tv_show_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::TvShowDetails;
    use std::collections::HashMap;

    /// Records the order of side effects
    #[derive(Default)]
    struct RecordingTx {
        show: Option<TrackedShow>,
        episodes: HashMap<EpisodeKey, EpisodeRecord>,
        calls: Vec<String>,
    }

    impl ProgressTx for RecordingTx {
        fn lock_show(&mut self, _user_id: &str, _tv_show_id: i32) -> AppResult<Option<TrackedShow>> {
            self.calls.push("lock_show".to_string());
            Ok(self.show.clone())
        }

        fn insert_show_if_absent(&mut self, show: &TrackedShow) -> AppResult<TrackedShow> {
            self.calls.push("insert_show".to_string());
            Ok(self.show.get_or_insert_with(|| show.clone()).clone())
        }

        fn find_episode(&mut self, _user_id: &str, key: EpisodeKey) -> AppResult<Option<EpisodeRecord>> {
            Ok(self.episodes.get(&key).cloned())
        }

        fn save_episode(&mut self, record: &EpisodeRecord) -> AppResult<()> {
            self.calls.push(format!("save_episode:{}", record.episode_number));
            self.episodes.insert(record.key(), record.clone());
            Ok(())
        }

        fn delete_review(
            &mut self,
            _user_id: &str,
            _item_type: ReviewItemType,
            item_id: &str,
        ) -> AppResult<usize> {
            self.calls.push(format!("delete_review:{}", item_id));
            Ok(1)
        }

        fn count_watched(&mut self, _tracked_show_id: Uuid) -> AppResult<i32> {
            self.calls.push("count_watched".to_string());
            Ok(self.episodes.values().filter(|e| e.watched).count() as i32)
        }

        fn update_show_progress(
            &mut self,
            _tracked_show_id: Uuid,
            watched_episodes: i32,
            status: ShowStatus,
        ) -> AppResult<()> {
            self.calls.push(format!("update_show:{}:{}", watched_episodes, status));
            if let Some(show) = self.show.as_mut() {
                show.record_progress(watched_episodes, status);
            }
            Ok(())
        }
    }

    fn details(total: i32) -> TvShowDetails {
        TvShowDetails {
            id: 7,
            name: "Andor".to_string(),
            total_episodes: Some(total),
            total_seasons: Some(1),
        }
    }

    fn episode(number: i32) -> EpisodeUpdate {
        EpisodeUpdate {
            episode_number: number,
            episode_name: None,
            runtime: None,
        }
    }

    fn plan(episodes: Vec<EpisodeUpdate>, watched: bool) -> ReconcilePlan {
        ReconcilePlan {
            user_id: "user-1".to_string(),
            tv_show_id: 7,
            season_number: 1,
            episodes,
            watched,
            adopt: None,
        }
    }

    #[test]
    fn unwatch_deletes_review_before_recount_and_update() {
        let mut tx = RecordingTx {
            show: Some(TrackedShow::adopted("user-1".to_string(), &details(3))),
            ..Default::default()
        };

        EpisodeStatusReconciler::reconcile(&mut tx, plan(vec![episode(2)], false)).unwrap();

        assert_eq!(
            tx.calls,
            vec![
                "lock_show",
                "save_episode:2",
                "delete_review:7-S1E2",
                "count_watched",
                "update_show:0:watching",
            ]
        );
    }

    #[test]
    fn batch_evaluates_transition_once() {
        let mut tx = RecordingTx {
            show: Some(TrackedShow::adopted("user-1".to_string(), &details(3))),
            ..Default::default()
        };

        let outcome = EpisodeStatusReconciler::reconcile(
            &mut tx,
            plan(vec![episode(1), episode(2), episode(3)], true),
        )
        .unwrap();

        assert!(outcome.show_completed);
        assert_eq!(outcome.episodes_changed, 3);
        let updates: Vec<_> = tx
            .calls
            .iter()
            .filter(|c| c.starts_with("update_show"))
            .collect();
        assert_eq!(updates, vec!["update_show:3:completed"]);
    }

    #[test]
    fn missing_show_without_seed_is_not_found() {
        let mut tx = RecordingTx::default();

        let err = EpisodeStatusReconciler::reconcile(&mut tx, plan(vec![episode(1)], false))
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(tx.calls, vec!["lock_show"]);
    }

    #[test]
    fn seed_adopts_show_on_watch() {
        let mut tx = RecordingTx::default();
        let mut p = plan(vec![episode(1)], true);
        p.adopt = Some(TrackedShow::adopted("user-1".to_string(), &details(3)));

        let outcome = EpisodeStatusReconciler::reconcile(&mut tx, p).unwrap();

        assert!(outcome.show_adopted);
        assert_eq!(outcome.status, ShowStatus::Watching);
        assert_eq!(outcome.watched_episodes, 1);
    }

    #[test]
    fn empty_batch_is_rejected() {
        let mut tx = RecordingTx::default();
        let err = EpisodeStatusReconciler::reconcile(&mut tx, plan(vec![], true)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(tx.calls.is_empty());
    }
}
