//! Process-local store implementing the progress and review ports.
//!
//! Both ports share one state so the review hook is observable from the
//! review side. Transactions run against a copy of the state that replaces
//! the original only when the work succeeds; all transactions are
//! serialized by a single lock.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::modules::catalog::TvShowDetails;
use crate::modules::reviews::domain::{Review, ReviewItemType, ReviewRepository};
use crate::modules::tv_progress::domain::{
    EpisodeKey, EpisodeRecord, ProgressRepository, ProgressTx, ProgressWork, ReconcileOutcome,
    ShowStatus, TrackedShow,
};
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Default, Clone)]
struct WatchState {
    shows: HashMap<(String, i32), TrackedShow>,
    episodes: HashMap<(String, EpisodeKey), EpisodeRecord>,
    reviews: HashMap<Uuid, Review>,
}

#[derive(Debug, Default)]
pub struct InMemoryWatchStore {
    state: Mutex<WatchState>,
    failing_episode: Mutex<Option<i32>>,
}

impl InMemoryWatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `save_episode` for this episode number fail
    pub fn fail_saves_of_episode(&self, episode_number: i32) {
        if let Ok(mut failing) = self.failing_episode.lock() {
            *failing = Some(episode_number);
        }
    }

    pub fn clear_failures(&self) {
        if let Ok(mut failing) = self.failing_episode.lock() {
            *failing = None;
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, WatchState>> {
        self.state
            .lock()
            .map_err(|_| AppError::InternalError("In-memory store lock poisoned".to_string()))
    }
}

fn show_by_id(state: &mut WatchState, show_id: Uuid) -> AppResult<&mut TrackedShow> {
    state
        .shows
        .values_mut()
        .find(|show| show.id == show_id)
        .ok_or_else(|| AppError::NotFound(format!("Tracked show {}", show_id)))
}

struct InMemoryTx<'a> {
    state: &'a mut WatchState,
    failing_episode: Option<i32>,
}

impl ProgressTx for InMemoryTx<'_> {
    fn lock_show(&mut self, user_id: &str, tv_show_id: i32) -> AppResult<Option<TrackedShow>> {
        Ok(self
            .state
            .shows
            .get(&(user_id.to_string(), tv_show_id))
            .cloned())
    }

    fn insert_show_if_absent(&mut self, show: &TrackedShow) -> AppResult<TrackedShow> {
        Ok(self
            .state
            .shows
            .entry((show.user_id.clone(), show.tv_show_id))
            .or_insert_with(|| show.clone())
            .clone())
    }

    fn find_episode(&mut self, user_id: &str, key: EpisodeKey) -> AppResult<Option<EpisodeRecord>> {
        Ok(self
            .state
            .episodes
            .get(&(user_id.to_string(), key))
            .cloned())
    }

    fn save_episode(&mut self, record: &EpisodeRecord) -> AppResult<()> {
        if self.failing_episode == Some(record.episode_number) {
            return Err(AppError::DatabaseError(format!(
                "Injected failure saving episode {}",
                record.episode_number
            )));
        }
        self.state
            .episodes
            .insert((record.user_id.clone(), record.key()), record.clone());
        Ok(())
    }

    fn delete_review(
        &mut self,
        user_id: &str,
        item_type: ReviewItemType,
        item_id: &str,
    ) -> AppResult<usize> {
        let before = self.state.reviews.len();
        self.state
            .reviews
            .retain(|_, review| !review.is_for(user_id, item_id, item_type));
        Ok(before - self.state.reviews.len())
    }

    fn count_watched(&mut self, tracked_show_id: Uuid) -> AppResult<i32> {
        Ok(self
            .state
            .episodes
            .values()
            .filter(|record| record.tracked_show_id == tracked_show_id && record.watched)
            .count() as i32)
    }

    fn update_show_progress(
        &mut self,
        tracked_show_id: Uuid,
        watched_episodes: i32,
        status: ShowStatus,
    ) -> AppResult<()> {
        let show = self
            .state
            .shows
            .values_mut()
            .find(|show| show.id == tracked_show_id)
            .ok_or_else(|| AppError::NotFound(format!("Tracked show {}", tracked_show_id)))?;
        show.record_progress(watched_episodes, status);
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryWatchStore {
    async fn find_show(&self, user_id: &str, tv_show_id: i32) -> AppResult<Option<TrackedShow>> {
        Ok(self
            .lock()?
            .shows
            .get(&(user_id.to_string(), tv_show_id))
            .cloned())
    }

    async fn list_shows(
        &self,
        user_id: &str,
        status: Option<ShowStatus>,
    ) -> AppResult<Vec<TrackedShow>> {
        let mut shows: Vec<TrackedShow> = self
            .lock()?
            .shows
            .values()
            .filter(|show| show.user_id == user_id)
            .filter(|show| status.map_or(true, |s| show.status == s))
            .cloned()
            .collect();
        shows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(shows)
    }

    async fn insert_show(&self, show: &TrackedShow) -> AppResult<TrackedShow> {
        let mut state = self.lock()?;
        let key = (show.user_id.clone(), show.tv_show_id);
        if state.shows.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "TV show {} is already tracked",
                show.tv_show_id
            )));
        }
        state.shows.insert(key, show.clone());
        Ok(show.clone())
    }

    async fn update_show_status(&self, show_id: Uuid, status: ShowStatus) -> AppResult<TrackedShow> {
        let mut state = self.lock()?;
        let stored = show_by_id(&mut state, show_id)?;
        stored.status = status;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn update_show_totals(
        &self,
        show_id: Uuid,
        details: &TvShowDetails,
    ) -> AppResult<TrackedShow> {
        let mut state = self.lock()?;
        let stored = show_by_id(&mut state, show_id)?;
        stored.name = Some(details.name.clone());
        stored.total_episodes = details.total_episodes;
        stored.total_seasons = details.total_seasons;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_show(&self, user_id: &str, tv_show_id: i32) -> AppResult<bool> {
        let mut state = self.lock()?;
        let Some(show) = state.shows.remove(&(user_id.to_string(), tv_show_id)) else {
            return Ok(false);
        };
        state
            .episodes
            .retain(|_, record| record.tracked_show_id != show.id);
        Ok(true)
    }

    async fn season_records(
        &self,
        user_id: &str,
        tv_show_id: i32,
        season_number: i32,
    ) -> AppResult<Vec<EpisodeRecord>> {
        let mut records: Vec<EpisodeRecord> = self
            .lock()?
            .episodes
            .values()
            .filter(|record| {
                record.user_id == user_id
                    && record.tv_show_id == tv_show_id
                    && record.season_number == season_number
            })
            .cloned()
            .collect();
        records.sort_by_key(|record| record.episode_number);
        Ok(records)
    }

    async fn run_in_transaction(&self, work: ProgressWork) -> AppResult<ReconcileOutcome> {
        let failing_episode = self
            .failing_episode
            .lock()
            .map(|failing| *failing)
            .unwrap_or(None);

        let mut state = self.lock()?;
        let mut working = state.clone();
        let outcome = work(&mut InMemoryTx {
            state: &mut working,
            failing_episode,
        })?;
        *state = working;
        Ok(outcome)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryWatchStore {
    async fn upsert(&self, review: &Review) -> AppResult<Review> {
        let mut state = self.lock()?;
        let existing = state
            .reviews
            .values_mut()
            .find(|r| r.is_for(&review.user_id, &review.item_id, review.item_type));

        let saved = match existing {
            Some(stored) => {
                stored.rating = review.rating;
                stored.comment = review.comment.clone();
                stored.updated_at = Utc::now();
                stored.clone()
            }
            None => {
                state.reviews.insert(review.id, review.clone());
                review.clone()
            }
        };
        Ok(saved)
    }

    async fn find_for_item(
        &self,
        user_id: &str,
        item_type: ReviewItemType,
        item_id: &str,
    ) -> AppResult<Option<Review>> {
        Ok(self
            .lock()?
            .reviews
            .values()
            .find(|r| r.is_for(user_id, item_id, item_type))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        Ok(self.lock()?.reviews.get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        item_type: Option<ReviewItemType>,
    ) -> AppResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .lock()?
            .reviews
            .values()
            .filter(|r| r.user_id == user_id)
            .filter(|r| item_type.map_or(true, |t| r.item_type == t))
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(reviews)
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> AppResult<bool> {
        let mut state = self.lock()?;
        let owned = state
            .reviews
            .get(&id)
            .is_some_and(|review| review.user_id == user_id);
        if owned {
            state.reviews.remove(&id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::TvShowDetails;
    use crate::modules::tv_progress::domain::{EpisodeStatusReconciler, EpisodeUpdate, ReconcilePlan};

    fn seeded_store() -> InMemoryWatchStore {
        let store = InMemoryWatchStore::new();
        let show = TrackedShow::adopted(
            "user-1".to_string(),
            &TvShowDetails {
                id: 1,
                name: "Test".to_string(),
                total_episodes: Some(2),
                total_seasons: Some(1),
            },
        );
        store
            .state
            .lock()
            .unwrap()
            .shows
            .insert(("user-1".to_string(), 1), show);
        store
    }

    fn plan(numbers: &[i32]) -> ReconcilePlan {
        ReconcilePlan {
            user_id: "user-1".to_string(),
            tv_show_id: 1,
            season_number: 1,
            episodes: numbers
                .iter()
                .map(|&n| EpisodeUpdate {
                    episode_number: n,
                    episode_name: None,
                    runtime: None,
                })
                .collect(),
            watched: true,
            adopt: None,
        }
    }

    #[tokio::test]
    async fn failed_work_leaves_state_untouched() {
        let store = seeded_store();
        store.fail_saves_of_episode(2);

        let p = plan(&[1, 2]);
        let result = store
            .run_in_transaction(Box::new(move |tx| EpisodeStatusReconciler::reconcile(tx, p)))
            .await;

        assert!(result.is_err());
        assert!(store.season_records("user-1", 1, 1).await.unwrap().is_empty());
        let show = store.find_show("user-1", 1).await.unwrap().unwrap();
        assert_eq!(show.watched_episodes, 0);
        assert_eq!(show.status, ShowStatus::Watching);

        store.clear_failures();
        let p = plan(&[1, 2]);
        let outcome = store
            .run_in_transaction(Box::new(move |tx| EpisodeStatusReconciler::reconcile(tx, p)))
            .await
            .unwrap();
        assert_eq!(outcome.status, ShowStatus::Completed);
    }

    #[tokio::test]
    async fn review_upsert_keeps_one_per_item() {
        let store = InMemoryWatchStore::new();
        let first = Review::new(
            "user-1".to_string(),
            "1-S1E1".to_string(),
            ReviewItemType::Episode,
            3,
            None,
        );
        store.upsert(&first).await.unwrap();
        let second = Review::new(
            "user-1".to_string(),
            "1-S1E1".to_string(),
            ReviewItemType::Episode,
            5,
            Some("Better on rewatch".to_string()),
        );
        let saved = store.upsert(&second).await.unwrap();

        assert_eq!(saved.id, first.id);
        assert_eq!(saved.rating, 5);
        assert_eq!(store.list_by_user("user-1", None).await.unwrap().len(), 1);
        assert!(!store.delete("user-2", first.id).await.unwrap());
        assert!(store.delete("user-1", first.id).await.unwrap());
    }
}
