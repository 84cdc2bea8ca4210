//! Draft post state and submit-time validation.
//!
//! The composer owns the form's draft. `submit` validates it, builds a
//! [`Post`], hands it to the repository exactly once and resets the tag list
//! and error message. Other fields keep their last values so consecutive
//! posts can reuse date, region and temperature.

use std::sync::Arc;

use thiserror::Error;
use wearlog_weather::WeatherSnapshot;

use crate::clock::{format_date, Clock, IdGenerator, SystemClock};
use crate::post::{CityChoice, Post};
use crate::store_backend::PostRepository;

/// Submit-time validation failures. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("전체 항목을 입력해주세요")]
    MissingFields,
    #[error("지역을 입력해주세요")]
    MissingCity,
}

/// Where the composer is in its edit/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerState {
    #[default]
    Editing,
    /// A post was just saved; the next edit returns to `Editing`.
    Submitted { post_id: i64 },
}

impl ComposerState {
    pub fn is_editing(self) -> bool {
        matches!(self, ComposerState::Editing)
    }
}

/// In-progress, unsaved form values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftState {
    /// `YYYY-MM-DD`
    pub date: String,
    pub city: CityChoice,
    pub temperature_input: String,
    pub condition: String,
    pub hashtags: Vec<String>,
    /// Last validation message, empty when there is none
    pub error: String,
}

pub struct PostComposer {
    repository: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    user_id: String,
    draft: DraftState,
    state: ComposerState,
}

impl PostComposer {
    pub fn new(repository: Arc<dyn PostRepository>, user_id: impl Into<String>) -> Self {
        Self::with_clock(repository, user_id, Arc::new(SystemClock))
    }

    /// Start a draft dated "today" according to `clock`, region unselected.
    pub fn with_clock(
        repository: Arc<dyn PostRepository>,
        user_id: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let draft = DraftState {
            date: format_date(clock.today()),
            ..DraftState::default()
        };

        Self {
            repository,
            clock,
            ids: IdGenerator::default(),
            user_id: user_id.into(),
            draft,
            state: ComposerState::Editing,
        }
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn error_message(&self) -> &str {
        &self.draft.error
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn touch(&mut self) -> &mut DraftState {
        self.state = ComposerState::Editing;
        &mut self.draft
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.touch().date = date.into();
    }

    pub fn set_city(&mut self, city: CityChoice) {
        self.touch().city = city;
    }

    pub fn set_temperature_input(&mut self, input: impl Into<String>) {
        self.touch().temperature_input = input.into();
    }

    pub fn set_condition(&mut self, condition: impl Into<String>) {
        self.touch().condition = condition.into();
    }

    /// Mutable tag list, for the tag picker.
    pub fn hashtags_mut(&mut self) -> &mut Vec<String> {
        &mut self.touch().hashtags
    }

    /// Pre-fill temperature and condition from a resolved weather lookup.
    ///
    /// A condition the user already picked is kept.
    pub fn apply_snapshot(&mut self, snapshot: &WeatherSnapshot) {
        let draft = self.touch();
        draft.temperature_input = snapshot.temperature.to_string();
        if draft.condition.is_empty() {
            draft.condition = snapshot.condition_description.clone();
        }
    }

    /// Validate the draft and, if it passes, save it as a new post.
    ///
    /// On failure the error message is set and nothing else changes. On
    /// success the repository sees exactly one `save_post`; a failed write is
    /// logged and otherwise ignored.
    ///
    /// # Errors
    /// `MissingFields` when tags, temperature or date are empty;
    /// `MissingCity` when no region is selected.
    pub fn submit(&mut self) -> Result<Post, ValidationError> {
        let post = match self.build_post() {
            Ok(post) => post,
            Err(e) => {
                tracing::debug!("Post rejected: {:?}", e);
                self.draft.error = e.to_string();
                return Err(e);
            }
        };

        if let Err(e) = self.repository.save_post(post.clone()) {
            tracing::warn!("Failed to save post {}: {}", post.id, e);
        } else {
            tracing::info!(post_id = post.id, city = %post.city, "Post saved");
        }

        self.draft.hashtags.clear();
        self.draft.error.clear();
        self.state = ComposerState::Submitted { post_id: post.id };
        Ok(post)
    }

    fn build_post(&mut self) -> Result<Post, ValidationError> {
        let draft = &self.draft;

        if draft.hashtags.is_empty() || draft.temperature_input.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let city = match draft.city {
            CityChoice::Unselected => return Err(ValidationError::MissingCity),
            CityChoice::Region(region) => region,
        };

        // Condition may still be empty if the weather never resolved.
        if draft.date.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        Ok(Post {
            id: self.ids.next(self.clock.now_millis()),
            hashtags: draft.hashtags.clone(),
            city,
            condition_description: draft.condition.clone(),
            temperature: draft.temperature_input.clone(),
            date: draft.date.clone(),
            user_id: self.user_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::clock::FixedClock;
    use crate::post::Region;
    use crate::store_backend::{StoreError, StoreResult};
    use chrono::NaiveDate;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingRepository {
        saved: Mutex<Vec<Post>>,
        fail: bool,
    }

    impl PostRepository for RecordingRepository {
        fn save_post(&self, post: Post) -> StoreResult<()> {
            self.saved.lock().push(post);
            if self.fail {
                return Err(StoreError::validation("disk full"));
            }
            Ok(())
        }

        fn list_posts(&self) -> StoreResult<Vec<Post>> {
            Ok(self.saved.lock().clone())
        }

        fn get_post(&self, id: i64) -> StoreResult<Option<Post>> {
            Ok(self.saved.lock().iter().find(|p| p.id == id).cloned())
        }

        fn delete_post(&self, id: i64) -> StoreResult<()> {
            Err(StoreError::NotFound(id))
        }

        fn count(&self) -> StoreResult<usize> {
            Ok(self.saved.lock().len())
        }
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            millis: 1_709_600_000_000,
        })
    }

    fn composer(repo: Arc<RecordingRepository>) -> PostComposer {
        PostComposer::with_clock(repo, "user-1", clock())
    }

    fn fill_valid(c: &mut PostComposer) {
        c.hashtags_mut().push("코트".to_string());
        c.set_temperature_input("5");
        c.set_city(CityChoice::Region(Region::Seoul));
        c.set_condition("맑음");
        c.set_date("2024-01-10");
    }

    #[test]
    fn test_defaults() {
        let c = composer(Arc::default());
        let draft = c.draft();
        assert_eq!(draft.date, "2024-03-05");
        assert_eq!(draft.city, CityChoice::Unselected);
        assert!(draft.temperature_input.is_empty());
        assert!(draft.condition.is_empty());
        assert!(draft.hashtags.is_empty());
        assert!(draft.error.is_empty());
        assert!(c.state().is_editing());
    }

    #[test]
    fn test_empty_tags_is_missing_fields() {
        let repo = Arc::new(RecordingRepository::default());
        let mut c = composer(repo.clone());
        fill_valid(&mut c);
        c.hashtags_mut().clear();

        assert_eq!(c.submit(), Err(ValidationError::MissingFields));
        assert_eq!(c.error_message(), "전체 항목을 입력해주세요");
        assert!(repo.saved.lock().is_empty());
    }

    #[test]
    fn test_empty_temperature_is_missing_fields() {
        let repo = Arc::new(RecordingRepository::default());
        let mut c = composer(repo.clone());
        fill_valid(&mut c);
        c.set_temperature_input("");

        assert_eq!(c.submit(), Err(ValidationError::MissingFields));
        assert!(repo.saved.lock().is_empty());
    }

    #[test]
    fn test_missing_fields_wins_over_missing_city() {
        let repo = Arc::new(RecordingRepository::default());
        let mut c = composer(repo.clone());
        c.set_temperature_input("5");

        assert_eq!(c.submit(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_unselected_city_is_missing_city() {
        let repo = Arc::new(RecordingRepository::default());
        let mut c = composer(repo.clone());
        fill_valid(&mut c);
        c.set_city(CityChoice::Unselected);

        assert_eq!(c.submit(), Err(ValidationError::MissingCity));
        assert_eq!(c.error_message(), "지역을 입력해주세요");
        assert!(repo.saved.lock().is_empty());
    }

    #[test]
    fn test_unresolved_condition_is_saved_empty() {
        let repo = Arc::new(RecordingRepository::default());
        let mut c = composer(repo.clone());
        fill_valid(&mut c);
        c.set_condition("");

        let post = c.submit().unwrap();

        assert_eq!(post.condition_description, "");
        assert_eq!(c.error_message(), "");
        let saved = repo.saved.lock();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].condition_description, "");
    }

    #[test]
    fn test_empty_date_is_missing_fields() {
        let repo = Arc::new(RecordingRepository::default());
        let mut c = composer(repo.clone());
        fill_valid(&mut c);
        c.set_date("");

        assert_eq!(c.submit(), Err(ValidationError::MissingFields));
        assert!(repo.saved.lock().is_empty());
    }

    #[test]
    fn test_failure_keeps_draft_values() {
        let mut c = composer(Arc::default());
        fill_valid(&mut c);
        c.set_city(CityChoice::Unselected);
        let before = c.draft().clone();

        let _ = c.submit();

        let after = c.draft();
        assert_eq!(after.hashtags, before.hashtags);
        assert_eq!(after.temperature_input, before.temperature_input);
        assert_eq!(after.date, before.date);
        assert_eq!(after.condition, before.condition);
    }

    #[test]
    fn test_successful_submit() {
        let repo = Arc::new(RecordingRepository::default());
        let mut c = composer(repo.clone());
        fill_valid(&mut c);
        c.set_city(CityChoice::Unselected);
        let _ = c.submit();
        c.set_city(CityChoice::Region(Region::Seoul));

        let post = c.submit().unwrap();

        let saved = repo.saved.lock();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], post);
        assert_eq!(post.hashtags, vec!["코트"]);
        assert_eq!(post.city, Region::Seoul);
        assert_eq!(post.condition_description, "맑음");
        assert_eq!(post.temperature, "5");
        assert_eq!(post.date, "2024-01-10");
        assert_eq!(post.user_id, "user-1");
        assert_eq!(post.id, 1_709_600_000_000);

        assert!(c.draft().hashtags.is_empty());
        assert_eq!(c.error_message(), "");
        assert_eq!(c.state(), ComposerState::Submitted { post_id: post.id });
    }

    #[test]
    fn test_submit_keeps_other_fields() {
        let mut c = composer(Arc::default());
        fill_valid(&mut c);
        c.submit().unwrap();

        let draft = c.draft();
        assert_eq!(draft.temperature_input, "5");
        assert_eq!(draft.city, CityChoice::Region(Region::Seoul));
        assert_eq!(draft.date, "2024-01-10");
    }

    #[test]
    fn test_resubmit_without_new_tags_is_rejected() {
        let repo = Arc::new(RecordingRepository::default());
        let mut c = composer(repo.clone());
        fill_valid(&mut c);
        c.submit().unwrap();

        assert_eq!(c.submit(), Err(ValidationError::MissingFields));
        assert_eq!(repo.saved.lock().len(), 1);
    }

    #[test]
    fn test_consecutive_posts_get_distinct_ids() {
        let repo = Arc::new(RecordingRepository::default());
        let mut c = composer(repo.clone());
        fill_valid(&mut c);
        let first = c.submit().unwrap();
        c.hashtags_mut().push("니트".to_string());
        assert!(c.state().is_editing());
        let second = c.submit().unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn test_repository_failure_is_not_surfaced() {
        let repo = Arc::new(RecordingRepository {
            fail: true,
            ..RecordingRepository::default()
        });
        let mut c = composer(repo.clone());
        fill_valid(&mut c);

        assert!(c.submit().is_ok());
        assert_eq!(repo.saved.lock().len(), 1);
        assert!(c.draft().hashtags.is_empty());
    }

    #[test]
    fn test_apply_snapshot_prefills() {
        let mut c = composer(Arc::default());
        c.apply_snapshot(&WeatherSnapshot {
            temperature: 12.3,
            feels_like: 10.0,
            condition_description: "흐림".to_string(),
            place_name: "Seoul".to_string(),
        });

        assert_eq!(c.draft().temperature_input, "12.3");
        assert_eq!(c.draft().condition, "흐림");
    }

    #[test]
    fn test_apply_snapshot_keeps_chosen_condition() {
        let mut c = composer(Arc::default());
        c.set_condition("비");
        c.apply_snapshot(&WeatherSnapshot {
            temperature: 8.0,
            feels_like: 6.0,
            condition_description: "맑음".to_string(),
            place_name: "Seoul".to_string(),
        });

        assert_eq!(c.draft().condition, "비");
        assert_eq!(c.draft().temperature_input, "8");
    }

    #[test]
    fn test_apply_whole_degree_snapshot() {
        let mut c = composer(Arc::default());
        c.apply_snapshot(&WeatherSnapshot {
            temperature: 5.0,
            ..WeatherSnapshot::default()
        });
        assert_eq!(c.draft().temperature_input, "5");
    }
}
