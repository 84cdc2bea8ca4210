//! Post form state: composer + tag picker + its own weather lookup.

use std::sync::mpsc::{self, Receiver};

use wearlog_weather::{WeatherLookup, WeatherSnapshot};

use crate::composer::{PostComposer, ValidationError};
use crate::post::{CityChoice, Post, UnknownRegion, CONDITIONS};
use crate::store_backend::StoreResult;
use crate::tag_picker::{TagError, TagPicker};

pub const SUBMIT_LABEL: &str = "작성하기";
pub const TEMPERATURE_PLACEHOLDER: &str = "기온";

pub struct PostFormScreen {
    composer: PostComposer,
    tags: TagPicker,
    live_condition: String,
    updates: Receiver<WeatherSnapshot>,
}

impl PostFormScreen {
    pub fn mount(lookup: &WeatherLookup, composer: PostComposer, tags: TagPicker) -> Self {
        let (tx, rx) = mpsc::channel();
        lookup.get(move |snapshot| {
            let _ = tx.send(snapshot);
        });
        Self::from_receiver(rx, composer, tags)
    }

    pub fn from_receiver(
        updates: Receiver<WeatherSnapshot>,
        composer: PostComposer,
        tags: TagPicker,
    ) -> Self {
        Self {
            composer,
            tags,
            live_condition: String::new(),
            updates,
        }
    }

    /// Apply a resolved weather lookup to the draft. Returns true if one arrived.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(snapshot) = self.updates.try_recv() {
            self.live_condition = snapshot.condition_description.clone();
            self.composer.apply_snapshot(&snapshot);
            changed = true;
        }
        changed
    }

    pub fn composer(&self) -> &PostComposer {
        &self.composer
    }

    /// Live description first (when known), then the fixed conditions.
    pub fn condition_options(&self) -> Vec<String> {
        let live = Some(self.live_condition.clone()).filter(|c| !c.is_empty());
        live.into_iter()
            .chain(CONDITIONS.iter().map(|c| c.to_string()))
            .collect()
    }

    pub fn city_options(&self) -> Vec<(&'static str, &'static str)> {
        CityChoice::options()
    }

    pub fn set_date(&mut self, date: &str) {
        self.composer.set_date(date);
    }

    /// Set the region from a selector value (`"none"` or a region name).
    ///
    /// # Errors
    /// `UnknownRegion` for values outside the closed set; the draft is unchanged.
    pub fn select_city(&mut self, value: &str) -> Result<(), UnknownRegion> {
        let city: CityChoice = value.parse()?;
        self.composer.set_city(city);
        Ok(())
    }

    pub fn set_temperature_input(&mut self, input: &str) {
        self.composer.set_temperature_input(input);
    }

    pub fn set_condition(&mut self, condition: &str) {
        self.composer.set_condition(condition);
    }

    /// # Errors
    /// See [`TagPicker::select`].
    pub fn add_tag(&mut self, raw: &str) -> Result<String, TagError> {
        self.tags.select(self.composer.hashtags_mut(), raw)
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(self.composer.hashtags_mut(), tag)
    }

    pub fn tag_suggestions(&self, prefix: &str) -> StoreResult<Vec<String>> {
        self.tags.suggestions(&self.composer.draft().hashtags, prefix)
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.composer.draft().hashtags
    }

    pub fn error_message(&self) -> &str {
        self.composer.error_message()
    }

    /// # Errors
    /// See [`PostComposer::submit`].
    pub fn submit(&mut self) -> Result<Post, ValidationError> {
        self.composer.submit()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::clock::FixedClock;
    use crate::hashtag_store::SqliteHashtagStore;
    use crate::post_store::SqlitePostStore;
    use crate::store_backend::PostRepository;
    use chrono::NaiveDate;
    use std::sync::Arc;

    struct Fixture {
        screen: PostFormScreen,
        posts: Arc<SqlitePostStore>,
        tx: mpsc::Sender<WeatherSnapshot>,
    }

    fn fixture() -> Fixture {
        let posts = Arc::new(SqlitePostStore::in_memory().unwrap());
        let tags = Arc::new(SqliteHashtagStore::in_memory().unwrap());
        let clock = Arc::new(FixedClock {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            millis: 1_709_600_000_000,
        });
        let composer = PostComposer::with_clock(posts.clone(), "user-1", clock);
        let (tx, rx) = mpsc::channel();
        Fixture {
            screen: PostFormScreen::from_receiver(rx, composer, TagPicker::new(tags)),
            posts,
            tx,
        }
    }

    #[test]
    fn test_condition_options_before_and_after_snapshot() {
        let mut f = fixture();
        assert_eq!(f.screen.condition_options(), vec!["맑음", "비", "눈", "안개"]);

        f.tx.send(WeatherSnapshot {
            temperature: 7.5,
            feels_like: 5.0,
            condition_description: "실 비".to_string(),
            place_name: "Seoul".to_string(),
        })
        .unwrap();
        assert!(f.screen.poll());

        assert_eq!(f.screen.condition_options()[0], "실 비");
        assert_eq!(f.screen.condition_options().len(), 5);
        assert_eq!(f.screen.composer().draft().temperature_input, "7.5");
        assert_eq!(f.screen.composer().draft().condition, "실 비");
    }

    #[test]
    fn test_select_city_rejects_unknown() {
        let mut f = fixture();
        assert!(f.screen.select_city("Atlantis").is_err());
        assert_eq!(f.screen.composer().draft().city, CityChoice::Unselected);
        f.screen.select_city("부산").unwrap();
        f.screen.select_city("none").unwrap();
        assert_eq!(f.screen.composer().draft().city, CityChoice::Unselected);
    }

    #[test]
    fn test_full_form_submit() {
        let mut f = fixture();
        f.tx.send(WeatherSnapshot {
            temperature: 3.0,
            feels_like: -1.0,
            condition_description: "맑음".to_string(),
            place_name: "Seoul".to_string(),
        })
        .unwrap();
        f.screen.poll();

        assert_eq!(f.screen.submit(), Err(ValidationError::MissingFields));
        assert_eq!(f.screen.error_message(), "전체 항목을 입력해주세요");

        f.screen.add_tag("#패딩").unwrap();
        assert_eq!(f.screen.submit(), Err(ValidationError::MissingCity));
        assert_eq!(f.screen.error_message(), "지역을 입력해주세요");

        f.screen.select_city("서울").unwrap();
        let post = f.screen.submit().unwrap();

        assert_eq!(post.date, "2024-03-05");
        assert_eq!(post.temperature, "3");
        assert!(f.screen.selected_tags().is_empty());
        assert_eq!(f.screen.error_message(), "");
        assert_eq!(f.posts.get_post(post.id).unwrap().unwrap(), post);
        assert_eq!(f.screen.tag_suggestions("패").unwrap(), vec!["패딩"]);
    }

    #[test]
    fn test_remove_tag() {
        let mut f = fixture();
        f.screen.add_tag("코트").unwrap();
        assert!(f.screen.remove_tag("#코트"));
        assert!(f.screen.selected_tags().is_empty());
    }
}
