//! Today's weather widget state.
//!
//! Mounting issues one weather lookup; the snapshot arrives over a channel
//! and is applied by `poll` on the owning (UI) thread.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use wearlog_weather::{WeatherLookup, WeatherSnapshot};

use crate::advisor;
use crate::clock::{format_date_ko, Clock};

pub const RECOMMEND_HEADING: &str = "오늘 추천하는 옷은...";
pub const ACCURACY_NOTICE: &str = "* 날씨나 위치가 정확하지 않을 수 있습니다.";

pub struct TodayWeatherScreen {
    clock: Arc<dyn Clock>,
    snapshot: WeatherSnapshot,
    loaded: bool,
    updates: Receiver<WeatherSnapshot>,
}

impl TodayWeatherScreen {
    pub fn mount(lookup: &WeatherLookup, clock: Arc<dyn Clock>) -> Self {
        let (tx, rx) = mpsc::channel();
        lookup.get(move |snapshot| {
            let _ = tx.send(snapshot);
        });
        Self::from_receiver(rx, clock)
    }

    /// Build around an existing update channel.
    pub fn from_receiver(updates: Receiver<WeatherSnapshot>, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            snapshot: WeatherSnapshot::default(),
            loaded: false,
            updates,
        }
    }

    /// Apply any snapshot that has arrived. Returns true if state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(snapshot) = self.updates.try_recv() {
            self.snapshot = snapshot;
            self.loaded = true;
            changed = true;
        }
        changed
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.snapshot
    }

    pub fn date_label(&self) -> String {
        format_date_ko(self.clock.today())
    }

    pub fn place_label(&self) -> String {
        format!("위치 : {}", self.snapshot.place_name)
    }

    pub fn temperature_label(&self) -> String {
        format!("{}°", self.snapshot.temperature)
    }

    pub fn feels_like_label(&self) -> String {
        format!("체감 {}°", self.snapshot.feels_like)
    }

    /// Recomputed from the current temperature on every call.
    pub fn recommendation(&self) -> &'static str {
        advisor::recommend(self.snapshot.temperature)
    }
}
