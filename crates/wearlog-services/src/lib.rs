pub mod advisor;
pub mod clock;
pub mod composer;
pub mod hashtag_store;
pub mod post;
pub mod post_form_screen;
pub mod post_store;
pub mod store_backend;
pub mod tag_picker;
pub mod today_screen;

pub use advisor::recommend;
pub use clock::{Clock, FixedClock, SystemClock};
pub use composer::{ComposerState, DraftState, PostComposer, ValidationError};
pub use hashtag_store::SqliteHashtagStore;
pub use post::{CityChoice, Post, Region, UnknownRegion, CONDITIONS};
pub use post_form_screen::PostFormScreen;
pub use post_store::SqlitePostStore;
pub use store_backend::{HashtagRepository, PostRepository, StoreError, StoreResult};
pub use tag_picker::{TagError, TagPicker};
pub use today_screen::TodayWeatherScreen;
