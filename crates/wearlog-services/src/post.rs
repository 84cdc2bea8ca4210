//! Outfit log post and the closed region/condition vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Select value meaning "no region chosen".
pub const CITY_NONE: &str = "none";

/// Label shown for the unselected region option.
pub const CITY_NONE_LABEL: &str = "지역";

/// Fixed weather conditions offered after the live description.
pub const CONDITIONS: [&str; 4] = ["맑음", "비", "눈", "안개"];

/// The 17 first-level administrative regions offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "강원도")]
    Gangwon,
    #[serde(rename = "경기도")]
    Gyeonggi,
    #[serde(rename = "경상남도")]
    Gyeongnam,
    #[serde(rename = "경상북도")]
    Gyeongbuk,
    #[serde(rename = "광주")]
    Gwangju,
    #[serde(rename = "대구")]
    Daegu,
    #[serde(rename = "대전")]
    Daejeon,
    #[serde(rename = "부산")]
    Busan,
    #[serde(rename = "서울")]
    Seoul,
    #[serde(rename = "세종")]
    Sejong,
    #[serde(rename = "울산")]
    Ulsan,
    #[serde(rename = "인천")]
    Incheon,
    #[serde(rename = "전라남도")]
    Jeonnam,
    #[serde(rename = "전라북도")]
    Jeonbuk,
    #[serde(rename = "제주도")]
    Jeju,
    #[serde(rename = "충청남도")]
    Chungnam,
    #[serde(rename = "충청북도")]
    Chungbuk,
}

impl Region {
    /// Form order.
    pub const ALL: [Region; 17] = [
        Region::Gangwon,
        Region::Gyeonggi,
        Region::Gyeongnam,
        Region::Gyeongbuk,
        Region::Gwangju,
        Region::Daegu,
        Region::Daejeon,
        Region::Busan,
        Region::Seoul,
        Region::Sejong,
        Region::Ulsan,
        Region::Incheon,
        Region::Jeonnam,
        Region::Jeonbuk,
        Region::Jeju,
        Region::Chungnam,
        Region::Chungbuk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Gangwon => "강원도",
            Region::Gyeonggi => "경기도",
            Region::Gyeongnam => "경상남도",
            Region::Gyeongbuk => "경상북도",
            Region::Gwangju => "광주",
            Region::Daegu => "대구",
            Region::Daejeon => "대전",
            Region::Busan => "부산",
            Region::Seoul => "서울",
            Region::Sejong => "세종",
            Region::Ulsan => "울산",
            Region::Incheon => "인천",
            Region::Jeonnam => "전라남도",
            Region::Jeonbuk => "전라북도",
            Region::Jeju => "제주도",
            Region::Chungnam => "충청남도",
            Region::Chungbuk => "충청북도",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

/// Current value of the region selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CityChoice {
    #[default]
    Unselected,
    Region(Region),
}

impl CityChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            CityChoice::Unselected => CITY_NONE,
            CityChoice::Region(r) => r.as_str(),
        }
    }

    /// `(value, label)` pairs in form order, sentinel first.
    pub fn options() -> Vec<(&'static str, &'static str)> {
        std::iter::once((CITY_NONE, CITY_NONE_LABEL))
            .chain(Region::ALL.iter().map(|r| (r.as_str(), r.as_str())))
            .collect()
    }
}

impl FromStr for CityChoice {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == CITY_NONE {
            return Ok(CityChoice::Unselected);
        }
        s.parse().map(CityChoice::Region)
    }
}

/// A submitted outfit log entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Creation-time derived (Unix millis), unique per submission
    pub id: i64,
    #[serde(rename = "hashtag")]
    pub hashtags: Vec<String>,
    pub city: Region,
    #[serde(rename = "weather")]
    pub condition_description: String,
    #[serde(rename = "temp")]
    pub temperature: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}
