//! Temperature → clothing recommendation.

/// Inclusive lower bounds (°C), hottest first.
const THRESHOLDS: &[(f64, &str)] = &[
    (28.0, "민소매, 반팔, 반바지, 원피스"),
    (23.0, "반팔, 얇은 셔츠, 반바지, 면바지"),
    (20.0, "얇은 가디건, 긴팔, 면바지, 청바지"),
    (17.0, "얇은 니트, 맨투맨, 가디건, 청바지"),
    (12.0, "자켓, 가디건, 야상, 청바지, 면바지"),
    (9.0, "자켓, 트렌치코트, 야상, 니트, 청바지"),
    (5.0, "코트, 가죽자켓, 히트텍, 니트, 레깅스"),
];

/// Catches everything below the last threshold, and NaN.
const COLDEST: &str = "패딩, 두꺼운 코트, 목도리, 기모제품";

/// Recommend clothes for `temperature` (°C).
///
/// Total: every input, including NaN and infinities, maps to exactly one
/// non-empty sentence.
pub fn recommend(temperature: f64) -> &'static str {
    THRESHOLDS
        .iter()
        .find(|(min, _)| temperature >= *min)
        .map(|(_, advice)| *advice)
        .unwrap_or(COLDEST)
}
