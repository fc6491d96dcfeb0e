use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

pub const ERROR_MARGIN: f64 = 0.10;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum YarnThickness {
    Thin,
    #[default]
    Medium,
    Thick,
}

impl YarnThickness {
    pub const ALL: [YarnThickness; 3] =
        [YarnThickness::Thin, YarnThickness::Medium, YarnThickness::Thick];

    /// Unrecognized names resolve to the medium multiplier.
    pub fn from_name(name: &str) -> YarnThickness {
        YarnThickness::from_str(name).unwrap_or_default()
    }

    pub fn multiplier(self) -> f64 {
        match self {
            YarnThickness::Thin => 0.8,
            YarnThickness::Medium => 1.0,
            YarnThickness::Thick => 1.3,
        }
    }
}

/// Stitch-class counts in the order the analysis reported them.
/// Display order follows report order, so a plain map type won't do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StitchCounts(Vec<(String, u64)>);

impl StitchCounts {
    pub fn iter(&self) -> impl Iterator<Item = &(String, u64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u64)> for StitchCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        StitchCounts(iter.into_iter().collect())
    }
}

impl Serialize for StitchCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StitchCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = StitchCounts;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of stitch-class labels to counts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, u64>()? {
                    entries.push(entry);
                }
                Ok(StitchCounts(entries))
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unscaled estimate kept for client-side recalculation; the server
    /// may omit it, in which case the pre-scaled figures below stand in.
    #[serde(default)]
    pub base_yarn_estimate: Option<f64>,
    pub yarn_estimate: f64,
    pub yarn_range: [f64; 2],
    pub stitch_counts: StitchCounts,
    pub processed: String,
    pub original: String,
}

/// A 2xx body either carries an explicit error description or the analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Failure { error: String },
    Success(AnalysisResult),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YarnEstimate {
    pub display: f64,
    pub range_low: f64,
    pub range_high: f64,
}

impl YarnEstimate {
    pub fn display_text(&self) -> String {
        format_length(self.display)
    }

    pub fn range_text(&self) -> String {
        format_range(self.range_low, self.range_high)
    }
}

/// Rescales the base estimate for the chosen thickness.
/// A base that is not a non-negative finite number yields `None`; callers
/// leave the displayed numbers untouched in that case.
pub fn recalculate(base_estimate: f64, thickness: YarnThickness) -> Option<YarnEstimate> {
    if !base_estimate.is_finite() || base_estimate < 0.0 {
        return None;
    }

    let display = base_estimate * thickness.multiplier();
    Some(YarnEstimate {
        display,
        range_low: display * (1.0 - ERROR_MARGIN),
        range_high: display * (1.0 + ERROR_MARGIN),
    })
}

pub fn format_length(value: f64) -> String {
    format!("{value:.1} cm")
}

pub fn format_range(low: f64, high: f64) -> String {
    format!("{low:.1} - {high:.1} cm")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let delta = (actual - expected).abs();
        assert!(
            delta <= 1e-9,
            "expected {:.6} got {:.6} (delta {:.6})",
            expected,
            actual,
            delta
        );
    }

    fn assert_estimate(estimate: YarnEstimate, display: f64, low: f64, high: f64) {
        assert_close(estimate.display, display);
        assert_close(estimate.range_low, low);
        assert_close(estimate.range_high, high);
    }

    #[test]
    fn recalculate_applies_thin_multiplier() {
        let estimate = recalculate(100.0, YarnThickness::Thin).unwrap();
        assert_estimate(estimate, 80.0, 72.0, 88.0);
    }

    #[test]
    fn recalculate_keeps_medium_base() {
        let estimate = recalculate(100.0, YarnThickness::Medium).unwrap();
        assert_estimate(estimate, 100.0, 90.0, 110.0);
    }

    #[test]
    fn recalculate_applies_thick_multiplier() {
        let estimate = recalculate(100.0, YarnThickness::Thick).unwrap();
        assert_estimate(estimate, 130.0, 117.0, 143.0);
    }

    #[test]
    fn recalculate_rejects_invalid_bases() {
        assert_eq!(recalculate(f64::NAN, YarnThickness::Medium), None);
        assert_eq!(recalculate(f64::INFINITY, YarnThickness::Thick), None);
        assert_eq!(recalculate(-1.0, YarnThickness::Thin), None);
    }

    #[test]
    fn recalculate_accepts_zero_base() {
        let estimate = recalculate(0.0, YarnThickness::Thick).unwrap();
        assert_estimate(estimate, 0.0, 0.0, 0.0);
    }

    #[test]
    fn stored_base_does_not_drift_across_recalculations() {
        let direct = recalculate(50.0, YarnThickness::Thick).unwrap();
        let _intermediate = recalculate(50.0, YarnThickness::Medium).unwrap();
        let after_change = recalculate(50.0, YarnThickness::Thick).unwrap();
        assert_eq!(after_change, direct);
    }

    #[test]
    fn thickness_names_round_trip() {
        for option in YarnThickness::ALL {
            assert_eq!(YarnThickness::from_name(&option.to_string()), option);
        }
    }

    #[test]
    fn unknown_thickness_name_falls_back_to_medium() {
        assert_eq!(YarnThickness::from_name("Bulky"), YarnThickness::Medium);
        assert_eq!(YarnThickness::from_name(""), YarnThickness::Medium);
    }

    #[test]
    fn multiplier_table_matches_yarn_weights() {
        assert_close(YarnThickness::Thin.multiplier(), 0.8);
        assert_close(YarnThickness::Medium.multiplier(), 1.0);
        assert_close(YarnThickness::Thick.multiplier(), 1.3);
    }

    #[test]
    fn estimates_format_with_one_decimal_and_unit() {
        let estimate = recalculate(100.0, YarnThickness::Thin).unwrap();
        assert_eq!(estimate.display_text(), "80.0 cm");
        assert_eq!(estimate.range_text(), "72.0 - 88.0 cm");
    }

    #[test]
    fn success_payload_decodes_with_ordered_counts() {
        let body = r#"{
            "base_yarn_estimate": 42.5,
            "yarn_estimate": 42.5,
            "yarn_range": [38.3, 46.8],
            "stitch_counts": {"ch": 12, "sc": 30, "dc": 7},
            "processed": "cHJvY2Vzc2Vk",
            "original": "b3JpZ2luYWw="
        }"#;

        let outcome: AnalysisOutcome = serde_json::from_str(body).unwrap();
        let result = match outcome {
            AnalysisOutcome::Success(result) => result,
            AnalysisOutcome::Failure { error } => panic!("unexpected failure: {error}"),
        };

        assert_eq!(result.base_yarn_estimate, Some(42.5));
        let labels: Vec<&str> = result
            .stitch_counts
            .iter()
            .map(|(label, _)| label.as_str())
            .collect();
        assert_eq!(labels, vec!["ch", "sc", "dc"]);
        let counts: Vec<u64> = result.stitch_counts.iter().map(|(_, count)| *count).collect();
        assert_eq!(counts, vec![12, 30, 7]);
    }

    #[test]
    fn error_payload_decodes_as_failure() {
        let body = r#"{"error": "No stitches detected in the image."}"#;
        let outcome: AnalysisOutcome = serde_json::from_str(body).unwrap();
        match outcome {
            AnalysisOutcome::Failure { error } => {
                assert_eq!(error, "No stitches detected in the image.")
            }
            AnalysisOutcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn error_field_wins_over_result_fields() {
        let body = r#"{"error": "partial analysis", "yarn_estimate": 10.0}"#;
        let outcome: AnalysisOutcome = serde_json::from_str(body).unwrap();
        assert!(matches!(outcome, AnalysisOutcome::Failure { .. }));
    }

    #[test]
    fn missing_base_estimate_is_tolerated() {
        let body = r#"{
            "yarn_estimate": 12.0,
            "yarn_range": [10.8, 13.2],
            "stitch_counts": {"sc": 10},
            "processed": "",
            "original": ""
        }"#;

        let outcome: AnalysisOutcome = serde_json::from_str(body).unwrap();
        match outcome {
            AnalysisOutcome::Success(result) => assert_eq!(result.base_yarn_estimate, None),
            AnalysisOutcome::Failure { error } => panic!("unexpected failure: {error}"),
        }
    }

    #[test]
    fn stitch_counts_serialize_in_insertion_order() {
        let counts: StitchCounts =
            vec![("tr".to_string(), 2), ("ch".to_string(), 9), ("sc".to_string(), 4)]
                .into_iter()
                .collect();
        let encoded = serde_json::to_string(&counts).unwrap();
        assert_eq!(encoded, r#"{"tr":2,"ch":9,"sc":4}"#);
    }
}
