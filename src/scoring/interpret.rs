// src/scoring/interpret.rs

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use super::engine::{BFI10_TRAITS, MAS12_SUBSCALES};

/// Interpretation band for an average score on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Mid,
    High,
}

/// Thresholds are closed on the middle band: 2.5 and 3.5 both land in
/// Average / Medium.
pub fn band_for(score: f64) -> Band {
    if score < 2.5 {
        Band::Low
    } else if score <= 3.5 {
        Band::Mid
    } else {
        Band::High
    }
}

impl Band {
    /// BFI-10 reports call the middle band "Average".
    fn bfi_label(self) -> &'static str {
        match self {
            Band::Low => "Low",
            Band::Mid => "Average",
            Band::High => "High",
        }
    }

    /// MAS-12 reports call the middle band "Medium".
    fn mas_label(self) -> &'static str {
        match self {
            Band::Low => "Low",
            Band::Mid => "Medium",
            Band::High => "High",
        }
    }
}

/// Band-independent descriptions of the five traits, shown alongside the
/// banded interpretation.
const BFI10_TRAIT_DESCRIPTIONS: [(&str, &str); 5] = [
    (
        "Extraversion",
        "Reflects tendency to be sociable, assertive, and energetic vs. reserved and quiet.",
    ),
    (
        "Agreeableness",
        "Reflects tendency to be compassionate, cooperative, and kind vs. antagonistic and critical.",
    ),
    (
        "Conscientiousness",
        "Reflects tendency to be organized, dependable, and responsible vs. careless and impulsive.",
    ),
    (
        "Neuroticism",
        "Reflects tendency to experience negative emotions, such as anxiety and sadness (Emotional Stability is the inverse).",
    ),
    (
        "Openness",
        "Reflects tendency to be imaginative, curious, and open to new experiences vs. conventional and preferring routine.",
    ),
];

/// Band-independent descriptions of the four money-attitude subscales.
const MAS12_SUBSCALE_DESCRIPTIONS: [(&str, &str); 4] = [
    (
        "Power-Prestige",
        "Reflects the degree to which money is seen as a means of status, success, and influence over others.",
    ),
    (
        "Retention-Time",
        "Reflects orientation toward saving, budgeting, and planning finances for the future.",
    ),
    (
        "Distrust",
        "Reflects hesitation, suspicion, and doubt in situations involving money.",
    ),
    (
        "Anxiety",
        "Reflects the extent to which money is a source of worry and stress.",
    ),
];

/// Per-band interpretation texts for the MAS-12 subscales, ordered
/// Low / Medium / High.
const MAS12_BAND_DESCRIPTIONS: [(&str, [&str; 3]); 4] = [
    (
        "Power-Prestige",
        [
            "Minimal view of money as a status symbol.",
            "Views money as a moderate status symbol.",
            "Strongly views money as a symbol of status and success.",
        ],
    ),
    (
        "Retention-Time",
        [
            "Less focused on saving and long-term planning.",
            "Moderate focus on saving and planning for the future.",
            "Strong focus on saving and future financial planning.",
        ],
    ),
    (
        "Distrust",
        [
            "Generally trusting in money matters and dealings with others.",
            "Some caution regarding money and others' motives.",
            "Significant suspicion or cynicism about money dealings and motives.",
        ],
    ),
    (
        "Anxiety",
        [
            "Little worry or stress about financial matters.",
            "Moderate worry or concern about finances.",
            "Frequent and significant anxiety or stress concerning money.",
        ],
    ),
];

const BFI10_NOT_SCORED: &str = "This trait was not scored.";
const MAS12_NOT_SCORED: &str = "Score not available.";

/// One table row of a report payload: category, score (or "N/A"), band
/// label, band description, and the category's general description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretationRow {
    pub category: String,
    #[serde(serialize_with = "serialize_score_cell")]
    pub score: Option<f64>,
    pub level: String,
    pub level_description: String,
    pub general_description: String,
}

/// Absent scores render as the string "N/A", never as zero.
fn serialize_score_cell<S: Serializer>(
    score: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match score {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_str("N/A"),
    }
}

/// Builds the five BFI-10 table rows in fixed trait order.
pub fn bfi10_rows(scores: &BTreeMap<String, Option<f64>>) -> Vec<InterpretationRow> {
    BFI10_TRAITS
        .iter()
        .map(|(_, name)| {
            let score = scores.get(*name).copied().flatten();
            let (level, level_description) = match score {
                Some(value) => {
                    let band = band_for(value);
                    (band.bfi_label().to_string(), bfi_band_description(name, band))
                }
                None => ("N/A".to_string(), BFI10_NOT_SCORED.to_string()),
            };
            InterpretationRow {
                category: name.to_string(),
                score,
                level,
                level_description,
                general_description: general_description(&BFI10_TRAIT_DESCRIPTIONS, name),
            }
        })
        .collect()
}

/// Builds the four MAS-12 table rows in fixed subscale order.
pub fn mas12_rows(scores: &BTreeMap<String, Option<f64>>) -> Vec<InterpretationRow> {
    MAS12_SUBSCALES
        .iter()
        .map(|(_, name)| {
            let score = scores.get(*name).copied().flatten();
            let (level, level_description) = match score {
                Some(value) => {
                    let band = band_for(value);
                    (band.mas_label().to_string(), mas_band_description(name, band))
                }
                None => ("N/A".to_string(), MAS12_NOT_SCORED.to_string()),
            };
            InterpretationRow {
                category: name.to_string(),
                score,
                level,
                level_description,
                general_description: general_description(&MAS12_SUBSCALE_DESCRIPTIONS, name),
            }
        })
        .collect()
}

/// Neuroticism measures instability, so its Low/High readings invert the
/// usual "more of the trait" phrasing.
fn bfi_band_description(trait_name: &str, band: Band) -> String {
    if trait_name == "Neuroticism" {
        return match band {
            Band::Low => {
                "Indicates a tendency to be calm, emotionally stable, and resilient to stress."
                    .to_string()
            }
            Band::Mid => format!(
                "Indicates a moderate or balanced expression of typical {} characteristics.",
                trait_name.to_lowercase()
            ),
            Band::High => {
                "Indicates a tendency to experience emotional fluctuations, anxiety, or moodiness more frequently."
                    .to_string()
            }
        };
    }

    let qualifier = match band {
        Band::Low => "a lower",
        Band::Mid => "a moderate or balanced",
        Band::High => "a higher",
    };
    format!(
        "Indicates {} expression of typical {} characteristics.",
        qualifier,
        trait_name.to_lowercase()
    )
}

fn mas_band_description(name: &str, band: Band) -> String {
    let idx = match band {
        Band::Low => 0,
        Band::Mid => 1,
        Band::High => 2,
    };
    MAS12_BAND_DESCRIPTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, texts)| texts[idx].to_string())
        .unwrap_or_else(|| "Interpretation not available.".to_string())
}

fn general_description(table: &[(&str, &str)], name: &str) -> String {
    table
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, d)| d.to_string())
        .unwrap_or_else(|| "General description not available.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, Option<f64>)]) -> BTreeMap<String, Option<f64>> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(band_for(2.49999), Band::Low);
        assert_eq!(band_for(2.5), Band::Mid);
        assert_eq!(band_for(3.5), Band::Mid);
        assert_eq!(band_for(3.50001), Band::High);
    }

    #[test]
    fn test_band_labels_per_scheme() {
        assert_eq!(Band::Mid.bfi_label(), "Average");
        assert_eq!(Band::Mid.mas_label(), "Medium");
        assert_eq!(Band::Low.bfi_label(), "Low");
        assert_eq!(Band::High.mas_label(), "High");
    }

    #[test]
    fn test_bfi10_rows_cover_all_traits_in_order() {
        let rows = bfi10_rows(&scores(&[("Extraversion", Some(4.0))]));
        let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Extraversion",
                "Agreeableness",
                "Conscientiousness",
                "Neuroticism",
                "Openness"
            ]
        );
        assert!(rows.iter().all(|r| !r.general_description.is_empty()));
    }

    #[test]
    fn test_unscored_trait_renders_na() {
        let rows = bfi10_rows(&scores(&[]));
        let extraversion = &rows[0];
        assert_eq!(extraversion.score, None);
        assert_eq!(extraversion.level, "N/A");
        assert_eq!(extraversion.level_description, "This trait was not scored.");

        // Serialized form must carry the string "N/A", not null and not 0.
        let json = serde_json::to_value(extraversion).unwrap();
        assert_eq!(json["score"], serde_json::json!("N/A"));
    }

    #[test]
    fn test_neuroticism_descriptions_inverted() {
        let low_rows = bfi10_rows(&scores(&[("Neuroticism", Some(1.5))]));
        let low = low_rows.iter().find(|r| r.category == "Neuroticism").unwrap();
        assert_eq!(low.level, "Low");
        assert!(low.level_description.contains("calm"));

        let high_rows = bfi10_rows(&scores(&[("Neuroticism", Some(4.5))]));
        let high = high_rows.iter().find(|r| r.category == "Neuroticism").unwrap();
        assert_eq!(high.level, "High");
        assert!(high.level_description.contains("emotional fluctuations"));
    }

    #[test]
    fn test_mas12_rows_use_medium_label() {
        let rows = mas12_rows(&scores(&[("Power-Prestige", Some(3.0))]));
        let pp = &rows[0];
        assert_eq!(pp.level, "Medium");
        assert_eq!(pp.level_description, "Views money as a moderate status symbol.");

        let anxiety = rows.iter().find(|r| r.category == "Anxiety").unwrap();
        assert_eq!(anxiety.level, "N/A");
        assert_eq!(anxiety.level_description, "Score not available.");
    }
}
