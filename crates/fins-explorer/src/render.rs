//! Plain-text rendering of records, candidates and featured cards

use crate::featured::FeaturedSpecies;
use crate::record::{SpeciesRecord, NOT_AVAILABLE};
use crate::resolver::SearchCandidate;
use serde_json::{Map, Value};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Tabs of the detail screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailTab {
    #[default]
    Classification,
    Biology,
    Conservation,
    Commercial,
    Description,
}

impl DetailTab {
    pub const ALL: [DetailTab; 5] = [
        Self::Classification,
        Self::Biology,
        Self::Conservation,
        Self::Commercial,
        Self::Description,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Classification => "Classification",
            Self::Biology => "Biology",
            Self::Conservation => "Conservation",
            Self::Commercial => "Commercial",
            Self::Description => "Description",
        }
    }
}

impl fmt::Display for DetailTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for DetailTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tab| tab.title().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "unknown tab '{}', expected one of: classification, biology, conservation, commercial, description",
                    wanted
                )
            })
    }
}

/// A titled group of label/value rows
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

fn section(title: &'static str, rows: Vec<(&'static str, String)>) -> Section {
    Section { title, rows }
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "Yes" } else { "No" };
    text.to_string()
}

fn with_code(name: &str, code: u64) -> String {
    format!("{} ({})", name, code)
}

fn extra_text(extra: &Map<String, Value>, key: &str) -> Option<String> {
    match extra.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn or_na(value: Option<String>) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Sections shown on `tab` for `record`
pub fn sections(record: &SpeciesRecord, tab: DetailTab) -> Vec<Section> {
    let id = &record.identity;
    let env = &record.environment;
    let dims = &record.dimensions;
    let cons = &record.conservation;
    let com = &record.commercial;

    match tab {
        DetailTab::Classification => {
            let alternates: Vec<&str> = record
                .common_names
                .iter()
                .filter_map(|n| n.name.as_deref())
                .collect();

            vec![
                section(
                    "Taxonomic Identity",
                    vec![
                        ("Scientific Name", id.scientific_name.clone()),
                        ("Authority", id.scientific_author.clone()),
                        ("Common Name", id.common_name.clone()),
                        ("Vernacular Name", id.vernacular_name.clone()),
                        ("Family", with_code(&id.family, id.family_code)),
                        ("Subfamily", id.subfamily.clone()),
                        ("Genus", with_code(&id.genus, id.genus_code)),
                        ("Species Code", id.species_code.to_string()),
                    ],
                ),
                section(
                    "Extended Taxonomic Details",
                    vec![
                        (
                            "Other Common Names",
                            if alternates.is_empty() {
                                NOT_AVAILABLE.to_string()
                            } else {
                                alternates.join(", ")
                            },
                        ),
                        ("Order", or_na(record.order_details.name.clone())),
                        ("Class", or_na(record.class_details.name.clone())),
                        (
                            "Total Species in Family",
                            or_na(record
                                .family_details
                                .number_of_valid_species
                                .map(|n| n.to_string())),
                        ),
                        ("Family Etymology", or_na(record.family_details.etymology.clone())),
                        ("Genus Etymology", or_na(record.genus_details.etymology.clone())),
                        ("Genus Diagnosis", or_na(record.genus_details.diagnosis.clone())),
                        ("Order Remarks", or_na(extra_text(&record.order_details.extra, "remarks"))),
                        ("Class Remarks", or_na(extra_text(&record.class_details.extra, "remarks"))),
                    ],
                ),
                section(
                    "Taxonomic Status",
                    vec![
                        ("Status", id.taxonomic_issue.clone()),
                        ("Remarks", id.taxonomic_remarks.clone()),
                        ("Source", id.source.clone()),
                        ("Emblematic Species", yes_no(cons.emblematic_species)),
                        ("Game Fish", yes_no(com.game_fish)),
                    ],
                ),
            ]
        }
        DetailTab::Biology => vec![
            section(
                "Physical Dimensions",
                vec![
                    ("Max Length", dims.max_length.clone()),
                    ("Max Weight", dims.max_weight.clone()),
                    ("Max Age", dims.max_age.clone()),
                ],
            ),
            section(
                "Physical Characteristics",
                vec![
                    ("Body Shape", env.body_shape.clone()),
                    ("Dangerous", env.dangerous_species.clone()),
                ],
            ),
            section(
                "Physiological Features",
                vec![
                    ("Air Breathing", env.air_breathing.clone()),
                    ("Electrogenic", env.electrogenic.clone()),
                ],
            ),
            section(
                "Environmental Tolerance",
                vec![
                    ("Saltwater", yes_no(env.saltwater)),
                    ("Freshwater", yes_no(env.freshwater)),
                    ("Brackish", yes_no(env.brackish)),
                    ("Preferred Environment", env.preferred_environment.clone()),
                    ("Migration Type", env.migration_type.clone()),
                ],
            ),
            section(
                "Depth Range",
                vec![
                    ("Minimum Depth", dims.min_depth.clone()),
                    ("Maximum Depth", dims.max_depth.clone()),
                    ("Common Shallow", dims.common_shallow.clone()),
                    ("Common Deep", dims.common_deep.clone()),
                ],
            ),
        ],
        DetailTab::Conservation => vec![section(
            "Vulnerability Assessments",
            vec![
                (
                    "Fishing Vulnerability",
                    format!("{} ({})", cons.fishing_vulnerability, cons.fishing_vulnerability_value),
                ),
                (
                    "Climate Vulnerability",
                    format!("{} ({})", cons.climate_vulnerability, cons.climate_vulnerability_value),
                ),
                ("Phylogenetic Diversity", cons.phylogenetic_diversity.to_string()),
            ],
        )],
        DetailTab::Commercial => vec![
            section(
                "Fisheries Data",
                vec![
                    ("Importance", com.fisheries_importance.clone()),
                    ("Remarks", com.importance_remarks.clone()),
                    ("Used as Bait", com.used_as_bait.clone()),
                    ("Aquaculture Status", com.aquaculture_status.clone()),
                ],
            ),
            section(
                "Catching Methods",
                vec![
                    ("Main Method", com.catching_method.clone()),
                    (
                        "Other Methods",
                        if com.other_catching_methods.is_empty() {
                            NOT_AVAILABLE.to_string()
                        } else {
                            com.other_catching_methods.join(", ")
                        },
                    ),
                ],
            ),
            section(
                "Market Data",
                vec![
                    ("Price Category", com.price_category.clone()),
                    ("Price Reliability", com.price_reliability.clone()),
                ],
            ),
            section(
                "Landings Information",
                vec![
                    ("Statistics", com.landings_statistics.clone()),
                    ("Areas", com.landings_areas.clone()),
                ],
            ),
            section(
                "Aquarium Trade",
                vec![
                    ("Demand", com.aquarium_demand.clone()),
                    ("Details", com.aquarium_details.clone()),
                ],
            ),
        ],
        DetailTab::Description => vec![section(
            "Complete Description",
            vec![("Comments", record.description.clone())],
        )],
    }
}

/// Render the header, tab bar and the sections of `tab`
pub fn render_record(record: &SpeciesRecord, tab: DetailTab) -> String {
    let mut out = String::new();
    let id = &record.identity;

    let _ = writeln!(out, "{} ({})", id.common_name, id.scientific_name);
    let _ = writeln!(out, "Species id {}", id.id);

    let tabs: Vec<String> = DetailTab::ALL
        .iter()
        .map(|t| if *t == tab { format!("[{}]", t) } else { t.to_string() })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));

    for section in sections(record, tab) {
        let _ = writeln!(out, "\n== {} ==", section.title);
        let width = section.rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in &section.rows {
            let _ = writeln!(out, "  {:<width$}  {}", label, value, width = width);
        }
    }

    if !record.unavailable.is_empty() {
        let missing: Vec<String> = record.unavailable.iter().map(|s| s.to_string()).collect();
        let _ = writeln!(out, "\n(unavailable: {})", missing.join(", "));
    }
    out
}

pub fn render_candidates(candidates: &[SearchCandidate]) -> String {
    let mut out = format!("Found {} matching species:\n", candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} ({}) [id {}]",
            i + 1,
            c.common_name,
            c.scientific_name,
            c.species_id
        );
    }
    out
}

pub fn render_featured(cards: &[FeaturedSpecies]) -> String {
    let mut out = String::from("Featured species:\n");
    for (i, card) in cards.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} ({})", i + 1, card.common_name, card.scientific_name);
        let _ = writeln!(
            out,
            "     Class: {}  Order: {}  Family: {}",
            card.class, card.order, card.family
        );
        let _ = writeln!(
            out,
            "     Max depth: {}  Env: {}",
            card.max_depth, card.environment
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordParts, SubRecord};
    use semantyfish_api::CommonName;

    fn record() -> SpeciesRecord {
        let species = serde_json::from_value(serde_json::json!({
            "scientific_name": "Thunnus albacares",
            "vernacular_name": "Yellowfin tuna",
            "genus": {"genus_code": 8961, "genus_name": "Thunnus"},
            "comments": "Found in tropical and subtropical oceans."
        }))
        .unwrap();

        SpeciesRecord::assemble(
            143,
            None,
            RecordParts {
                species,
                common_names: vec![CommonName {
                    name: Some("Ahi".to_string()),
                    ..Default::default()
                }],
                unavailable: vec![SubRecord::Family],
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("biology".parse::<DetailTab>(), Ok(DetailTab::Biology));
        assert_eq!(" Commercial ".parse::<DetailTab>(), Ok(DetailTab::Commercial));
        assert!("map".parse::<DetailTab>().is_err());
        assert_eq!(DetailTab::default(), DetailTab::Classification);
    }

    #[test]
    fn test_classification_rows() {
        let sections = sections(&record(), DetailTab::Classification);
        let identity = &sections[0];
        assert!(identity
            .rows
            .contains(&("Genus", "Thunnus (8961)".to_string())));
        assert!(identity.rows.contains(&("Family", "N/A (0)".to_string())));
        assert!(sections[1]
            .rows
            .contains(&("Other Common Names", "Ahi".to_string())));
    }

    #[test]
    fn test_render_record_marks_tab_and_gaps() {
        let text = render_record(&record(), DetailTab::Description);
        assert!(text.starts_with("Yellowfin tuna (Thunnus albacares)"));
        assert!(text.contains("[Description]"));
        assert!(text.contains("Found in tropical and subtropical oceans."));
        assert!(text.contains("(unavailable: family)"));
    }

    #[test]
    fn test_render_candidates_numbered() {
        let text = render_candidates(&[
            SearchCandidate {
                species_id: 3,
                scientific_name: "Scarus ghobban".to_string(),
                common_name: "Blue-barred parrotfish".to_string(),
            },
            SearchCandidate {
                species_id: 9,
                scientific_name: "Scarus frenatus".to_string(),
                common_name: "N/A".to_string(),
            },
        ]);
        assert!(text.contains("1. Blue-barred parrotfish (Scarus ghobban) [id 3]"));
        assert!(text.contains("2. N/A (Scarus frenatus) [id 9]"));
    }
}
