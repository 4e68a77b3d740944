//! # Codegen Module
//!
//! Renders a [`TemplateCatalog`] as the consolidated Dart source file
//! `EditionTriviaTemplates`.
//!
//! The output is byte-stable for a given catalog: themes are emitted in
//! sorted order and the edition table is fixed.

use crate::templates::{TemplateCatalog, TriviaTemplate};

/// A commented block of the edition -> themes table.
#[derive(Debug, Clone, Copy)]
pub struct EditionGroup {
    pub label: &'static str,
    pub editions: &'static [(&'static str, &'static [&'static str])],
}

/// Edition id -> themes whose templates that edition draws from.
pub const EDITION_THEMES: &[EditionGroup] = &[
    EditionGroup {
        label: "Geography editions",
        editions: &[
            ("geography", &["geography"]),
            ("usa_geography", &["geography"]),
            ("world_capitals", &["geography"]),
            ("mountains_rivers", &["geography"]),
            ("islands", &["geography"]),
            ("national_parks", &["geography"]),
            ("cities", &["geography"]),
            ("oceans", &["geography"]),
        ],
    },
    EditionGroup {
        label: "History editions",
        editions: &[("history", &["history"])],
    },
    EditionGroup {
        label: "Science editions",
        editions: &[
            ("biology", &["science"]),
            ("chemistry", &["science"]),
            ("physics", &["science"]),
            ("geology", &["science"]),
            ("environmental_science", &["science"]),
            ("marine_biology", &["science"]),
            ("microbiology", &["science"]),
            ("genetics", &["science"]),
            ("neuroscience", &["science"]),
            ("astronomy", &["astronomy"]),
            ("meteorology", &["weather"]),
            ("oceanography", &["science"]),
            ("botany", &["science"]),
            ("zoology", &["science"]),
            ("paleontology", &["science"]),
        ],
    },
    EditionGroup {
        label: "Medical editions",
        editions: &[
            ("nursing", &["medicine"]),
            ("medicine", &["medicine"]),
            ("anatomy", &["medicine"]),
            ("surgery", &["medicine"]),
            ("emergency_medicine", &["medicine"]),
            ("mental_health", &["medicine"]),
            ("veterinary", &["medicine"]),
            ("public_health", &["medicine"]),
            ("pharmacy", &["medicine"]),
            ("dentistry", &["medicine"]),
        ],
    },
    EditionGroup {
        label: "Cultural editions",
        editions: &[
            ("black", &["black_culture"]),
            ("latino", &["latino_culture"]),
            ("spanish", &["latino_culture"]),
            ("asian", &["asian_american_culture"]),
            ("indigenous", &["indigenous_culture"]),
            ("caribbean", &["caribbean_culture"]),
            ("middle_eastern", &["middle_eastern_culture"]),
            ("african", &["african_culture"]),
        ],
    },
    EditionGroup {
        label: "Professional editions",
        editions: &[
            ("business", &["business"]),
            ("finance", &["business", "economics"]),
            ("law", &["business"]),
            ("engineering", &["business"]),
            ("computer_science", &["technology"]),
            ("marketing", &["business"]),
            ("real_estate", &["business"]),
            ("agriculture", &["agriculture"]),
            ("aviation", &["aviation"]),
            ("military", &["military"]),
        ],
    },
    EditionGroup {
        label: "Arts & Entertainment",
        editions: &[
            ("music", &["arts"]),
            ("movies", &["arts"]),
            ("tv", &["arts"]),
            ("art", &["arts"]),
            ("literature", &["literature"]),
            ("theater", &["arts"]),
            ("dance", &["arts"]),
            ("photography", &["arts"]),
            ("fashion", &["arts"]),
            ("architecture", &["arts"]),
            ("video_games", &["arts"]),
            ("anime_manga", &["arts"]),
            ("comics", &["arts"]),
            ("classical_music", &["arts"]),
            ("hip_hop", &["arts"]),
        ],
    },
    EditionGroup {
        label: "Sports",
        editions: &[
            ("sports_general", &["sports"]),
            ("football", &["sports"]),
            ("basketball", &["sports"]),
            ("baseball", &["sports"]),
            ("soccer", &["sports"]),
            ("olympics", &["sports"]),
            ("fitness", &["sports"]),
            ("extreme_sports", &["sports"]),
        ],
    },
    EditionGroup {
        label: "Food & Lifestyle",
        editions: &[
            ("food", &["food"]),
            ("wine", &["food"]),
            ("beer", &["food"]),
            ("coffee", &["food"]),
            ("cooking", &["food"]),
            ("baking", &["food"]),
        ],
    },
    EditionGroup {
        label: "Specialty",
        editions: &[
            ("religion", &["religion"]),
            ("mythology", &["religion"]),
            ("philosophy", &["philosophy"]),
            ("technology", &["technology"]),
            ("nature_wildlife", &["science"]),
            ("space_exploration", &["astronomy"]),
        ],
    },
    EditionGroup {
        label: "Kids editions",
        editions: &[
            (
                "little_n3rd",
                &[
                    "kids_animals",
                    "kids_colors",
                    "kids_shapes",
                    "kids_time",
                    "kids_food",
                    "kids_body",
                    "kids_weather",
                    "kids_sky",
                    "kids_house",
                    "kids_numbers",
                ],
            ),
            (
                "junior_n3rd",
                &[
                    "kids_space",
                    "kids_dinosaurs",
                    "kids_plants",
                    "kids_geography",
                    "kids_science",
                    "kids_weather_advanced",
                    "kids_math",
                    "kids_earth_science",
                    "kids_geology",
                    "kids_machines",
                ],
            ),
            (
                "elementary_n3rd",
                &[
                    "kids_civics",
                    "kids_us_government",
                    "kids_geology_advanced",
                    "kids_ecosystems",
                    "kids_water_cycle",
                    "kids_energy",
                    "kids_biology",
                    "kids_ancient_history",
                    "kids_grammar",
                    "kids_moon_phases",
                ],
            ),
            (
                "middle_school_n3rd",
                &[
                    "middle_school_chemistry",
                    "middle_school_physics",
                    "middle_school_literature",
                    "middle_school_geometry",
                    "middle_school_ecology",
                    "middle_school_civics",
                    "middle_school_cell_division",
                    "middle_school_plate_tectonics",
                    "middle_school_art_history",
                    "middle_school_economics",
                ],
            ),
            (
                "high_school_n3rd",
                &[
                    "high_school_literature",
                    "high_school_american_literature",
                    "high_school_physics",
                    "high_school_chemistry",
                    "high_school_history",
                    "high_school_calculus",
                    "high_school_biology",
                    "high_school_economics",
                    "high_school_rhetoric",
                    "high_school_government",
                ],
            ),
            (
                "college_prep_n3rd",
                &[
                    "test_prep_vocabulary",
                    "test_prep_logic",
                    "test_prep_algebra",
                    "test_prep_literature",
                    "test_prep_chemistry",
                    "test_prep_scientific_method",
                    "test_prep_geometry",
                    "test_prep_writing",
                    "test_prep_statistics",
                    "test_prep_world_history",
                ],
            ),
        ],
    },
];

// =============================================================================
// RENDERING
// =============================================================================

const HEADER: &str = "import '../services/trivia_generator_service.dart';

/// Consolidated trivia templates from all batch files
/// This file is auto-generated - do not edit manually
class EditionTriviaTemplates {
  static final Map<String, List<TriviaTemplate>> _templatesByTheme = {};
  static Map<String, List<String>> _editionThemeMapping = {};

  static void initialize() {
    _loadAllTemplates();
    _mapEditionsToThemes();
  }

  static void _loadAllTemplates() {
";

const MIDDLE: &str = "  }

  static void _addTemplates(String theme, List<TriviaTemplate> templates) {
    _templatesByTheme.putIfAbsent(theme, () => []).addAll(templates);
  }

  static void _mapEditionsToThemes() {
    // Map edition IDs to their corresponding themes
    _editionThemeMapping = {
";

const FOOTER: &str = "    };
  }

  /// Get trivia templates for a specific edition
  static List<TriviaTemplate> getTemplatesForEdition(String editionId) {
    final themes = _editionThemeMapping[editionId] ?? [];
    final templates = <TriviaTemplate>[];
    for (final theme in themes) {
      templates.addAll(_templatesByTheme[theme] ?? []);
    }
    return templates;
  }

  /// Get all available themes
  static List<String> getAvailableThemes() {
    return _templatesByTheme.keys.toList();
  }
}
";

/// Render the full Dart file for `catalog`.
#[must_use]
pub fn render_dart(catalog: &TemplateCatalog) -> String {
    let mut out = String::from(HEADER);

    for (theme, templates) in catalog.themes() {
        out.push_str(&format!(
            "\n    // {} ({} templates)\n",
            theme.to_uppercase(),
            templates.len()
        ));
        out.push_str(&format!("    _addTemplates(\"{theme}\", [\n"));
        for template in templates {
            push_template(&mut out, template);
        }
        out.push_str("    ]);\n");
    }

    out.push_str(MIDDLE);
    push_edition_table(&mut out);
    out.push_str(FOOTER);
    out
}

fn push_template(out: &mut String, template: &TriviaTemplate) {
    out.push_str("      TriviaTemplate(\n");
    out.push_str(&format!(
        "        categoryPattern: \"{}\",\n",
        template.category_pattern
    ));
    push_pool(out, "correctPool", &template.correct_pool);
    push_pool(out, "distractorPool", &template.distractor_pool);
    out.push_str(&format!("        theme: \"{}\",\n", template.theme));
    out.push_str("      ),\n");
}

fn push_pool(out: &mut String, field: &str, items: &[String]) {
    if items.is_empty() {
        out.push_str(&format!("        {field}: [],\n"));
        return;
    }
    let body = items
        .iter()
        .map(|item| format!("          \"{item}\""))
        .collect::<Vec<_>>()
        .join(",\n");
    out.push_str(&format!("        {field}: [\n{body}\n        ],\n"));
}

fn push_edition_table(out: &mut String) {
    for (i, group) in EDITION_THEMES.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("      // {}\n", group.label));
        for (edition, themes) in group.editions {
            let themes = themes
                .iter()
                .map(|t| format!("'{t}'"))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("      '{edition}': [{themes}],\n"));
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
