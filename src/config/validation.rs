//! Checks on `ropewatch.toml` beyond what serde enforces.
//!
//! Serde's defaults make every key optional, so a misspelt key silently falls
//! back to its default. [`validate_unknown_keys`] reads the file as a plain
//! `toml::Value` first and reports keys no section declares, with the nearest
//! known key as a hint. [`validate_physical_ranges`] runs on the typed config
//! and separates impossible values (errors) from odd ones (warnings).

use std::collections::HashSet;

use super::EngineConfig;

/// Something in the config worth logging that still loads.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Dotted path of the key, or the section name
    pub field: String,
    pub message: String,
    /// Closest known key, for typos
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.suggestion {
            Some(key) => write!(f, "{}; did you mean `{key}`?", self.message),
            None => f.write_str(&self.message),
        }
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every section name and `section.field` path `EngineConfig` accepts.
///
/// Kept in step with the structs in `engine_config.rs` by hand; the
/// `valid_config_has_no_warnings` integration test fails when they drift.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [thresholds]
        "thresholds",
        "thresholds.tension_warning_n",
        "thresholds.tension_critical_n",
        "thresholds.vibration_warning_mm_s",
        "thresholds.vibration_critical_mm_s",
        "thresholds.wear_warning_pct",
        "thresholds.wear_critical_pct",
        "thresholds.temperature_warning_c",
        "thresholds.temperature_critical_c",
        "thresholds.rope_diameter_warning_mm",
        "thresholds.rope_diameter_critical_mm",
        "thresholds.corrosion_warning_pct",
        "thresholds.corrosion_critical_pct",
        "thresholds.elongation_warning_mm",
        "thresholds.elongation_critical_mm",
        "thresholds.load_weight_warning_kg",
        "thresholds.load_weight_critical_kg",
        // [costs]
        "costs",
        "costs.rope_replacement_inr",
        "costs.planned_replacement_inr",
        "costs.emergency_downtime_per_hour_inr",
        "costs.emergency_response_inr",
        "costs.preventive_inspection_inr",
        "costs.average_emergency_downtime_hours",
        // [risk]
        "risk",
        "risk.tension_reference_n",
        "risk.tension_weight",
        "risk.vibration_scale_mm_s",
        "risk.vibration_weight",
        "risk.wear_weight",
        "risk.temperature_scale_c",
        "risk.temperature_weight",
        "risk.corrosion_weight",
        "risk.elongation_scale_mm",
        "risk.elongation_weight",
        "risk.nominal_diameter_mm",
        "risk.diameter_weight_per_mm",
        // [life]
        "life",
        "life.base_life_cycles",
        "life.cycles_per_day",
        "life.temperature_limit_c",
        "life.min_temperature_factor",
        "life.confidence_horizon_days",
        "life.high_confidence",
        "life.low_confidence",
        // [savings]
        "savings",
        "savings.escalation_probability",
        "savings.annual_failure_probability",
        "savings.inspections_per_year",
        "savings.amortization_months",
        // [fleet]
        "fleet",
        "fleet.top_k",
        "fleet.report_limit",
        "fleet.urgent_days",
        "fleet.urgent_bonus",
        "fleet.soon_days",
        "fleet.soon_bonus",
        "fleet.max_priority",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Dotted path of every table and key in a parsed document, parents before
/// their children. `[costs]` with `emergency_response_inr` gives `costs`
/// then `costs.emergency_response_inr`. Non-table input has no paths.
pub fn dotted_key_paths(document: &toml::Value) -> Vec<String> {
    let mut paths = Vec::new();
    if let Some(table) = document.as_table() {
        push_key_paths(table, None, &mut paths);
    }
    paths
}

fn push_key_paths(table: &toml::Table, parent: Option<&str>, paths: &mut Vec<String>) {
    for (key, value) in table {
        let path = match parent {
            Some(parent) => format!("{parent}.{key}"),
            None => key.clone(),
        };
        if let Some(child) = value.as_table() {
            paths.push(path.clone());
            push_key_paths(child, Some(&path), paths);
        } else {
            paths.push(path);
        }
    }
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (levenshtein(unknown, k), *k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// One warning per key in `raw_toml` that `EngineConfig` does not declare.
///
/// Unknown keys are ignored when loading, so callers log these and carry on.
/// Text that is not valid TOML yields no warnings here; the typed parse
/// reports it.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(document) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };
    let known = known_config_keys();

    dotted_key_paths(&document)
        .into_iter()
        .filter(|path| !known.contains(path.as_str()))
        .map(|path| ValidationWarning {
            message: format!("`{path}` is not a ropewatch setting and will be ignored"),
            suggestion: suggest_correction(&path, &known),
            field: path,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed EngineConfig.
///
/// Returns (errors, warnings): errors are impossible values that must
/// prevent startup; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(config: &EngineConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let t = &config.thresholds;

    // Percentages live on a 0-100 scale
    for (name, value) in [
        ("wear_warning_pct", t.wear_warning_pct),
        ("wear_critical_pct", t.wear_critical_pct),
        ("corrosion_warning_pct", t.corrosion_warning_pct),
        ("corrosion_critical_pct", t.corrosion_critical_pct),
    ] {
        if !(0.0..=100.0).contains(&value) {
            errors.push(format!(
                "thresholds.{name} = {value:.1} is outside the percentage range (0-100)"
            ));
        }
    }

    // A rope cannot have a non-positive diameter
    for (name, value) in [
        ("rope_diameter_warning_mm", t.rope_diameter_warning_mm),
        ("rope_diameter_critical_mm", t.rope_diameter_critical_mm),
    ] {
        if value <= 0.0 {
            errors.push(format!("thresholds.{name} = {value:.2} must be > 0"));
        }
    }

    // Tension, load and elongation bounds cannot be negative
    for (name, value) in [
        ("tension_warning_n", t.tension_warning_n),
        ("tension_critical_n", t.tension_critical_n),
        ("elongation_warning_mm", t.elongation_warning_mm),
        ("elongation_critical_mm", t.elongation_critical_mm),
        ("load_weight_warning_kg", t.load_weight_warning_kg),
        ("load_weight_critical_kg", t.load_weight_critical_kg),
    ] {
        if value < 0.0 {
            errors.push(format!("thresholds.{name} = {value:.1} cannot be negative"));
        }
    }

    // Diameter alarms above the risk model's nominal diameter would flag new rope
    let nominal = config.risk.nominal_diameter_mm;
    if t.rope_diameter_warning_mm > nominal {
        warnings.push(ValidationWarning {
            field: "thresholds.rope_diameter_warning_mm".to_string(),
            message: format!(
                "rope_diameter_warning_mm = {:.2} is above the nominal diameter ({:.2} mm)",
                t.rope_diameter_warning_mm, nominal
            ),
            suggestion: None,
        });
    }

    // Rope temperature: suspicious outside -20..150 °C
    for (name, value) in [
        ("temperature_warning_c", t.temperature_warning_c),
        ("temperature_critical_c", t.temperature_critical_c),
    ] {
        if !(-20.0..=150.0).contains(&value) {
            warnings.push(ValidationWarning {
                field: format!("thresholds.{name}"),
                message: format!("{name} = {value:.1} is outside typical range (-20-150 °C)"),
                suggestion: None,
            });
        }
    }

    // Predictive maintenance should be cheaper than reacting to failures
    let costs = &config.costs;
    if costs.emergency_cost() < costs.planned_cost() {
        warnings.push(ValidationWarning {
            field: "costs".to_string(),
            message: format!(
                "emergency cost ({:.0}) is below planned cost ({:.0}); Critical savings will be negative",
                costs.emergency_cost(),
                costs.planned_cost()
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("tension", "tension"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("corosion", "corrosion"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("°C", "C"), 1);
    }

    #[test]
    fn test_dotted_key_paths_nested() {
        let toml: toml::Value = r#"
            [thresholds]
            wear_warning_pct = 50.0
            [fleet]
            top_k = 3
        "#
        .parse()
        .unwrap();
        let keys = dotted_key_paths(&toml);
        assert!(keys.contains(&"thresholds".to_string()));
        assert!(keys.contains(&"thresholds.wear_warning_pct".to_string()));
        assert!(keys.contains(&"fleet.top_k".to_string()));
    }

    #[test]
    fn test_dotted_key_paths_parent_first() {
        let toml: toml::Value = "[costs]\nemergency_response_inr = 1.0\n".parse().unwrap();
        assert_eq!(
            dotted_key_paths(&toml),
            vec!["costs".to_string(), "costs.emergency_response_inr".to_string()]
        );
        assert!(dotted_key_paths(&toml::Value::Integer(3)).is_empty());
    }

    #[test]
    fn test_warning_display_with_and_without_hint() {
        let mut warning = ValidationWarning {
            field: "fleet.top_kk".to_string(),
            message: "`fleet.top_kk` is not a ropewatch setting and will be ignored".to_string(),
            suggestion: None,
        };
        assert_eq!(warning.to_string(), warning.message);
        warning.suggestion = Some("fleet.top_k".to_string());
        assert!(warning.to_string().ends_with("; did you mean `fleet.top_k`?"));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[thresholds]
corosion_warning_pct = 25.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("corosion_warning_pct"));
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("thresholds.corrosion_warning_pct")
        );
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[thresholds]
tension_warning_n = 91.0

[costs]
preventive_inspection_inr = 2500.0

[savings]
escalation_probability = 0.5
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {:?}", warnings);
    }

    #[test]
    fn test_unknown_section_produces_warning() {
        let warnings = validate_unknown_keys("[telemetry]\nendpoint = \"x\"\n");
        assert!(warnings.iter().any(|w| w.field == "telemetry"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_defaults_are_physically_clean() {
        let (errors, warnings) = validate_physical_ranges(&EngineConfig::default());
        assert!(errors.is_empty(), "Defaults should produce no errors: {:?}", errors);
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {:?}", warnings);
    }

    #[test]
    fn test_wear_threshold_above_100_is_error() {
        let mut config = EngineConfig::default();
        config.thresholds.wear_critical_pct = 120.0;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("wear_critical_pct")));
    }

    #[test]
    fn test_cheap_emergencies_warn() {
        let mut config = EngineConfig::default();
        config.costs.rope_replacement_inr = 0.0;
        config.costs.emergency_response_inr = 0.0;
        config.costs.emergency_downtime_per_hour_inr = 0.0;
        let (_, warnings) = validate_physical_ranges(&config);
        assert!(warnings.iter().any(|w| w.field == "costs"));
    }
}
