#[cfg(test)]
mod tests {
    use crate::species::{
        Channel, ChannelTable, SpeciesProfileTable, SpeciesTableError, DEFAULT_SPECIES,
    };

    const MINIMAL: &str = r#"{
        "species": {
            "default": {
                "baseline_scale": 3.0,
                "growth_duration": 1.0,
                "shrink_duration": 1.0,
                "convergence_duration": 0.25,
                "convergence_frequency": 5.0,
                "convergence_damping": 2.0,
                "height_margin": 0.15,
                "rotation_range": [0.0, 6.28],
                "growth_channels": {
                    "root": { "delayed_start_fraction": 0.0, "pd_damping": 0.8, "pd_frequency": 0.9, "margin": 0.2 },
                    "x": { "delayed_start_fraction": 0.1, "pd_damping": 1.0, "pd_frequency": 1.0, "margin": 0.0 },
                    "y": { "delayed_start_fraction": 0.2, "pd_damping": 1.0, "pd_frequency": 1.0, "margin": 0.0 },
                    "z": { "delayed_start_fraction": 0.3, "pd_damping": 1.0, "pd_frequency": 1.0, "margin": 0.0 },
                    "w": { "delayed_start_fraction": 0.4, "pd_damping": 1.0, "pd_frequency": -2.0, "margin": 0.0 }
                },
                "shrink_channels": {
                    "root": { "delayed_start_fraction": 0.0, "pd_damping": 1.0, "pd_frequency": 1.0 },
                    "x": { "delayed_start_fraction": 0.0, "pd_damping": 1.0, "pd_frequency": 1.0 },
                    "y": { "delayed_start_fraction": 0.0, "pd_damping": 1.0, "pd_frequency": 1.0 },
                    "z": { "delayed_start_fraction": 0.0, "pd_damping": 1.0, "pd_frequency": 1.0 },
                    "w": { "delayed_start_fraction": 0.0, "pd_damping": 1.0, "pd_frequency": 1.0 }
                }
            }
        },
        "aliases": { "fern": "default" }
    }"#;

    // -------------------------------------------------------------------------
    // Built-in table
    // -------------------------------------------------------------------------

    #[test]
    fn test_builtin_table_loads() {
        let table = SpeciesProfileTable::builtin().expect("built-in profiles must parse");
        assert!(table.contains(DEFAULT_SPECIES));
        assert!(table.len() > 1);
    }

    #[test]
    fn test_builtin_default_profile_values() {
        let table = SpeciesProfileTable::builtin().unwrap();
        let profile = table.default_profile();
        assert_eq!(profile.growth_duration, 1.0);
        assert_eq!(profile.convergence_duration, 0.25);
        assert_eq!(profile.growth_channels.root.pd_damping, 0.8);
        assert_eq!(profile.growth_channels.root.pd_frequency, 0.9);
        assert_eq!(profile.growth_channels.root.margin, 0.2);
    }

    #[test]
    fn test_builtin_aliases_resolve_to_profiles() {
        let table = SpeciesProfileTable::builtin().unwrap();
        for species in table.species() {
            let profile = table.lookup(species);
            assert!(profile.baseline_scale > 0.0, "{species}");
            assert!(profile.total_growth_duration() > 0.0, "{species}");
        }
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    #[test]
    fn test_unknown_species_falls_back_to_default() {
        let table = SpeciesProfileTable::from_json(MINIMAL).unwrap();
        let fallback = table.lookup("no_such_plant");
        assert_eq!(fallback, table.default_profile());
    }

    #[test]
    fn test_alias_shares_target_profile() {
        let table = SpeciesProfileTable::from_json(MINIMAL).unwrap();
        assert!(table.contains("fern"));
        assert_eq!(table.lookup("fern"), table.lookup(DEFAULT_SPECIES));
    }

    #[test]
    fn test_species_sorted() {
        let table = SpeciesProfileTable::from_json(MINIMAL).unwrap();
        assert_eq!(table.species(), vec!["default", "fern"]);
    }

    // -------------------------------------------------------------------------
    // Construction errors
    // -------------------------------------------------------------------------

    #[test]
    fn test_missing_default_rejected() {
        let json = MINIMAL.replace("\"default\": {", "\"oak\": {");
        let json = json.replace("\"fern\": \"default\"", "\"fern\": \"oak\"");
        let err = SpeciesProfileTable::from_json(&json).unwrap_err();
        assert!(matches!(err, SpeciesTableError::MissingDefault));
    }

    #[test]
    fn test_unknown_alias_target_rejected() {
        let json = MINIMAL.replace("\"fern\": \"default\"", "\"fern\": \"oak\"");
        let err = SpeciesProfileTable::from_json(&json).unwrap_err();
        match err {
            SpeciesTableError::UnknownAlias { alias, target } => {
                assert_eq!(alias, "fern");
                assert_eq!(target, "oak");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SpeciesProfileTable::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SpeciesTableError::Parse(_)));
        assert!(err.to_string().contains("parse"));
    }

    // -------------------------------------------------------------------------
    // Sanitizing
    // -------------------------------------------------------------------------

    #[test]
    fn test_non_positive_frequency_is_clamped() {
        let table = SpeciesProfileTable::from_json(MINIMAL).unwrap();
        let w = table.default_profile().growth_channels.w;
        assert!(w.pd_frequency > 0.0);
    }

    #[test]
    fn test_shrink_margin_defaults_to_zero() {
        let table = SpeciesProfileTable::from_json(MINIMAL).unwrap();
        for (_, params) in table.default_profile().shrink_channels.iter() {
            assert_eq!(params.margin, 0.0);
        }
    }

    // -------------------------------------------------------------------------
    // Channel table helpers
    // -------------------------------------------------------------------------

    #[test]
    fn test_channel_table_from_fn_order() {
        let table = ChannelTable::from_fn(|c| c.name().to_string());
        let names: Vec<&str> = table.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, vec!["root", "x", "y", "z", "w"]);
    }

    #[test]
    fn test_segment_index_skips_root() {
        assert_eq!(Channel::Root.segment_index(), None);
        assert_eq!(Channel::X.segment_index(), Some(0));
        assert_eq!(Channel::W.segment_index(), Some(3));
    }
}
