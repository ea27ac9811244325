use pretty_assertions::assert_eq;
use pupe::{Cheat, DocError, PkValue};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn doc(json: &str) -> PkValue {
    PkValue::parse_json(json).expect("fixture parses")
}

fn all_cheats() -> Vec<Cheat> {
    vec![
        Cheat::SetAllLevels { level: 50 },
        Cheat::SetChallengeProgression {
            ticked: true,
            completed: true,
        },
        Cheat::CopyLocationsToSublocations,
        Cheat::SetSublocationsXp {
            xp: 10,
            action_xp: 20,
        },
        Cheat::CopyEscalationsToPlayedContracts,
        Cheat::CopyEscalationsToCompletedEscalations,
    ]
}

#[test]
fn every_cheat_aborts_cleanly_when_its_path_is_missing() {
    // No Extensions subtree at all: every fixed logical path fails to resolve
    // and the document must come through untouched.
    for cheat in all_cheats() {
        let mut value = doc(r#"{"Id": "x", "Extensions": {}}"#);
        let before = value.to_pretty();

        let err = cheat.apply(&mut value).unwrap_err();
        assert!(
            matches!(err, DocError::PathNotFound(_)),
            "{}: {err}",
            cheat.label()
        );
        assert!(err.to_string().contains("Extensions/"), "{err}");
        assert_eq!(value.to_pretty(), before, "{} mutated", cheat.label());
    }
}

#[test]
fn set_all_levels_rewrites_every_level_at_any_depth() -> Result<()> {
    let mut value = doc(
        r#"{"Extensions": {"progression": {"Locations":
            {"A": {"Level": 1, "Sub": {"Level": 2}}, "B": [{"Level": 3}]}}}}"#,
    );

    Cheat::SetAllLevels { level: 50 }.apply(&mut value)?;

    assert_eq!(
        value,
        doc(
            r#"{"Extensions": {"progression": {"Locations":
                {"A": {"Level": 50, "Sub": {"Level": 50}}, "B": [{"Level": 50}]}}}}"#
        )
    );
    Ok(())
}

#[test]
fn set_all_levels_rejects_out_of_range_values() {
    for bad in [0, 101, -5] {
        let mut value = doc(r#"{"Extensions": {"progression": {"Locations": {"A": {"Level": 1}}}}}"#);
        let before = value.to_pretty();

        let err = Cheat::SetAllLevels { level: bad }.apply(&mut value).unwrap_err();
        assert!(matches!(err, DocError::Conversion { .. }), "{err}");
        assert_eq!(value.to_pretty(), before);
    }
}

#[test]
fn set_challenge_progression_rewrites_both_flags() -> Result<()> {
    let mut value = doc(
        r#"{"Extensions": {"ChallengeProgression": {
            "c1": {"Ticked": false, "Completed": false, "Count": 3},
            "c2": {"Inner": [{"Ticked": false}]}
        }}}"#,
    );

    Cheat::SetChallengeProgression {
        ticked: true,
        completed: false,
    }
    .apply(&mut value)?;

    assert_eq!(
        value,
        doc(
            r#"{"Extensions": {"ChallengeProgression": {
                "c1": {"Ticked": true, "Completed": false, "Count": 3},
                "c2": {"Inner": [{"Ticked": true}]}
            }}}"#
        )
    );
    Ok(())
}

#[test]
fn copy_locations_derives_keys_by_stripping_parent_prefix() -> Result<()> {
    let mut value = doc(
        r#"{"Extensions": {"progression": {
            "Locations": {"PARENT_Paris": {}, "Marrakesh": {}},
            "PlayerProfileXP": {"Sublocations": {}}
        }}}"#,
    );

    Cheat::CopyLocationsToSublocations.apply(&mut value)?;

    let sublocations = value
        .get("Extensions")
        .and_then(|v| v.get("progression"))
        .and_then(|v| v.get("PlayerProfileXP"))
        .and_then(|v| v.get("Sublocations"))
        .unwrap();
    assert_eq!(
        sublocations,
        &doc(r#"{"Paris": {"Xp": 0, "ActionXp": 0}, "Marrakesh": {"Xp": 0, "ActionXp": 0}}"#)
    );
    Ok(())
}

#[test]
fn copy_locations_overwrites_existing_target_entries() -> Result<()> {
    let mut value = doc(
        r#"{"Extensions": {"progression": {
            "Locations": {"Paris": {}},
            "PlayerProfileXP": {"Sublocations": {"Paris": {"Xp": 999, "ActionXp": 1}, "Other": 5}}
        }}}"#,
    );

    Cheat::CopyLocationsToSublocations.apply(&mut value)?;

    let sublocations = value
        .get("Extensions")
        .and_then(|v| v.get("progression"))
        .and_then(|v| v.get("PlayerProfileXP"))
        .and_then(|v| v.get("Sublocations"))
        .unwrap();
    assert_eq!(
        sublocations,
        &doc(r#"{"Paris": {"Xp": 0, "ActionXp": 0}, "Other": 5}"#)
    );
    Ok(())
}

#[test]
fn set_sublocations_xp_skips_non_object_entries() -> Result<()> {
    let mut value = doc(
        r#"{"Extensions": {"progression": {"PlayerProfileXP": {"Sublocations": {
            "Paris": {"Xp": 1, "ActionXp": 2},
            "Fresh": {},
            "Stray": 7
        }}}}}"#,
    );

    Cheat::SetSublocationsXp {
        xp: 5000,
        action_xp: 600,
    }
    .apply(&mut value)?;

    let sublocations = value
        .get("Extensions")
        .and_then(|v| v.get("progression"))
        .and_then(|v| v.get("PlayerProfileXP"))
        .and_then(|v| v.get("Sublocations"))
        .unwrap();
    assert_eq!(
        sublocations,
        &doc(
            r#"{
                "Paris": {"Xp": 5000, "ActionXp": 600},
                "Fresh": {"Xp": 5000, "ActionXp": 600},
                "Stray": 7
            }"#
        )
    );
    Ok(())
}

#[test]
fn set_sublocations_xp_rejects_negative_values() {
    let mut value =
        doc(r#"{"Extensions": {"progression": {"PlayerProfileXP": {"Sublocations": {}}}}}"#);
    let before = value.to_pretty();

    let err = Cheat::SetSublocationsXp {
        xp: -1,
        action_xp: 0,
    }
    .apply(&mut value)
    .unwrap_err();
    assert!(matches!(err, DocError::Conversion { .. }));
    assert_eq!(value.to_pretty(), before);
}

#[test]
fn copy_escalations_to_played_contracts_writes_fixed_records() -> Result<()> {
    let mut value = doc(
        r#"{"Extensions": {
            "PeacockEscalations": {"e1": {"Level": 2}, "e2": {}},
            "PeacockPlayedContracts": {"old": {"LastPlayedAt": 1, "IsEscalation": false, "Completed": false}, "e1": 0}
        }}"#,
    );

    Cheat::CopyEscalationsToPlayedContracts.apply(&mut value)?;

    let played = value
        .get("Extensions")
        .and_then(|v| v.get("PeacockPlayedContracts"))
        .unwrap();
    assert_eq!(
        played,
        &doc(
            r#"{
                "old": {"LastPlayedAt": 1, "IsEscalation": false, "Completed": false},
                "e1": {"LastPlayedAt": 1743948367768, "IsEscalation": true, "Completed": true},
                "e2": {"LastPlayedAt": 1743948367768, "IsEscalation": true, "Completed": true}
            }"#
        )
    );
    Ok(())
}

#[test]
fn copy_escalations_into_an_object_target_uses_stringified_indices() -> Result<()> {
    let mut value = doc(
        r#"{"Extensions": {
            "PeacockEscalations": {"e1": {}, "e2": {}},
            "PeacockCompletedEscalations": {"old": 1}
        }}"#,
    );

    Cheat::CopyEscalationsToCompletedEscalations.apply(&mut value)?;

    let completed = value
        .get("Extensions")
        .and_then(|v| v.get("PeacockCompletedEscalations"))
        .unwrap();
    assert_eq!(completed, &doc(r#"{"0": "e1", "1": "e2"}"#));
    // Order matters: the keys follow the source's iteration order.
    assert_eq!(completed.to_pretty(), doc(r#"{"0": "e1", "1": "e2"}"#).to_pretty());
    Ok(())
}

#[test]
fn copy_escalations_into_an_array_target_appends_key_strings() -> Result<()> {
    let mut value = doc(
        r#"{"Extensions": {
            "PeacockEscalations": {"e2": {}, "e1": {}},
            "PeacockCompletedEscalations": ["stale"]
        }}"#,
    );

    Cheat::CopyEscalationsToCompletedEscalations.apply(&mut value)?;

    let completed = value
        .get("Extensions")
        .and_then(|v| v.get("PeacockCompletedEscalations"))
        .unwrap();
    assert_eq!(completed, &doc(r#"["e2", "e1"]"#));
    Ok(())
}

#[test]
fn copy_escalations_rejects_scalar_shaped_targets() {
    for target in [r#""a string""#, "7"] {
        let json = format!(
            r#"{{"Extensions": {{
                "PeacockEscalations": {{"e1": {{}}}},
                "PeacockCompletedEscalations": {target}
            }}}}"#
        );
        let mut value = doc(&json);
        let before = value.to_pretty();

        let err = Cheat::CopyEscalationsToCompletedEscalations
            .apply(&mut value)
            .unwrap_err();
        assert!(matches!(err, DocError::Shape { .. }), "{err}");
        assert!(
            err.to_string()
                .contains("Extensions/PeacockCompletedEscalations"),
            "{err}"
        );
        assert_eq!(value.to_pretty(), before);
    }
}
