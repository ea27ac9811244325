use crate::path::NodePath;
use crate::profile::{DocError, resolve, resolve_mut};
use crate::statics;
use crate::value::PkValue;
use indexmap::IndexMap;

pub fn locations_path() -> NodePath {
    NodePath::from_keys(&[
        statics::PK_EXTENSIONS,
        statics::PK_PROGRESSION,
        statics::PK_LOCATIONS,
    ])
}

pub fn challenge_progression_path() -> NodePath {
    NodePath::from_keys(&[statics::PK_EXTENSIONS, statics::PK_CHALLENGE_PROGRESSION])
}

pub fn sublocations_path() -> NodePath {
    NodePath::from_keys(&[
        statics::PK_EXTENSIONS,
        statics::PK_PROGRESSION,
        statics::PK_PLAYER_PROFILE_XP,
        statics::PK_SUBLOCATIONS,
    ])
}

pub fn escalations_path() -> NodePath {
    NodePath::from_keys(&[statics::PK_EXTENSIONS, statics::PK_PEACOCK_ESCALATIONS])
}

pub fn played_contracts_path() -> NodePath {
    NodePath::from_keys(&[statics::PK_EXTENSIONS, statics::PK_PEACOCK_PLAYED_CONTRACTS])
}

pub fn completed_escalations_path() -> NodePath {
    NodePath::from_keys(&[
        statics::PK_EXTENSIONS,
        statics::PK_PEACOCK_COMPLETED_ESCALATIONS,
    ])
}

/// The bulk rewrites offered in the Cheats menu. Each resolves its fixed
/// profile paths and validates parameters before touching anything, so a
/// failure leaves the document exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cheat {
    SetAllLevels { level: i64 },
    SetChallengeProgression { ticked: bool, completed: bool },
    CopyLocationsToSublocations,
    SetSublocationsXp { xp: i64, action_xp: i64 },
    CopyEscalationsToPlayedContracts,
    CopyEscalationsToCompletedEscalations,
}

impl Cheat {
    pub fn label(&self) -> &'static str {
        match self {
            Cheat::SetAllLevels { .. } => statics::EN_CHEAT_SET_LEVELS,
            Cheat::SetChallengeProgression { .. } => statics::EN_CHEAT_SET_CHALLENGES,
            Cheat::CopyLocationsToSublocations => statics::EN_CHEAT_COPY_LOCATIONS,
            Cheat::SetSublocationsXp { .. } => statics::EN_CHEAT_SET_XP,
            Cheat::CopyEscalationsToPlayedContracts => statics::EN_CHEAT_COPY_PLAYED,
            Cheat::CopyEscalationsToCompletedEscalations => statics::EN_CHEAT_COPY_COMPLETED,
        }
    }

    pub fn apply(&self, root: &mut PkValue) -> Result<(), DocError> {
        match *self {
            Cheat::SetAllLevels { level } => set_all_levels(root, level),
            Cheat::SetChallengeProgression { ticked, completed } => {
                set_challenge_progression(root, ticked, completed)
            }
            Cheat::CopyLocationsToSublocations => copy_locations_to_sublocations(root),
            Cheat::SetSublocationsXp { xp, action_xp } => set_sublocations_xp(root, xp, action_xp),
            Cheat::CopyEscalationsToPlayedContracts => copy_escalations_to_played_contracts(root),
            Cheat::CopyEscalationsToCompletedEscalations => {
                copy_escalations_to_completed_escalations(root)
            }
        }
    }
}

fn set_all_levels(root: &mut PkValue, level: i64) -> Result<(), DocError> {
    if !(statics::PK_LEVEL_MIN..=statics::PK_LEVEL_MAX).contains(&level) {
        return Err(DocError::Conversion {
            text: level.to_string(),
            wanted: statics::EN_WANTED_LEVEL_RANGE,
        });
    }
    let locations = resolve_mut(root, &locations_path())?;
    rewrite_levels(locations, level);
    Ok(())
}

fn rewrite_levels(value: &mut PkValue, level: i64) {
    match value {
        PkValue::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if key == statics::PK_FIELD_LEVEL {
                    // A matched value is replaced, never recursed into.
                    *entry = PkValue::integer(level);
                } else {
                    rewrite_levels(entry, level);
                }
            }
        }
        PkValue::Array(items) => {
            for item in items {
                rewrite_levels(item, level);
            }
        }
        _ => {}
    }
}

fn set_challenge_progression(
    root: &mut PkValue,
    ticked: bool,
    completed: bool,
) -> Result<(), DocError> {
    let progression = resolve_mut(root, &challenge_progression_path())?;
    rewrite_challenge_flags(progression, ticked, completed);
    Ok(())
}

fn rewrite_challenge_flags(value: &mut PkValue, ticked: bool, completed: bool) {
    match value {
        PkValue::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if key == statics::PK_FIELD_TICKED {
                    *entry = PkValue::Bool(ticked);
                } else if key == statics::PK_FIELD_COMPLETED {
                    *entry = PkValue::Bool(completed);
                } else {
                    rewrite_challenge_flags(entry, ticked, completed);
                }
            }
        }
        PkValue::Array(items) => {
            for item in items {
                rewrite_challenge_flags(item, ticked, completed);
            }
        }
        _ => {}
    }
}

fn copy_locations_to_sublocations(root: &mut PkValue) -> Result<(), DocError> {
    let keys = object_keys_at(root, &locations_path())?;

    let target_path = sublocations_path();
    match resolve_mut(root, &target_path)? {
        PkValue::Object(map) => {
            for key in keys {
                let derived = key.replace(statics::PK_PARENT_PREFIX, "");
                map.insert(derived, fresh_sublocation_record());
            }
            Ok(())
        }
        other => Err(DocError::TypeMismatch {
            path: target_path,
            expected: statics::EN_TYPE_OBJECT,
            found: other.type_name(),
        }),
    }
}

fn fresh_sublocation_record() -> PkValue {
    let mut record = IndexMap::new();
    record.insert(statics::PK_FIELD_XP.to_string(), PkValue::integer(0));
    record.insert(statics::PK_FIELD_ACTION_XP.to_string(), PkValue::integer(0));
    PkValue::Object(record)
}

fn set_sublocations_xp(root: &mut PkValue, xp: i64, action_xp: i64) -> Result<(), DocError> {
    for param in [xp, action_xp] {
        if param < 0 {
            return Err(DocError::Conversion {
                text: param.to_string(),
                wanted: statics::EN_WANTED_NONNEGATIVE,
            });
        }
    }

    let target_path = sublocations_path();
    match resolve_mut(root, &target_path)? {
        PkValue::Object(map) => {
            for entry in map.values_mut() {
                // Only object-shaped entries carry XP fields; others stay as-is.
                if let Some(record) = entry.as_object_mut() {
                    record.insert(statics::PK_FIELD_XP.to_string(), PkValue::integer(xp));
                    record.insert(
                        statics::PK_FIELD_ACTION_XP.to_string(),
                        PkValue::integer(action_xp),
                    );
                }
            }
            Ok(())
        }
        other => Err(DocError::TypeMismatch {
            path: target_path,
            expected: statics::EN_TYPE_OBJECT,
            found: other.type_name(),
        }),
    }
}

fn copy_escalations_to_played_contracts(root: &mut PkValue) -> Result<(), DocError> {
    let keys = object_keys_at(root, &escalations_path())?;

    let target_path = played_contracts_path();
    match resolve_mut(root, &target_path)? {
        PkValue::Object(map) => {
            for key in keys {
                map.insert(key, fresh_played_contract_record());
            }
            Ok(())
        }
        other => Err(DocError::TypeMismatch {
            path: target_path,
            expected: statics::EN_TYPE_OBJECT,
            found: other.type_name(),
        }),
    }
}

fn fresh_played_contract_record() -> PkValue {
    let mut record = IndexMap::new();
    record.insert(
        statics::PK_FIELD_LAST_PLAYED_AT.to_string(),
        PkValue::integer(statics::PK_PLAYED_CONTRACT_TIMESTAMP),
    );
    record.insert(
        statics::PK_FIELD_IS_ESCALATION.to_string(),
        PkValue::Bool(true),
    );
    record.insert(
        statics::PK_FIELD_COMPLETED.to_string(),
        PkValue::Bool(true),
    );
    PkValue::Object(record)
}

fn copy_escalations_to_completed_escalations(root: &mut PkValue) -> Result<(), DocError> {
    let keys = object_keys_at(root, &escalations_path())?;

    let target_path = completed_escalations_path();
    match resolve_mut(root, &target_path)? {
        PkValue::Array(items) => {
            items.clear();
            items.extend(keys.into_iter().map(PkValue::String));
            Ok(())
        }
        PkValue::Object(map) => {
            map.clear();
            for (index, key) in keys.into_iter().enumerate() {
                map.insert(index.to_string(), PkValue::String(key));
            }
            Ok(())
        }
        other => Err(DocError::Shape {
            target: target_path.to_string(),
            found: other.type_name(),
        }),
    }
}

/// Resolves `path` and returns the object's keys in iteration order; a
/// non-object is a `TypeMismatch`. Collecting up front keeps the later
/// target mutation free of aliasing with the source.
fn object_keys_at(root: &PkValue, path: &NodePath) -> Result<Vec<String>, DocError> {
    let value = resolve(root, path)?;
    match value.as_object() {
        Some(map) => Ok(map.keys().cloned().collect()),
        None => Err(DocError::TypeMismatch {
            path: path.clone(),
            expected: statics::EN_TYPE_OBJECT,
            found: value.type_name(),
        }),
    }
}
