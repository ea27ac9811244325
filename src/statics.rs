// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "PUPE: Peacock User Profile Editor";

pub const EN_BTN_OPEN: &str = "Open...";
pub const EN_BTN_SAVE: &str = "Save";
pub const EN_BTN_SAVE_AS: &str = "Save As...";
pub const EN_BTN_ABOUT: &str = "About";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";

pub const EN_BTN_APPLY: &str = "Apply";
pub const EN_BTN_REVERT: &str = "Revert";
pub const EN_BTN_CANCEL: &str = "Cancel";
pub const EN_BTN_CLEAR: &str = "Clear";
pub const EN_BTN_GO: &str = "Go";
pub const EN_BTN_ADD: &str = "Add";

pub const EN_BTN_EDIT_SELECTED: &str = "Edit Selected";
pub const EN_BTN_DELETE_SELECTED: &str = "Delete Selected";
pub const EN_BTN_CLEAR_SELECTION: &str = "Clear Selection";
pub const EN_BTN_ADD_KEY: &str = "Add Key...";
pub const EN_BTN_ADD_ITEM: &str = "Add Item...";

pub const EN_MENU_CHEATS: &str = "Cheats";

// Cheat menu entries, one per bulk transform.
pub const EN_CHEAT_SET_LEVELS: &str = "Set All Levels in Locations";
pub const EN_CHEAT_SET_CHALLENGES: &str = "Set All Ticked & Completed in ChallengeProgression";
pub const EN_CHEAT_COPY_LOCATIONS: &str = "Copy Locations to Sublocations";
pub const EN_CHEAT_SET_XP: &str = "Set All Xp and ActionXp in Sublocations";
pub const EN_CHEAT_COPY_PLAYED: &str = "Copy Peacock Escalations to Played Contracts";
pub const EN_CHEAT_COPY_COMPLETED: &str = "Copy Peacock Escalations to Completed Escalations";

// Parameter domains named in cheat validation errors.
pub const EN_WANTED_LEVEL_RANGE: &str = "a level between 1 and 100";
pub const EN_WANTED_NONNEGATIVE: &str = "a non-negative integer";

pub const EN_WINDOW_ABOUT: &str = "About";
pub const EN_WINDOW_ADD_ENTRY: &str = "Add Entry";
pub const EN_WINDOW_BATCH_EDIT: &str = "Edit Selected";
pub const EN_WINDOW_SEARCH_RESULTS: &str = "Search Results";

pub const EN_ABOUT_HEADING: &str = "PUPE: Peacock User Profile Editor";
pub const EN_ABOUT_VERSION: &str = "Version:";
pub const EN_ABOUT_BLURB: &str =
    "Edits a Peacock userdata profile: tree view, raw JSON view, and bulk cheats.";

pub const EN_HOME_HEADING: &str = "PUPE: Peacock User Profile Editor";
pub const EN_HOME_INSTRUCTIONS: &str = "Open a Peacock user profile (.json) to begin.";

pub const EN_LABEL_SEARCH: &str = "Search:";
pub const EN_HINT_SEARCH: &str = "key or value";
pub const EN_SEARCH_NO_MATCHES: &str = "No matches.";

pub const EN_HINT_VALUE: &str = "Value";
pub const EN_LABEL_KEY_NAME: &str = "Key name:";
pub const EN_LABEL_PICK_TYPE: &str = "Pick a type:";
pub const EN_LABEL_BATCH_PROMPT: &str = "Enter the new value for all selected items:";

pub const EN_LABEL_LEVEL: &str = "Level:";
pub const EN_LABEL_TICKED: &str = "Ticked";
pub const EN_LABEL_COMPLETED: &str = "Completed";
pub const EN_LABEL_XP: &str = "Xp:";
pub const EN_LABEL_ACTION_XP: &str = "ActionXp:";

pub const EN_CHECKBOX_RAW_JSON: &str = "Raw JSON";

pub const EN_COL_VALUE: &str = "Value";
pub const EN_COL_PATH: &str = "Path";

pub const EN_SELECT_VALUE: &str = "Select a value in the tree to edit.";
pub const EN_ERR_KEY_EXISTS: &str = "Key already exists";

pub const EN_BADGE_MODIFIED: &str = "Modified";
pub const EN_PLACEHOLDER_UNSAVED: &str = "<unsaved>";

pub const EN_TYPE_NULL: &str = "null";
pub const EN_TYPE_BOOL: &str = "bool";
pub const EN_TYPE_NUMBER: &str = "number";
pub const EN_TYPE_STRING: &str = "string";
pub const EN_TYPE_ARRAY: &str = "array";
pub const EN_TYPE_OBJECT: &str = "object";

// Coercion targets named in conversion errors.
pub const EN_TYPE_INTEGER: &str = "integer";
pub const EN_TYPE_FLOAT: &str = "float";

pub const EN_LITERAL_NULL: &str = "null";
pub const EN_LITERAL_MISSING: &str = "<missing>";

// Container markers shown in the tree's value column.
pub const EN_MARKER_OBJECT: &str = "<object>";
pub const EN_MARKER_ARRAY: &str = "<array>";

// The settled-input delay before a typed search term executes.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

// Peacock profile structure keys (PK_ prefix)
pub const PK_EXTENSIONS: &str = "Extensions";
pub const PK_PROGRESSION: &str = "progression";
pub const PK_LOCATIONS: &str = "Locations";
pub const PK_CHALLENGE_PROGRESSION: &str = "ChallengeProgression";
pub const PK_PLAYER_PROFILE_XP: &str = "PlayerProfileXP";
pub const PK_SUBLOCATIONS: &str = "Sublocations";
pub const PK_PEACOCK_ESCALATIONS: &str = "PeacockEscalations";
pub const PK_PEACOCK_PLAYED_CONTRACTS: &str = "PeacockPlayedContracts";
pub const PK_PEACOCK_COMPLETED_ESCALATIONS: &str = "PeacockCompletedEscalations";

// Fields rewritten by the cheats.
pub const PK_FIELD_LEVEL: &str = "Level";
pub const PK_FIELD_TICKED: &str = "Ticked";
pub const PK_FIELD_COMPLETED: &str = "Completed";
pub const PK_FIELD_XP: &str = "Xp";
pub const PK_FIELD_ACTION_XP: &str = "ActionXp";
pub const PK_FIELD_LAST_PLAYED_AT: &str = "LastPlayedAt";
pub const PK_FIELD_IS_ESCALATION: &str = "IsEscalation";

// Location keys prefixed with this are parents; the prefix is stripped when
// deriving sublocation keys.
pub const PK_PARENT_PREFIX: &str = "PARENT_";

// Timestamp written into synthesized played-contract records.
pub const PK_PLAYED_CONTRACT_TIMESTAMP: i64 = 1_743_948_367_768;

// Location mastery bounds enforced by the level cheat.
pub const PK_LEVEL_MIN: i64 = 1;
pub const PK_LEVEL_MAX: i64 = 100;

/// Search terms the quick-search field recognizes: the profile key names the
/// cheats operate on, plus the scalar literals. Anything else is a no-op.
pub const SEARCH_VOCABULARY: &[&str] = &[
    PK_EXTENSIONS,
    PK_PROGRESSION,
    PK_LOCATIONS,
    PK_CHALLENGE_PROGRESSION,
    PK_PLAYER_PROFILE_XP,
    PK_SUBLOCATIONS,
    PK_PEACOCK_ESCALATIONS,
    PK_PEACOCK_PLAYED_CONTRACTS,
    PK_PEACOCK_COMPLETED_ESCALATIONS,
    PK_FIELD_LEVEL,
    PK_FIELD_TICKED,
    PK_FIELD_COMPLETED,
    PK_FIELD_XP,
    PK_FIELD_ACTION_XP,
    "true",
    "false",
    "null",
];
