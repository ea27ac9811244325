use crate::cheats::Cheat;
use crate::edit;
use crate::path::NodePath;
use crate::session::{BatchEditOutcome, EditorSession};
use crate::statics;
use crate::tree::DisplayNode;
use crate::value::ValueKind;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::{
    collections::HashSet,
    path::PathBuf,
    sync::OnceLock,
    time::{Duration, Instant},
};

pub fn run_gui() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| {
            Ok(Box::new(PupeApp {
                theme_dark: true,
                ..Default::default()
            }))
        }),
    )
}

/// Cheats picked in the menu bar before the session is borrowed; resolved into
/// a parameter dialog or an immediate invocation later in the frame.
#[derive(Clone, Copy, Debug)]
enum MenuCheat {
    SetLevels,
    SetChallenges,
    CopyLocations,
    SetXp,
    CopyPlayed,
    CopyCompleted,
}

/// Parameter prompt for the cheats that take user input. The prompt resolves
/// to a single apply-or-cancel before any mutation starts.
#[derive(Clone, Debug)]
enum CheatDialog {
    SetAllLevels { level: i64 },
    SetChallengeProgression { ticked: bool, completed: bool },
    SetSublocationsXp { xp: i64, action_xp: i64 },
}

impl CheatDialog {
    fn label(&self) -> &'static str {
        match self {
            CheatDialog::SetAllLevels { .. } => statics::EN_CHEAT_SET_LEVELS,
            CheatDialog::SetChallengeProgression { .. } => statics::EN_CHEAT_SET_CHALLENGES,
            CheatDialog::SetSublocationsXp { .. } => statics::EN_CHEAT_SET_XP,
        }
    }

    fn to_cheat(&self) -> Cheat {
        match *self {
            CheatDialog::SetAllLevels { level } => Cheat::SetAllLevels { level },
            CheatDialog::SetChallengeProgression { ticked, completed } => {
                Cheat::SetChallengeProgression { ticked, completed }
            }
            CheatDialog::SetSublocationsXp { xp, action_xp } => {
                Cheat::SetSublocationsXp { xp, action_xp }
            }
        }
    }
}

#[derive(Clone, Debug)]
struct AddEntryDialog {
    parent: NodePath,
    to_array: bool,
    key: String,
    kind: String,
}

#[derive(Clone, Debug)]
struct BatchEditDialog {
    targets: Vec<NodePath>,
    value: String,
}

/// The main application state and GUI logic.
/// Owns the editor session plus per-frame UI state (selection, edit buffers,
/// pending dialogs). All document access goes through the session.
#[derive(Default)]
struct PupeApp {
    session: Option<EditorSession>,
    dialog_dir: Option<PathBuf>,

    // Tree selection: toggled leaf rows, and the row whose value sits in the
    // editor buffer.
    selected: HashSet<NodePath>,
    edit_target: Option<NodePath>,
    edit_buffer: String,

    raw_mode: bool,
    raw_buffer: String,

    status: String,
    last_error: Option<String>,

    // Debounced quick search. Every keystroke restarts the deadline; only the
    // settled query runs, and at most one search is pending.
    search_query: String,
    search_deadline: Option<Instant>,
    search_hits: Option<crate::search::SearchHits>,
    search_results_open: bool,
    // Containers to force-open on the next tree frame (consumed once).
    expand_once: HashSet<NodePath>,

    cheat_menu_request: Option<MenuCheat>,
    cheat_dialog: Option<CheatDialog>,
    add_entry: Option<AddEntryDialog>,
    batch_edit: Option<BatchEditDialog>,

    about_open: bool,
    theme_dark: bool,
}

fn summarize_batch(outcome: &BatchEditOutcome) -> String {
    if outcome.failures.is_empty() {
        format!("Successfully updated {} items.", outcome.applied)
    } else {
        format!(
            "Updated {} items, {} errors.",
            outcome.applied,
            outcome.failures.len()
        )
    }
}

impl PupeApp {
    fn default_profile_dir() -> Option<PathBuf> {
        let home = std::env::var_os("USERPROFILE")
            .or_else(|| std::env::var_os("HOME"))
            .map(PathBuf::from)?;

        Some(home.join("Peacock").join("userdata").join("users"))
    }

    fn initial_dialog_dir() -> Option<PathBuf> {
        static CACHED: OnceLock<Option<PathBuf>> = OnceLock::new();
        CACHED.get_or_init(Self::default_profile_dir).clone()
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new().add_filter("Peacock user profile", &["json"]);

        if let Some(dir) = self.dialog_dir.clone().or_else(Self::initial_dialog_dir) {
            dlg = dlg.set_directory(dir);
        }

        dlg
    }

    fn open_file(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };

        match EditorSession::open(&path) {
            Ok(session) => {
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.status = format!("Loaded {}", path.display());
                self.last_error = None;
                self.selected.clear();
                self.edit_target = None;
                self.edit_buffer.clear();
                self.raw_mode = false;
                self.raw_buffer = session.raw_text().to_string();
                self.search_query.clear();
                self.search_deadline = None;
                self.search_hits = None;
                self.search_results_open = false;
                self.expand_once.clear();
                self.cheat_dialog = None;
                self.add_entry = None;
                self.batch_edit = None;
                self.session = Some(session);
            }
            Err(e) => {
                self.last_error = Some(format!("Failed to load: {e:#}"));
            }
        }
    }

    fn save_file(&mut self) {
        let target = self
            .session
            .as_ref()
            .and_then(|s| s.profile().source_path.clone());
        match target {
            Some(path) => self.save_to(&path),
            None => self.save_file_as(),
        }
    }

    fn save_file_as(&mut self) {
        let mut dlg = self.file_dialog();
        if let Some(session) = self.session.as_ref()
            && let Some(source_path) = session.profile().source_path.as_ref()
            && let Some(file_name) = source_path.file_name()
        {
            dlg = dlg.set_file_name(file_name.to_string_lossy());
        }

        let Some(path) = dlg.save_file() else {
            return;
        };
        self.save_to(&path);
    }

    fn save_to(&mut self, path: &std::path::Path) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Err(e) = session.save_to_path(path) {
            self.last_error = Some(format!("Failed to save: {e:#}"));
        } else {
            self.dialog_dir = path.parent().map(PathBuf::from);
            self.status = format!("Saved {}", path.display());
            self.last_error = None;
        }
    }

    fn sync_raw_buffer(&mut self, session: &EditorSession) {
        self.raw_buffer = session.raw_text().to_string();
    }

    fn run_search(&mut self, session: &EditorSession) {
        let query = self.search_query.trim();
        if query.is_empty() {
            self.search_hits = None;
            self.search_results_open = false;
            return;
        }

        let hits = session.search(query);
        if hits.is_empty() {
            self.status = statics::EN_SEARCH_NO_MATCHES.to_string();
            self.search_results_open = false;
        } else {
            self.status = format!("{} matches for {query:?}", hits.selected.len());
            self.selected = hits.selected.iter().cloned().collect();
            self.expand_once.extend(hits.expanded.iter().cloned());
            self.search_results_open = true;
        }
        self.search_hits = Some(hits);
    }

    fn invoke_cheat(&mut self, cheat: Cheat, session: &mut EditorSession) {
        match session.invoke_cheat(&cheat) {
            Ok(()) => {
                self.status = format!("{} applied.", cheat.label());
                self.last_error = None;
                self.sync_raw_buffer(session);
            }
            Err(e) => {
                self.last_error = Some(format!("{}: {e}", cheat.label()));
            }
        }
    }

    fn apply_edit(&mut self, session: &mut EditorSession) {
        let Some(path) = self.edit_target.clone() else {
            return;
        };

        match session.edit_leaf(&path, &self.edit_buffer) {
            Ok(()) => {
                self.status = format!("Updated {path}");
                self.last_error = None;
                self.sync_raw_buffer(session);
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
            }
        }
        // Either way the buffer shows the authoritative value afterwards.
        self.edit_buffer = session
            .display_text_at(&path)
            .unwrap_or_else(|_| statics::EN_LITERAL_MISSING.to_string());
    }

    fn apply_raw_edit(&mut self, session: &mut EditorSession) {
        match session.edit_raw_text(&self.raw_buffer) {
            Ok(()) => {
                self.status = "Raw JSON applied.".to_string();
                self.last_error = None;
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
            }
        }
        // Rejected text reverts to the last-known-good serialization.
        self.sync_raw_buffer(session);
    }

    fn delete_selected(&mut self, session: &mut EditorSession) {
        let targets: Vec<NodePath> = self.selected.iter().cloned().collect();
        match session.delete_entries(&targets) {
            Ok(removed) => {
                self.status = format!("Deleted {removed} entries.");
                self.last_error = None;
                self.selected.clear();
                self.edit_target = None;
                self.edit_buffer.clear();
                self.sync_raw_buffer(session);
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn apply_batch_edit(&mut self, dialog: &BatchEditDialog, session: &mut EditorSession) {
        let outcome = session.edit_leaves(&dialog.targets, &dialog.value);
        self.status = summarize_batch(&outcome);
        if outcome.failures.is_empty() {
            self.last_error = None;
        } else {
            let details: Vec<String> = outcome
                .failures
                .iter()
                .map(|(path, e)| format!("{path}: {e}"))
                .collect();
            self.last_error = Some(details.join("; "));
        }
        if outcome.applied > 0 {
            self.sync_raw_buffer(session);
        }
        if let Some(target) = self.edit_target.clone() {
            self.edit_buffer = session.display_text_at(&target).unwrap_or_default();
        }
    }

    fn apply_add_entry(&mut self, dialog: &AddEntryDialog, session: &mut EditorSession) {
        let Some(value) = edit::default_value_for_kind(&dialog.kind) else {
            return;
        };

        let result = if dialog.to_array {
            session.append_item(&dialog.parent, value)
        } else {
            let key = dialog.key.trim();
            let exists = session
                .profile()
                .get(&dialog.parent)
                .ok()
                .and_then(|v| v.as_object())
                .is_some_and(|map| map.contains_key(key));
            if exists {
                self.last_error = Some(statics::EN_ERR_KEY_EXISTS.to_string());
                return;
            }
            session.add_key(&dialog.parent, key, value)
        };

        match result {
            Ok(path) => {
                self.status = format!("Added {path}");
                self.last_error = None;
                self.expand_once.extend(path.ancestors());
                self.sync_raw_buffer(session);
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn toggle_select(&mut self, path: &NodePath, additive: bool) {
        if additive {
            if !self.selected.remove(path) {
                self.selected.insert(path.clone());
            }
        } else {
            self.selected.clear();
            self.selected.insert(path.clone());
        }
    }

    fn render_tree_node(&mut self, ui: &mut egui::Ui, node: &DisplayNode) {
        if node.kind.is_leaf() {
            let is_selected = self.selected.contains(&node.path);
            let text = format!("{}: {}", node.label, node.value_text);
            let resp = ui.selectable_label(is_selected, text);
            if resp.clicked() {
                let additive = ui.input(|i| i.modifiers.ctrl);
                self.toggle_select(&node.path, additive);
                self.edit_target = Some(node.path.clone());
                self.edit_buffer = node.value_text.clone();
            }
            return;
        }

        let header = format!("{}  {}", node.label, node.value_text);
        let force_open = self.expand_once.contains(&node.path).then_some(true);
        let resp = egui::CollapsingHeader::new(header)
            .id_salt(node.path.to_string())
            .open(force_open)
            .show(ui, |ui| {
                for child in &node.children {
                    self.render_tree_node(ui, child);
                }
            });

        resp.header_response.context_menu(|ui| {
            let to_array = node.kind == ValueKind::Array;
            let label = if to_array {
                statics::EN_BTN_ADD_ITEM
            } else {
                statics::EN_BTN_ADD_KEY
            };
            if ui.button(label).clicked() {
                self.add_entry = Some(AddEntryDialog {
                    parent: node.path.clone(),
                    to_array,
                    key: String::new(),
                    kind: edit::NEW_ENTRY_KINDS[0].to_string(),
                });
            }
        });
    }

    fn render_editor_panel(&mut self, ui: &mut egui::Ui, session: &mut EditorSession) {
        let Some(path) = self.edit_target.clone() else {
            ui.label(statics::EN_SELECT_VALUE);
            return;
        };

        let kind_name = session
            .profile()
            .get(&path)
            .map(|v| v.type_name())
            .unwrap_or(statics::EN_LITERAL_MISSING);

        ui.monospace(path.to_string());
        ui.label(format!("{}: {kind_name}", statics::EN_COL_VALUE));
        ui.add_space(4.0);

        ui.add(
            egui::TextEdit::singleline(&mut self.edit_buffer)
                .hint_text(statics::EN_HINT_VALUE)
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            if ui.button(statics::EN_BTN_APPLY).clicked() {
                self.apply_edit(session);
            }
            if ui.button(statics::EN_BTN_REVERT).clicked() {
                self.edit_buffer = session
                    .display_text_at(&path)
                    .unwrap_or_else(|_| statics::EN_LITERAL_MISSING.to_string());
            }
        });

        ui.separator();
        ui.horizontal(|ui| {
            let any_selected = !self.selected.is_empty();
            if ui
                .add_enabled(
                    any_selected,
                    egui::Button::new(statics::EN_BTN_EDIT_SELECTED),
                )
                .clicked()
            {
                let targets: Vec<NodePath> = self.selected.iter().cloned().collect();
                let value = targets
                    .first()
                    .and_then(|p| session.display_text_at(p).ok())
                    .unwrap_or_default();
                self.batch_edit = Some(BatchEditDialog { targets, value });
            }
            if ui
                .add_enabled(
                    any_selected,
                    egui::Button::new(statics::EN_BTN_DELETE_SELECTED),
                )
                .clicked()
            {
                self.delete_selected(session);
            }
            if ui
                .add_enabled(
                    any_selected,
                    egui::Button::new(statics::EN_BTN_CLEAR_SELECTION),
                )
                .clicked()
            {
                self.selected.clear();
            }
        });
        ui.label(format!("{} selected", self.selected.len()));
    }

    fn render_raw_panel(&mut self, ui: &mut egui::Ui, session: &mut EditorSession) {
        ui.horizontal(|ui| {
            if ui.button(statics::EN_BTN_APPLY).clicked() {
                self.apply_raw_edit(session);
            }
            if ui.button(statics::EN_BTN_REVERT).clicked() {
                self.sync_raw_buffer(session);
            }
        });
        ui.separator();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.raw_buffer)
                        .code_editor()
                        .desired_width(f32::INFINITY)
                        .desired_rows(40),
                );
            });
    }
}

impl eframe::App for PupeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_OPEN).clicked() {
                    self.open_file();
                }

                let has_session = self.session.is_some();
                if ui
                    .add_enabled(has_session, egui::Button::new(statics::EN_BTN_SAVE))
                    .clicked()
                {
                    self.save_file();
                }
                if ui
                    .add_enabled(has_session, egui::Button::new(statics::EN_BTN_SAVE_AS))
                    .clicked()
                {
                    self.save_file_as();
                }

                ui.separator();
                ui.add_enabled_ui(has_session, |ui| {
                    ui.menu_button(statics::EN_MENU_CHEATS, |ui| {
                        if ui.button(statics::EN_CHEAT_SET_LEVELS).clicked() {
                            self.cheat_menu_request = Some(MenuCheat::SetLevels);
                        }
                        if ui.button(statics::EN_CHEAT_SET_CHALLENGES).clicked() {
                            self.cheat_menu_request = Some(MenuCheat::SetChallenges);
                        }
                        if ui.button(statics::EN_CHEAT_COPY_LOCATIONS).clicked() {
                            self.cheat_menu_request = Some(MenuCheat::CopyLocations);
                        }
                        if ui.button(statics::EN_CHEAT_SET_XP).clicked() {
                            self.cheat_menu_request = Some(MenuCheat::SetXp);
                        }
                        if ui.button(statics::EN_CHEAT_COPY_PLAYED).clicked() {
                            self.cheat_menu_request = Some(MenuCheat::CopyPlayed);
                        }
                        if ui.button(statics::EN_CHEAT_COPY_COMPLETED).clicked() {
                            self.cheat_menu_request = Some(MenuCheat::CopyCompleted);
                        }
                    });
                });

                ui.separator();
                ui.label(statics::EN_LABEL_SEARCH);
                let resp = ui.add_enabled(
                    has_session,
                    egui::TextEdit::singleline(&mut self.search_query)
                        .hint_text(statics::EN_HINT_SEARCH)
                        .desired_width(160.0),
                );
                if resp.changed() {
                    // Restart the debounce deadline; a superseded search never runs.
                    self.search_deadline = Some(
                        Instant::now() + Duration::from_millis(statics::SEARCH_DEBOUNCE_MS),
                    );
                }

                ui.separator();
                let mut raw_mode = self.raw_mode;
                ui.add_enabled_ui(has_session, |ui| {
                    ui.checkbox(&mut raw_mode, statics::EN_CHECKBOX_RAW_JSON);
                });
                if raw_mode != self.raw_mode {
                    self.raw_mode = raw_mode;
                    if let Some(session) = self.session.as_ref()
                        && self.raw_mode
                    {
                        self.raw_buffer = session.raw_text().to_string();
                    }
                }

                if ui.button(statics::EN_BTN_ABOUT).clicked() {
                    self.about_open = true;
                }
                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.theme_dark = !self.theme_dark;
                    if self.theme_dark {
                        ctx.set_visuals(egui::Visuals::dark());
                    } else {
                        ctx.set_visuals(egui::Visuals::light());
                    }
                }

                ui.separator();
                let file_label = self
                    .session
                    .as_ref()
                    .and_then(|s| s.profile().source_path.as_ref())
                    .and_then(|p| p.file_name())
                    .map(|f| f.to_string_lossy().to_string())
                    .unwrap_or_else(|| statics::EN_PLACEHOLDER_UNSAVED.to_string());
                ui.label(file_label);
                if self.session.as_ref().is_some_and(|s| s.profile().dirty) {
                    ui.colored_label(egui::Color32::YELLOW, statics::EN_BADGE_MODIFIED);
                }
            });
        });

        if self.about_open {
            let mut open = self.about_open;
            egui::Window::new(statics::EN_WINDOW_ABOUT)
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(statics::EN_ABOUT_HEADING);
                    ui.label(format!(
                        "{} {}",
                        statics::EN_ABOUT_VERSION,
                        env!("CARGO_PKG_VERSION")
                    ));
                    ui.separator();
                    ui.label(statics::EN_ABOUT_BLURB);
                });
            self.about_open = open;
        }

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
            });
        });

        if self.session.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(statics::EN_HOME_HEADING);
                ui.label(statics::EN_HOME_INSTRUCTIONS);
            });
            return;
        }

        let mut session = self.session.take().expect("checked above");

        // Debounced search: only the settled query executes, and at most one
        // deadline is pending at a time.
        if let Some(deadline) = self.search_deadline {
            let now = Instant::now();
            if now >= deadline {
                self.search_deadline = None;
                self.run_search(&session);
            } else {
                ctx.request_repaint_after(deadline - now);
            }
        }

        if let Some(menu_cheat) = self.cheat_menu_request.take() {
            match menu_cheat {
                MenuCheat::SetLevels => {
                    self.cheat_dialog = Some(CheatDialog::SetAllLevels {
                        level: statics::PK_LEVEL_MIN,
                    });
                }
                MenuCheat::SetChallenges => {
                    self.cheat_dialog = Some(CheatDialog::SetChallengeProgression {
                        ticked: true,
                        completed: true,
                    });
                }
                MenuCheat::SetXp => {
                    self.cheat_dialog = Some(CheatDialog::SetSublocationsXp {
                        xp: 0,
                        action_xp: 0,
                    });
                }
                MenuCheat::CopyLocations => {
                    self.invoke_cheat(Cheat::CopyLocationsToSublocations, &mut session);
                }
                MenuCheat::CopyPlayed => {
                    self.invoke_cheat(Cheat::CopyEscalationsToPlayedContracts, &mut session);
                }
                MenuCheat::CopyCompleted => {
                    self.invoke_cheat(Cheat::CopyEscalationsToCompletedEscalations, &mut session);
                }
            }
        }

        if let Some(mut dialog) = self.cheat_dialog.take() {
            let mut open = true;
            let mut apply = false;
            let mut cancel = false;
            egui::Window::new(dialog.label())
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    match &mut dialog {
                        CheatDialog::SetAllLevels { level } => {
                            ui.horizontal(|ui| {
                                ui.label(statics::EN_LABEL_LEVEL);
                                ui.add(
                                    egui::DragValue::new(level)
                                        .speed(1)
                                        .range(statics::PK_LEVEL_MIN..=statics::PK_LEVEL_MAX),
                                );
                            });
                        }
                        CheatDialog::SetChallengeProgression { ticked, completed } => {
                            ui.checkbox(ticked, statics::EN_LABEL_TICKED);
                            ui.checkbox(completed, statics::EN_LABEL_COMPLETED);
                        }
                        CheatDialog::SetSublocationsXp { xp, action_xp } => {
                            ui.horizontal(|ui| {
                                ui.label(statics::EN_LABEL_XP);
                                ui.add(egui::DragValue::new(xp).speed(100).range(0..=i64::MAX));
                            });
                            ui.horizontal(|ui| {
                                ui.label(statics::EN_LABEL_ACTION_XP);
                                ui.add(
                                    egui::DragValue::new(action_xp).speed(100).range(0..=i64::MAX),
                                );
                            });
                        }
                    }
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button(statics::EN_BTN_APPLY).clicked() {
                            apply = true;
                        }
                        if ui.button(statics::EN_BTN_CANCEL).clicked() {
                            cancel = true;
                        }
                    });
                });

            if apply {
                self.invoke_cheat(dialog.to_cheat(), &mut session);
            } else if open && !cancel {
                self.cheat_dialog = Some(dialog);
            }
        }

        if let Some(mut dialog) = self.add_entry.take() {
            let mut open = true;
            let mut apply = false;
            let mut cancel = false;
            egui::Window::new(statics::EN_WINDOW_ADD_ENTRY)
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.monospace(dialog.parent.to_string());
                    if !dialog.to_array {
                        ui.horizontal(|ui| {
                            ui.label(statics::EN_LABEL_KEY_NAME);
                            ui.text_edit_singleline(&mut dialog.key);
                        });
                    }
                    ui.horizontal(|ui| {
                        ui.label(statics::EN_LABEL_PICK_TYPE);
                        egui::ComboBox::from_id_salt("add_entry_kind")
                            .selected_text(dialog.kind.clone())
                            .show_ui(ui, |ui| {
                                for kind in edit::NEW_ENTRY_KINDS {
                                    ui.selectable_value(
                                        &mut dialog.kind,
                                        (*kind).to_string(),
                                        *kind,
                                    );
                                }
                            });
                    });
                    ui.separator();
                    ui.horizontal(|ui| {
                        let ready = dialog.to_array || !dialog.key.trim().is_empty();
                        if ui
                            .add_enabled(ready, egui::Button::new(statics::EN_BTN_ADD))
                            .clicked()
                        {
                            apply = true;
                        }
                        if ui.button(statics::EN_BTN_CANCEL).clicked() {
                            cancel = true;
                        }
                    });
                });

            if apply {
                self.apply_add_entry(&dialog, &mut session);
            } else if open && !cancel {
                self.add_entry = Some(dialog);
            }
        }

        if let Some(mut dialog) = self.batch_edit.take() {
            let mut open = true;
            let mut apply = false;
            let mut cancel = false;
            egui::Window::new(statics::EN_WINDOW_BATCH_EDIT)
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(statics::EN_LABEL_BATCH_PROMPT);
                    ui.label(format!("{} targets", dialog.targets.len()));
                    ui.add(
                        egui::TextEdit::singleline(&mut dialog.value)
                            .hint_text(statics::EN_HINT_VALUE),
                    );
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button(statics::EN_BTN_APPLY).clicked() {
                            apply = true;
                        }
                        if ui.button(statics::EN_BTN_CANCEL).clicked() {
                            cancel = true;
                        }
                    });
                });

            if apply {
                self.apply_batch_edit(&dialog, &mut session);
            } else if open && !cancel {
                self.batch_edit = Some(dialog);
            }
        }

        if self.search_results_open
            && let Some(hits) = self.search_hits.clone()
        {
            let mut open = self.search_results_open;
            egui::Window::new(statics::EN_WINDOW_SEARCH_RESULTS)
                .collapsible(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            TableBuilder::new(ui)
                                .striped(true)
                                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                                .column(Column::initial(40.0).resizable(false))
                                .column(Column::initial(320.0).resizable(true))
                                .column(Column::remainder().resizable(true))
                                .header(row_h, |mut header| {
                                    header.col(|ui| {
                                        ui.strong("");
                                    });
                                    header.col(|ui| {
                                        ui.strong(statics::EN_COL_PATH);
                                    });
                                    header.col(|ui| {
                                        ui.strong(statics::EN_COL_VALUE);
                                    });
                                })
                                .body(|mut body| {
                                    body.rows(row_h, hits.selected.len(), |mut row| {
                                        let path = &hits.selected[row.index()];
                                        row.col(|ui| {
                                            if ui.small_button(statics::EN_BTN_GO).clicked() {
                                                self.selected.clear();
                                                self.selected.insert(path.clone());
                                                self.expand_once.extend(path.ancestors());
                                                if let Ok(text) = session.display_text_at(path) {
                                                    self.edit_target = Some(path.clone());
                                                    self.edit_buffer = text;
                                                }
                                            }
                                        });
                                        row.col(|ui| {
                                            ui.monospace(path.to_string());
                                        });
                                        row.col(|ui| {
                                            let text = session
                                                .display_text_at(path)
                                                .unwrap_or_else(|_| {
                                                    statics::EN_LITERAL_MISSING.to_string()
                                                });
                                            ui.label(text);
                                        });
                                    });
                                });
                        });
                });
            self.search_results_open = open;
        }

        egui::SidePanel::left("tree_panel")
            .resizable(true)
            .default_width(520.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for node in session.tree() {
                            self.render_tree_node(ui, node);
                        }
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.raw_mode {
                self.render_raw_panel(ui, &mut session);
            } else {
                self.render_editor_panel(ui, &mut session);
            }
        });

        // Force-open requests are good for exactly one frame.
        self.expand_once.clear();

        self.session = Some(session);
    }
}

#[cfg(test)]
mod tests {
    use super::{CheatDialog, summarize_batch};
    use crate::cheats::Cheat;
    use crate::path::NodePath;
    use crate::profile::DocError;
    use crate::session::BatchEditOutcome;

    #[test]
    fn batch_summary_matches_outcome() {
        let ok = BatchEditOutcome {
            applied: 3,
            failures: Vec::new(),
        };
        assert_eq!(summarize_batch(&ok), "Successfully updated 3 items.");

        let mixed = BatchEditOutcome {
            applied: 2,
            failures: vec![(
                NodePath::from_keys(&["a"]),
                DocError::Conversion {
                    text: "x".into(),
                    wanted: "integer",
                },
            )],
        };
        assert_eq!(summarize_batch(&mixed), "Updated 2 items, 1 errors.");
    }

    #[test]
    fn cheat_dialogs_resolve_to_their_cheats() {
        let dialog = CheatDialog::SetAllLevels { level: 50 };
        assert_eq!(dialog.to_cheat(), Cheat::SetAllLevels { level: 50 });

        let dialog = CheatDialog::SetSublocationsXp {
            xp: 10,
            action_xp: 20,
        };
        assert_eq!(
            dialog.to_cheat(),
            Cheat::SetSublocationsXp {
                xp: 10,
                action_xp: 20
            }
        );
    }
}
