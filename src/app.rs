//! Main application controller
//!
//! `MagicApp` owns the application state and the long-lived collaborators
//! (renderer options, code highlighter, background file loader) and drives
//! the per-frame loop: poll file loads, handle dropped files, re-apply the
//! theme when it changes, lay out the toolbar / editor / preview / status
//! bar, and dispatch keyboard shortcuts after the frame so the editor
//! selection they act on is current.

use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info, warn};

use crate::editor::{EditorWidget, InsertCommand, TextStats};
use crate::export::copy_html_to_clipboard;
use crate::files::{dialogs, is_markdown_name, loader::FileLoader, save_document};
use crate::preview::{should_forward, PreviewPane, ScrollMetrics};
use crate::render::{CodeHighlighter, RenderOptions};
use crate::state::AppState;
use crate::theme::ThemeColors;

/// Toolbar font size for the title label.
const TITLE_FONT_SIZE: f32 = 17.0;

/// Insertion commands in toolbar order.
const TOOLBAR_COMMANDS: [InsertCommand; 5] = [
    InsertCommand::Bold,
    InsertCommand::Italic,
    InsertCommand::Underline,
    InsertCommand::Heading,
    InsertCommand::CodeFence,
];

// ─────────────────────────────────────────────────────────────────────────────
// Keyboard Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Actions triggered by global keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyboardAction {
    Insert(InsertCommand),
    OpenFile,
    SaveFile,
    CopyHtml,
    ToggleFullscreen,
    ExitFullscreen,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application
// ─────────────────────────────────────────────────────────────────────────────

/// The Markdown Magic application.
pub struct MagicApp {
    /// Central document and UI state
    state: AppState,
    /// Rendered preview pane
    preview: PreviewPane,
    /// Code highlighter shared by the HTML renderer and the preview
    highlighter: CodeHighlighter,
    /// Markdown rendering options (hard breaks and GFM on)
    render_options: RenderOptions,
    /// Background file loader
    loader: FileLoader,
    /// Resolved palette for the active mode
    theme: ThemeColors,
    /// Dark mode the theme was last applied for
    applied_dark_mode: Option<bool>,
    /// Fullscreen flag last sent to the window
    applied_fullscreen: bool,
    /// Application start time, for toast timing
    start_time: Instant,
}

impl MagicApp {
    /// Create the application, seeding dark mode from the system preference.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let dark_mode = cc.egui_ctx.style().visuals.dark_mode;
        info!(
            "Initializing with {} mode",
            if dark_mode { "dark" } else { "light" }
        );

        Self {
            state: AppState::new(dark_mode),
            preview: PreviewPane::new(),
            highlighter: CodeHighlighter::new(dark_mode),
            render_options: RenderOptions::default(),
            loader: FileLoader::new(),
            theme: ThemeColors::for_mode(dark_mode),
            applied_dark_mode: None,
            applied_fullscreen: false,
            start_time: Instant::now(),
        }
    }

    /// Elapsed time since app start in seconds.
    fn app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // File Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Show the open dialog and start loading the selected file.
    fn handle_open_file(&mut self) {
        if let Some(path) = dialogs::open_markdown_dialog() {
            info!("Opening file: {}", path.display());
            self.loader.begin_load(path);
        }
    }

    /// Show the save dialog and write the document.
    fn handle_save_file(&mut self) {
        let Some(path) = dialogs::save_markdown_dialog() else {
            return;
        };
        let time = self.app_time();
        match save_document(&path, self.state.document()) {
            Ok(()) => {
                info!("Saved document to {}", path.display());
                self.state
                    .show_toast(format!("Saved: {}", path.display()), time, 3.0);
            }
            Err(err) => {
                warn!("Save failed: {}", err);
                self.state
                    .show_toast(format!("Save failed: {}", err), time, 4.0);
            }
        }
    }

    /// Apply a completed background load, if one finished this frame.
    fn handle_completed_loads(&mut self) {
        let Some(loaded) = self.loader.poll() else {
            return;
        };
        let time = self.app_time();
        match loaded.result {
            Ok(content) => {
                let name = loaded
                    .path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("file");
                self.state.replace_document(content);
                self.state.show_toast(format!("Opened: {}", name), time, 2.0);
            }
            Err(err) => {
                warn!("{}", err);
                self.state.show_toast(err.to_string(), time, 4.0);
            }
        }
    }

    /// Start loading the first markdown file from a drag-drop, if any.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        let Some(path) = dropped.into_iter().find(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_markdown_name)
        }) else {
            return;
        };

        info!("Opening dropped file: {}", path.display());
        self.loader.begin_load(path);
    }

    /// Copy the rendered HTML fragment to the clipboard.
    fn handle_copy_html(&mut self) {
        let time = self.app_time();
        match copy_html_to_clipboard(self.preview.html(), self.state.document()) {
            Ok(()) => {
                self.state.show_toast("Copied HTML to clipboard", time, 2.0);
            }
            Err(err) => {
                warn!("Clipboard copy failed: {}", err);
                self.state
                    .show_toast(format!("Copy failed: {}", err), time, 4.0);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Theme and Window
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-apply the egui theme and highlighter theme when dark mode changed.
    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let dark_mode = self.state.flags.dark_mode;
        if self.applied_dark_mode == Some(dark_mode) {
            return;
        }
        self.theme = ThemeColors::for_mode(dark_mode);
        self.theme.apply(ctx);
        self.highlighter.set_dark(dark_mode);
        self.applied_dark_mode = Some(dark_mode);
        debug!(
            "Applied {} theme",
            if dark_mode { "dark" } else { "light" }
        );
    }

    /// Send the fullscreen viewport command when the flag changed.
    fn apply_fullscreen_if_needed(&mut self, ctx: &egui::Context) {
        let fullscreen = self.state.flags.fullscreen;
        if self.applied_fullscreen == fullscreen {
            return;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
        self.applied_fullscreen = fullscreen;
        info!(
            "{} fullscreen",
            if fullscreen { "Entered" } else { "Left" }
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    /// Show the toolbar; returns a deferred insertion from a button click.
    fn show_toolbar(&mut self, ctx: &egui::Context) -> Option<InsertCommand> {
        let mut deferred = None;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Markdown Magic")
                        .size(TITLE_FONT_SIZE)
                        .strong()
                        .color(self.theme.heading),
                );
                ui.separator();

                for command in TOOLBAR_COMMANDS {
                    let button = ui.button(command.icon()).on_hover_text(command.tooltip());
                    if button.clicked() {
                        deferred = Some(command);
                    }
                }
                ui.separator();

                if ui
                    .button("📂")
                    .on_hover_text("Open file (Ctrl+O)")
                    .clicked()
                {
                    self.handle_open_file();
                }
                if ui
                    .button("💾")
                    .on_hover_text("Save file (Ctrl+S)")
                    .clicked()
                {
                    self.handle_save_file();
                }
                if ui
                    .button("📋")
                    .on_hover_text("Copy HTML to clipboard (Ctrl+Shift+E)")
                    .clicked()
                {
                    self.handle_copy_html();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button("⛶")
                        .on_hover_text("Toggle fullscreen (F11)")
                        .clicked()
                    {
                        self.state.toggle_fullscreen();
                    }

                    let theme_icon = if self.state.flags.dark_mode {
                        "☀"
                    } else {
                        "🌙"
                    };
                    if ui
                        .button(theme_icon)
                        .on_hover_text("Toggle dark mode")
                        .clicked()
                    {
                        self.state.toggle_dark_mode();
                    }

                    let sync_on = self.state.flags.sync_scroll;
                    if ui
                        .selectable_label(sync_on, "⇅")
                        .on_hover_text("Sync editor scroll to preview (fullscreen only)")
                        .clicked()
                    {
                        self.state.toggle_sync_scroll();
                    }
                });
            });
        });

        deferred
    }

    /// Show the status bar: document stats on the left, toast on the right.
    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let stats = TextStats::measure(self.state.document());
                ui.label(egui::RichText::new(stats.label()).color(self.theme.muted));

                if let Some(toast) = self.state.toast() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(egui::RichText::new(toast).italics());
                    });
                }
            });
        });
    }

    /// Show editor and preview side by side; returns the editor's scroll
    /// geometry.
    fn show_panes(&mut self, ctx: &egui::Context) -> ScrollMetrics {
        let editor_width = ctx.screen_rect().width() * 0.5;

        let editor_output = egui::SidePanel::left("editor_panel")
            .resizable(true)
            .default_width(editor_width)
            .show(ctx, |ui| EditorWidget::new(&mut self.state).show(ui))
            .inner;

        if editor_output.changed {
            // An in-flight load must not overwrite this edit
            self.loader.supersede();
        }

        let flags = self.state.flags;
        if should_forward(flags.fullscreen, flags.sync_scroll) {
            self.preview
                .set_scroll_fraction(editor_output.metrics.fraction());
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.preview.show(ui, &self.theme);
        });

        editor_output.metrics
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyboard Shortcuts
    // ─────────────────────────────────────────────────────────────────────────

    /// Read global keyboard shortcuts and dispatch the matching action.
    ///
    /// Runs after layout so the editor selection the insertion shortcuts
    /// act on is from this frame.
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let fullscreen = self.state.flags.fullscreen;

        let action = ctx.input(|i| {
            // Shift combinations first, they are more specific
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::C) {
                debug!("Keyboard shortcut: Ctrl+Shift+C (Code Fence)");
                return Some(KeyboardAction::Insert(InsertCommand::CodeFence));
            }

            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::E) {
                debug!("Keyboard shortcut: Ctrl+Shift+E (Copy HTML)");
                return Some(KeyboardAction::CopyHtml);
            }

            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::B) {
                debug!("Keyboard shortcut: Ctrl+B (Bold)");
                return Some(KeyboardAction::Insert(InsertCommand::Bold));
            }

            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::I) {
                debug!("Keyboard shortcut: Ctrl+I (Italic)");
                return Some(KeyboardAction::Insert(InsertCommand::Italic));
            }

            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::U) {
                debug!("Keyboard shortcut: Ctrl+U (Underline)");
                return Some(KeyboardAction::Insert(InsertCommand::Underline));
            }

            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::H) {
                debug!("Keyboard shortcut: Ctrl+H (Heading)");
                return Some(KeyboardAction::Insert(InsertCommand::Heading));
            }

            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::O) {
                debug!("Keyboard shortcut: Ctrl+O (Open)");
                return Some(KeyboardAction::OpenFile);
            }

            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::S) {
                debug!("Keyboard shortcut: Ctrl+S (Save)");
                return Some(KeyboardAction::SaveFile);
            }

            if i.key_pressed(egui::Key::F11) {
                debug!("Keyboard shortcut: F11 (Toggle Fullscreen)");
                return Some(KeyboardAction::ToggleFullscreen);
            }

            // Escape leaves fullscreen; outside fullscreen it stays with
            // the focused widget
            if fullscreen && i.key_pressed(egui::Key::Escape) {
                debug!("Keyboard shortcut: Escape (Exit Fullscreen)");
                return Some(KeyboardAction::ExitFullscreen);
            }

            None
        });

        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: KeyboardAction) {
        match action {
            KeyboardAction::Insert(command) => self.apply_insert(command),
            KeyboardAction::OpenFile => self.handle_open_file(),
            KeyboardAction::SaveFile => self.handle_save_file(),
            KeyboardAction::CopyHtml => self.handle_copy_html(),
            KeyboardAction::ToggleFullscreen => {
                self.state.toggle_fullscreen();
            }
            KeyboardAction::ExitFullscreen => self.state.exit_fullscreen(),
        }
    }

    /// Apply an insertion command and keep the loader in step with the edit.
    fn apply_insert(&mut self, command: InsertCommand) {
        if let Err(err) = self.state.apply_insert_command(command) {
            warn!("Insertion failed: {}", err);
            return;
        }
        self.loader.supersede();
    }
}

impl eframe::App for MagicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let time = self.app_time();
        self.state.update_toast(time);

        self.handle_completed_loads();
        self.handle_dropped_files(ctx);

        self.apply_theme_if_needed(ctx);
        self.apply_fullscreen_if_needed(ctx);

        // Re-render the preview when the document or theme changed
        let dark_mode = self.state.flags.dark_mode;
        self.preview.update(
            self.state.revision(),
            self.state.document(),
            &self.render_options,
            &self.highlighter,
            dark_mode,
        );

        let deferred_insert = self.show_toolbar(ctx);
        self.show_status_bar(ctx);
        self.show_panes(ctx);

        // Shortcuts run after layout so the selection is up to date
        self.handle_keyboard_shortcuts(ctx);
        if let Some(command) = deferred_insert {
            self.apply_insert(command);
        }
    }
}
