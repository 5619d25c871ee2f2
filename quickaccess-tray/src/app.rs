//! Main application logic for the system tray.
//!
//! This module handles the tray icon, menu creation, click dispatch,
//! and the preferences window for the Quick Access tray application.

use std::time::Duration;

use anyhow::{Context, Result};
use eframe::egui;
use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

use quickaccess::{APP_NAME, Settings, truncate_middle};

use crate::icons;

/// Menu item identifiers.
mod menu_ids {
    pub const PREFERENCES: &str = "preferences";
    pub const QUIT: &str = "quit";
}

/// How often tray and menu event channels are drained.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Fixed content size of the preferences window.
const WINDOW_SIZE: [f32; 2] = [400.0, 150.0];

/// Maximum characters of the folder path shown in the preferences window.
const MAX_PATH_CHARS: usize = 42;

/// Branding color for the folder glyph (matches the tray icon).
const FOLDER_COLOR: egui::Color32 = egui::Color32::from_rgb(0xFF, 0x42, 0x21);

/// Run the tray application.
///
/// This function does not return under normal operation as it runs the event
/// loop. The preferences window starts hidden; the tray icon stays alive for
/// the whole run.
pub fn run() -> Result<()> {
    tracing::info!("Starting tray application");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Preferences")
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false)
            .with_maximize_button(false)
            .with_visible(false),
        ..Default::default()
    };

    eframe::run_native(APP_NAME, options, Box::new(|cc| Ok(Box::new(TrayApp::new(cc)?))))
        .map_err(|error| anyhow::anyhow!("Event loop failed: {error}"))
}

/// Action resolved from a tray menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    OpenPreferences,
    Quit,
}

/// Map a menu item identifier to its action.
fn menu_action(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        menu_ids::PREFERENCES => Some(MenuAction::OpenPreferences),
        menu_ids::QUIT => Some(MenuAction::Quit),
        _ => None,
    }
}

/// Check whether a tray icon click should open the configured folder.
///
/// Only a completed left click opens the folder. Right clicks are owned by
/// the tray menu, and press events are ignored so each click fires once.
fn click_opens_folder(button: MouseButton, button_state: MouseButtonState) -> bool {
    matches!((button, button_state), (MouseButton::Left, MouseButtonState::Up))
}

/// Lifecycle tracker for the single preferences window.
///
/// At most one window is open at a time. Closing clears the open flag, so
/// the next open starts a fresh instance; the generation counter increments
/// once per created instance.
#[derive(Debug, Default)]
struct WindowTracker {
    open: bool,
    generation: u64,
}

impl WindowTracker {
    /// Record an open request.
    ///
    /// Returns true when a new window instance was created, false when the
    /// window was already open and should just be raised.
    fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.generation += 1;
        true
    }

    /// Record the window closing.
    fn close(&mut self) {
        self.open = false;
    }

    const fn is_open(&self) -> bool {
        self.open
    }

    /// Instance counter, bumped once per created window.
    const fn generation(&self) -> u64 {
        self.generation
    }
}

/// The tray application state.
struct TrayApp {
    settings: Settings,
    window: WindowTracker,
    quitting: bool,
    // Dropping the tray icon removes it, so hold it for the app lifetime.
    _tray_icon: TrayIcon,
}

impl TrayApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let settings = Settings::load();
        tracing::info!("Folder preference: {}", settings.folder_path.display());

        let tray_icon = create_tray_icon()?;

        // Kick off the event polling cycle even though the window is hidden.
        cc.egui_ctx.request_repaint_after(POLL_INTERVAL);

        Ok(Self {
            settings,
            window: WindowTracker::default(),
            quitting: false,
            _tray_icon: tray_icon,
        })
    }

    /// Drain pending tray icon events and dispatch clicks.
    fn handle_tray_events(&mut self) {
        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if let TrayIconEvent::Click { button, button_state, .. } = event {
                if click_opens_folder(button, button_state) {
                    self.open_folder();
                }
            }
        }
    }

    /// Drain pending menu events and dispatch them.
    fn handle_menu_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            match menu_action(event.id.0.as_str()) {
                Some(MenuAction::OpenPreferences) => self.open_preferences(ctx),
                Some(MenuAction::Quit) => self.quit(ctx),
                None => {}
            }
        }
    }

    /// Open the configured folder in the system file browser.
    ///
    /// Failures are logged and otherwise ignored; the file browser owns the
    /// error handling for missing or unreadable paths.
    fn open_folder(&self) {
        let path = &self.settings.folder_path;
        tracing::info!("Opening folder: {}", path.display());
        if let Err(error) = open::that(path) {
            tracing::error!("Failed to open {}: {error}", path.display());
        }
    }

    /// Show the preferences window, creating a fresh instance if it is not
    /// currently open, and bring it to the front.
    fn open_preferences(&mut self, ctx: &egui::Context) {
        if self.window.open() {
            tracing::debug!("Creating preferences window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
    }

    /// Quit the application by letting the viewport close for real.
    fn quit(&mut self, ctx: &egui::Context) {
        tracing::info!("Quitting tray application");
        self.quitting = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    /// Intercept window close requests.
    ///
    /// Closing the preferences window hides it and clears the window state so
    /// the next open starts fresh; the application itself keeps running until
    /// Quit is selected from the tray menu.
    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if self.quitting {
            return;
        }
        if ctx.input(|i| i.viewport().close_requested()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
            self.window.close();
            tracing::debug!("Preferences window closed");
        }
    }

    /// Render the preferences window contents.
    fn preferences_ui(&mut self, ctx: &egui::Context) {
        // Salting widget ids with the window generation drops any widget
        // state retained from a previous window instance.
        let generation = self.window.generation();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.push_id(generation, |ui| self.preferences_contents(ui));
        });
    }

    fn preferences_contents(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("📁").size(36.0).color(FOLDER_COLOR));
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(APP_NAME).strong().size(16.0));
                ui.weak(env!("CARGO_PKG_AUTHORS"));
                ui.weak(format!("Version: {}", env!("CARGO_PKG_VERSION")));
            });
        });
        ui.add_space(8.0);

        let path_text = self.settings.folder_path.to_string_lossy().into_owned();
        let path_display = truncate_middle(&path_text, MAX_PATH_CHARS);

        ui.label(egui::RichText::new("Select Folder").strong());
        ui.horizontal(|ui| {
            ui.label(path_display).on_hover_text(path_text);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Choose...").clicked() {
                    self.choose_folder();
                }
            });
        });
    }

    /// Show the native directory picker and store the selection.
    ///
    /// Cancelling the dialog leaves the folder preference unchanged.
    fn choose_folder(&mut self) {
        let selection = rfd::FileDialog::new()
            .set_title("Select Folder")
            .set_directory(&self.settings.folder_path)
            .pick_folder();

        let Some(path) = selection else {
            tracing::debug!("Folder picker cancelled");
            return;
        };

        tracing::info!("Folder preference changed to {}", path.display());
        self.settings.folder_path = path;
        if let Err(error) = self.settings.save() {
            tracing::error!("Failed to save settings: {error}");
        }
    }
}

impl eframe::App for TrayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_tray_events();
        self.handle_menu_events(ctx);
        self.handle_close_request(ctx);

        if self.window.is_open() {
            self.preferences_ui(ctx);
        }

        // The tray event channels have no waker of their own, so keep the
        // update loop ticking even while the window is hidden.
        ctx.request_repaint_after(POLL_INTERVAL);
    }
}

/// Create the tray icon with its menu attached.
fn create_tray_icon() -> Result<TrayIcon> {
    let icon = icons::create_folder_icon()?;
    let menu = create_menu()?;

    TrayIconBuilder::new()
        .with_icon(icon)
        .with_tooltip(APP_NAME)
        .with_menu(Box::new(menu))
        // Left click opens the folder; only right click shows the menu.
        .with_show_menu_on_left_click(false)
        .build()
        .context("Failed to build tray icon")
}

/// Create the tray menu: Preferences, separator, Quit.
fn create_menu() -> Result<Menu> {
    let menu = Menu::new();

    let preferences_item = MenuItem::with_id(menu_ids::PREFERENCES, "Preferences", true, None);
    let quit_item = MenuItem::with_id(menu_ids::QUIT, "Quit", true, None);

    menu.append(&preferences_item)?;
    menu.append(&PredefinedMenuItem::separator())?;
    menu.append(&quit_item)?;

    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_click_up_opens_folder() {
        assert!(click_opens_folder(MouseButton::Left, MouseButtonState::Up));
    }

    #[test]
    fn test_other_clicks_do_not_open_folder() {
        assert!(!click_opens_folder(MouseButton::Right, MouseButtonState::Up));
        assert!(!click_opens_folder(MouseButton::Middle, MouseButtonState::Up));
        assert!(!click_opens_folder(MouseButton::Left, MouseButtonState::Down));
        assert!(!click_opens_folder(MouseButton::Right, MouseButtonState::Down));
    }

    #[test]
    fn test_menu_action_routing() {
        assert_eq!(menu_action(menu_ids::PREFERENCES), Some(MenuAction::OpenPreferences));
        assert_eq!(menu_action(menu_ids::QUIT), Some(MenuAction::Quit));
        assert_eq!(menu_action("unknown"), None);
    }

    #[test]
    fn test_window_tracker_opens_once() {
        let mut window = WindowTracker::default();
        assert!(!window.is_open());

        assert!(window.open(), "first open should create a window");
        assert!(window.is_open());
        assert!(!window.open(), "opening again should reuse the window");
        assert_eq!(window.generation(), 1);
    }

    #[test]
    fn test_window_tracker_reopen_creates_fresh_instance() {
        let mut window = WindowTracker::default();
        assert!(window.open());
        window.close();
        assert!(!window.is_open());

        assert!(window.open(), "reopening after close should create a new window");
        assert_eq!(window.generation(), 2);
    }

    #[test]
    fn test_create_menu() {
        // Menu construction needs no windowing system.
        let menu = create_menu().expect("Failed to create menu");
        assert_eq!(menu.items().len(), 3);
    }
}
