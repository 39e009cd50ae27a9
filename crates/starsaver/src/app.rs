//! The terminal host: owns the surface lifecycle and wires the star field,
//! clock overlay and settings dialog together.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Size},
    style::Stylize,
    text::Line,
};
use starsaver_config::{Configuration, SettingsEdit};
use starsaver_core::StarRng;
use starsaver_field::{AnimationLoop, ClockOverlay, FieldSettings, SpriteSheet, StarField};
use tracing::{info, warn};

use crate::settings::{DialogOutcome, SettingsDialog};

/// Event poll timeout while the animation is stopped.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Snapshot the field and overlay were built from.
    config: Configuration,
    config_path: PathBuf,
    field: StarField,
    sprites: SpriteSheet,
    clock: Option<ClockOverlay>,
    animation: AnimationLoop,
    /// Open settings dialog, if any.
    dialog: Option<SettingsDialog>,
    /// Something changed outside a tick and the screen is stale.
    needs_redraw: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    ///
    /// The field starts empty-sized and is laid out on the first frame.
    pub fn new(config: Configuration, config_path: PathBuf, rng: StarRng) -> Self {
        Self {
            running: false,
            field: StarField::new(Size::default(), FieldSettings::from(&config), rng),
            sprites: SpriteSheet::classic(),
            clock: ClockOverlay::from_config(config.clock_overlay()),
            animation: AnimationLoop::new(config.animation_interval()),
            dialog: None,
            needs_redraw: true,
            config,
            config_path,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.field.fit_to(terminal.size()?);
        self.animation.start(Instant::now());

        while self.running {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            let timeout = self
                .animation
                .time_until_next(Instant::now())
                .unwrap_or(IDLE_POLL);
            self.handle_crossterm_events(timeout)?;

            let size = terminal.size()?;
            let fired = self.animation.fire_if_due(Instant::now(), |tick| {
                self.field.fit_to(size);
                self.field.update(tick);
                terminal
                    .draw(|frame| {
                        draw_scene(
                            frame,
                            &self.field,
                            &self.sprites,
                            self.clock.as_ref(),
                            self.dialog.as_ref(),
                            false,
                        )
                    })
                    .map(|_| ())
            })?;
            if fired {
                self.needs_redraw = false;
            }
        }
        Ok(())
    }

    /// Renders the user interface outside of a tick.
    fn render(&self, frame: &mut Frame) {
        draw_scene(
            frame,
            &self.field,
            &self.sprites,
            self.clock.as_ref(),
            self.dialog.as_ref(),
            !self.animation.is_running(),
        );
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next tick is due.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            self.on_event(event::read()?);
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Resize(width, height) => {
                self.field.fit_to(Size::new(width, height));
                self.needs_redraw = true;
            }
            Event::FocusLost => self.animation.stop(),
            Event::FocusGained => self.animation.start(Instant::now()),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        self.needs_redraw = true;

        if let Some(dialog) = self.dialog.as_mut() {
            match dialog.handle_key(key) {
                DialogOutcome::Pending => {}
                DialogOutcome::Cancelled => self.dialog = None,
                DialogOutcome::Confirmed(edit) => {
                    self.dialog = None;
                    self.confirm_settings(edit);
                }
            }
            return;
        }

        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('p') | KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('s')) => self.open_settings(),
            (_, KeyCode::Char('r')) => self.reload_config(),
            _ => {}
        }
    }

    /// Stop or resume the animation loop.
    fn toggle_pause(&mut self) {
        if self.animation.is_running() {
            self.animation.stop();
        } else {
            self.animation.start(Instant::now());
        }
    }

    fn open_settings(&mut self) {
        self.dialog = Some(SettingsDialog::new(self.config.settings_edit()));
    }

    /// Persist the dialog's values and rebuild the field with them.
    ///
    /// Only the edited fields are written on top of the file, or on top of
    /// defaults when it cannot be read. CLI overrides for this run stay out.
    fn confirm_settings(&mut self, edit: SettingsEdit) {
        let stored = Configuration::load(&self.config_path)
            .unwrap_or_default()
            .apply_edit(edit);
        if let Err(err) = stored.save(&self.config_path) {
            warn!("could not save settings: {err}");
        }
        self.apply_config(self.config.apply_edit(edit));
    }

    /// Re-read the config file and apply it if it changed.
    fn reload_config(&mut self) {
        match self.config.reload(&self.config_path) {
            Ok(Some(config)) => self.apply_config(config),
            Ok(None) => info!("config unchanged"),
            Err(err) => warn!("could not reload config: {err}"),
        }
    }

    /// Replace the running snapshot without restarting.
    fn apply_config(&mut self, config: Configuration) {
        self.field.reconfigure(FieldSettings::from(&config));
        self.clock = ClockOverlay::from_config(config.clock_overlay());
        self.animation.set_interval(config.animation_interval(), Instant::now());
        self.animation.reset();
        self.config = config;
        self.needs_redraw = true;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// One full render pass: stars, then clock, then any dialog on top.
fn draw_scene(
    frame: &mut Frame,
    field: &StarField,
    sprites: &SpriteSheet,
    clock: Option<&ClockOverlay>,
    dialog: Option<&SettingsDialog>,
    paused: bool,
) {
    let area = frame.area();
    frame.render_widget(field.widget(sprites), area);

    if let Some(clock) = clock {
        clock.render(area, frame.buffer_mut(), &Local::now());
    }

    if paused {
        let [_, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let help = Line::from(vec![
            "paused  ".dark_gray(),
            "p".bold(),
            " resume  ".dark_gray(),
            "s".bold(),
            " settings  ".dark_gray(),
            "q".bold(),
            " quit".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, footer);
    }

    if let Some(dialog) = dialog {
        frame.render_widget(dialog, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn app(dir: &tempfile::TempDir) -> App {
        let config = Configuration {
            number_of_stars: 10,
            nova_probability: 0,
            ..Default::default()
        };
        let mut app = App::new(config, dir.path().join("config.toml"), StarRng::seeded(1));
        app.field.fit_to(Size::new(30, 10));
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.running = true;
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_pause_and_resume() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.animation.start(Instant::now());
        press(&mut app, KeyCode::Char('p'));
        assert!(!app.animation.is_running());
        press(&mut app, KeyCode::Char('p'));
        assert!(app.animation.is_running());
        assert_eq!(app.field.stars().len(), 10);
    }

    #[test]
    fn test_settings_dialog_applies_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('s'));
        assert!(app.dialog.is_some());

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Enter);

        assert!(app.dialog.is_none());
        assert_eq!(app.config.number_of_stars, 4);
        assert_eq!(app.field.stars().len(), 4);
        assert_eq!(app.animation.next_tick(), 1);

        let saved = Configuration::load(&app.config_path).unwrap();
        assert_eq!(saved.number_of_stars, 4);
    }

    #[test]
    fn test_settings_save_leaves_cli_overrides_out_of_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.config.clock = None;
        std::fs::write(&app.config_path, "number_of_stars = = [").unwrap();

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);

        let saved = Configuration::load(&app.config_path).unwrap();
        assert_eq!(saved.clock, Configuration::default().clock);
        assert_eq!(saved.number_of_stars, 10);
        assert_eq!(saved.nova_probability, 0);
        assert!(app.config.clock.is_none());
    }

    #[test]
    fn test_focus_stops_and_resumes_animation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.animation.start(Instant::now());
        app.on_event(Event::FocusLost);
        assert!(!app.animation.is_running());
        app.on_event(Event::FocusGained);
        assert!(app.animation.is_running());
    }

    #[test]
    fn test_resize_rebuilds_field() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.needs_redraw = false;
        app.on_event(Event::Resize(60, 20));
        assert!(app.needs_redraw);
        assert_eq!(app.field.bounds(), Size::new(60, 20));
        assert_eq!(app.field.stars().len(), 10);
    }

    #[test]
    fn test_settings_dialog_cancel_keeps_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Esc);
        assert!(app.dialog.is_none());
        assert_eq!(app.config.number_of_stars, 10);
        assert!(!app.config_path.exists());
    }

    #[test]
    fn test_reload_applies_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let mut on_disk = app.config.clone();
        on_disk.number_of_stars = 3;
        on_disk.save(&app.config_path).unwrap();

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.field.stars().len(), 3);
    }

    #[test]
    fn test_draw_scene_with_clock_and_pause() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let footer: String = (0..30).map(|x| buffer[(x, 9)].symbol().to_string()).collect();
        assert!(footer.contains("paused"));
    }
}
