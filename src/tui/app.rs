use crate::config::Config;
use crate::history::capture::{Capture, ChangeCapture};
use crate::history::restore::{RestoreCoordinator, RestoreTarget, Restored};
use crate::history::snapshot::{BRIGHTNESS_RANGE, CONTRAST_RANGE, Preset, Snapshot};
use crate::history::store::HistoryStore;
use crate::tui::edit::{EntryState, EntryTarget};
use crate::tui::handlers::{EntryModeAction, HelpModeAction, KeyHandler, NormalModeAction};
use crate::tui::settle::SettleTimer;
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const COARSE_FACTOR: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Brightness,
    Contrast,
    Threshold,
    Preset,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Brightness,
        Control::Contrast,
        Control::Threshold,
        Control::Preset,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Control::Brightness => "Brightness",
            Control::Contrast => "Contrast",
            Control::Threshold => "Threshold",
            Control::Preset => "Preset",
        }
    }

    fn next(self) -> Self {
        match self {
            Control::Brightness => Control::Contrast,
            Control::Contrast => Control::Threshold,
            Control::Threshold => Control::Preset,
            Control::Preset => Control::Preset,
        }
    }

    fn previous(self) -> Self {
        match self {
            Control::Brightness => Control::Brightness,
            Control::Contrast => Control::Brightness,
            Control::Threshold => Control::Contrast,
            Control::Preset => Control::Threshold,
        }
    }
}

/// The values currently on screen. Writes go through `set`, which records
/// whether anything actually changed so the app can start a settle window.
#[derive(Debug)]
pub struct LiveState {
    pub values: Snapshot,
    pub baseline: Snapshot,
    changed: bool,
}

impl LiveState {
    pub fn new(baseline: Snapshot) -> Self {
        Self {
            values: baseline,
            baseline,
            changed: false,
        }
    }

    pub fn set(&mut self, values: Snapshot) {
        if values != self.values {
            self.values = values;
            self.changed = true;
        }
    }

    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

impl RestoreTarget for LiveState {
    fn apply_baseline(&mut self) -> Result<()> {
        self.set(self.baseline);
        Ok(())
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) -> Result<()> {
        self.set(snapshot);
        Ok(())
    }
}

#[derive(Debug)]
pub struct App {
    pub live: LiveState,
    pub focus: Control,
    pub history: HistoryStore,
    pub capture: ChangeCapture,
    pub settle: SettleTimer,
    pub entry: EntryState,
    pub image: Option<PathBuf>,
    pub status: Option<String>,
    pub help_mode: bool,
    pub should_quit: bool,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        let baseline = Snapshot::baseline(config.baseline_threshold);
        Self {
            live: LiveState::new(baseline),
            focus: Control::Brightness,
            history: HistoryStore::new(),
            capture: ChangeCapture::new(baseline),
            settle: SettleTimer::new(Duration::from_millis(config.settle_ms)),
            entry: EntryState::new(),
            image: None,
            status: None,
            help_mode: false,
            should_quit: false,
            config,
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) -> Result<()> {
        let result = if self.help_mode {
            self.handle_help_mode_key(key_event);
            Ok(())
        } else if self.entry.is_open() {
            self.handle_entry_mode_key(key_event);
            Ok(())
        } else {
            self.handle_normal_mode_key(key_event)
        };

        // Any change to the live values, restores included, starts a new
        // settle window.
        if self.live.take_changed() {
            self.settle.touch(now);
        }
        result
    }

    /// Delivers the settled value of the last burst, if its window has passed.
    pub fn tick(&mut self, now: Instant) -> Option<Capture> {
        if !self.settle.poll(now) {
            return None;
        }
        Some(self.capture.on_settled(&mut self.history, self.live.values))
    }

    pub fn poll_timeout(&self, now: Instant) -> Option<Duration> {
        self.settle.time_remaining(now)
    }

    fn handle_normal_mode_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match KeyHandler::handle_normal_mode_key(key_event) {
            NormalModeAction::None => {}
            NormalModeAction::Quit => self.should_quit = true,
            NormalModeAction::FocusPrevious => self.focus = self.focus.previous(),
            NormalModeAction::FocusNext => self.focus = self.focus.next(),
            NormalModeAction::Decrease { coarse } => self.adjust(-1, coarse),
            NormalModeAction::Increase { coarse } => self.adjust(1, coarse),
            NormalModeAction::OpenValueEntry => self.open_value_entry(),
            NormalModeAction::OpenImageEntry => {
                let current = self
                    .image
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.entry.open(EntryTarget::ImagePath, current);
            }
            NormalModeAction::Undo => self.undo()?,
            NormalModeAction::Redo => self.redo()?,
            NormalModeAction::Reset => {
                self.clear_history();
                self.status = Some("Reset to defaults".to_string());
            }
            NormalModeAction::AutoPrep => self.auto_prep(),
            NormalModeAction::ToggleHelpMode => self.help_mode = true,
        }
        Ok(())
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) {
        if KeyHandler::handle_help_mode_key(key_event) == HelpModeAction::ExitHelpMode {
            self.help_mode = false;
        }
    }

    fn handle_entry_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_entry_mode_key(key_event) {
            EntryModeAction::None => {}
            EntryModeAction::Cancel => {
                self.entry.close();
            }
            EntryModeAction::Confirm => self.confirm_entry(),
            EntryModeAction::Backspace => self.entry.backspace(),
            EntryModeAction::Delete => self.entry.delete(),
            EntryModeAction::DeleteWordBackward => self.entry.delete_word_backward(),
            EntryModeAction::MoveCursorLeft => self.entry.move_cursor_left(),
            EntryModeAction::MoveCursorRight => self.entry.move_cursor_right(),
            EntryModeAction::MoveCursorHome => self.entry.move_cursor_home(),
            EntryModeAction::MoveCursorEnd => self.entry.move_cursor_end(),
            EntryModeAction::InsertChar(c) => self.entry.insert_char(c),
        }
    }

    fn adjust(&mut self, direction: i32, coarse: bool) {
        let step = self.config.step as i32 * if coarse { COARSE_FACTOR } else { 1 };
        let mut values = self.live.values;
        match self.focus {
            Control::Brightness => {
                values = Snapshot::new(
                    values.brightness as i32 + direction * step,
                    values.contrast as i32,
                    values.threshold,
                    values.preset,
                );
            }
            Control::Contrast => {
                values = Snapshot::new(
                    values.brightness as i32,
                    values.contrast as i32 + direction * step,
                    values.threshold,
                    values.preset,
                );
            }
            Control::Threshold => {
                let threshold = (values.threshold as i32 + direction * step).clamp(0, 255);
                values.threshold = threshold as u8;
            }
            Control::Preset => {
                values.preset = if direction < 0 {
                    values.preset.previous()
                } else {
                    values.preset.next()
                };
            }
        }
        self.live.set(values);
    }

    fn open_value_entry(&mut self) {
        let values = self.live.values;
        let current = match self.focus {
            Control::Brightness => values.brightness.to_string(),
            Control::Contrast => values.contrast.to_string(),
            Control::Threshold => values.threshold.to_string(),
            Control::Preset => values.preset.to_string(),
        };
        self.entry.open(EntryTarget::Value(self.focus), current);
    }

    fn confirm_entry(&mut self) {
        let Some((target, text)) = self.entry.close() else {
            return;
        };

        let outcome = match target {
            EntryTarget::Value(control) => self.apply_value(control, text.trim()),
            EntryTarget::ImagePath => self.load_image(PathBuf::from(text.trim())),
        };

        if let Err(message) = outcome {
            warn!(%message, "rejected entry");
            self.status = Some(message);
        }
    }

    fn apply_value(&mut self, control: Control, text: &str) -> Result<(), String> {
        let mut values = self.live.values;
        match control {
            Control::Brightness => values.brightness = parse_signed(text, BRIGHTNESS_RANGE)?,
            Control::Contrast => values.contrast = parse_signed(text, CONTRAST_RANGE)?,
            Control::Threshold => {
                values.threshold = text
                    .parse()
                    .map_err(|_| format!("Threshold must be 0..255, got '{}'", text))?;
            }
            Control::Preset => {
                values.preset = text.parse::<Preset>().map_err(|e| e.to_string())?;
            }
        }
        self.live.set(values);
        Ok(())
    }

    /// Starts a new editing session on another image.
    pub fn load_image(&mut self, path: PathBuf) -> Result<(), String> {
        if !path.is_file() {
            return Err(format!("Not a readable file: {}", path.display()));
        }
        info!(path = %path.display(), "loaded image");
        self.status = Some(format!("Loaded {}", path.display()));
        self.image = Some(path);
        self.clear_history();
        Ok(())
    }

    fn auto_prep(&mut self) {
        let baseline = Snapshot::baseline(self.config.baseline_threshold);
        self.capture.set_baseline(baseline);
        self.live.baseline = baseline;
        self.clear_history();
        self.status = Some(format!("Auto-prep baseline: threshold {}", baseline.threshold));
    }

    /// Invalidates the whole history and returns the live values to the
    /// baseline, without letting that change reach capture.
    fn clear_history(&mut self) {
        info!("history cleared");
        self.history.clear();
        self.live.set(self.live.baseline);
        self.live.take_changed();
        self.settle.cancel();
    }

    /// A burst still inside its settle window is recorded first, so undo
    /// reverts the change the user just made.
    fn flush_pending(&mut self) {
        if self.settle.is_pending() {
            self.settle.cancel();
            self.capture.on_settled(&mut self.history, self.live.values);
        }
    }

    fn undo(&mut self) -> Result<()> {
        self.flush_pending();
        let at_rest = !self.history.can_undo();
        RestoreCoordinator::apply_undo(&mut self.history, &mut self.live)?;
        self.status = at_rest.then(|| "Nothing to undo".to_string());
        Ok(())
    }

    fn redo(&mut self) -> Result<()> {
        self.flush_pending();
        let restored = RestoreCoordinator::apply_redo(&mut self.history, &mut self.live)?;
        self.status = match restored {
            Restored::Nothing => Some("Nothing to redo".to_string()),
            _ => None,
        };
        Ok(())
    }
}

fn parse_signed(text: &str, (min, max): (i8, i8)) -> Result<i8, String> {
    let out_of_range = || format!("Value must be {}..{}, got '{}'", min, max, text);
    let value: i8 = text.parse().map_err(|_| out_of_range())?;
    if value < min || value > max {
        return Err(out_of_range());
    }
    Ok(value)
}
