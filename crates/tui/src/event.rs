//! Event sources and key mappings.
//!
//! Everything the controller reacts to arrives as an [`AppEvent`] on one
//! channel: key presses and resizes from a blocking input thread, plus
//! periodic reminder and redraw ticks from tokio interval tasks. The
//! controller drains the channel one event at a time.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lazytodo_model::Message;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How often deadlines are scanned for reminders.
pub const REMINDER_PERIOD: Duration = Duration::from_secs(60);

/// How often the screen is redrawn without input, so transient messages
/// expire on time.
pub const REDRAW_PERIOD: Duration = Duration::from_secs(1);

/// An input to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized to the given width and height.
    Resize(u16, u16),
    /// Time to scan for upcoming deadlines. Carries the instant the tick
    /// was scheduled for, so consecutive ticks are exactly one period apart
    /// however late they are handled.
    ReminderTick(DateTime<Utc>),
    /// Time to redraw.
    Redraw,
}

/// How key presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    Navigation,
    /// Text entry in a form; printable keys are typed.
    Form,
}

/// Converts a key press to a message for the given input mode.
///
/// # Navigation mode
///
/// | Key | Message |
/// |-----|---------|
/// | `q`, `Ctrl+C` | Quit |
/// | `?`, `F1` | Toggle help |
/// | `Tab`, `Ctrl+→`, `Ctrl+L` | Next window |
/// | `Shift+Tab`, `Ctrl+←`, `Ctrl+H` | Previous window |
/// | `Ctrl+T` / `Ctrl+S` | Focus main / sidebar |
/// | `↑`/`k`, `↓`/`j` | Move selection |
/// | `Enter` | Select |
/// | `Esc` | Back |
/// | `n`, `a`, `e`, `d` | New list, add task, edit, delete |
/// | `Space` | Toggle |
/// | `s` | Settings |
/// | `←`/`-`, `→`/`+` | Adjust a setting |
///
/// # Form mode
///
/// | Key | Message |
/// |-----|---------|
/// | `Ctrl+C` | Quit |
/// | `F1` | Toggle help |
/// | `Esc` / `Enter` | Cancel / submit |
/// | `Tab` / `Shift+Tab` | Next / previous field |
/// | `←` / `→` | Move cursor |
/// | `Backspace` | Delete before cursor |
/// | `Ctrl+P` | Cycle priority |
/// | any character | Type it |
#[must_use]
pub fn key_to_message(key: KeyEvent, mode: InputMode) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return ctrl_key_to_message(key.code, mode);
    }
    match mode {
        InputMode::Navigation => navigation_key_to_message(key.code),
        InputMode::Form => form_key_to_message(key.code),
    }
}

fn ctrl_key_to_message(code: KeyCode, mode: InputMode) -> Option<Message> {
    match (mode, code) {
        (_, KeyCode::Char('c')) => Some(Message::Quit),
        (InputMode::Form, KeyCode::Char('p')) => Some(Message::CyclePriority),
        (InputMode::Form, _) => None,
        (_, KeyCode::Right | KeyCode::Char('l')) => Some(Message::NextWindow),
        (_, KeyCode::Left | KeyCode::Char('h')) => Some(Message::PrevWindow),
        (_, KeyCode::Char('t')) => Some(Message::FocusMain),
        (_, KeyCode::Char('s')) => Some(Message::FocusSidebar),
        _ => None,
    }
}

fn navigation_key_to_message(code: KeyCode) -> Option<Message> {
    let msg = match code {
        KeyCode::Char('q') => Message::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => Message::ToggleHelp,
        KeyCode::Tab => Message::NextWindow,
        KeyCode::BackTab => Message::PrevWindow,
        KeyCode::Up | KeyCode::Char('k') => Message::NavigateUp,
        KeyCode::Down | KeyCode::Char('j') => Message::NavigateDown,
        KeyCode::Enter => Message::Select,
        KeyCode::Esc => Message::Back,
        KeyCode::Char('n') => Message::NewList,
        KeyCode::Char('a') => Message::AddTask,
        KeyCode::Char('e') => Message::Edit,
        KeyCode::Char('d') => Message::Delete,
        KeyCode::Char(' ') => Message::Toggle,
        KeyCode::Char('s') => Message::OpenSettings,
        KeyCode::Left | KeyCode::Char('-') => Message::Adjust { delta: -1 },
        KeyCode::Right | KeyCode::Char('+' | '=') => Message::Adjust { delta: 1 },
        _ => return None,
    };
    Some(msg)
}

fn form_key_to_message(code: KeyCode) -> Option<Message> {
    let msg = match code {
        KeyCode::F(1) => Message::ToggleHelp,
        KeyCode::Esc => Message::Back,
        KeyCode::Enter => Message::Select,
        KeyCode::Tab => Message::NextField,
        KeyCode::BackTab => Message::PrevField,
        KeyCode::Left => Message::CursorLeft,
        KeyCode::Right => Message::CursorRight,
        KeyCode::Backspace => Message::Backspace,
        KeyCode::Char(ch) => Message::Input { ch },
        _ => return None,
    };
    Some(msg)
}

/// Converts a terminal event to an [`AppEvent`], dropping key releases,
/// mouse input and focus changes.
#[must_use]
pub fn terminal_event_to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
        _ => None,
    }
}

/// The single stream of events feeding the controller.
///
/// # Examples
///
/// ```no_run
/// use lazytodo_tui::event::EventSource;
///
/// # async fn example() {
/// let mut events = EventSource::spawn();
/// while let Some(event) = events.next().await {
///     println!("{event:?}");
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct EventSource {
    rx: UnboundedReceiver<AppEvent>,
    tickers: Vec<JoinHandle<()>>,
}

impl EventSource {
    /// Starts the terminal input thread and the reminder and redraw
    /// tickers. Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        spawn_input_thread(tx.clone());
        let tickers = vec![
            spawn_ticker(tx.clone(), REMINDER_PERIOD, AppEvent::ReminderTick),
            spawn_ticker(tx, REDRAW_PERIOD, |_| AppEvent::Redraw),
        ];
        Self { rx, tickers }
    }

    /// Wraps an existing channel without starting any producers.
    #[must_use]
    pub fn from_receiver(rx: UnboundedReceiver<AppEvent>) -> Self {
        Self {
            rx,
            tickers: Vec::new(),
        }
    }

    /// Waits for the next event. Returns `None` once every producer is gone.
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Drop for EventSource {
    fn drop(&mut self) {
        for ticker in &self.tickers {
            ticker.abort();
        }
    }
}

/// Sends an event built by `make` on `tx` every `period`, starting
/// immediately.
///
/// `make` receives the wall-clock time the tick was scheduled for: the
/// first tick is stamped with the current time and every later one with
/// that time plus a whole number of periods.
pub fn spawn_ticker<F>(
    tx: UnboundedSender<AppEvent>,
    period: Duration,
    make: F,
) -> JoinHandle<()>
where
    F: Fn(DateTime<Utc>) -> AppEvent + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let first = interval.tick().await;
        let origin = Utc::now();
        let mut scheduled = first;
        loop {
            let offset = TimeDelta::from_std(scheduled.duration_since(first)).unwrap_or_default();
            if tx.send(make(origin + offset)).is_err() {
                break;
            }
            scheduled = interval.tick().await;
        }
    })
}

fn spawn_input_thread(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if let Some(app_event) = terminal_event_to_app_event(event)
                        && tx.send(app_event).is_err()
                    {
                        break;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "terminal input failed");
                    break;
                }
            }
        }
        debug!("input thread stopped");
    });
}
