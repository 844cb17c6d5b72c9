//! TUI application state and event loop

use super::timers::TimerQueue;
use super::view::BoardView;
use crate::config::{KeyCap, KeyboardLayout, Settings};
use crate::game::{CueTable, Effect, GameSession, Input, SoundCue};
use crate::output::CuePlayer;
use crate::relay::{RelayClient, RelayEvent};
use crate::wordlists::WordList;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop sleeps when nothing is scheduled
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Application state
pub struct App<'a> {
    pub session: GameSession<'a, WordList>,
    pub view: BoardView,
    pub layout: KeyboardLayout,
    pub cues: CueTable,
    /// Key highlighted on the on-screen keyboard, and until when
    pub pressed: Option<(KeyCap, Instant)>,
    pub should_quit: bool,
    /// Another player on the relay started a game since our last reset
    pub peer_started: bool,
    key_pulse: Duration,
    timers: TimerQueue,
    player: Box<dyn CuePlayer + 'a>,
    relay: Option<RelayClient>,
}

impl<'a> App<'a> {
    /// # Errors
    ///
    /// Returns an error if the configured keyboard layout is invalid.
    pub fn new(
        dictionary: &'a WordList,
        settings: &Settings,
        player: Box<dyn CuePlayer + 'a>,
        relay: Option<RelayClient>,
    ) -> Result<Self> {
        let mut app = Self {
            session: GameSession::new(dictionary, settings.session_options()),
            view: BoardView::default(),
            layout: settings.keyboard_layout()?,
            cues: settings.cues.clone(),
            pressed: None,
            should_quit: false,
            peer_started: false,
            key_pulse: settings.key_pulse(),
            timers: TimerQueue::new(),
            player,
            relay,
        };
        app.announce_start();
        Ok(app)
    }

    /// Start a new game, whatever the state of the current one
    pub fn new_game(&mut self, now: Instant) {
        let effects = self.session.reset();
        self.apply(effects, now);
        self.peer_started = false;
        self.announce_start();
    }

    /// Forward one game input and apply the resulting effects
    pub fn press(&mut self, input: Input, now: Instant) {
        let cap = match input {
            Input::Letter(ch) => KeyCap::Letter(ch.to_ascii_lowercase()),
            Input::Backspace => KeyCap::Backspace,
            Input::Enter => KeyCap::Enter,
        };
        self.pressed = Some((cap, now + self.key_pulse));

        let effects = self.session.handle(input);
        self.apply(effects, now);
    }

    /// Fire due timers, expire the key highlight and read the relay
    pub fn tick(&mut self, now: Instant) {
        let events = self.relay.as_mut().map(RelayClient::poll).unwrap_or_default();
        for event in events {
            match event {
                RelayEvent::PeerStarted => self.peer_started = true,
                RelayEvent::PeerConnected => {}
            }
        }

        for ticket in self.timers.take_due(now) {
            let effects = self.session.unlock(ticket);
            self.apply(effects, now);
        }

        if self.pressed.is_some_and(|(_, until)| until <= now) {
            self.pressed = None;
        }
    }

    /// When the loop next has work to do without input
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Instant> {
        let pulse_end = self.pressed.map(|(_, until)| until);
        match (self.timers.next_deadline(), pulse_end) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Map a terminal key press to a game action
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.new_game(now),
            KeyCode::Esc => self.should_quit = true,
            // Enter on a finished game plays again
            KeyCode::Enter if self.session.is_over() => self.new_game(now),
            KeyCode::Enter => self.press(Input::Enter, now),
            KeyCode::Backspace => self.press(Input::Backspace, now),
            KeyCode::Char(c) if !ctrl && !alt => self.press(Input::Letter(c), now),
            _ => self.play(SoundCue::Error),
        }
    }

    fn apply(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match &effect {
                Effect::ScheduleUnlock { ticket, after } => {
                    self.timers.schedule(*ticket, *after, now);
                }
                Effect::Sound(cue) => self.player.play(*cue),
                _ => {}
            }
            self.view.apply(&effect);
        }
    }

    fn play(&mut self, cue: SoundCue) {
        self.player.play(cue);
        self.view.apply(&Effect::Sound(cue));
    }

    fn announce_start(&mut self) {
        if let Some(relay) = self.relay.as_mut() {
            relay.notify();
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("tui exited with error: {err:#}");
    }
    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        let now = Instant::now();
        let timeout = app
            .next_wakeup()
            .map_or(IDLE_POLL, |at| at.saturating_duration_since(now))
            .min(IDLE_POLL);

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            // Only process key press events (fixes Windows double-input bug)
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
