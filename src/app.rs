//! Host wiring around the core session: wall-clock timer ports, key
//! routing, audio dispatch and profile persistence.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::audio::Audio;
use crate::game::{GameEvent, GameSession, Phase, SPAWN_INTERVAL_MS};
use crate::profile::{Profile, NAME_LEN};

const DEFAULT_NAME: &str = "PLAYER";

pub struct App {
    pub should_quit: bool,
    pub session: GameSession,
    pub profile: Profile,
    audio: Option<Audio>,
    // Wall-clock deadlines for the two session timers. Armed on
    // SessionStarted, cleared on SessionEnded so no stale firing survives
    // the end of a session.
    next_spawn: Option<Instant>,
    next_second: Option<Instant>,
    // One-time name prompt state
    pub entering_name: bool,
    pub name_buffer: String,
}

impl App {
    /// Loads the profile and opens the audio device before the first frame
    /// is drawn; either failing degrades (zero best / silent play) rather
    /// than blocking the game.
    pub fn new() -> Self {
        let profile = Profile::load();
        let entering_name = profile.name().is_empty();
        Self {
            should_quit: false,
            session: GameSession::new(),
            profile,
            audio: Audio::new(),
            next_spawn: None,
            next_second: None,
            entering_name,
            name_buffer: String::new(),
        }
    }

    pub fn on_tick(&mut self) {
        // The game waits while the name prompt is up
        if self.entering_name {
            return;
        }

        for event in self.session.on_frame() {
            self.apply(event);
        }

        let now = Instant::now();
        if let Some(due) = self.next_spawn {
            if now >= due && self.session.phase == Phase::Running {
                self.session.on_spawn_due(&mut rand::thread_rng());
                self.next_spawn = Some(due + Duration::from_millis(SPAWN_INTERVAL_MS));
            }
        }
        if let Some(due) = self.next_second {
            if now >= due && self.session.phase == Phase::Running {
                if let Some(event) = self.session.on_second() {
                    self.apply(event);
                }
                self.next_second = Some(due + Duration::from_secs(1));
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.entering_name {
            self.handle_name_input(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if self.session.phase == Phase::Menu {
                    self.should_quit = true;
                }
            }
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => {
                if self.session.phase == Phase::Over {
                    self.session.reset();
                } else if let Some(event) = self.session.thrust() {
                    self.apply(event);
                }
            }
            KeyCode::Enter => {
                if self.session.phase == Phase::Over {
                    self.session.reset();
                }
            }
            _ => {}
        }
    }

    fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::SessionStarted => {
                let now = Instant::now();
                self.next_spawn = Some(now + Duration::from_millis(SPAWN_INTERVAL_MS));
                self.next_second = Some(now + Duration::from_secs(1));
            }
            GameEvent::ObstaclePassed => {
                if let Some(audio) = &self.audio {
                    audio.play_score();
                }
            }
            GameEvent::SessionEnded => {
                self.next_spawn = None;
                self.next_second = None;
                if let Some(audio) = &self.audio {
                    audio.play_die();
                }
                self.profile.record_best(self.session.score_floor());
            }
        }
    }

    fn handle_name_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let name = if self.name_buffer.is_empty() {
                    DEFAULT_NAME.to_string()
                } else {
                    self.name_buffer.clone()
                };
                self.profile.set_name(&name);
                self.entering_name = false;
                self.name_buffer.clear();
            }
            KeyCode::Backspace => {
                self.name_buffer.pop();
            }
            KeyCode::Esc => {
                // Skip: take the default name
                self.profile.set_name(DEFAULT_NAME);
                self.entering_name = false;
                self.name_buffer.clear();
            }
            KeyCode::Char(c) => {
                if self.name_buffer.chars().count() < NAME_LEN && c.is_ascii_graphic() {
                    self.name_buffer.push(c.to_ascii_uppercase());
                }
            }
            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
