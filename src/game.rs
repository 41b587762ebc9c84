//! Core simulation: the session state machine, physics, spawning, scoring
//! and collision. No rendering, audio, clock or storage lives here; the host
//! drives it through `on_frame` / `on_second` / `on_spawn_due` and the input
//! transitions, and reacts to the returned [`GameEvent`]s.

use std::collections::VecDeque;

use rand::Rng;

// Logical board the simulation runs in. Rendering scales this into
// whatever terminal area is available.
pub const BOARD_WIDTH: f32 = 800.0;
pub const BOARD_HEIGHT: f32 = 800.0;

pub const SHIP_WIDTH: f32 = 74.0;
pub const SHIP_HEIGHT: f32 = 64.0;
pub const SHIP_X: f32 = BOARD_WIDTH / 8.0;
pub const SHIP_START_Y: f32 = BOARD_HEIGHT / 2.0 - SHIP_HEIGHT / 2.0;

pub const OBSTACLE_WIDTH: f32 = 64.0;
pub const OBSTACLE_HEIGHT: f32 = 512.0;
/// Vertical gap the ship has to fit through, between the two ends of a pair.
pub const OPENING_SPACE: f32 = BOARD_HEIGHT / 6.0 + 10.0;

// Per-frame tuning at the nominal ~60 fps tick.
pub const GRAVITY: f32 = 0.3;
pub const THRUST_VELOCITY: f32 = -6.0;
pub const SCROLL_VELOCITY: f32 = -4.0;

pub const ROUND_SECONDS: u32 = 60;
pub const SPAWN_INTERVAL_MS: u64 = 2000;
pub const PASS_SCORE: f32 = 0.5;

/// Which phase the session is in. Exactly one holds at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start menu shown, simulation idle.
    Menu,
    /// Live play.
    Running,
    /// Session ended (collision, fell off, or time up); final score shown
    /// until the player confirms back to the menu.
    Over,
}

/// Side effects the host must perform. The core never plays audio, arms
/// timers or touches storage itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Menu -> Running. The host arms the spawn and countdown timers.
    SessionStarted,
    /// One obstacle cleared (score cue).
    ObstaclePassed,
    /// Running -> Over. The host cancels timers, plays the end cue and
    /// evaluates best-score persistence.
    SessionEnded,
}

/// Axis-aligned box used for all collision tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

pub fn boxes_overlap(a: &Hitbox, b: &Hitbox) -> bool {
    a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

#[derive(Debug, Clone)]
pub struct Ship {
    /// Constant after init.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Ship {
    fn new() -> Self {
        Self {
            x: SHIP_X,
            y: SHIP_START_Y,
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Which end of a spawn pair an obstacle is (selects the sprite).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairEnd {
    Top,
    Bottom,
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f32,
    /// Fixed at spawn.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub end: PairEnd,
    /// Scoring already credited for this obstacle.
    pub passed: bool,
}

impl Obstacle {
    pub fn new(y: f32, end: PairEnd) -> Self {
        Self {
            x: BOARD_WIDTH,
            y,
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_HEIGHT,
            end,
            passed: false,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// All mutable state of one play-through, plus the menu/over bookkeeping
/// around it. The obstacle deque stays ordered by spawn time: the front is
/// always the oldest, so pruning stops at the first survivor.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub ship: Ship,
    pub velocity_y: f32,
    pub obstacles: VecDeque<Obstacle>,
    pub score: f32,
    pub time_left: u32,
    pub phase: Phase,
    pub time_up: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            ship: Ship::new(),
            velocity_y: 0.0,
            obstacles: VecDeque::new(),
            score: 0.0,
            time_left: ROUND_SECONDS,
            phase: Phase::Menu,
            time_up: false,
        }
    }

    /// Session score as it is persisted and shown on the final screen.
    pub fn score_floor(&self) -> u32 {
        self.score.floor() as u32
    }

    /// Thrust key. In the menu this is also the start trigger; once the
    /// session is over, input is ignored until `reset`.
    pub fn thrust(&mut self) -> Option<GameEvent> {
        match self.phase {
            Phase::Menu => {
                self.velocity_y = THRUST_VELOCITY;
                self.phase = Phase::Running;
                Some(GameEvent::SessionStarted)
            }
            Phase::Running => {
                // Override, not additive.
                self.velocity_y = THRUST_VELOCITY;
                None
            }
            Phase::Over => None,
        }
    }

    /// Back to the menu with a fresh session. Only meaningful from Over,
    /// but total from any phase.
    pub fn reset(&mut self) {
        self.ship = Ship::new();
        self.velocity_y = 0.0;
        self.obstacles.clear();
        self.score = 0.0;
        self.time_left = ROUND_SECONDS;
        self.time_up = false;
        self.phase = Phase::Menu;
    }

    /// One simulation frame. Order is part of the observable contract:
    /// ship physics, then per-obstacle advance/score/collision in spawn
    /// order, then front pruning. A collision ends the session immediately
    /// and leaves later obstacles unadvanced this frame.
    pub fn on_frame(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }

        self.velocity_y += GRAVITY;
        // The clamp only guards the top edge; falling out the bottom ends
        // the session below.
        self.ship.y = (self.ship.y + self.velocity_y).max(0.0);

        if self.ship.y > BOARD_HEIGHT {
            self.phase = Phase::Over;
            events.push(GameEvent::SessionEnded);
            return events;
        }

        let ship_box = self.ship.hitbox();
        let mut collided = false;
        for obstacle in self.obstacles.iter_mut() {
            obstacle.x += SCROLL_VELOCITY;

            if !obstacle.passed && self.ship.x > obstacle.x + obstacle.width {
                obstacle.passed = true;
                self.score += PASS_SCORE;
                events.push(GameEvent::ObstaclePassed);
            }

            if boxes_overlap(&ship_box, &obstacle.hitbox()) {
                collided = true;
                break;
            }
        }
        if collided {
            self.phase = Phase::Over;
            events.push(GameEvent::SessionEnded);
            return events;
        }

        while self
            .obstacles
            .front()
            .is_some_and(|o| o.x < -OBSTACLE_WIDTH)
        {
            self.obstacles.pop_front();
        }

        events
    }

    /// Spawn-interval timer fired: push one top/bottom pair just off the
    /// right edge. Each end carries its own `passed` flag.
    pub fn on_spawn_due<R: Rng>(&mut self, rng: &mut R) {
        if self.phase != Phase::Running {
            return;
        }
        let top_y = -OBSTACLE_HEIGHT / 5.0 - rng.gen_range(0.0..OBSTACLE_HEIGHT / 2.0);
        let bottom_y = top_y + OBSTACLE_HEIGHT + OPENING_SPACE;
        self.obstacles.push_back(Obstacle::new(top_y, PairEnd::Top));
        self.obstacles.push_back(Obstacle::new(bottom_y, PairEnd::Bottom));
    }

    /// Countdown timer fired: one second elapsed. Reaching zero ends the
    /// session with the time-up flag set.
    pub fn on_second(&mut self) -> Option<GameEvent> {
        if self.phase != Phase::Running {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.time_up = true;
            self.phase = Phase::Over;
            return Some(GameEvent::SessionEnded);
        }
        None
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
