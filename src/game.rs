use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use crate::body::Body;
use crate::config::{HighScorePolicy, Rules};
use crate::coord::{Coord, Intents, Orientation, OrientationBuffer};

/// Ticks between two blinks of the menu prompt.
pub const PROMPT_BLINK_TICKS: u32 = 30;

/// Random draws tried before the apple falls back to scanning for a free tile.
const TARGET_SAMPLE_ATTEMPTS: usize = 64;

const START_ORIENTATION: Orientation = Orientation::East;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    /// The snake crashed and is flashing in place.
    Collided,
    /// The snake is being taken apart head first.
    Dismantling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Grew,
    Collided,
}

/// Read-only view of everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub body: Vec<Coord>,
    pub target: Option<Coord>,
    pub phase: Phase,
    pub visible: bool,
    pub prompt_visible: bool,
    pub score: u32,
    pub high_score: u32,
    pub orientation: Orientation,
}

pub struct Game<R = StdRng> {
    rules: Rules,
    rng: R,
    body: Body,
    target: Option<Coord>,
    orientation: OrientationBuffer,
    phase: Phase,
    frame_counter: u32,
    flashes_remaining: u32,
    visible: bool,
    prompt_visible: bool,
    score: u32,
    high_score: u32,
}

impl Game<StdRng> {
    pub fn new(rules: Rules, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Game::with_rng(rules, rng)
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(rules: Rules, rng: R) -> Self {
        let mut game = Game {
            rules,
            rng,
            body: Body::new(),
            target: None,
            orientation: OrientationBuffer::new(START_ORIENTATION),
            phase: Phase::Menu,
            frame_counter: 0,
            flashes_remaining: rules.total_flashes(),
            visible: true,
            prompt_visible: true,
            score: 0,
            high_score: 0,
        };
        game.setup_run();
        game
    }

    /// Runs one tick of the game.
    pub fn advance(&mut self, intents: Intents, start_requested: bool) {
        match self.phase {
            Phase::Menu => self.tick_menu(start_requested),
            Phase::Playing => self.tick_playing(intents),
            Phase::Collided => self.tick_collided(),
            Phase::Dismantling => self.tick_dismantling(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.rules.width,
            height: self.rules.height,
            body: self.body.iter().collect(),
            target: self.target,
            phase: self.phase,
            visible: self.visible,
            prompt_visible: self.prompt_visible,
            score: self.score,
            high_score: self.high_score,
            orientation: self.orientation.committed(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn target(&self) -> Option<Coord> {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation.committed()
    }

    fn tick_menu(&mut self, start_requested: bool) {
        if start_requested {
            info!("run started at {:?}", self.body.front());
            self.visible = true;
            self.enter(Phase::Playing);
            return;
        }
        self.frame_counter += 1;
        if self.frame_counter % PROMPT_BLINK_TICKS == 0 {
            self.prompt_visible = !self.prompt_visible;
        }
    }

    fn tick_playing(&mut self, intents: Intents) {
        self.frame_counter += 1;
        self.orientation.handle_input(intents);
        if self.frame_counter < self.rules.move_every {
            return;
        }
        self.frame_counter = 0;
        if self.move_body() == MoveOutcome::Collided {
            info!(
                "collided heading {} with {} segments",
                self.orientation.committed(),
                self.body.len()
            );
            self.enter(Phase::Collided);
        }
    }

    fn tick_collided(&mut self) {
        self.frame_counter += 1;
        if self.frame_counter % self.rules.flash_freq == 0 {
            self.flashes_remaining = self.flashes_remaining.saturating_sub(1);
            self.visible = !self.visible;
        }
        if self.flashes_remaining == 0 {
            self.visible = true;
            self.enter(Phase::Dismantling);
        }
    }

    fn tick_dismantling(&mut self) {
        self.frame_counter += 1;
        if self.frame_counter % self.rules.flash_freq == 0 {
            if self.visible {
                self.visible = false;
                self.body.pop_front();
            } else {
                self.visible = true;
            }
        }
        if self.body.is_empty() {
            self.finish_run();
        }
    }

    /// Moves the snake one tile along the queued heading.
    ///
    /// The apple counts as eaten when the candidate head lands on it, or when
    /// the current head already sits on it (a fresh run places the apple under
    /// the head, so the first move grows the snake). A colliding move leaves
    /// the body and score untouched.
    pub fn move_body(&mut self) -> MoveOutcome {
        let Some(head) = self.body.front() else {
            return MoveOutcome::Collided;
        };
        let heading = self.orientation.commit();
        let next = head.step(heading);

        if self.collides(next) {
            return MoveOutcome::Collided;
        }

        let consumed = self.target.map_or(false, |target| target == head || target == next);
        self.body.push_front(next);
        if !consumed {
            self.body.pop_back();
            return MoveOutcome::Moved;
        }

        self.score += 1;
        self.target = self.draw_valid_target();
        debug!(
            "ate apple, score {} length {} next apple {:?}",
            self.score,
            self.body.len(),
            self.target
        );
        MoveOutcome::Grew
    }

    /// True if `coord` is off the board or on any segment but the head.
    pub fn collides(&self, coord: Coord) -> bool {
        if !self.in_bounds(coord) {
            return true;
        }
        let mut cursor = self.body.cursor();
        // Step onto the head so the loop below starts at the neck.
        cursor.advance();
        while cursor.advance() {
            if cursor.get() == Some(coord) {
                return true;
            }
        }
        false
    }

    /// Picks a random tile the body doesn't cover, or `None` if it covers
    /// every tile.
    pub fn draw_valid_target(&mut self) -> Option<Coord> {
        for _ in 0..TARGET_SAMPLE_ATTEMPTS {
            let candidate = self.random_cell();
            if !self.body.member(candidate) {
                return Some(candidate);
            }
        }

        let (width, height) = (self.rules.width, self.rules.height);
        let body = &self.body;
        let free = (0..height)
            .flat_map(|y| (0..width).map(move |x| Coord::new(x, y)))
            .filter(|cell| !body.member(*cell))
            .choose(&mut self.rng);
        match free {
            Some(cell) => warn!(
                "no free tile after {} draws, picked {} by scanning",
                TARGET_SAMPLE_ATTEMPTS, cell
            ),
            None => warn!("board is full, no apple placed"),
        }
        free
    }

    fn in_bounds(&self, coord: Coord) -> bool {
        (0..self.rules.width).contains(&coord.x) && (0..self.rules.height).contains(&coord.y)
    }

    fn random_cell(&mut self) -> Coord {
        Coord::new(
            self.rng.gen_range(0..self.rules.width),
            self.rng.gen_range(0..self.rules.height),
        )
    }

    fn enter(&mut self, phase: Phase) {
        debug!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.frame_counter = 0;
    }

    fn finish_run(&mut self) {
        self.high_score = match self.rules.high_score {
            HighScorePolicy::LastRun => self.score,
            HighScorePolicy::Best => self.high_score.max(self.score),
        };
        info!("run over, score {} high score {}", self.score, self.high_score);
        self.score = 0;
        self.setup_run();
        self.enter(Phase::Menu);
    }

    /// Fresh single-segment snake with the apple under its head.
    fn setup_run(&mut self) {
        let spawn = self.random_cell();
        self.body = Body::spawn(spawn);
        self.target = Some(spawn);
        self.orientation = OrientationBuffer::new(START_ORIENTATION);
        self.flashes_remaining = self.rules.total_flashes();
        self.visible = true;
        self.prompt_visible = true;
    }
}
