//! Scene flow: menu, play session, result screen.
//!
//! ```text
//! Menu { cursor } --Select/Pick--> Playing(session) --ends--> Result --Select/Back--> Menu
//!                                      |   ^                    |
//!                                      |   +----Restart---------+
//!                                      +--Back--> Menu
//! ```
//!
//! Every new session gets a fresh board whose factory is seeded from the
//! game seed and a monotonic episode id, so a run is reproducible from the
//! seed alone.

use log::info;

use crate::core::{Board, BoardConfig, BoardError, RandomPieceFactory};
use crate::session::ModeSession;
use crate::types::{GameMode, MenuAction, Outcome, PointerSample};

/// Summary shown on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub mode: GameMode,
    pub outcome: Outcome,
    pub score: u32,
    pub best: u32,
    pub new_best: bool,
}

#[derive(Debug)]
pub enum Scene {
    Menu { cursor: usize },
    Playing(Box<ModeSession>),
    Result(SessionResult),
}

enum Transition {
    Start(GameMode),
    Menu,
}

#[derive(Debug)]
pub struct Game {
    config: BoardConfig,
    seed: u32,
    /// Monotonic episode id (increments on every session start).
    episode_id: u32,
    best: u32,
    scene: Scene,
}

impl Game {
    /// Start at the main menu. The board config is validated up front.
    pub fn new(config: BoardConfig, seed: u32) -> Result<Self, BoardError> {
        config.validate()?;
        Ok(Self {
            config,
            seed,
            episode_id: 0,
            best: 0,
            scene: Scene::Menu { cursor: 0 },
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn session(&self) -> Option<&ModeSession> {
        match &self.scene {
            Scene::Playing(session) => Some(&**session),
            _ => None,
        }
    }

    pub fn best_score(&self) -> u32 {
        self.best
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Apply a menu action to the current scene.
    ///
    /// Returns whether the scene changed in a way the view should redraw.
    pub fn apply_action(&mut self, action: MenuAction) -> Result<bool, BoardError> {
        let transition = match (&mut self.scene, action) {
            (Scene::Menu { cursor }, MenuAction::Up) => {
                *cursor = (*cursor + GameMode::ALL.len() - 1) % GameMode::ALL.len();
                return Ok(true);
            }
            (Scene::Menu { cursor }, MenuAction::Down) => {
                *cursor = (*cursor + 1) % GameMode::ALL.len();
                return Ok(true);
            }
            (Scene::Menu { cursor }, MenuAction::Select) => Transition::Start(GameMode::ALL[*cursor]),
            (Scene::Menu { .. } | Scene::Result(_), MenuAction::Pick(mode)) => Transition::Start(mode),
            (Scene::Playing(session), MenuAction::Restart) => Transition::Start(session.mode()),
            (Scene::Result(result), MenuAction::Restart) => Transition::Start(result.mode),
            (Scene::Playing(_), MenuAction::Back)
            | (Scene::Result(_), MenuAction::Back | MenuAction::Select) => Transition::Menu,
            _ => return Ok(false),
        };

        match transition {
            Transition::Start(mode) => self.start(mode)?,
            Transition::Menu => self.to_menu(),
        }
        Ok(true)
    }

    /// Advance the active session one frame.
    ///
    /// Returns `true` when the session ended this frame and the game moved
    /// to the result scene.
    pub fn tick(&mut self, pointer: PointerSample, elapsed_ms: u32) -> bool {
        let Scene::Playing(session) = &mut self.scene else {
            return false;
        };
        let Some(outcome) = session.update(pointer, elapsed_ms) else {
            return false;
        };

        let score = session.score();
        let mode = session.mode();
        let new_best = score > self.best;
        if new_best {
            self.best = score;
            info!("new best score {}", score);
        }
        self.scene = Scene::Result(SessionResult {
            mode,
            outcome,
            score,
            best: self.best,
            new_best,
        });
        true
    }

    fn start(&mut self, mode: GameMode) -> Result<(), BoardError> {
        self.episode_id = self.episode_id.wrapping_add(1);
        let seed = self.seed.wrapping_add(self.episode_id.wrapping_mul(0x9E37_79B9));
        let board = Board::new(self.config.clone(), RandomPieceFactory::new(seed))?;
        info!("episode {} mode={} seed={}", self.episode_id, mode.as_str(), seed);
        self.scene = Scene::Playing(Box::new(ModeSession::new(mode, board)));
        Ok(())
    }

    fn to_menu(&mut self) {
        let cursor = match &self.scene {
            Scene::Playing(session) => mode_index(session.mode()),
            Scene::Result(result) => mode_index(result.mode),
            Scene::Menu { cursor } => *cursor,
        };
        self.scene = Scene::Menu { cursor };
    }
}

fn mode_index(mode: GameMode) -> usize {
    GameMode::ALL.iter().position(|&m| m == mode).unwrap_or(0)
}
