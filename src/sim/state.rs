//! Screen state and simulation entities
//!
//! `Screen` is a tagged union: each variant carries the entity set that only
//! that screen may mutate, so entities of inactive screens cannot exist.
//! Scalars shared across screens live in `SessionData`.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::layout;
use super::motion::{GameMode, IconShape, Motion};
use super::pattern::seed_particles;
use crate::coach::{CoachSlot, TipRequest};
use crate::consts::*;

/// Drawing surface size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Bubble fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleColor {
    Light,
    Deep,
}

/// A start-screen bubble popped by the sponge
#[derive(Debug, Clone)]
pub struct Bubble {
    pub origin: Vec2,
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
    /// Radians per millisecond
    pub wobble_speed: f32,
    pub wobble_range: f32,
    pub wobble_phase: f32,
    pub color: BubbleColor,
}

impl Bubble {
    /// A bubble at a random spot of `viewport`
    pub fn random<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let origin = Vec2::new(
            rng.random::<f32>() * viewport.width,
            rng.random::<f32>() * viewport.height,
        );
        Self {
            origin,
            pos: origin,
            radius: rng.random_range(25.0..60.0),
            active: true,
            wobble_speed: rng.random_range(0.001..0.003),
            wobble_range: rng.random_range(5.0..15.0),
            wobble_phase: rng.random::<f32>() * TAU,
            color: if rng.random_bool(0.5) {
                BubbleColor::Light
            } else {
                BubbleColor::Deep
            },
        }
    }

    /// Wobbled position at wall-clock time `now_ms`
    pub fn position_at(&self, now_ms: f64) -> Vec2 {
        // Keep the phase argument small before narrowing to f32
        let turns = now_ms * self.wobble_speed as f64 + self.wobble_phase as f64;
        let angle = turns.rem_euclid(std::f64::consts::TAU) as f32;
        self.origin + Vec2::new(angle.sin(), angle.cos()) * self.wobble_range
    }
}

/// A main-game dirt particle. Cleaned once its radius reaches zero.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
}

impl Particle {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            active: true,
        }
    }

    /// Shrink under the sponge at `cursor`. Returns true if touched.
    pub fn scrub(&mut self, cursor: Vec2) -> bool {
        if !self.active || cursor.distance(self.pos) >= SPONGE_RADIUS + self.radius {
            return false;
        }
        self.radius -= PARTICLE_SHRINK;
        if self.radius <= 0.0 {
            self.radius = 0.0;
            self.active = false;
        }
        true
    }
}

/// A scrub-to-select circular button carrying what it selects
#[derive(Debug, Clone)]
pub struct MenuButton<P> {
    pub pos: Vec2,
    pub radius: f32,
    pub label: &'static str,
    pub icon: IconShape,
    pub icon_color: &'static str,
    pub payload: P,
    /// Scrub progress, 0..=100
    pub progress: f32,
    pub completed: bool,
}

/// Tolerance for accumulated per-frame float steps reaching 100
const PROGRESS_EPSILON: f32 = 1e-3;

/// Whether an accumulated scrub progress counts as full.
///
/// 125 steps of 0.8 land just short of 100 in `f32`.
#[inline]
fn progress_full(progress: f32) -> bool {
    progress >= PROGRESS_FULL - PROGRESS_EPSILON
}

impl<P> MenuButton<P> {
    /// Advance scrub progress for one frame.
    ///
    /// Returns true on the single frame the button completes.
    pub fn scrub(&mut self, pointer_pos: Vec2, pointer_speed: f32) -> bool {
        if pointer_pos.distance(self.pos) < self.radius && pointer_speed > MOVING_SPEED {
            self.progress += SCRUB_SENSITIVITY;
        } else {
            self.progress = (self.progress - SCRUB_DECAY).max(0.0);
        }

        if progress_full(self.progress) && !self.completed {
            self.completed = true;
            return true;
        }
        false
    }
}

/// Plain screen tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Start,
    Menu,
    ModeSelect,
    Warmup,
    Game,
    Results,
}

/// Active screen and the entities it owns
#[derive(Debug, Clone)]
pub enum Screen {
    Start { bubbles: Vec<Bubble> },
    Menu { buttons: Vec<MenuButton<Motion>> },
    ModeSelect { buttons: Vec<MenuButton<GameMode>> },
    Warmup,
    Game { particles: Vec<Particle> },
    Results,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Start { .. } => ScreenKind::Start,
            Screen::Menu { .. } => ScreenKind::Menu,
            Screen::ModeSelect { .. } => ScreenKind::ModeSelect,
            Screen::Warmup => ScreenKind::Warmup,
            Screen::Game { .. } => ScreenKind::Game,
            Screen::Results => ScreenKind::Results,
        }
    }

    /// Motion buttons while on MENU
    pub fn motion_buttons(&self) -> &[MenuButton<Motion>] {
        match self {
            Screen::Menu { buttons } => buttons,
            _ => &[],
        }
    }

    /// Mode buttons while on MODE_SELECT
    pub fn mode_buttons(&self) -> &[MenuButton<GameMode>] {
        match self {
            Screen::ModeSelect { buttons } => buttons,
            _ => &[],
        }
    }
}

/// Warm-up travel direction along the track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmupDir {
    /// Heading for the bottom end
    Outbound,
    /// Heading for the top end
    Inbound,
}

/// Session result snapshotted on the GAME -> RESULTS transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameResult {
    pub success: bool,
    pub score: f32,
    pub motion: Motion,
    pub mode: GameMode,
}

/// Scalars shared across screens
#[derive(Debug, Clone)]
pub struct SessionData {
    // START owns these
    /// Downward slide of the title while leaving START
    pub start_anim_y: f32,
    /// When the last bubble popped (exit timer armed)
    pub exit_start_ms: Option<f64>,
    pub animating_out: bool,

    // WARMUP owns these (reset by MODE_SELECT on completion)
    pub warmup_count: u32,
    pub warmup_dir: WarmupDir,

    // GAME owns these (reset on GAME entry)
    /// Speed mode countdown in seconds
    pub timer: f32,
    /// Percent cleaned (speed) or shine (endurance), 0..=100
    pub score: f32,
    /// Last significant movement seen during GAME
    pub last_move_ms: f64,

    // RESULTS owns this
    pub return_progress: f32,

    /// Cosmetic clock for the rotating guide ring, advanced every frame
    pub guide_rotation: f32,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            start_anim_y: 0.0,
            exit_start_ms: None,
            animating_out: false,
            warmup_count: 0,
            warmup_dir: WarmupDir::Outbound,
            timer: 0.0,
            score: 0.0,
            last_move_ms: 0.0,
            return_progress: 0.0,
            guide_rotation: 0.0,
        }
    }
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScreenChanged { from: ScreenKind, to: ScreenKind },
    /// Fire one coach feedback request
    CoachRequested(TipRequest),
}

/// Requested screen change, produced by a screen's update step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    ToMenu,
    ToModeSelect(Motion),
    ToWarmup(GameMode),
    ToGame,
    ToResults { success: bool },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    rng: Pcg32,
    pub viewport: Viewport,
    pub screen: Screen,
    pub session: SessionData,
    /// Motion picked on MENU
    pub motion: Option<Motion>,
    /// Mode picked on MODE_SELECT
    pub mode: Option<GameMode>,
    pub result: Option<GameResult>,
    pub coach: CoachSlot,
    /// Wall-clock time of the latest tick
    pub clock_ms: f64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the START screen
    pub fn new(seed: u64, viewport: Viewport, now_ms: f64) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            screen: Screen::Start {
                bubbles: Vec::new(),
            },
            session: SessionData::default(),
            motion: None,
            mode: None,
            result: None,
            coach: CoachSlot::default(),
            clock_ms: now_ms,
            events: Vec::new(),
        };
        state.enter_start();
        state
    }

    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    /// Take pending host notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a viewport change. Menu layouts are rebuilt immediately.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        log::info!(
            "Viewport {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        match &mut self.screen {
            Screen::Menu { buttons } => *buttons = layout::menu_buttons(viewport),
            Screen::ModeSelect { buttons } => *buttons = layout::mode_buttons(viewport),
            _ => {}
        }
    }

    /// Switch screens, running the entry actions of the target
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::ToMenu => self.enter_menu(),
            Transition::ToModeSelect(motion) => {
                self.motion = Some(motion);
                self.enter_mode_select();
            }
            Transition::ToWarmup(mode) => {
                self.mode = Some(mode);
                self.enter_warmup();
            }
            Transition::ToGame => match (self.motion, self.mode) {
                (Some(motion), Some(mode)) => self.enter_game(motion, mode),
                _ => {
                    log::error!("Warm-up finished without a motion and mode, back to menu");
                    self.enter_menu();
                }
            },
            Transition::ToResults { success } => self.enter_results(success),
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        let from = self.screen.kind();
        let to = screen.kind();
        if from == ScreenKind::Results && to != ScreenKind::Results {
            self.coach.abandon();
        }
        self.screen = screen;
        log::info!("Screen {:?} -> {:?}", from, to);
        self.events.push(GameEvent::ScreenChanged { from, to });
    }

    fn enter_start(&mut self) {
        let viewport = self.viewport;
        let bubbles = (0..START_BUBBLE_COUNT)
            .map(|_| Bubble::random(viewport, &mut self.rng))
            .collect();
        self.session.exit_start_ms = None;
        self.session.animating_out = false;
        self.session.start_anim_y = 0.0;
        // Initial entry has no previous screen to announce
        self.screen = Screen::Start { bubbles };
    }

    fn enter_menu(&mut self) {
        self.session.return_progress = 0.0;
        self.set_screen(Screen::Menu {
            buttons: layout::menu_buttons(self.viewport),
        });
    }

    fn enter_mode_select(&mut self) {
        self.set_screen(Screen::ModeSelect {
            buttons: layout::mode_buttons(self.viewport),
        });
    }

    fn enter_warmup(&mut self) {
        self.session.warmup_count = 0;
        self.session.warmup_dir = WarmupDir::Outbound;
        self.set_screen(Screen::Warmup);
    }

    fn enter_game(&mut self, motion: Motion, mode: GameMode) {
        let particles = seed_particles(motion.pattern, self.viewport, PARTICLE_COUNT, &mut self.rng);
        self.session.timer = match mode {
            GameMode::Speed => SPEED_MODE_SECONDS,
            GameMode::Endurance => 0.0,
        };
        self.session.score = 0.0;
        self.session.last_move_ms = self.clock_ms;
        log::info!(
            "Game start: {} / {} with {} particles",
            motion.flat_label(),
            mode.as_str(),
            particles.len()
        );
        self.set_screen(Screen::Game { particles });
    }

    fn enter_results(&mut self, success: bool) {
        let (Some(motion), Some(mode)) = (self.motion, self.mode) else {
            log::error!("Results reached without a motion and mode, back to menu");
            self.enter_menu();
            return;
        };
        let result = GameResult {
            success,
            score: self.session.score,
            motion,
            mode,
        };
        self.result = Some(result);
        self.session.return_progress = 0.0;
        self.set_screen(Screen::Results);

        let session = self.coach.begin();
        log::info!(
            "Results: success={} score={:.1} (coach session {})",
            success,
            result.score,
            session
        );
        self.events.push(GameEvent::CoachRequested(TipRequest::new(
            session,
            &motion,
            mode,
            success,
            result.score,
        )));
    }

    /// Hand a finished coach request back. Stale sessions are ignored.
    pub fn deliver_tip(&mut self, session: u64, text: String) -> bool {
        if self.kind() != ScreenKind::Results {
            log::warn!("Coach tip for session {} arrived after leaving results", session);
            return false;
        }
        self.coach.deliver(session, text)
    }
}
