//! Per-frame simulation step
//!
//! `tick` runs exactly one screen's update, then applies the transition it
//! asked for (if any). Every update step is a free function over the data its
//! screen owns, so screens can be exercised on their own.
//!
//! The step is frame-coupled: counters advance by fixed amounts per call,
//! assuming one call per display refresh.

use glam::Vec2;

use super::pointer::PointerState;
use super::state::{
    Bubble, GameState, MenuButton, Particle, Screen, SessionData, Transition, Viewport, WarmupDir,
};
use super::motion::GameMode;
use crate::consts::*;
use crate::distance;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Wall-clock time of this frame in milliseconds
    pub now_ms: f64,
    /// Pointer sample for this frame
    pub pointer: PointerState,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.clock_ms = input.now_ms;
    state.session.guide_rotation += GUIDE_ROTATION_STEP;

    let viewport = state.viewport;
    let transition = match &mut state.screen {
        Screen::Start { bubbles } => update_start(bubbles, &mut state.session, viewport, input),
        Screen::Menu { buttons } => {
            update_buttons(buttons, &input.pointer).map(Transition::ToModeSelect)
        }
        Screen::ModeSelect { buttons } => {
            update_buttons(buttons, &input.pointer).map(Transition::ToWarmup)
        }
        Screen::Warmup => update_warmup(&mut state.session, viewport, &input.pointer),
        Screen::Game { particles } => match state.mode {
            Some(mode) => update_game(particles, &mut state.session, mode, input),
            None => {
                log::error!("Game screen without a mode, back to menu");
                Some(Transition::ToMenu)
            }
        },
        Screen::Results => update_results(&mut state.session, viewport, &input.pointer),
    };

    if let Some(transition) = transition {
        state.apply(transition);
    }
}

/// START: wobble and pop bubbles, then slide the title out.
///
/// Owns `start_anim_y`, `exit_start_ms` and `animating_out`.
pub fn update_start(
    bubbles: &mut [Bubble],
    session: &mut SessionData,
    viewport: Viewport,
    input: &TickInput,
) -> Option<Transition> {
    let cursor = input.pointer.pos;
    for bubble in bubbles.iter_mut().filter(|b| b.active) {
        bubble.pos = bubble.position_at(input.now_ms);
        if distance(cursor, bubble.pos) < SPONGE_RADIUS + bubble.radius {
            bubble.active = false;
        }
    }

    if session.exit_start_ms.is_none() && bubbles.iter().all(|b| !b.active) {
        log::info!("All bubbles popped, leaving start screen in {} ms", START_EXIT_DELAY_MS);
        session.exit_start_ms = Some(input.now_ms);
    }

    if let Some(started) = session.exit_start_ms {
        if !session.animating_out && input.now_ms - started >= START_EXIT_DELAY_MS {
            session.animating_out = true;
        }
    }

    if session.animating_out {
        session.start_anim_y += START_SLIDE_PER_FRAME;
        if session.start_anim_y > viewport.height + START_SLIDE_OVERSHOOT {
            return Some(Transition::ToMenu);
        }
    }
    None
}

/// MENU / MODE_SELECT: scrub buttons. Returns the payload of the first
/// button to complete this frame.
pub fn update_buttons<P: Copy>(
    buttons: &mut [MenuButton<P>],
    pointer: &PointerState,
) -> Option<P> {
    for button in buttons.iter_mut() {
        if button.scrub(pointer.pos, pointer.speed) {
            return Some(button.payload);
        }
    }
    None
}

/// Top and bottom ends of the warm-up track
pub fn warmup_track(viewport: Viewport) -> (Vec2, Vec2) {
    let center = viewport.center();
    (
        Vec2::new(center.x, center.y - WARMUP_HALF_TRACK),
        Vec2::new(center.x, center.y + WARMUP_HALF_TRACK),
    )
}

/// WARMUP: alternate between the two end zones.
///
/// Owns `warmup_count` and `warmup_dir`.
pub fn update_warmup(
    session: &mut SessionData,
    viewport: Viewport,
    pointer: &PointerState,
) -> Option<Transition> {
    let (top, bottom) = warmup_track(viewport);
    let p = pointer.pos;
    let on_track = (p.x - top.x).abs() < WARMUP_LATERAL_TOLERANCE;

    match session.warmup_dir {
        WarmupDir::Outbound if on_track && p.y > bottom.y - WARMUP_END_ZONE => {
            session.warmup_dir = WarmupDir::Inbound;
            session.warmup_count += 1;
        }
        WarmupDir::Inbound if on_track && p.y < top.y + WARMUP_END_ZONE => {
            session.warmup_dir = WarmupDir::Outbound;
            session.warmup_count += 1;
        }
        _ => {}
    }

    (session.warmup_count >= WARMUP_REPS).then_some(Transition::ToGame)
}

/// GAME: scrub particles and run the mode's scoring rule.
///
/// Owns `timer`, `score` and `last_move_ms`.
pub fn update_game(
    particles: &mut [Particle],
    session: &mut SessionData,
    mode: GameMode,
    input: &TickInput,
) -> Option<Transition> {
    let pointer = &input.pointer;
    session.last_move_ms = session.last_move_ms.max(pointer.last_move_ms);

    for particle in particles.iter_mut() {
        particle.scrub(pointer.pos);
    }

    match mode {
        GameMode::Speed => {
            let remaining = particles.iter().filter(|p| p.active).count();
            session.score = if particles.is_empty() {
                // Nothing to clean counts as spotless
                PROGRESS_FULL
            } else {
                (particles.len() - remaining) as f32 / particles.len() as f32 * 100.0
            };
            if remaining == 0 {
                return Some(Transition::ToResults { success: true });
            }

            session.timer -= TIMER_STEP;
            if session.timer <= 0.0 {
                session.timer = 0.0;
                return Some(Transition::ToResults { success: false });
            }
        }
        GameMode::Endurance => {
            if input.now_ms - session.last_move_ms > ENDURANCE_IDLE_MS {
                session.score = (session.score - ENDURANCE_DECAY).max(0.0);
            }
            if pointer.is_moving() {
                session.score += ENDURANCE_GAIN;
            }
            if session.score >= PROGRESS_FULL {
                session.score = PROGRESS_FULL;
                return Some(Transition::ToResults { success: true });
            }
        }
    }
    None
}

/// Center of the results screen's return zone
pub fn return_zone_center(viewport: Viewport) -> Vec2 {
    viewport.center() + Vec2::new(0.0, RETURN_ZONE_OFFSET_Y)
}

/// RESULTS: scrub the return zone to go back to the menu.
///
/// Owns `return_progress`.
pub fn update_results(
    session: &mut SessionData,
    viewport: Viewport,
    pointer: &PointerState,
) -> Option<Transition> {
    let d = pointer.pos - return_zone_center(viewport);
    let in_zone = d.x.abs() < RETURN_ZONE_HALF_W && d.y.abs() < RETURN_ZONE_HALF_H;

    if in_zone && pointer.is_moving() {
        session.return_progress += RETURN_GAIN;
        if session.return_progress > PROGRESS_FULL {
            session.return_progress = 0.0;
            return Some(Transition::ToMenu);
        }
    } else {
        session.return_progress = (session.return_progress - RETURN_DECAY).max(0.0);
    }
    None
}
