//! Per-screen scene building
//!
//! `render` reads the game state and the pointer sample and produces a
//! `Frame`. It never mutates simulation data.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat2, Vec2};

use super::frame::{DrawCmd, Font, FontFamily, Frame, Stroke};
use super::icons::draw_icon;
use super::palette::{self, Color};
use crate::consts::*;
use crate::lerp;
use crate::sim::{
    BubbleColor, GameMode, GameState, MenuButton, PointerState, Screen, ScreenKind, WarmupDir,
    return_zone_center, warmup_track,
};

/// Guide ring appears when the pointer is this close to a button's edge
pub const GUIDE_RING_REACH: f32 = 60.0;
/// Guide ring sits this far outside the button
const GUIDE_RING_GAP: f32 = 20.0;
const GUIDE_RING_WIDTH: f32 = 6.0;
const PROGRESS_RING_GAP: f32 = 12.0;
const PROGRESS_RING_WIDTH: f32 = 12.0;
/// Hint pulse angular speed, radians per millisecond
const HINT_PULSE_SPEED: f64 = 0.003;
const WARMUP_DOT_RADIUS: f32 = 30.0;
const WARMUP_TRACK_WIDTH: f32 = 20.0;
/// Return box size on the results screen
const RETURN_BOX: Vec2 = Vec2::new(RETURN_ZONE_HALF_W * 2.0, RETURN_ZONE_HALF_H * 2.0);
const RETURN_BAR_HEIGHT: f32 = 5.0;
const PANEL_MAX_WIDTH: f32 = 448.0;
const PANEL_PADDING: f32 = 24.0;
const PANEL_LINE_HEIGHT: f32 = 24.0;
const TIP_FONT_SIZE: f32 = 18.0;
/// Longer tips are cut with an ellipsis
const MAX_TIP_LINES: usize = 4;
const HEADLINE_SIZE: f32 = 60.0;
/// Space between the headline's baseline area and the coach panel
const HEADLINE_GAP: f32 = 10.0;

pub const MENU_HINT: &str = "Draw a circle on the option to select";
pub const COACH_TITLE: &str = "Coach Gemini Says:";

/// Host-side switches that affect drawing only
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Sponge image finished loading
    pub sponge_ready: bool,
    /// Freeze the hint pulse and guide ring rotation
    pub reduced_motion: bool,
}

/// Build the display list for the current frame
pub fn render(state: &GameState, pointer: &PointerState, options: &RenderOptions) -> Frame {
    let view = state.viewport;
    let mut frame = Frame::new(view.width, view.height);

    frame.push(DrawCmd::Noise);
    if state.kind() != ScreenKind::Start {
        frame.push(DrawCmd::Stains);
    }

    match &state.screen {
        Screen::Start { bubbles } => {
            draw_title(&mut frame, state);
            for bubble in bubbles.iter().filter(|b| b.active) {
                let fill = match bubble.color {
                    BubbleColor::Light => palette::BUBBLE_LIGHT,
                    BubbleColor::Deep => palette::BUBBLE_DEEP,
                };
                frame.push(DrawCmd::Circle {
                    center: bubble.pos,
                    radius: bubble.radius,
                    fill: Some(fill),
                    stroke: Some(Stroke::new(palette::BUBBLE_OUTLINE, palette::LINE_WIDTH_THIN)),
                });
                // Specular highlight
                frame.fill_circle(
                    bubble.pos - Vec2::splat(bubble.radius * 0.4),
                    bubble.radius * 0.2,
                    palette::WHITE,
                );
            }
        }
        Screen::Menu { buttons } => draw_menu(&mut frame, state, buttons, pointer, options),
        Screen::ModeSelect { buttons } => draw_menu(&mut frame, state, buttons, pointer, options),
        Screen::Warmup => draw_warmup(&mut frame, state),
        Screen::Game { particles } => {
            let hud = match state.mode {
                Some(GameMode::Speed) => format!("Time: {}", state.session.timer.max(0.0).ceil()),
                _ => format!("Shiny: {}%", state.session.score.floor()),
            };
            frame.text(
                hud,
                Vec2::new(view.width / 2.0, 60.0),
                Font::new(FontFamily::Sans, 24.0),
                palette::TEXT,
            );
            for particle in particles.iter().filter(|p| p.active) {
                frame.fill_circle(particle.pos, particle.radius, palette::SECONDARY);
            }
        }
        Screen::Results => draw_results(&mut frame, state),
    }

    // Cursor always on top
    frame.push(DrawCmd::Sponge {
        center: pointer.pos,
        radius: SPONGE_RADIUS,
        textured: options.sponge_ready,
    });
    frame
}

fn draw_title(frame: &mut Frame, state: &GameState) {
    let view = state.viewport;
    let size = (view.width * 0.18).min(140.0) * 1.1;
    let x = view.width / 2.0;
    let slide = state.session.start_anim_y;
    for (line, dy) in [("CLEANING", -60.0), ("RUSH", 60.0)] {
        frame.push(DrawCmd::Text {
            text: line.to_string(),
            pos: Vec2::new(x, view.height / 2.0 + dy - slide),
            font: Font::new(FontFamily::Display, size),
            fill: palette::START_TITLE,
            outline: Some(Stroke::new(palette::LINE, palette::LINE_WIDTH_TITLE_STROKE)),
            alpha: 1.0,
        });
    }
}

/// Hint opacity at `now_ms`, pulsing between 0.3 and 1.0
pub fn hint_alpha(now_ms: f64, reduced_motion: bool) -> f32 {
    if reduced_motion {
        return 1.0;
    }
    lerp(0.3, 1.0, (now_ms * HINT_PULSE_SPEED).sin().abs() as f32)
}

fn draw_menu<P>(
    frame: &mut Frame,
    state: &GameState,
    buttons: &[MenuButton<P>],
    pointer: &PointerState,
    options: &RenderOptions,
) {
    let view = state.viewport;
    let cx = view.width / 2.0;
    let title = if state.kind() == ScreenKind::Menu {
        "SELECT MOTION"
    } else {
        "CHOOSE MODE"
    };
    frame.text(
        title,
        Vec2::new(cx, view.height * 0.2),
        Font::new(FontFamily::Body, 52.0).weight(600),
        palette::TEXT,
    );
    frame.push(DrawCmd::Text {
        text: MENU_HINT.to_string(),
        pos: Vec2::new(cx, view.height * 0.2 + 45.0),
        font: Font::new(FontFamily::Body, 20.0).weight(600),
        fill: palette::HINT_TEXT,
        outline: None,
        alpha: hint_alpha(state.clock_ms, options.reduced_motion),
    });

    let rotation = if options.reduced_motion {
        0.0
    } else {
        state.session.guide_rotation
    };
    for button in buttons {
        draw_button(frame, button, pointer, rotation);
    }
}

fn draw_button<P>(
    frame: &mut Frame,
    button: &MenuButton<P>,
    pointer: &PointerState,
    rotation: f32,
) {
    if pointer.within(button.pos, button.radius + GUIDE_RING_REACH) {
        let ring_radius = button.radius + GUIDE_RING_GAP;
        frame.push(DrawCmd::GuideRing {
            center: button.pos,
            radius: ring_radius,
            rotation,
            width: GUIDE_RING_WIDTH,
        });
        // Arrow head riding the gradient's bright end
        let turn = Mat2::from_angle(rotation);
        let head = [Vec2::new(0.0, 10.0), Vec2::new(-8.0, -5.0), Vec2::new(8.0, -5.0)]
            .into_iter()
            .map(|p| button.pos + turn * (Vec2::new(ring_radius, 0.0) + p))
            .collect();
        frame.push(DrawCmd::Path {
            points: head,
            closed: true,
            fill: Some(palette::GUIDE_RING_END),
            stroke: None,
        });
    }

    if button.progress > 0.0 {
        frame.push(DrawCmd::Arc {
            center: button.pos,
            radius: button.radius + PROGRESS_RING_GAP,
            start: -FRAC_PI_2,
            end: -FRAC_PI_2 + TAU * button.progress.min(PROGRESS_FULL) / PROGRESS_FULL,
            stroke: Stroke::new(palette::SECONDARY, PROGRESS_RING_WIDTH),
        });
    }

    frame.push(DrawCmd::Circle {
        center: button.pos,
        radius: button.radius,
        fill: Some(palette::WHITE),
        stroke: Some(Stroke::new(palette::LINE, palette::LINE_WIDTH_THIN)),
    });

    let icon_color = Color::from_hex(button.icon_color).unwrap_or(palette::LINE);
    draw_icon(
        frame,
        button.icon,
        button.pos - Vec2::new(0.0, button.radius * 0.3),
        button.radius * 0.6,
        icon_color,
    );

    // Label lines centered in the lower half
    let font_size = button.radius * 0.18;
    let spacing = font_size * 1.25;
    let lines: Vec<&str> = button.label.split('\n').collect();
    let area_center = button.pos.y + button.radius * 0.4;
    let first_y = area_center - lines.len() as f32 * spacing / 2.0 + spacing / 2.0;
    for (i, line) in lines.iter().enumerate() {
        frame.text(
            *line,
            Vec2::new(button.pos.x, first_y + i as f32 * spacing),
            Font::new(FontFamily::Body, font_size).weight(600),
            palette::TEXT,
        );
    }
}

fn draw_warmup(frame: &mut Frame, state: &GameState) {
    let view = state.viewport;
    let center = view.center();
    frame.text(
        format!(
            "Warm-up: Push & Pull ({}/{})",
            state.session.warmup_count, WARMUP_REPS
        ),
        center - Vec2::new(0.0, 260.0),
        Font::new(FontFamily::Display, 30.0),
        palette::TEXT,
    );
    let (top, bottom) = warmup_track(view);
    frame.polyline(
        vec![top, bottom],
        Stroke::round(palette::WARMUP_TRACK, WARMUP_TRACK_WIDTH),
    );
    let target = match state.session.warmup_dir {
        WarmupDir::Outbound => bottom,
        WarmupDir::Inbound => top,
    };
    frame.fill_circle(target, WARMUP_DOT_RADIUS, palette::SECONDARY);
}

fn draw_results(frame: &mut Frame, state: &GameState) {
    let view = state.viewport;
    let cx = view.width / 2.0;
    let box_min = return_zone_center(view) - RETURN_BOX / 2.0;
    frame.push(DrawCmd::Rect {
        min: box_min,
        size: RETURN_BOX,
        fill: None,
        stroke: Some(Stroke::new(palette::LINE, palette::LINE_WIDTH_STANDARD)),
    });
    let progress = state.session.return_progress.clamp(0.0, PROGRESS_FULL) / PROGRESS_FULL;
    frame.push(DrawCmd::Rect {
        min: Vec2::new(box_min.x, box_min.y + RETURN_BOX.y - RETURN_BAR_HEIGHT),
        size: Vec2::new(RETURN_BOX.x * progress, RETURN_BAR_HEIGHT),
        fill: Some(palette::SECONDARY),
        stroke: None,
    });
    frame.text(
        "Scrub to Menu",
        return_zone_center(view) + Vec2::new(0.0, 5.0),
        Font::new(FontFamily::Sans, 24.0),
        palette::TEXT,
    );

    let panel_top = draw_coach_panel(frame, state, box_min.y - 10.0);

    // Headline moves up when a long tip grows the panel
    let success = state.result.is_some_and(|r| r.success);
    let headline_y =
        (view.height / 2.0 - 80.0).min(panel_top - HEADLINE_GAP - HEADLINE_SIZE / 2.0);
    frame.text(
        if success { "CLEAN & SHINY!" } else { "MISSED A SPOT!" },
        Vec2::new(cx, headline_y),
        Font::new(FontFamily::Display, HEADLINE_SIZE),
        palette::TEXT,
    );
}

/// Coach panel anchored with its bottom edge at `bottom`. Returns its top edge.
fn draw_coach_panel(frame: &mut Frame, state: &GameState, bottom: f32) -> f32 {
    let view = state.viewport;
    let width = PANEL_MAX_WIDTH.min(view.width - 2.0 * PANEL_PADDING);
    let inner = width - 2.0 * PANEL_PADDING;
    let tip_font = Font::new(FontFamily::Sans, TIP_FONT_SIZE).italic();

    let lines = if state.coach.loading {
        Vec::new()
    } else {
        let tip = state.coach.text.as_deref().unwrap_or_default();
        let mut lines =
            wrap_text(&format!("\"{}\"", tip), chars_per_line(inner, TIP_FONT_SIZE));
        if lines.len() > MAX_TIP_LINES {
            lines.truncate(MAX_TIP_LINES);
            if let Some(last) = lines.last_mut() {
                last.push('…');
            }
        }
        lines
    };
    let body_lines = if state.coach.loading { 2 } else { lines.len().max(1) };
    let height = PANEL_PADDING * 2.0 + PANEL_LINE_HEIGHT * (body_lines as f32 + 1.0);
    let min = Vec2::new((view.width - width) / 2.0, bottom - height);

    frame.push(DrawCmd::Rect {
        min,
        size: Vec2::new(width, height),
        fill: Some(palette::PANEL_FILL),
        stroke: Some(Stroke::new(palette::LINE, palette::LINE_WIDTH_STANDARD)),
    });
    let cx = view.width / 2.0;
    let mut y = min.y + PANEL_PADDING + PANEL_LINE_HEIGHT / 2.0;
    frame.text(
        COACH_TITLE,
        Vec2::new(cx, y),
        Font::new(FontFamily::Sans, 20.0).weight(700),
        palette::TEXT,
    );

    if state.coach.loading {
        // Placeholder bars while the tip is on its way
        for fraction in [1.0, 0.75] {
            y += PANEL_LINE_HEIGHT;
            let bar = Vec2::new(inner * fraction, 16.0);
            frame.push(DrawCmd::Rect {
                min: Vec2::new(min.x + PANEL_PADDING, y - bar.y / 2.0),
                size: bar,
                fill: Some(palette::PANEL_PLACEHOLDER),
                stroke: None,
            });
        }
        return min.y;
    }
    for line in lines {
        y += PANEL_LINE_HEIGHT;
        frame.text(line, Vec2::new(cx, y), tip_font, palette::TIP_TEXT);
    }
    min.y
}

/// Rough glyph budget for a line of `width` pixels
fn chars_per_line(width: f32, font_size: f32) -> usize {
    ((width / (font_size * 0.5)) as usize).max(8)
}

/// Greedy word wrap. Words longer than a line get a line of their own.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{MOTIONS, Transition, Viewport};

    const VIEW: Viewport = Viewport::new(1280.0, 720.0);

    fn pointer_at(pos: Vec2) -> PointerState {
        PointerState {
            pos,
            prev: pos,
            ..Default::default()
        }
    }

    fn results_state(success: bool) -> GameState {
        let mut state = GameState::new(5, VIEW, 0.0);
        state.apply(Transition::ToModeSelect(MOTIONS[0]));
        state.apply(Transition::ToWarmup(GameMode::Speed));
        state.apply(Transition::ToGame);
        state.apply(Transition::ToResults { success });
        state
    }

    #[test]
    fn test_start_screen_has_no_stains_and_cursor_last() {
        let state = GameState::new(5, VIEW, 0.0);
        let frame = render(&state, &pointer_at(Vec2::ZERO), &RenderOptions::default());
        assert_eq!(frame.commands[0], DrawCmd::Noise);
        assert!(!frame.commands.contains(&DrawCmd::Stains));
        assert!(matches!(
            frame.commands.last(),
            Some(DrawCmd::Sponge { textured: false, .. })
        ));
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["CLEANING", "RUSH"]);
        // Body plus specular dot per bubble
        assert_eq!(
            frame.count(|c| matches!(c, DrawCmd::Circle { .. })),
            START_BUBBLE_COUNT * 2
        );
    }

    #[test]
    fn test_popped_bubbles_are_not_drawn() {
        let mut state = GameState::new(5, VIEW, 0.0);
        if let Screen::Start { bubbles } = &mut state.screen {
            bubbles.iter_mut().skip(10).for_each(|b| b.active = false);
        }
        let frame = render(&state, &pointer_at(Vec2::ZERO), &RenderOptions::default());
        assert_eq!(frame.count(|c| matches!(c, DrawCmd::Circle { .. })), 20);
    }

    #[test]
    fn test_guide_ring_only_near_button() {
        let mut state = GameState::new(5, VIEW, 0.0);
        state.apply(Transition::ToMenu);
        let button = state.screen.motion_buttons()[2].clone();
        let options = RenderOptions::default();

        let near = render(&state, &pointer_at(button.pos), &options);
        assert_eq!(near.count(|c| matches!(c, DrawCmd::GuideRing { .. })), 1);

        let far = render(&state, &pointer_at(Vec2::new(-500.0, -500.0)), &options);
        assert_eq!(far.count(|c| matches!(c, DrawCmd::GuideRing { .. })), 0);
        assert!(far.texts().any(|t| t == "SELECT MOTION"));
        assert!(far.texts().any(|t| t == "PUSH"));
        assert!(far.texts().any(|t| t == "FIGURE"));
    }

    #[test]
    fn test_progress_arc_tracks_progress() {
        let mut state = GameState::new(5, VIEW, 0.0);
        state.apply(Transition::ToModeSelect(MOTIONS[1]));
        if let Screen::ModeSelect { buttons } = &mut state.screen {
            buttons[1].progress = 50.0;
        }
        let frame = render(&state, &pointer_at(Vec2::ZERO), &RenderOptions::default());
        let arcs: Vec<_> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Arc { start, end, stroke, .. } if stroke.width == PROGRESS_RING_WIDTH => {
                    Some(end - start)
                }
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 1);
        assert!((arcs[0] - std::f32::consts::PI).abs() < 1e-4);
        assert!(frame.texts().any(|t| t == "CHOOSE MODE"));
    }

    #[test]
    fn test_hint_alpha_range() {
        for t in [0.0, 100.0, 523.6, 1e9] {
            let a = hint_alpha(t, false);
            assert!((0.3..=1.0).contains(&a));
        }
        assert!((hint_alpha(0.0, false) - 0.3).abs() < 1e-6);
        assert_eq!(hint_alpha(0.0, true), 1.0);
    }

    #[test]
    fn test_speed_hud_never_negative() {
        let mut state = results_state(false);
        state.apply(Transition::ToGame);
        state.session.timer = -0.01;
        let frame = render(&state, &pointer_at(Vec2::ZERO), &RenderOptions::default());
        assert!(frame.texts().any(|t| t == "Time: 0"));
        state.session.timer = 12.2;
        let frame = render(&state, &pointer_at(Vec2::ZERO), &RenderOptions::default());
        assert!(frame.texts().any(|t| t == "Time: 13"));
    }

    #[test]
    fn test_warmup_counter_text() {
        let mut state = GameState::new(5, VIEW, 0.0);
        state.apply(Transition::ToModeSelect(MOTIONS[0]));
        state.apply(Transition::ToWarmup(GameMode::Endurance));
        state.session.warmup_count = 3;
        let frame = render(&state, &pointer_at(Vec2::ZERO), &RenderOptions::default());
        assert!(frame.texts().any(|t| t == "Warm-up: Push & Pull (3/5)"));
    }

    #[test]
    fn test_results_panel_loading_then_tip() {
        let mut state = results_state(true);
        let options = RenderOptions {
            sponge_ready: true,
            reduced_motion: false,
        };
        let loading = render(&state, &pointer_at(Vec2::ZERO), &options);
        assert!(loading.texts().any(|t| t == "CLEAN & SHINY!"));
        assert!(loading.texts().any(|t| t == COACH_TITLE));
        assert!(matches!(
            loading.commands.last(),
            Some(DrawCmd::Sponge { textured: true, .. })
        ));

        let session = state.coach.session();
        assert!(state.deliver_tip(session, "Nice work.".into()));
        let done = render(&state, &pointer_at(Vec2::ZERO), &options);
        assert!(done.texts().any(|t| t == "\"Nice work.\""));
    }

    #[test]
    fn test_long_tip_keeps_headline_clear_of_panel() {
        let mut state = results_state(true);
        let session = state.coach.session();
        let tip = "Great job keeping your elbow close to your side the whole time. \
                   Next session, slow the pull back down and breathe out as you push, \
                   then hold the end position for a moment before returning.";
        assert!(state.deliver_tip(session, tip.into()));
        let frame = render(&state, &pointer_at(Vec2::ZERO), &RenderOptions::default());

        let panel_top = frame
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCmd::Rect { min, fill: Some(fill), .. } if *fill == palette::PANEL_FILL => {
                    Some(min.y)
                }
                _ => None,
            })
            .expect("coach panel");
        let headline_y = frame
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCmd::Text { text, pos, .. } if text == "CLEAN & SHINY!" => Some(pos.y),
                _ => None,
            })
            .expect("headline");
        assert!(headline_y + HEADLINE_SIZE / 2.0 <= panel_top);

        let tip_lines = frame.count(
            |c| matches!(c, DrawCmd::Text { fill, .. } if *fill == palette::TIP_TEXT),
        );
        assert_eq!(tip_lines, MAX_TIP_LINES);
        assert!(frame.texts().any(|t| t.ends_with('…')));
    }

    #[test]
    fn test_short_tip_keeps_default_headline_spot() {
        let mut state = results_state(false);
        let session = state.coach.session();
        assert!(state.deliver_tip(session, "Keep it up.".into()));
        let frame = render(&state, &pointer_at(Vec2::ZERO), &RenderOptions::default());
        let headline_y = frame.commands.iter().find_map(|c| match c {
            DrawCmd::Text { text, pos, .. } if text == "MISSED A SPOT!" => Some(pos.y),
            _ => None,
        });
        assert_eq!(headline_y, Some(VIEW.height / 2.0 - 80.0));
    }

    #[test]
    fn test_missed_headline() {
        let state = results_state(false);
        let frame = render(&state, &pointer_at(Vec2::ZERO), &RenderOptions::default());
        assert!(frame.texts().any(|t| t == "MISSED A SPOT!"));
        assert!(frame.texts().any(|t| t == "Scrub to Menu"));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap_text("  ", 10), Vec::<String>::new());
        assert_eq!(wrap_text("unbreakableword", 4), vec!["unbreakableword"]);
    }
}
