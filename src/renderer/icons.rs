//! Button icons as stroke geometry
//!
//! `(center, size)` follow the button: the icon sits in the upper half of the
//! button and `size` is 0.6 of the button radius.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::frame::{DrawCmd, Frame, Stroke};
use super::palette::{Color, LINE_WIDTH_STANDARD};
use crate::sim::IconShape;
use crate::{lemniscate, polar_to_cartesian};

/// Radius of the arc-swing pivot dot
const PIVOT_DOT_RADIUS: f32 = 4.0;
/// Half size of the circle icon's arrow head
const CIRCLE_ARROW: f32 = 5.0;
/// Parameter step when tracing the figure-eight
const FIGURE_EIGHT_STEP: f32 = 0.1;

/// Append the commands drawing `shape` to `frame`
pub fn draw_icon(frame: &mut Frame, shape: IconShape, center: Vec2, size: f32, color: Color) {
    let stroke = Stroke::round(color, LINE_WIDTH_STANDARD);
    let Vec2 { x, y } = center;
    let s = size;
    let p = Vec2::new;

    match shape {
        IconShape::PushPull => {
            let h = s * 0.8;
            frame.polyline(vec![p(x, y - h / 2.0), p(x, y + h / 2.0)], stroke);
            frame.polyline(
                vec![
                    p(x - s / 4.0, y - h / 2.0 + s / 4.0),
                    p(x, y - h / 2.0),
                    p(x + s / 4.0, y - h / 2.0 + s / 4.0),
                ],
                stroke,
            );
            frame.polyline(
                vec![
                    p(x - s / 4.0, y + h / 2.0 - s / 4.0),
                    p(x, y + h / 2.0),
                    p(x + s / 4.0, y + h / 2.0 - s / 4.0),
                ],
                stroke,
            );
        }
        IconShape::SideToSide => {
            let w = s * 0.8;
            frame.polyline(vec![p(x - w / 2.0, y), p(x + w / 2.0, y)], stroke);
            frame.polyline(
                vec![
                    p(x - w / 2.0 + s / 4.0, y - s / 4.0),
                    p(x - w / 2.0, y),
                    p(x - w / 2.0 + s / 4.0, y + s / 4.0),
                ],
                stroke,
            );
            frame.polyline(
                vec![
                    p(x + w / 2.0 - s / 4.0, y - s / 4.0),
                    p(x + w / 2.0, y),
                    p(x + w / 2.0 - s / 4.0, y + s / 4.0),
                ],
                stroke,
            );
        }
        IconShape::ArcSwing => {
            let pivot = p(x, y + s * 0.4);
            frame.push(DrawCmd::Arc {
                center: pivot,
                radius: s * 0.7,
                start: -PI * 0.8,
                end: -PI * 0.2,
                stroke,
            });
            frame.fill_circle(pivot, PIVOT_DOT_RADIUS, color);
        }
        IconShape::Circle => {
            let r = s * 0.6;
            let end = PI * 1.5;
            frame.push(DrawCmd::Arc {
                center,
                radius: r,
                start: 0.0,
                end,
                stroke,
            });
            let tip = polar_to_cartesian(center, r, end);
            frame.polyline(
                vec![
                    tip + p(-CIRCLE_ARROW, -CIRCLE_ARROW),
                    tip + p(CIRCLE_ARROW, 0.0),
                    tip + p(-CIRCLE_ARROW, CIRCLE_ARROW),
                ],
                stroke,
            );
        }
        IconShape::FigureEight => {
            let w = s * 0.8;
            let steps = (TAU / FIGURE_EIGHT_STEP).ceil() as usize;
            let points = (0..steps)
                .map(|i| center + lemniscate(w, i as f32 * FIGURE_EIGHT_STEP))
                .collect();
            frame.polyline(points, stroke);
        }
        IconShape::Lightning => {
            frame.polyline(
                vec![
                    p(x + s / 4.0, y - s / 2.0),
                    p(x - s / 4.0, y),
                    p(x, y),
                    p(x - s / 4.0, y + s / 2.0),
                    p(x + s / 4.0, y - 0.1 * s),
                    p(x, y - 0.1 * s),
                ],
                Stroke::new(color, LINE_WIDTH_STANDARD),
            );
        }
        IconShape::Arch => {
            let stroke = Stroke::new(color, LINE_WIDTH_STANDARD);
            let r = s / 3.0;
            frame.push(DrawCmd::Arc {
                center,
                radius: r,
                start: PI,
                end: TAU,
                stroke,
            });
            frame.polyline(vec![p(x - r, y), p(x - r, y + r)], stroke);
            frame.polyline(vec![p(x + r, y), p(x + r, y + r)], stroke);
            frame.polyline(vec![p(x - r, y + r), p(x + r, y + r)], stroke);
        }
    }
}
