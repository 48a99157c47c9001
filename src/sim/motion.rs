//! Motion catalog and game modes
//!
//! Each motion is one rehabilitation exercise. It doubles as a menu option
//! and as the particle seeding pattern of the main game.

/// Particle scatter shape for a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Vertical,
    Horizontal,
    Fan,
    Circle,
    Infinity,
}

/// Icon drawn inside a menu button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconShape {
    /// Vertical double arrow
    PushPull,
    /// Horizontal double arrow
    SideToSide,
    /// Upward arc with a pivot dot
    ArcSwing,
    /// Three-quarter circle with an arrow head
    Circle,
    FigureEight,
    /// Lightning bolt (speed mode)
    Lightning,
    /// Arch on two legs (endurance mode)
    Arch,
}

/// Immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub id: &'static str,
    /// Multi-line label, lines separated by `\n`
    pub label: &'static str,
    pub pattern: PatternKind,
    pub icon: IconShape,
    pub icon_color: &'static str,
}

impl Motion {
    /// Label on a single line (used for the coach prompt and logs)
    pub fn flat_label(&self) -> String {
        self.label.split('\n').collect::<Vec<_>>().join(" ")
    }
}

pub const MOTIONS: [Motion; 5] = [
    Motion {
        id: "flex_ext",
        label: "PUSH\n&\nPULL",
        pattern: PatternKind::Vertical,
        icon: IconShape::PushPull,
        icon_color: "#FF6B6B",
    },
    Motion {
        id: "hor_abd",
        label: "SIDE\nTO\nSIDE",
        pattern: PatternKind::Horizontal,
        icon: IconShape::SideToSide,
        icon_color: "#4ECDC4",
    },
    Motion {
        id: "abd_add",
        label: "ARC\nSWING",
        pattern: PatternKind::Fan,
        icon: IconShape::ArcSwing,
        icon_color: "#FFE66D",
    },
    Motion {
        id: "circular",
        label: "CIRCLE",
        pattern: PatternKind::Circle,
        icon: IconShape::Circle,
        icon_color: "#1A535C",
    },
    Motion {
        id: "fig_8",
        label: "FIGURE\n8",
        pattern: PatternKind::Infinity,
        icon: IconShape::FigureEight,
        icon_color: "#FF9F1C",
    },
];

/// Look up a catalog entry by id
pub fn motion_by_id(id: &str) -> Option<&'static Motion> {
    MOTIONS.iter().find(|m| m.id == id)
}

/// Main game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Timed: clean every particle before the clock runs out
    Speed,
    /// Untimed: keep moving to fill the score, idling drains it
    Endurance,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Speed, GameMode::Endurance];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Speed => "speed",
            GameMode::Endurance => "endurance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Speed => "SPEED",
            GameMode::Endurance => "ENDURANCE",
        }
    }

    pub fn icon(&self) -> IconShape {
        match self {
            GameMode::Speed => IconShape::Lightning,
            GameMode::Endurance => IconShape::Arch,
        }
    }
}
