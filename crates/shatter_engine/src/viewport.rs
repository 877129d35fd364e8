//! Rendering boundary
//!
//! The kernel never talks to a display. Draw passes describe what to show
//! through the [`Viewport`] trait, and the host decides how to present it.

use crate::foundation::math::Point;
use crate::geometry::Pose;

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Colour {
    /// Fully transparent
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque yellow
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Opaque blue
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Opaque colour from channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Colour from channels including alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// How a primitive is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Outline or text colour
    pub colour: Colour,
    /// Fill colour; transparent for outlines only
    pub fill: Colour,
    /// Overall opacity in `0.0..=1.0`
    pub opacity: f64,
    /// Draw order; higher values end up on top
    pub z_index: i32,
    /// Text size for labels
    pub font_size: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            colour: Colour::WHITE,
            fill: Colour::TRANSPARENT,
            opacity: 1.0,
            z_index: 0,
            font_size: 16.0,
        }
    }
}

impl Style {
    /// Outline style in the given colour
    pub fn outline(colour: Colour) -> Self {
        Self {
            colour,
            ..Self::default()
        }
    }

    /// Filled style with a matching outline
    pub fn filled(colour: Colour) -> Self {
        Self {
            colour,
            fill: colour,
            ..Self::default()
        }
    }
}

/// Drawing surface implemented by the host
pub trait Viewport {
    /// Start a new frame
    fn refresh(&mut self);

    /// Draw a closed polygon in world coordinates
    fn draw_shape(&mut self, polygon: &[Point], style: &Style);

    /// Draw an open polyline in world coordinates
    fn draw_line(&mut self, points: &[Point], style: &Style);

    /// Draw text anchored at a pose
    fn draw_label(&mut self, pose: &Pose, text: &str, style: &Style);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A closed polygon
    Shape {
        /// World-space vertices
        vertices: Vec<Point>,
        /// Style used
        style: Style,
    },
    /// An open polyline
    Line {
        /// World-space points
        points: Vec<Point>,
        /// Style used
        style: Style,
    },
    /// A text label
    Label {
        /// Anchor pose
        pose: Pose,
        /// Label text
        text: String,
        /// Style used
        style: Style,
    },
}

/// Viewport that keeps the draw calls of the current frame in memory
///
/// Used for headless runs and to assert on draw output in tests.
#[derive(Debug, Default)]
pub struct RecordingViewport {
    commands: Vec<DrawCommand>,
    refresh_count: u64,
}

impl RecordingViewport {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls made since the last refresh
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Labels drawn since the last refresh
    pub fn labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of shapes drawn since the last refresh
    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Shape { .. }))
            .count()
    }
}

impl Viewport for RecordingViewport {
    fn refresh(&mut self) {
        self.commands.clear();
        self.refresh_count += 1;
    }

    fn draw_shape(&mut self, polygon: &[Point], style: &Style) {
        self.commands.push(DrawCommand::Shape {
            vertices: polygon.to_vec(),
            style: *style,
        });
    }

    fn draw_line(&mut self, points: &[Point], style: &Style) {
        self.commands.push(DrawCommand::Line {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn draw_label(&mut self, pose: &Pose, text: &str, style: &Style) {
        self.commands.push(DrawCommand::Label {
            pose: *pose,
            text: text.to_string(),
            style: *style,
        });
    }
}
