use crate::error::{LogosmithError, LogosmithResult};

/// The closed set of drawable shapes.
///
/// The wire format carries shape names as plain strings (see
/// [`LogoRequest::shape`]); this enum is what the rest of the crate works
/// with, so adding a variant forces every match site to handle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Chair,
    Table,
    Car,
    House,
    None,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Chair,
        Shape::Table,
        Shape::Car,
        Shape::House,
        Shape::None,
    ];

    /// Shape names in their canonical listing order.
    pub const NAMES: [&'static str; 5] = ["chair", "table", "car", "house", "none"];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Chair => "chair",
            Shape::Table => "table",
            Shape::Car => "car",
            Shape::House => "house",
            Shape::None => "none",
        }
    }

    pub fn from_name(name: &str) -> LogosmithResult<Self> {
        Shape::ALL
            .iter()
            .copied()
            .find(|s| s.name() == name)
            .ok_or_else(|| {
                LogosmithError::validation(format!(
                    "unknown shape '{name}' (available: {:?})",
                    Shape::NAMES
                ))
            })
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Shape {
    type Err = LogosmithError;

    fn from_str(s: &str) -> LogosmithResult<Self> {
        Shape::from_name(s)
    }
}

/// One logo-generation request.
///
/// Every field has a wire default so a client may POST `{}` and get the
/// baseline rendering. `shape` stays a string here because an unrecognized
/// name is a *domain* error (reported with the list of valid shapes), not a
/// deserialization failure; resolve it with [`LogoRequest::shape`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogoRequest {
    #[serde(default = "default_shape")]
    pub shape: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_text_x")]
    pub text_x: i32,
    #[serde(default = "default_text_y")]
    pub text_y: i32,
}

impl Default for LogoRequest {
    fn default() -> Self {
        Self {
            shape: default_shape(),
            text: String::new(),
            color: default_color(),
            text_color: default_text_color(),
            scale: default_scale(),
            font_size: default_font_size(),
            text_x: default_text_x(),
            text_y: default_text_y(),
        }
    }
}

impl LogoRequest {
    /// Resolve the wire shape name against the shape library.
    pub fn shape(&self) -> LogosmithResult<Shape> {
        Shape::from_name(&self.shape)
    }
}

fn default_shape() -> String {
    "none".to_string()
}

fn default_color() -> String {
    "black".to_string()
}

fn default_text_color() -> String {
    "white".to_string()
}

fn default_scale() -> f64 {
    1.0
}

fn default_font_size() -> u32 {
    24
}

fn default_text_x() -> i32 {
    150
}

fn default_text_y() -> i32 {
    350
}
