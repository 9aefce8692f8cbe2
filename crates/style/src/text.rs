use serde::{Deserialize, Serialize};

/// Horizontal placement of a line inside its column. Justification is not supported.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}
