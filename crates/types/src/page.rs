use serde::{Deserialize, Serialize};

/// Points per inch in PDF user space.
pub const POINTS_PER_INCH: f32 = 72.0;

/// The physical page the exporter prints on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter, 8.5 x 11 inches.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::LETTER
    }
}
