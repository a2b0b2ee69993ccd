use serde::{Deserialize, Serialize};

/// Fixed set of capture resolutions offered to the user.
///
/// Dimensions are acquisition *hints* (ideal, not exact): the device may
/// deliver whatever it can closest to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionKey {
    #[serde(rename = "qvga")]
    Qvga,
    #[serde(rename = "vga")]
    Vga,
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "1080p")]
    Hd1080,
    #[serde(rename = "4k")]
    Uhd4k,
}

impl ResolutionKey {
    pub const ALL: [ResolutionKey; 5] = [
        ResolutionKey::Qvga,
        ResolutionKey::Vga,
        ResolutionKey::Hd720,
        ResolutionKey::Hd1080,
        ResolutionKey::Uhd4k,
    ];

    /// Ideal pixel dimensions for this resolution.
    #[must_use]
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ResolutionKey::Qvga => (320, 240),
            ResolutionKey::Vga => (640, 480),
            ResolutionKey::Hd720 => (1280, 720),
            ResolutionKey::Hd1080 => (1920, 1080),
            ResolutionKey::Uhd4k => (3180, 2160),
        }
    }

    /// Human-readable name for selection UIs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResolutionKey::Qvga => "QVGA",
            ResolutionKey::Vga => "VGA",
            ResolutionKey::Hd720 => "HD",
            ResolutionKey::Hd1080 => "Full HD",
            ResolutionKey::Uhd4k => "UHD 4k",
        }
    }
}

impl Default for ResolutionKey {
    fn default() -> Self {
        ResolutionKey::Hd720
    }
}
