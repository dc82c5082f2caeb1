use std::fmt;
use std::str::FromStr;

pub const BRIGHTNESS_RANGE: (i8, i8) = (-100, 100);
pub const CONTRAST_RANGE: (i8, i8) = (-100, 100);

/// Material category tag. Closed set, so equality and exhaustive matches
/// stay reliable across the four snapshot fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Auto,
    Wood,
    Leather,
    Acrylic,
    Glass,
    Metal,
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Auto,
        Preset::Wood,
        Preset::Leather,
        Preset::Acrylic,
        Preset::Glass,
        Preset::Metal,
        Preset::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Auto => "auto",
            Preset::Wood => "wood",
            Preset::Leather => "leather",
            Preset::Acrylic => "acrylic",
            Preset::Glass => "glass",
            Preset::Metal => "metal",
            Preset::Custom => "custom",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Preset::ALL.iter().map(|p| p.as_str()).collect();
        write!(f, "unknown preset '{}' (expected one of: {})", self.0, names.join(", "))
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

/// One recorded editing state.
///
/// Holds only the four adjustment values, never rendered output, so a full
/// history stays a few hundred bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub brightness: i8,
    pub contrast: i8,
    pub threshold: u8,
    pub preset: Preset,
}

impl Snapshot {
    /// Builds a snapshot, clamping brightness and contrast into -100..=100.
    pub fn new(brightness: i32, contrast: i32, threshold: u8, preset: Preset) -> Self {
        Self {
            brightness: clamp_signed(brightness, BRIGHTNESS_RANGE),
            contrast: clamp_signed(contrast, CONTRAST_RANGE),
            threshold,
            preset,
        }
    }

    /// Host defaults: neutral brightness/contrast, the given threshold, auto preset.
    pub fn baseline(threshold: u8) -> Self {
        Self::new(0, 0, threshold, Preset::Auto)
    }
}

fn clamp_signed(value: i32, (min, max): (i8, i8)) -> i8 {
    value.clamp(min as i32, max as i32) as i8
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "b={:+} c={:+} t={} {}",
            self.brightness, self.contrast, self.threshold, self.preset
        )
    }
}
