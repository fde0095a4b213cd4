//! Parameter types shared between operations and backends.

/// Quality setting for lossy WebP encoding (1–100). Clamped on construction.
///
/// Stored as `f32` because the geometric decay schedule produces fractional
/// qualities (80 → 72 → 64.8 → …); libwebp accepts fractional values directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f32);

impl Quality {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(1.0, 100.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(crate::config::DEFAULT_START_QUALITY)
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0.0).value(), 1.0);
        assert_eq!(Quality::new(50.0).value(), 50.0);
        assert_eq!(Quality::new(150.0).value(), 100.0);
    }

    #[test]
    fn quality_displays_rounded() {
        assert_eq!(Quality::new(64.8).to_string(), "65");
        assert_eq!(Quality::new(75.0).to_string(), "75");
    }
}
