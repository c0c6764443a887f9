//! Entity state: the on/off value a switch reports to the host.

use serde::{Deserialize, Serialize};

/// Discrete operational state of a switch entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    On,
    Off,
    #[default]
    Unknown,
    /// The bound device or program is missing from the latest snapshot.
    Unavailable,
}

impl EntityState {
    /// Whether the entity is reachable (anything but [`Unavailable`](Self::Unavailable)).
    #[must_use]
    pub fn is_available(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl From<bool> for EntityState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl From<Option<bool>> for EntityState {
    fn from(on: Option<bool>) -> Self {
        on.map_or(Self::Unavailable, Self::from)
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Unknown => f.write_str("unknown"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_unavailable_when_state_is_unavailable() {
        assert!(!EntityState::Unavailable.is_available());
        assert!(EntityState::Off.is_available());
    }

    #[test]
    fn should_map_bool_to_on_off() {
        assert_eq!(EntityState::from(true), EntityState::On);
        assert_eq!(EntityState::from(false), EntityState::Off);
    }

    #[test]
    fn should_map_missing_value_to_unavailable() {
        assert_eq!(EntityState::from(None), EntityState::Unavailable);
        assert_eq!(EntityState::from(Some(true)), EntityState::On);
    }

    #[test]
    fn should_display_lowercase_variant_name() {
        assert_eq!(EntityState::On.to_string(), "on");
        assert_eq!(EntityState::Unavailable.to_string(), "unavailable");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let json = serde_json::to_string(&EntityState::Off).unwrap();
        assert_eq!(json, "\"off\"");
        let parsed: EntityState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, EntityState::Off);
    }
}
