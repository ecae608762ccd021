//! Player preferences
//!
//! Persisted separately from the high score.

use crate::color::Color;
use crate::persistence::KeyValueStore;

/// Player preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Body color of the player's car
    pub player_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_color: Color::RED,
        }
    }
}

impl Settings {
    /// Storage key for the car color
    pub const COLOR_KEY: &'static str = "carColor";

    /// Load settings, keeping defaults for anything missing or unreadable
    pub fn load(store: &impl KeyValueStore) -> Self {
        let mut settings = Self::default();

        match store.get(Self::COLOR_KEY) {
            Ok(Some(raw)) => match Color::from_hex(&raw) {
                Some(color) => settings.player_color = color,
                None => log::warn!("Ignoring invalid car color {:?}", raw),
            },
            Ok(None) => log::info!("Using default car color"),
            Err(e) => log::warn!("Could not read car color: {}", e),
        }

        settings
    }

    /// Save settings
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match store.set(Self::COLOR_KEY, &self.player_color.to_string()) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_default_color_is_red() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store).player_color, Color::RED);
    }

    #[test]
    fn test_loads_stored_color() {
        let store = MemoryStore::with_entries([("carColor", "#00ff00")]);
        assert_eq!(
            Settings::load(&store).player_color,
            Color::from_rgb(0x00ff00)
        );
    }

    #[test]
    fn test_invalid_color_keeps_default() {
        let store = MemoryStore::with_entries([("carColor", "chartreuse")]);
        assert_eq!(Settings::load(&store).player_color, Color::RED);
    }

    #[test]
    fn test_save_writes_hex() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            player_color: Color::from_rgb(0x1234ab),
        };
        settings.save(&mut store);
        assert_eq!(store.get("carColor").unwrap().as_deref(), Some("#1234ab"));
    }
}
