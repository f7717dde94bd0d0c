//! Accordion configuration.
//!
//! [`AccordionConfig`] carries the container-wide settings and, optionally, a
//! list of declared items. It can be built in code with the `with_*` methods or
//! loaded from TOML/JSON:
//!
//! ```
//! use horizon_accordion::{AccordionConfig, ContentHeight};
//!
//! let config = AccordionConfig::from_toml_str(r#"
//!     collapse_others_on_expand = false
//!
//!     [animation]
//!     duration_ms = 250
//!     easing = "ease-in-out"
//!
//!     [[items]]
//!     label = "Details"
//!     expanded = true
//!     content_height = { method = "fixed", height = 80 }
//! "#).unwrap();
//!
//! assert!(!config.collapse_others_on_expand);
//! assert_eq!(config.items[0].content_height, ContentHeight::Fixed { height: 80 });
//! ```
//!
//! Loading is the validation boundary: malformed content-height policies and
//! contradictory item declarations are rejected here, and the engine assumes
//! every value it receives is valid.

use std::time::Duration;

use horizon_accordion_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::{Error, Result};
use crate::item::{AnimationOverride, ContentHeight, Item};
use crate::surface::ItemSurface;

/// Default animation duration in milliseconds.
pub const DEFAULT_ANIMATION_MS: u64 = 1000;

/// Collapsed body height in standards rendering.
pub const COLLAPSED_HEIGHT: f32 = 0.0;

/// Collapsed body height under legacy quirks rendering.
pub const QUIRKS_COLLAPSED_HEIGHT: f32 = 1.0;

/// Duration and easing of a height animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSettings {
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Easing curve.
    pub easing: Easing,
}

impl AnimationSettings {
    /// Create animation settings.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration_ms: duration.as_millis() as u64,
            easing,
        }
    }

    /// The duration as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_ANIMATION_MS,
            easing: Easing::default(),
        }
    }
}

impl From<AnimationSettings> for AnimationOverride {
    fn from(settings: AnimationSettings) -> Self {
        AnimationOverride::new(settings.duration(), settings.easing)
    }
}

/// A declared item, as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemSpec {
    /// Header label.
    pub label: String,
    /// Initial expanded state. Omitted means collapsed, unless pinned.
    #[serde(default)]
    pub expanded: Option<bool>,
    /// Whether the item is pinned open.
    #[serde(default)]
    pub always_visible: bool,
    /// Whether the item has a close affordance.
    #[serde(default)]
    pub closable: bool,
    /// How the open body height is computed.
    #[serde(default)]
    pub content_height: ContentHeight,
    /// Per-item animation override.
    #[serde(default)]
    pub animation: Option<AnimationSettings>,
}

impl ItemSpec {
    /// Create a collapsed, auto-height item declaration.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            expanded: None,
            always_visible: false,
            closable: false,
            content_height: ContentHeight::Auto,
            animation: None,
        }
    }

    /// Check the declaration for contradictions.
    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(Error::invalid_value("label", "item label must not be empty"));
        }
        if self.always_visible && self.expanded == Some(false) {
            return Err(Error::invalid_value(
                format!("items.{}.always_visible", self.label),
                "an always-visible item cannot be declared collapsed",
            ));
        }
        Ok(())
    }

    /// Build an [`Item`] backed by `surface`.
    pub fn build(&self, surface: impl ItemSurface + 'static) -> Item {
        let mut item = Item::new(self.label.clone(), surface)
            .with_expanded(self.expanded.unwrap_or(false))
            .with_always_visible(self.always_visible)
            .with_closable(self.closable)
            .with_content_height(self.content_height);
        if let Some(animation) = self.animation {
            item = item.with_animation(animation.into());
        }
        item
    }
}

/// Container-wide accordion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccordionConfig {
    /// Whether expand/collapse transitions are animated.
    pub use_animation: bool,
    /// Default animation for items without an override.
    pub animation: AnimationSettings,
    /// Whether expanding an item collapses every other unpinned item.
    pub collapse_others_on_expand: bool,
    /// Whether items may be reordered by drag and drop.
    pub reorder_items: bool,
    /// Legacy quirks rendering, where a closed body keeps a height of 1.
    pub quirks_mode: bool,
    /// Items declared up front.
    pub items: Vec<ItemSpec>,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            use_animation: true,
            animation: AnimationSettings::default(),
            collapse_others_on_expand: true,
            reorder_items: false,
            quirks_mode: false,
            items: Vec::new(),
        }
    }
}

impl AccordionConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| Error::parse("TOML", e.to_string()))?;
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, items = config.items.len(), "loaded TOML configuration");
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(source).map_err(|e| Error::parse("JSON", e.to_string()))?;
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, items = config.items.len(), "loaded JSON configuration");
        Ok(config)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Serialize {
            format: "TOML",
            message: e.to_string(),
        })
    }

    /// Check every declared item.
    pub fn validate(&self) -> Result<()> {
        self.items.iter().try_for_each(ItemSpec::validate)
    }

    /// The body height that represents "fully closed".
    pub fn collapsed_height(&self) -> f32 {
        if self.quirks_mode {
            QUIRKS_COLLAPSED_HEIGHT
        } else {
            COLLAPSED_HEIGHT
        }
    }

    /// Set whether transitions are animated.
    pub fn with_animation_enabled(mut self, enabled: bool) -> Self {
        self.use_animation = enabled;
        self
    }

    /// Set the default animation.
    pub fn with_animation(mut self, animation: AnimationSettings) -> Self {
        self.animation = animation;
        self
    }

    /// Set whether expanding collapses the other unpinned items.
    pub fn with_collapse_others_on_expand(mut self, collapse: bool) -> Self {
        self.collapse_others_on_expand = collapse;
        self
    }

    /// Set whether drag-and-drop reordering is enabled.
    pub fn with_reorder_items(mut self, reorder: bool) -> Self {
        self.reorder_items = reorder;
        self
    }

    /// Set legacy quirks rendering.
    pub fn with_quirks_mode(mut self, quirks: bool) -> Self {
        self.quirks_mode = quirks;
        self
    }

    /// Declare an item.
    pub fn with_item(mut self, item: ItemSpec) -> Self {
        self.items.push(item);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AccordionConfig::default();
        assert!(config.use_animation);
        assert!(config.collapse_others_on_expand);
        assert!(!config.reorder_items);
        assert_eq!(config.animation.duration(), Duration::from_secs(1));
        assert_eq!(config.animation.easing, Easing::EaseOutQuart);
        assert_eq!(config.collapsed_height(), 0.0);
    }

    #[test]
    fn test_quirks_collapsed_height() {
        let config = AccordionConfig::new().with_quirks_mode(true);
        assert_eq!(config.collapsed_height(), 1.0);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = AccordionConfig::from_toml_str("").unwrap();
        assert_eq!(config, AccordionConfig::default());
    }

    #[test]
    fn test_fixed_without_height_is_rejected() {
        let err = AccordionConfig::from_toml_str(
            r#"
            [[items]]
            label = "Broken"
            content_height = { method = "fixed" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse { format: "TOML", .. }));
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let result = AccordionConfig::from_toml_str(
            r#"
            [[items]]
            label = "Broken"
            content_height = { method = "fill" }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_pinned_but_collapsed_is_rejected() {
        let result = AccordionConfig::from_toml_str(
            r#"
            [[items]]
            label = "Pinned"
            always_visible = true
            expanded = false
            "#,
        );
        assert!(matches!(result, Err(Error::InvalidValue { .. })));
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let config = AccordionConfig::new().with_item(ItemSpec::new("  "));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_of_stretch_item() {
        let config = AccordionConfig::from_json_str(
            r#"{
                "use_animation": false,
                "items": [
                    { "label": "Log", "expanded": true, "content_height": { "method": "stretch" } }
                ]
            }"#,
        )
        .unwrap();
        assert!(!config.use_animation);
        assert_eq!(config.items[0].content_height, ContentHeight::Stretch);
        assert_eq!(config.items[0].expanded, Some(true));
    }

    #[test]
    fn test_to_toml_string_reloads() {
        let config = AccordionConfig::new()
            .with_reorder_items(true)
            .with_item(ItemSpec::new("A"));
        let text = config.to_toml_string().unwrap();
        assert_eq!(AccordionConfig::from_toml_str(&text).unwrap(), config);
    }
}
