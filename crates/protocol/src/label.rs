//! Board labels.
//!
//! Labels are defined per board, ordered like every other orderable
//! resource, and colored with one of Planka's named palette entries.
//!
//! # Example
//!
//! ```
//! use planka_protocol::label::{LABEL_COLORS, is_label_color};
//!
//! assert!(is_label_color("berry-red"));
//! assert!(!is_label_color("#ff0000"));
//! assert_eq!(LABEL_COLORS.len(), 42);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::position::{Position, Positioned, serde_position};

/// Named colors accepted by the server for labels.
pub const LABEL_COLORS: &[&str] = &[
    "muddy-grey",
    "autumn-leafs",
    "morning-sky",
    "antique-blue",
    "egg-yellow",
    "desert-sand",
    "dark-granite",
    "fresh-salad",
    "lagoon-blue",
    "midnight-blue",
    "light-orange",
    "pumpkin-orange",
    "light-concrete",
    "sunny-grass",
    "navy-blue",
    "lilac-eyes",
    "apricot-red",
    "orange-peel",
    "silver-glint",
    "bright-moss",
    "deep-ocean",
    "summer-sky",
    "berry-red",
    "light-cocoa",
    "grey-stone",
    "tank-green",
    "coral-green",
    "sugar-plum",
    "pink-tulip",
    "shady-rust",
    "wet-rock",
    "wet-moss",
    "turquoise-sea",
    "lavender-fields",
    "piggy-red",
    "light-mud",
    "gun-metal",
    "modern-green",
    "french-coast",
    "sweet-lilac",
    "red-burgundy",
    "pirate-gold",
];

/// Returns whether `color` is one of the server's named label colors.
#[must_use]
pub fn is_label_color(color: &str) -> bool {
    LABEL_COLORS.contains(&color)
}

/// A label defined on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Unique identifier.
    pub id: String,
    /// Owning board.
    pub board_id: String,
    /// Position among the board's labels.
    #[serde(deserialize_with = "serde_position::required")]
    pub position: Position,
    /// Display name; labels may be color-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Named palette color.
    pub color: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Positioned for Label {
    fn position(&self) -> Option<Position> {
        Some(self.position)
    }
}

impl Label {
    /// Returns whether this label looks the same as another one: same name
    /// and same color, regardless of board or position.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_protocol::Label;
    ///
    /// let a = Label {
    ///     id: "1".into(),
    ///     board_id: "b1".into(),
    ///     position: 65536,
    ///     name: Some("bug".into()),
    ///     color: "berry-red".into(),
    ///     created_at: None,
    ///     updated_at: None,
    /// };
    /// let b = Label { id: "2".into(), board_id: "b2".into(), position: 0, ..a.clone() };
    /// assert!(a.same_look(&b));
    /// ```
    #[must_use]
    pub fn same_look(&self, other: &Self) -> bool {
        self.name == other.name && self.color == other.color
    }
}

/// The attachment of a label to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLabel {
    /// Unique identifier.
    pub id: String,
    /// The labelled card.
    pub card_id: String,
    /// The attached label.
    pub label_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_no_duplicates() {
        let mut colors = LABEL_COLORS.to_vec();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), LABEL_COLORS.len());
    }

    #[test]
    fn color_only_label_parses() {
        let label: Label = serde_json::from_str(
            r#"{"id": "5", "boardId": "1", "position": 65536, "name": null, "color": "wet-moss"}"#,
        )
        .unwrap();
        assert!(label.name.is_none());
        assert!(is_label_color(&label.color));
    }

    #[test]
    fn same_look_requires_matching_color() {
        let label: Label = serde_json::from_str(
            r#"{"id": "5", "boardId": "1", "position": 1, "name": "ops", "color": "wet-moss"}"#,
        )
        .unwrap();
        let mut other = label.clone();
        other.color = "berry-red".to_string();
        assert!(!label.same_look(&other));
    }
}
