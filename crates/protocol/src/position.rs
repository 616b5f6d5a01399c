//! Gap-based ordering for reorderable kanban items.
//!
//! Every orderable Planka resource (boards, lists, cards, labels, task lists,
//! tasks, custom field groups and custom fields) carries an integer
//! `position`. Siblings sort ascending by position; the sequence only has to
//! be monotonic, never contiguous. New items are appended one gap after the
//! current maximum so later inserts fit in between without renumbering.
//!
//! # Examples
//!
//! ```
//! use planka_protocol::{Placement, get_position};
//!
//! let siblings = [65_536_i64, 131_072, 196_608];
//! assert_eq!(get_position(&siblings, Placement::Bottom).unwrap(), 262_144);
//! assert_eq!(get_position(&siblings, Placement::Top).unwrap(), 0);
//! assert_eq!(get_position(&siblings, Placement::Exact(42)).unwrap(), 42);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ProtocolError, Result};

/// Relative order of an item within its sibling group. Lower sorts first.
pub type Position = i64;

/// Spacing between adjacent items appended at the bottom of a group.
pub const POSITION_GAP: Position = 65_536;

/// The spacing used when appending items and converting indexes.
///
/// Two SDK generations disagree on the gap: current Planka servers space
/// items by 65536, while data written by older clients uses 65535. The gap
/// only affects spacing, never validity, but every client writing to the
/// same server should agree on it.
///
/// # Examples
///
/// ```
/// use planka_protocol::PositionGap;
///
/// assert_eq!(PositionGap::default(), PositionGap::CURRENT);
/// assert_eq!(PositionGap::LEGACY.get(), 65_535);
/// assert!(PositionGap::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PositionGap(Position);

impl PositionGap {
    /// The gap used by current Planka servers (65536).
    pub const CURRENT: Self = Self(POSITION_GAP);

    /// The gap used by legacy clients (65535).
    pub const LEGACY: Self = Self(65_535);

    /// Creates a gap, rejecting zero and negative values.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidGap`] if `gap <= 0`.
    pub fn new(gap: Position) -> Result<Self> {
        if gap <= 0 {
            return Err(ProtocolError::InvalidGap(gap));
        }
        Ok(Self(gap))
    }

    /// Returns the raw gap value.
    #[must_use]
    pub const fn get(self) -> Position {
        self.0
    }

    /// Computes the position to submit for a new or relocated item.
    ///
    /// - [`Placement::Exact`] is returned unchanged.
    /// - [`Placement::Top`] is always `0`. Siblings conventionally start at
    ///   one gap, which leaves `0` free; it is not computed against the
    ///   current minimum.
    /// - [`Placement::Bottom`] is the largest sibling position plus one gap,
    ///   or exactly one gap for an empty group.
    ///
    /// The snapshot is only read; it is neither mutated nor retained.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::InvalidPlacement`] for a negative exact position.
    /// - [`ProtocolError::MissingSiblingPosition`] or
    ///   [`ProtocolError::InvalidSiblingPosition`] when a bottom placement
    ///   meets a sibling without a usable position.
    /// - [`ProtocolError::PositionOverflow`] if the result leaves `i64`.
    pub fn resolve<T: Positioned>(self, siblings: &[T], placement: Placement) -> Result<Position> {
        match placement {
            Placement::Exact(position) if position < 0 => {
                Err(ProtocolError::InvalidPlacement(position.to_string()))
            }
            Placement::Exact(position) => Ok(position),
            Placement::Top => Ok(0),
            Placement::Bottom => max_position(siblings)?
                .unwrap_or(0)
                .checked_add(self.0)
                .ok_or(ProtocolError::PositionOverflow),
        }
    }

    /// Converts a normalized index (1, 2, 3, ...) to a raw position.
    ///
    /// Returns `index * gap`, minus one when `zero_indexed` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::PositionOverflow`] if the product leaves `i64`.
    pub fn index_to_position(self, index: i64, zero_indexed: bool) -> Result<Position> {
        index
            .checked_mul(self.0)
            .and_then(|position| position.checked_sub(i64::from(zero_indexed)))
            .ok_or(ProtocolError::PositionOverflow)
    }

    /// Converts a raw position back to a normalized index.
    ///
    /// Returns `floor(position / gap)`, minus one when `zero_indexed` is set.
    /// A position of exactly half a gap always maps to index `1`, whether or
    /// not `zero_indexed` is set: historical data contains such half-gap
    /// positions for items that were inserted next to each other many times.
    ///
    /// With an odd gap the half-gap is fractional (`32767.5` for the legacy
    /// gap). Positions are truncated when read from the server, so the
    /// half-gap is compared in its truncated form, `gap / 2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_protocol::PositionGap;
    ///
    /// assert_eq!(PositionGap::CURRENT.position_to_index(32_768, false), 1);
    /// assert_eq!(PositionGap::LEGACY.position_to_index(32_767, true), 1);
    /// assert_eq!(PositionGap::LEGACY.position_to_index(131_070, false), 2);
    /// ```
    #[must_use]
    pub fn position_to_index(self, position: Position, zero_indexed: bool) -> i64 {
        if position > 0 && position == self.half() {
            return 1;
        }
        position.div_euclid(self.0) - i64::from(zero_indexed)
    }

    /// Half a gap, truncated toward zero.
    const fn half(self) -> Position {
        self.0 / 2
    }

    /// Returns `count` positions spaced one gap apart, starting at one gap.
    ///
    /// Used to rewrite a whole group after reordering it locally.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::PositionOverflow`] if the last position
    /// leaves `i64`.
    pub fn evenly_spaced(self, count: usize) -> Result<Vec<Position>> {
        (1..=count)
            .map(|index| {
                let index = i64::try_from(index).map_err(|_| ProtocolError::PositionOverflow)?;
                self.index_to_position(index, false)
            })
            .collect()
    }
}

impl Default for PositionGap {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for PositionGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for PositionGap {
    type Error = ProtocolError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PositionGap> for i64 {
    fn from(gap: PositionGap) -> Self {
        gap.0
    }
}

/// Where to put a new or relocated item within its sibling group.
///
/// On the wire and in configuration a placement is the token `"top"`, the
/// token `"bottom"`, or a non-negative integer.
///
/// # Examples
///
/// ```
/// use planka_protocol::Placement;
///
/// assert_eq!("top".parse::<Placement>().unwrap(), Placement::Top);
/// assert_eq!("100000".parse::<Placement>().unwrap(), Placement::Exact(100_000));
/// assert!("middle".parse::<Placement>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Before every existing sibling (position `0`).
    Top,
    /// After every existing sibling, one gap past the maximum.
    Bottom,
    /// An exact position, passed through unchanged.
    Exact(Position),
}

impl From<Position> for Placement {
    fn from(position: Position) -> Self {
        Self::Exact(position)
    }
}

impl FromStr for Placement {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => match other.parse::<Position>() {
                Ok(position) if position >= 0 => Ok(Self::Exact(position)),
                _ => Err(ProtocolError::InvalidPlacement(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
            Self::Exact(position) => write!(f, "{position}"),
        }
    }
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Top => serializer.serialize_str("top"),
            Self::Bottom => serializer.serialize_str("bottom"),
            Self::Exact(position) => serializer.serialize_i64(*position),
        }
    }
}

impl<'de> Deserialize<'de> for Placement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Position(Position),
            Token(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Position(position) if position >= 0 => Ok(Self::Exact(position)),
            Raw::Position(position) => Err(serde::de::Error::custom(
                ProtocolError::InvalidPlacement(position.to_string()),
            )),
            Raw::Token(token) => token.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// An item that occupies a slot in an ordered sibling group.
///
/// `None` means the item has no usable position (for example a card sitting
/// in a trash list).
pub trait Positioned {
    /// Returns the item's position, if it has one.
    fn position(&self) -> Option<Position>;
}

impl Positioned for Position {
    fn position(&self) -> Option<Position> {
        Some(*self)
    }
}

impl Positioned for Option<Position> {
    fn position(&self) -> Option<Position> {
        *self
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn position(&self) -> Option<Position> {
        (**self).position()
    }
}

/// Returns the largest position in the snapshot, or `None` when it is empty.
fn max_position<T: Positioned>(siblings: &[T]) -> Result<Option<Position>> {
    let mut max = None;
    for (index, sibling) in siblings.iter().enumerate() {
        let position = sibling
            .position()
            .ok_or(ProtocolError::MissingSiblingPosition { index })?;
        if position < 0 {
            return Err(ProtocolError::InvalidSiblingPosition { index, position });
        }
        max = max.max(Some(position));
    }
    Ok(max)
}

/// Computes a position using the current gap. See [`PositionGap::resolve`].
///
/// # Errors
///
/// See [`PositionGap::resolve`].
pub fn get_position<T: Positioned>(siblings: &[T], placement: Placement) -> Result<Position> {
    PositionGap::CURRENT.resolve(siblings, placement)
}

/// Converts an index to a position using the current gap.
///
/// # Errors
///
/// See [`PositionGap::index_to_position`].
pub fn index_to_position(index: i64, zero_indexed: bool) -> Result<Position> {
    PositionGap::CURRENT.index_to_position(index, zero_indexed)
}

/// Converts a position to an index using the current gap.
#[must_use]
pub fn position_to_index(position: Position, zero_indexed: bool) -> i64 {
    PositionGap::CURRENT.position_to_index(position, zero_indexed)
}

/// Sorts a snapshot ascending by position. Items without a position go first.
pub fn sort_by_position<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(Positioned::position);
}

/// Serde helpers for position fields.
///
/// Planka reports positions as JSON numbers which may carry a fractional
/// part. Fractions are truncated toward zero.
pub(crate) mod serde_position {
    use serde::{Deserialize, Deserializer};

    use super::Position;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
    }

    impl Raw {
        #[allow(clippy::cast_possible_truncation)]
        fn into_position(self) -> Position {
            match self {
                Self::Int(value) => value,
                Self::Float(value) => value.trunc() as Position,
            }
        }
    }

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Position, D::Error> {
        Raw::deserialize(deserializer).map(Raw::into_position)
    }

    pub fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Position>, D::Error> {
        Ok(Option::<Raw>::deserialize(deserializer)?.map(Raw::into_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_of_three_lists() {
        let siblings = [65_536_i64, 131_072, 196_608];
        assert_eq!(get_position(&siblings, Placement::Bottom).unwrap(), 262_144);
        assert_eq!(get_position(&siblings, Placement::Top).unwrap(), 0);
    }

    #[test]
    fn bottom_of_empty_group_is_one_gap() {
        let siblings: [Position; 0] = [];
        assert_eq!(get_position(&siblings, Placement::Bottom).unwrap(), 65_536);
    }

    #[test]
    fn bottom_uses_maximum_not_last() {
        let siblings = [196_608_i64, 65_536, 131_072];
        assert_eq!(get_position(&siblings, Placement::Bottom).unwrap(), 262_144);
    }

    #[test]
    fn bottom_with_legacy_gap() {
        let siblings = [65_535_i64, 131_070];
        assert_eq!(
            PositionGap::LEGACY
                .resolve(&siblings, Placement::Bottom)
                .unwrap(),
            196_605
        );
    }

    #[test]
    fn exact_is_passed_through() {
        let siblings = [65_536_i64];
        assert_eq!(get_position(&siblings, Placement::Exact(42)).unwrap(), 42);
        assert_eq!(
            get_position(&siblings, Placement::Exact(100_000)).unwrap(),
            100_000
        );
    }

    #[test]
    fn negative_exact_is_rejected() {
        let siblings: [Position; 0] = [];
        let err = get_position(&siblings, Placement::Exact(-1)).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPlacement(_)));
    }

    #[test]
    fn top_ignores_unusable_siblings() {
        let siblings = [None, Some(-5)];
        assert_eq!(get_position(&siblings, Placement::Top).unwrap(), 0);
    }

    #[test]
    fn bottom_rejects_missing_position() {
        let siblings = [Some(65_536), None];
        let err = get_position(&siblings, Placement::Bottom).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MissingSiblingPosition { index: 1 }
        ));
    }

    #[test]
    fn bottom_rejects_negative_position() {
        let siblings = [-3_i64];
        let err = get_position(&siblings, Placement::Bottom).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidSiblingPosition {
                index: 0,
                position: -3
            }
        ));
    }

    #[test]
    fn bottom_overflow_is_reported() {
        let siblings = [i64::MAX];
        let err = get_position(&siblings, Placement::Bottom).unwrap_err();
        assert!(matches!(err, ProtocolError::PositionOverflow));
    }

    #[test]
    fn half_gap_maps_to_index_one() {
        assert_eq!(position_to_index(POSITION_GAP / 2, false), 1);
        assert_eq!(position_to_index(POSITION_GAP / 2, true), 1);
    }

    #[test]
    fn legacy_half_gap_maps_to_index_one() {
        let gap = PositionGap::LEGACY;
        assert_eq!(gap.position_to_index(32_767, false), 1);
        assert_eq!(gap.position_to_index(32_767, true), 1);
        assert_eq!(gap.position_to_index(32_766, false), 0);
    }

    #[test]
    fn fractional_legacy_half_gap_from_server() {
        let task: crate::Task = serde_json::from_str(
            r#"{"id": "6001", "taskListId": "5001", "position": 32767.5, "name": "a"}"#,
        )
        .unwrap();
        assert_eq!(PositionGap::LEGACY.position_to_index(task.position, false), 1);
        assert_eq!(PositionGap::LEGACY.position_to_index(task.position, true), 1);
    }

    #[test]
    fn unit_gap_has_no_half_gap() {
        let gap = PositionGap::new(1).unwrap();
        assert_eq!(gap.position_to_index(0, false), 0);
        assert_eq!(gap.position_to_index(3, false), 3);
    }

    #[test]
    fn index_conversion_examples() {
        assert_eq!(index_to_position(1, false).unwrap(), 65_536);
        assert_eq!(index_to_position(3, false).unwrap(), 196_608);
        assert_eq!(index_to_position(1, true).unwrap(), 65_535);
        assert_eq!(position_to_index(131_072, false), 2);
        assert_eq!(position_to_index(131_072, true), 1);
        assert_eq!(position_to_index(0, false), 0);
    }

    #[test]
    fn legacy_gap_index_conversion() {
        let gap = PositionGap::LEGACY;
        assert_eq!(gap.index_to_position(2, false).unwrap(), 131_070);
        assert_eq!(gap.position_to_index(196_605, false), 3);
    }

    #[test]
    fn evenly_spaced_positions() {
        assert_eq!(
            PositionGap::CURRENT.evenly_spaced(3).unwrap(),
            vec![65_536, 131_072, 196_608]
        );
        assert!(PositionGap::CURRENT.evenly_spaced(0).unwrap().is_empty());
    }

    #[test]
    fn sort_by_position_puts_missing_first() {
        let mut items = vec![Some(3), None, Some(1)];
        sort_by_position(&mut items);
        assert_eq!(items, vec![None, Some(1), Some(3)]);
    }

    #[test]
    fn placement_parse_and_display() {
        assert_eq!(" bottom ".parse::<Placement>().unwrap(), Placement::Bottom);
        assert_eq!(Placement::Top.to_string(), "top");
        assert_eq!(Placement::Exact(7).to_string(), "7");
        assert!("-1".parse::<Placement>().is_err());
        assert!("TOP".parse::<Placement>().is_err());
    }

    #[test]
    fn placement_serde_tokens() {
        assert_eq!(serde_json::to_string(&Placement::Top).unwrap(), "\"top\"");
        assert_eq!(serde_json::to_string(&Placement::Exact(5)).unwrap(), "5");

        let parsed: Placement = serde_json::from_str("\"bottom\"").unwrap();
        assert_eq!(parsed, Placement::Bottom);
        let parsed: Placement = serde_json::from_str("65536").unwrap();
        assert_eq!(parsed, Placement::Exact(65_536));
        assert!(serde_json::from_str::<Placement>("\"sideways\"").is_err());
        assert!(serde_json::from_str::<Placement>("-2").is_err());
    }

    #[test]
    fn gap_serde_rejects_non_positive() {
        let gap: PositionGap = serde_json::from_str("65535").unwrap();
        assert_eq!(gap, PositionGap::LEGACY);
        assert!(serde_json::from_str::<PositionGap>("0").is_err());
    }
}
