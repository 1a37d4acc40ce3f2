//! Rent types a search may carry.
//!
//! Rent types are echoed back with the results. Like the budget, they take no
//! part in scoring.

use thiserror::Error;

/// Unit size a searcher is looking to rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RentType {
    /// Single-room unit.
    #[cfg_attr(feature = "serde", serde(rename = "studio"))]
    Studio,
    /// One bedroom.
    #[cfg_attr(feature = "serde", serde(rename = "One Bed"))]
    OneBed,
    /// Two bedrooms.
    #[cfg_attr(feature = "serde", serde(rename = "Two Bed"))]
    TwoBed,
    /// Three bedrooms.
    #[cfg_attr(feature = "serde", serde(rename = "Three Bed"))]
    ThreeBed,
}

impl RentType {
    /// Every rent type, smallest first.
    pub const ALL: [Self; 4] = [Self::Studio, Self::OneBed, Self::TwoBed, Self::ThreeBed];

    /// Return the wire name, e.g. `"One Bed"`.
    ///
    /// # Examples
    /// ```
    /// use matchmaker_core::RentType;
    ///
    /// assert_eq!(RentType::TwoBed.as_str(), "Two Bed");
    /// assert_eq!("two bed".parse::<RentType>(), Ok(RentType::TwoBed));
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::OneBed => "One Bed",
            Self::TwoBed => "Two Bed",
            Self::ThreeBed => "Three Bed",
        }
    }
}

impl std::fmt::Display for RentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown rent type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rent type '{0}'")]
pub struct ParseRentTypeError(pub String);

impl std::str::FromStr for RentType {
    type Err = ParseRentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|rent| rent.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseRentTypeError(s.to_owned()))
    }
}
