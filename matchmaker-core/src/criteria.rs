//! Search criteria supplied by the caller.

use thiserror::Error;

use crate::{AmenityKind, Neighborhood, NeighborhoodId, RentType};

/// Reference to a preferred neighborhood by identifier or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum NeighborhoodRef {
    /// Directory identifier.
    Id(NeighborhoodId),
    /// Exact display name.
    Name(String),
}

impl NeighborhoodRef {
    /// Whether this reference designates `neighborhood`.
    #[must_use]
    pub fn matches(&self, neighborhood: &Neighborhood) -> bool {
        match self {
            Self::Id(id) => *id == neighborhood.id,
            Self::Name(name) => *name == neighborhood.name,
        }
    }
}

/// How amenity counts are turned into a sub-score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmenityPolicy {
    /// Score only the kinds the user asked for.
    Targeted(Vec<AmenityKind>),
    /// Score every kind and reward breadth of offering.
    Dynamic,
}

impl AmenityPolicy {
    /// Kinds whose counts the policy reads.
    #[must_use]
    pub fn kinds(&self) -> &[AmenityKind] {
        match self {
            Self::Targeted(kinds) => kinds,
            Self::Dynamic => &AmenityKind::ALL,
        }
    }
}

/// User preferences driving a neighborhood search.
///
/// `budget` and `rent_types` are echoed in results but are not used by the
/// scoring engine; filtering on them, if any, happens upstream.
///
/// # Examples
/// ```
/// use matchmaker_core::{AmenityKind, AmenityPolicy, SearchCriteria};
///
/// let criteria = SearchCriteria::new("Montreal", 1500)
///     .with_amenities([AmenityKind::Grocery, AmenityKind::Park, AmenityKind::Grocery]);
/// assert!(criteria.validate().is_ok());
/// assert_eq!(
///     criteria.amenity_policy(),
///     AmenityPolicy::Targeted(vec![AmenityKind::Grocery, AmenityKind::Park])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCriteria {
    /// City whose neighborhoods are ranked.
    pub city: String,
    /// Neighborhoods that earn the preference bonus.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_neighborhoods: Vec<NeighborhoodRef>,
    /// Requested amenity kinds; empty means "consider all kinds".
    #[cfg_attr(feature = "serde", serde(default))]
    pub amenities: Vec<AmenityKind>,
    /// Name of the neighborhood the user commutes to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub destination: Option<String>,
    /// Longest acceptable commute in minutes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_commute_minutes: Option<u32>,
    /// Monthly budget.
    pub budget: u32,
    /// Unit sizes the searcher is interested in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rent_types: Vec<RentType>,
}

/// Reasons a [`SearchCriteria`] is rejected before scoring begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchCriteriaError {
    /// The city was empty or whitespace.
    #[error("city must not be blank")]
    BlankCity,
    /// The destination was supplied but empty or whitespace.
    #[error("destination must not be blank when supplied")]
    BlankDestination,
    /// A preferred neighborhood name was empty or whitespace.
    #[error("preferred neighborhood names must not be blank")]
    BlankPreferredName,
    /// The maximum commute was zero.
    #[error("max commute must be at least one minute")]
    ZeroMaxCommute,
}

impl SearchCriteria {
    /// Construct criteria for `city` with no optional preferences.
    #[must_use]
    pub fn new(city: impl Into<String>, budget: u32) -> Self {
        Self {
            city: city.into(),
            preferred_neighborhoods: Vec::new(),
            amenities: Vec::new(),
            destination: None,
            max_commute_minutes: None,
            budget,
            rent_types: Vec::new(),
        }
    }

    /// Set the requested amenity kinds.
    #[must_use]
    pub fn with_amenities(mut self, amenities: impl IntoIterator<Item = AmenityKind>) -> Self {
        self.amenities = amenities.into_iter().collect();
        self
    }

    /// Add a preferred neighborhood.
    #[must_use]
    pub fn with_preferred(mut self, preferred: NeighborhoodRef) -> Self {
        self.preferred_neighborhoods.push(preferred);
        self
    }

    /// Set the commute destination by neighborhood name.
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Set the maximum acceptable commute in minutes.
    #[must_use]
    pub const fn with_max_commute(mut self, minutes: u32) -> Self {
        self.max_commute_minutes = Some(minutes);
        self
    }

    /// Set the rent types carried with the search.
    #[must_use]
    pub fn with_rent_types(mut self, rent_types: impl IntoIterator<Item = RentType>) -> Self {
        self.rent_types = rent_types.into_iter().collect();
        self
    }

    /// Check the criteria for malformed fields.
    ///
    /// # Errors
    /// Returns the first [`SearchCriteriaError`] found.
    pub fn validate(&self) -> Result<(), SearchCriteriaError> {
        if self.city.trim().is_empty() {
            return Err(SearchCriteriaError::BlankCity);
        }
        if self
            .destination
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(SearchCriteriaError::BlankDestination);
        }
        let blank_name = self
            .preferred_neighborhoods
            .iter()
            .any(|entry| matches!(entry, NeighborhoodRef::Name(name) if name.trim().is_empty()));
        if blank_name {
            return Err(SearchCriteriaError::BlankPreferredName);
        }
        if self.max_commute_minutes == Some(0) {
            return Err(SearchCriteriaError::ZeroMaxCommute);
        }
        Ok(())
    }

    /// Select the amenity policy implied by the requested kinds.
    ///
    /// Duplicate kinds are dropped, keeping the first occurrence.
    #[must_use]
    pub fn amenity_policy(&self) -> AmenityPolicy {
        if self.amenities.is_empty() {
            return AmenityPolicy::Dynamic;
        }
        let mut kinds = Vec::with_capacity(self.amenities.len());
        for kind in &self.amenities {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        AmenityPolicy::Targeted(kinds)
    }

    /// Whether `neighborhood` appears in the preferred list.
    #[must_use]
    pub fn is_preferred(&self, neighborhood: &Neighborhood) -> bool {
        self.preferred_neighborhoods
            .iter()
            .any(|entry| entry.matches(neighborhood))
    }
}
