//! Canonical trip catalog
//!
//! Single source of truth for the trip offerings the site sells. The admin
//! availability editor, deposit settings page, and contact form all iterate
//! this list, so slugs stay stable across the YAML file, the database, and
//! query parameters.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripCategory {
    Fishing,
    Hunting,
    Packages,
}

impl fmt::Display for TripCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripCategory::Fishing => write!(f, "Fishing"),
            TripCategory::Hunting => write!(f, "Hunting"),
            TripCategory::Packages => write!(f, "Packages"),
        }
    }
}

/// Display info for one trip slug.
#[derive(Debug, Clone, Copy)]
pub struct TripInfo {
    pub slug: &'static str,
    pub name: &'static str,
    pub category: TripCategory,
}

/// Canonical order and display names, grouped by category.
const TRIP_CATALOG: &[TripInfo] = &[
    TripInfo { slug: "jet-boat", name: "Jet Boat Trips", category: TripCategory::Fishing },
    TripInfo { slug: "drift-boat", name: "Drift Boat Trips", category: TripCategory::Fishing },
    TripInfo { slug: "lake", name: "Lake Trips", category: TripCategory::Fishing },
    TripInfo { slug: "wade", name: "Wade Trips", category: TripCategory::Fishing },
    TripInfo { slug: "specialty", name: "Specialty Trips", category: TripCategory::Fishing },
    TripInfo { slug: "elk-hunting", name: "Elk Hunts", category: TripCategory::Hunting },
    TripInfo { slug: "deer-hunting", name: "Deer Hunts", category: TripCategory::Hunting },
    TripInfo { slug: "bear-hunting", name: "Bear Hunts", category: TripCategory::Hunting },
    TripInfo { slug: "antelope-hunting", name: "Antelope Hunts", category: TripCategory::Hunting },
    TripInfo { slug: "triple-header", name: "Montana Triple Header", category: TripCategory::Packages },
    TripInfo { slug: "six-pack", name: "Montana 6-Pack", category: TripCategory::Packages },
];

/// Returns the full catalog in canonical display order.
pub fn trip_catalog() -> &'static [TripInfo] {
    TRIP_CATALOG
}

/// Maps a trip slug to its human-readable name, falling back to the slug
/// itself for unknown values (the contact form accepts any ?trip= param).
pub fn display_name(slug: &str) -> &str {
    TRIP_CATALOG
        .iter()
        .find(|t| t.slug == slug)
        .map(|t| t.name)
        .unwrap_or(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_slugs_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for t in trip_catalog() {
            assert!(seen.insert(t.slug), "duplicate slug {}", t.slug);
        }
    }

    #[test]
    fn display_name_known_and_unknown() {
        assert_eq!(display_name("jet-boat"), "Jet Boat Trips");
        assert_eq!(display_name("not-a-trip"), "not-a-trip");
    }

    #[test]
    fn catalog_is_grouped_by_category() {
        // Categories must not interleave; the admin editor renders one
        // section per category in catalog order.
        let mut last: Option<TripCategory> = None;
        let mut finished = std::collections::HashSet::new();
        for t in trip_catalog() {
            if Some(t.category) != last {
                assert!(finished.insert(t.category), "category {} interleaved", t.category);
                last = Some(t.category);
            }
        }
    }
}
