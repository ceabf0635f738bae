//! Constraint region matching.
//!
//! A candidate stop passes when it lies inside any of the requested regions.
//! "Inside" is decided two ways: the region text appears in the point's
//! country or name, or the point lies within a radius of the place the
//! region text geocodes to (its anchor). Country anchors are matched by name
//! only, since a radius around a country's centroid spills over its borders.
//! With no regions every point passes.

use tracing::{debug, warn};

use crate::domain::{ConstraintRegion, GeoPoint};
use crate::maps::MappingService;

use super::error::PlanError;
use super::resolver::LocationResolver;

/// Decides whether a point's names fall inside a region's text.
pub trait RegionMatcher {
    fn matches_text(&self, point: &GeoPoint, region: &ConstraintRegion) -> bool;
}

/// Case-insensitive substring match against country and display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl RegionMatcher for SubstringMatcher {
    fn matches_text(&self, point: &GeoPoint, region: &ConstraintRegion) -> bool {
        let needle = region.raw_text().to_lowercase();
        point.country.to_lowercase().contains(&needle)
            || point.display_name.to_lowercase().contains(&needle)
    }
}

/// Text-only form of the filter: true when `regions` is empty or any
/// region's text matches the point.
pub fn matches<R: RegionMatcher>(point: &GeoPoint, regions: &[ConstraintRegion], matcher: &R) -> bool {
    regions.is_empty() || regions.iter().any(|r| matcher.matches_text(point, r))
}

/// A region together with the point its text geocoded to, if any.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub region: ConstraintRegion,
    pub point: Option<GeoPoint>,
}

impl Anchor {
    /// The anchor point when radius matching applies to it.
    fn radius_point(&self) -> Option<&GeoPoint> {
        self.point.as_ref().filter(|p| !is_country_level(p))
    }
}

/// A geocoded country names itself: its formatted address is the country.
fn is_country_level(point: &GeoPoint) -> bool {
    let country = point.country.trim();
    !country.is_empty() && point.display_name.trim().eq_ignore_ascii_case(country)
}

/// Constraint filter with materialized anchors.
///
/// Built once per generation run; the predicate is pure afterwards.
#[derive(Debug, Clone)]
pub struct ConstraintFilter<R = SubstringMatcher> {
    anchors: Vec<Anchor>,
    radius_km: f64,
    matcher: R,
}

impl ConstraintFilter<SubstringMatcher> {
    /// A filter over pre-resolved anchors.
    pub fn new(anchors: Vec<Anchor>, radius_km: f64) -> Self {
        Self {
            anchors,
            radius_km,
            matcher: SubstringMatcher,
        }
    }

    /// Geocode each region to an anchor point.
    ///
    /// A region that geocodes to nothing keeps text matching only, and a
    /// warning is appended to `warnings`.
    pub async fn materialize<M: MappingService>(
        resolver: &LocationResolver<'_, M>,
        regions: &[ConstraintRegion],
        radius_km: f64,
        warnings: &mut Vec<String>,
    ) -> Result<Self, PlanError> {
        let mut anchors = Vec::with_capacity(regions.len());

        for region in regions {
            let point = resolver
                .lookup(region.raw_text())
                .await
                .map_err(PlanError::mapping_for("constraint lookup", region.raw_text()))?;

            match &point {
                Some(p) => debug!(region = %region, anchor = %p, "constraint anchor resolved"),
                None => {
                    warn!(region = %region, "constraint region could not be located");
                    warnings.push(format!(
                        "constraint region {:?} could not be located; matching by name only",
                        region.raw_text()
                    ));
                }
            }

            anchors.push(Anchor {
                region: region.clone(),
                point,
            });
        }

        Ok(Self::new(anchors, radius_km))
    }
}

impl<R: RegionMatcher> ConstraintFilter<R> {
    /// Swap the text-matching rule.
    pub fn with_matcher<U: RegionMatcher>(self, matcher: U) -> ConstraintFilter<U> {
        ConstraintFilter {
            anchors: self.anchors,
            radius_km: self.radius_km,
            matcher,
        }
    }

    /// Whether the filter accepts everything.
    pub fn is_unconstrained(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Whether `point` lies inside any region.
    pub fn matches(&self, point: &GeoPoint) -> bool {
        if self.is_unconstrained() {
            return true;
        }

        self.anchors.iter().any(|anchor| {
            self.matcher.matches_text(point, &anchor.region)
                || anchor
                    .radius_point()
                    .is_some_and(|a| a.distance_km(point) <= self.radius_km)
        })
    }
}
