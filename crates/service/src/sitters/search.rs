//! Sitter search: filtering and ranking over loaded candidates.
//!
//! The store only narrows candidates to available sitters; every other rule
//! is applied here so the ranking is the same on every database backend.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Deserialize;

use models::pet_sitter;
use models::pet_sitter_service::{self, ServiceType};

use super::geo::{haversine_miles, within_box, GeoPoint};

pub const DEFAULT_RADIUS_MILES: f64 = 25.0;
pub const MAX_RESULTS: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SitterSearch {
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_in_miles: Option<f64>,
    pub service_type: Option<ServiceType>,
    pub max_price: Option<Decimal>,
}

impl SitterSearch {
    pub fn origin(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }

    pub fn radius(&self) -> f64 {
        self.radius_in_miles.unwrap_or(DEFAULT_RADIUS_MILES)
    }
}

/// An available sitter with all of its services.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub sitter: pet_sitter::Model,
    pub services: Vec<pet_sitter_service::Model>,
}

#[derive(Debug, Clone)]
pub struct Ranked {
    pub sitter: pet_sitter::Model,
    pub services: Vec<pet_sitter_service::Model>,
    pub distance_in_miles: Option<f64>,
}

fn matches_location(sitter: &pet_sitter::Model, location: &str) -> bool {
    [&sitter.city, &sitter.state, &sitter.zip_code]
        .into_iter()
        .flatten()
        .any(|field| field.contains(location))
}

fn sitter_point(sitter: &pet_sitter::Model) -> Option<GeoPoint> {
    GeoPoint::from_parts(sitter.latitude, sitter.longitude)
}

fn offers_active(services: &[pet_sitter_service::Model], service_type: ServiceType) -> bool {
    services.iter().any(|s| s.is_active && s.service_type == service_type)
}

fn any_rate_within(sitter: &pet_sitter::Model, max_price: Decimal) -> bool {
    [sitter.hourly_rate, sitter.daily_rate, sitter.overnight_rate]
        .into_iter()
        .flatten()
        .any(|rate| rate <= max_price)
}

/// Rules that only look at the profile row: availability, location, geo
/// box and price ceiling.
pub fn matches_profile(sitter: &pet_sitter::Model, q: &SitterSearch, origin: Option<GeoPoint>) -> bool {
    if !sitter.is_available {
        return false;
    }
    if let Some(location) = q.location.as_deref().filter(|l| !l.is_empty()) {
        if !matches_location(sitter, location) {
            return false;
        }
    }
    if let Some(center) = origin {
        match sitter_point(sitter) {
            Some(p) if within_box(center, p, q.radius()) => {}
            _ => return false,
        }
    }
    if let Some(max_price) = q.max_price {
        if !any_rate_within(sitter, max_price) {
            return false;
        }
    }
    true
}

fn matches(c: &Candidate, q: &SitterSearch, origin: Option<GeoPoint>) -> bool {
    if !matches_profile(&c.sitter, q, origin) {
        return false;
    }
    match q.service_type {
        Some(service_type) => offers_active(&c.services, service_type),
        None => true,
    }
}

/// Higher rating first, star sitters ahead on ties.
fn by_rating(a: &pet_sitter::Model, b: &pet_sitter::Model) -> Ordering {
    b.average_rating
        .total_cmp(&a.average_rating)
        .then_with(|| b.is_star_sitter.cmp(&a.is_star_sitter))
}

/// Filter, order by rating, keep the top [`MAX_RESULTS`] and, when the query
/// has a point, re-order those by distance.
pub fn rank(candidates: Vec<Candidate>, q: &SitterSearch) -> Vec<Ranked> {
    let origin = q.origin();
    let mut hits: Vec<Candidate> = candidates.into_iter().filter(|c| matches(c, q, origin)).collect();
    hits.sort_by(|a, b| by_rating(&a.sitter, &b.sitter));
    hits.truncate(MAX_RESULTS);

    let mut ranked: Vec<Ranked> = hits
        .into_iter()
        .map(|c| {
            let distance_in_miles = origin.zip(sitter_point(&c.sitter)).map(|(o, p)| haversine_miles(o, p));
            Ranked { sitter: c.sitter, services: c.services, distance_in_miles }
        })
        .collect();

    if origin.is_some() {
        ranked.sort_by(|a, b| {
            a.distance_in_miles
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.distance_in_miles.unwrap_or(f64::INFINITY))
        });
    }
    ranked
}
