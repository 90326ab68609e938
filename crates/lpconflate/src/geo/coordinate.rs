//! Validated longitude/latitude pairs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a longitude/latitude pair could not be turned into a [`Coordinate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Only one of the two fields was filled in.
    #[error("incomplete coordinate pair (lon '{lon}', lat '{lat}')")]
    Incomplete { lon: String, lat: String },

    /// A field is not a finite number.
    #[error("{field} '{value}' is not a number")]
    NotNumeric { field: &'static str, value: String },

    /// The values parse but fall outside the WGS84 range.
    #[error("coordinate ({lon}, {lat}) out of range")]
    OutOfRange { lon: f64, lat: f64 },
}

/// A point on the globe in `(longitude, latitude)` order, as GeoJSON uses.
///
/// Constructing one always checks `-180 ≤ lon ≤ 180` and `-90 ≤ lat ≤ 90`, so
/// any `Coordinate` in hand is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite and out-of-range values.
    pub fn new(lon: f64, lat: f64) -> Result<Self, CoordinateError> {
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) || !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::OutOfRange { lon, lat });
        }
        Ok(Self { lon, lat })
    }

    /// Parse a pair of text fields.
    ///
    /// Two blank fields mean "no location" and yield `Ok(None)`. Anything else
    /// that does not produce a valid coordinate is an error.
    pub fn parse_pair(lon: &str, lat: &str) -> Result<Option<Self>, CoordinateError> {
        let (lon, lat) = (lon.trim(), lat.trim());
        match (lon.is_empty(), lat.is_empty()) {
            (true, true) => return Ok(None),
            (false, false) => {}
            _ => {
                return Err(CoordinateError::Incomplete {
                    lon: lon.to_string(),
                    lat: lat.to_string(),
                });
            }
        }

        let lon_value = parse_number("longitude", lon)?;
        let lat_value = parse_number("latitude", lat)?;
        Self::new(lon_value, lat_value).map(Some)
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// The pair as a GeoJSON position.
    pub fn to_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, CoordinateError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateError::NotNumeric {
            field,
            value: value.to_string(),
        })
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        value.to_array()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_pair() {
        let coord = Coordinate::parse_pair(" 10.5", "20.25 ").unwrap().unwrap();
        assert_eq!(coord.lon(), 10.5);
        assert_eq!(coord.lat(), 20.25);
    }

    #[test]
    fn test_blank_pair_is_absent() {
        assert_eq!(Coordinate::parse_pair("", ""), Ok(None));
        assert_eq!(Coordinate::parse_pair("  ", ""), Ok(None));
    }

    #[test]
    fn test_half_pair_is_incomplete() {
        assert!(matches!(
            Coordinate::parse_pair("10.0", ""),
            Err(CoordinateError::Incomplete { .. })
        ));
    }

    #[test]
    fn test_non_numeric() {
        assert!(matches!(
            Coordinate::parse_pair("ten", "20"),
            Err(CoordinateError::NotNumeric { field: "longitude", .. })
        ));
        assert!(matches!(
            Coordinate::parse_pair("10", "NaN"),
            Err(CoordinateError::NotNumeric { field: "latitude", .. })
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(Coordinate::parse_pair("181", "0").is_err());
        assert!(Coordinate::parse_pair("0", "-90.5").is_err());
        assert!(Coordinate::parse_pair("-180", "90").unwrap().is_some());
    }

    #[test]
    fn test_serializes_as_position() {
        let coord = Coordinate::new(-3.5, 51.25).unwrap();
        assert_eq!(serde_json::to_string(&coord).unwrap(), "[-3.5,51.25]");
        let back: Coordinate = serde_json::from_str("[-3.5,51.25]").unwrap();
        assert_eq!(back, coord);
        assert!(serde_json::from_str::<Coordinate>("[200.0,0.0]").is_err());
    }
}
