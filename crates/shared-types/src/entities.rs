//! # Core Domain Entities
//!
//! Defines the value types shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Geography**: `Coordinate`
//! - **Directory**: `FacilityRecord`
//! - **Alerting**: `RecipientChannel`, `ChannelKind`, `AlertMessage`

use crate::errors::{ChannelError, CoordinateError};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: GEOGRAPHY
// =============================================================================

/// A point on the Earth's surface in decimal degrees (WGS84).
///
/// INVARIANT: latitude ∈ [-90, 90], longitude ∈ [-180, 180], both finite.
/// Deserialization goes through the same check as [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Google Maps link pointing at this coordinate.
    #[must_use]
    pub fn maps_link(&self) -> String {
        format!(
            "https://www.google.com/maps?q={},{}",
            self.latitude, self.longitude
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

// =============================================================================
// CLUSTER B: DIRECTORY
// =============================================================================

/// One parsed row of the care-facility directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    /// Display name of the facility.
    pub name: String,
    /// Street address (free text).
    pub address: String,
    /// Contact number (free text, may be empty).
    pub phone: String,
    /// Location of the facility.
    pub location: Coordinate,
}

impl FacilityRecord {
    /// Create a record with the given name and location and empty contact details.
    pub fn new(name: impl Into<String>, location: Coordinate) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            phone: String::new(),
            location,
        }
    }

    /// Set the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the contact number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}

// =============================================================================
// CLUSTER C: ALERTING
// =============================================================================

/// How a recipient is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Text message sent through the SMS gateway.
    Sms,
    /// `tel:` URI opened by the presentation layer.
    DirectDial,
    /// Chat app deep link opened by the presentation layer.
    ChatDeeplink,
}

impl ChannelKind {
    /// Stable label used in logs and metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::DirectDial => "direct_dial",
            Self::ChatDeeplink => "chat_deeplink",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured emergency contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipientChannel {
    /// Phone number or channel endpoint.
    pub identifier: String,
    /// Delivery mechanism.
    pub kind: ChannelKind,
}

impl RecipientChannel {
    pub fn new(identifier: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
        }
    }

    pub fn sms(identifier: impl Into<String>) -> Self {
        Self::new(identifier, ChannelKind::Sms)
    }

    pub fn direct_dial(identifier: impl Into<String>) -> Self {
        Self::new(identifier, ChannelKind::DirectDial)
    }

    pub fn chat_deeplink(identifier: impl Into<String>) -> Self {
        Self::new(identifier, ChannelKind::ChatDeeplink)
    }

    /// Normalize the identifier to `+digits` / `digits` form.
    ///
    /// Spaces, dashes, dots and parentheses are stripped. A single leading `+`
    /// is kept. Anything else is rejected, as is a digit count outside 3..=15
    /// (short service numbers like `108` are valid).
    pub fn normalized_number(&self) -> Result<String, ChannelError> {
        let trimmed = self.identifier.trim();
        if trimmed.is_empty() {
            return Err(ChannelError::EmptyIdentifier);
        }

        let mut normalized = String::with_capacity(trimmed.len());
        for (i, c) in trimmed.chars().enumerate() {
            match c {
                '0'..='9' => normalized.push(c),
                '+' if i == 0 => normalized.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                other => {
                    return Err(ChannelError::InvalidCharacter {
                        identifier: self.identifier.clone(),
                        found: other,
                    })
                }
            }
        }

        let digits = normalized.chars().filter(char::is_ascii_digit).count();
        if !(3..=15).contains(&digits) {
            return Err(ChannelError::InvalidLength {
                identifier: self.identifier.clone(),
                digits,
            });
        }
        Ok(normalized)
    }
}

impl fmt::Display for RecipientChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.identifier)
    }
}

/// The text of one emergency alert. Built fresh per dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMessage {
    pub body: String,
}

impl AlertMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_accepts_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_coordinate_rejects_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.1),
            Err(CoordinateError::LongitudeOutOfRange(-180.1))
        );
        assert_eq!(Coordinate::new(f64::NAN, 0.0), Err(CoordinateError::NotFinite));
    }

    #[test]
    fn test_coordinate_deserialize_validates() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude":12.5,"longitude":80.1}"#)
            .expect("valid coordinate");
        assert_eq!(ok.latitude(), 12.5);

        let bad = serde_json::from_str::<Coordinate>(r#"{"latitude":120.0,"longitude":0.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_maps_link() {
        let c = Coordinate::new(12.97, 77.59).unwrap();
        assert_eq!(c.maps_link(), "https://www.google.com/maps?q=12.97,77.59");
    }

    #[test]
    fn test_normalized_number_strips_formatting() {
        let ch = RecipientChannel::sms("+91 (98) 765-43.210");
        assert_eq!(ch.normalized_number().unwrap(), "+919876543210");
    }

    #[test]
    fn test_normalized_number_accepts_short_service_number() {
        assert_eq!(
            RecipientChannel::direct_dial("108").normalized_number().unwrap(),
            "108"
        );
    }

    #[test]
    fn test_normalized_number_rejects_garbage() {
        assert_eq!(
            RecipientChannel::sms("   ").normalized_number(),
            Err(ChannelError::EmptyIdentifier)
        );
        assert!(matches!(
            RecipientChannel::sms("12a45").normalized_number(),
            Err(ChannelError::InvalidCharacter { found: 'a', .. })
        ));
        assert!(matches!(
            RecipientChannel::sms("1+2345").normalized_number(),
            Err(ChannelError::InvalidCharacter { found: '+', .. })
        ));
        assert!(matches!(
            RecipientChannel::sms("12").normalized_number(),
            Err(ChannelError::InvalidLength { digits: 2, .. })
        ));
    }

    #[test]
    fn test_channel_kind_serde_names() {
        let ch: RecipientChannel =
            serde_json::from_str(r#"{"identifier":"555","kind":"chat_deeplink"}"#).unwrap();
        assert_eq!(ch.kind, ChannelKind::ChatDeeplink);
        assert_eq!(ch.to_string(), "chat_deeplink:555");
    }
}
