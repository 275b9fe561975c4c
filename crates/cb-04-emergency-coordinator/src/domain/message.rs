//! Alert text composition.

use shared_types::{AlertMessage, Coordinate, FacilityRecord};
use std::fmt::Write;

/// Build the alert body for `origin`, mentioning `facility` when one was resolved.
///
/// ```text
/// 🚨 Emergency! My current location is:
/// Latitude: 12.9716
/// Longitude: 77.5946
/// Google Maps: https://www.google.com/maps?q=12.9716,77.5946
///
/// Nearest hospital: City Hospital (1.2 km away)
/// Address: 1 Main St
/// Phone: +911234567
/// ```
pub fn compose_alert(
    origin: Coordinate,
    facility: Option<(&FacilityRecord, f64)>,
) -> AlertMessage {
    let mut body = format!(
        "🚨 Emergency! My current location is:\nLatitude: {}\nLongitude: {}\nGoogle Maps: {}",
        origin.latitude(),
        origin.longitude(),
        origin.maps_link()
    );

    if let Some((facility, distance_m)) = facility {
        // Writing to a String cannot fail
        let _ = write!(
            body,
            "\n\nNearest hospital: {} ({:.1} km away)",
            facility.name,
            distance_m / 1000.0
        );
        if !facility.address.is_empty() {
            let _ = write!(body, "\nAddress: {}", facility.address);
        }
        if !facility.phone.is_empty() {
            let _ = write!(body, "\nPhone: {}", facility.phone);
        }
    }

    AlertMessage::new(body)
}
