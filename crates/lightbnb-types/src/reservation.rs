//! Reservations and the reviews guests leave afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::property::Property;

/// A booked date range for one guest at one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub guest_id: i64,
    pub property_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A reservation joined with the reserved property and its average rating.
///
/// Reservation fields are flattened into the top level; the property is
/// nested because both records carry an `id`. Only reviewed properties
/// appear in reservation history, so the average is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationWithProperty {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub property: Property,
    pub average_rating: f64,
}

/// A guest's review of a property after a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyReview {
    pub id: i64,
    pub property_id: i64,
    pub guest_id: i64,
    /// Star rating, 1 through 5.
    pub rating: i64,
    pub message: String,
}
