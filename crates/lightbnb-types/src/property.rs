//! Property listings.

use serde::{Deserialize, Serialize};

/// A property listing as stored in the `properties` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Primary key.
    pub id: i64,
    /// The user who listed the property.
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in the smallest currency unit.
    pub cost_per_night: i64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
}

/// Listing submission for a new property: every [`Property`] field except
/// the generated `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
}

impl NewProperty {
    /// Attaches a store-assigned identifier, producing the stored record.
    pub fn into_property(self, id: i64) -> Property {
        Property {
            id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            thumbnail_photo_url: self.thumbnail_photo_url,
            cover_photo_url: self.cover_photo_url,
            cost_per_night: self.cost_per_night,
            street: self.street,
            city: self.city,
            province: self.province,
            post_code: self.post_code,
            country: self.country,
            parking_spaces: self.parking_spaces,
            number_of_bathrooms: self.number_of_bathrooms,
            number_of_bedrooms: self.number_of_bedrooms,
        }
    }
}

/// A property annotated with the mean of its review ratings.
///
/// `average_rating` is `None` when the property has no reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyWithRating {
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}
