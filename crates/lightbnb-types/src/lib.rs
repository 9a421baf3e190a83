//! Shared record types for the LightBnB data-access layer.
//!
//! This crate holds the plain records that flow between the store and its
//! callers: users, property listings, reservations, and reviews. The types
//! carry no behaviour beyond construction helpers and serde derives, so every
//! other crate in the workspace can depend on them without pulling in the
//! database stack.
//!
//! Identifiers, nightly costs, and room counts are `i64` to match SQLite's
//! integer storage class. Reservation dates are calendar dates
//! ([`chrono::NaiveDate`]) stored as ISO `YYYY-MM-DD` text.

mod property;
mod reservation;
mod user;

pub use property::{NewProperty, Property, PropertyWithRating};
pub use reservation::{PropertyReview, Reservation, ReservationWithProperty};
pub use user::{NewUser, User};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_property() -> Property {
        Property {
            id: 7,
            owner_id: 1,
            title: "Speed lamp".to_string(),
            description: "description".to_string(),
            thumbnail_photo_url: "https://example.com/thumb.jpg".to_string(),
            cover_photo_url: "https://example.com/cover.jpg".to_string(),
            cost_per_night: 93_061,
            street: "536 Namsub Highway".to_string(),
            city: "Sotboske".to_string(),
            province: "Quebec".to_string(),
            post_code: "28142".to_string(),
            country: "Canada".to_string(),
            parking_spaces: 6,
            number_of_bathrooms: 4,
            number_of_bedrooms: 8,
        }
    }

    #[test]
    fn user_debug_redacts_password() {
        let user = User {
            id: 1,
            name: "Devin Sanders".to_string(),
            email: "tristanjacobs@gmail.com".to_string(),
            password: "hunter2".to_string(),
        };

        let rendered = format!("{user:?}");
        assert!(rendered.contains("tristanjacobs@gmail.com"));
        assert!(!rendered.contains("hunter2"), "password leaked: {rendered}");
    }

    #[test]
    fn user_serialization_skips_password() {
        let user = User {
            id: 1,
            name: "Devin Sanders".to_string(),
            email: "tristanjacobs@gmail.com".to_string(),
            password: "hunter2".to_string(),
        };

        let json = serde_json::to_value(&user).expect("user should serialize");
        assert_eq!(json["email"], "tristanjacobs@gmail.com");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn property_with_rating_flattens_property_fields() {
        let rated = PropertyWithRating {
            property: sample_property(),
            average_rating: Some(4.5),
        };

        let json = serde_json::to_value(&rated).expect("property should serialize");
        assert_eq!(json["id"], 7);
        assert_eq!(json["city"], "Sotboske");
        assert_eq!(json["average_rating"], 4.5);
    }

    #[test]
    fn unrated_property_serializes_null_average() {
        let rated = PropertyWithRating {
            property: sample_property(),
            average_rating: None,
        };

        let json = serde_json::to_value(&rated).expect("property should serialize");
        assert!(json["average_rating"].is_null());
    }

    #[test]
    fn reservation_dates_use_iso_format() {
        let reservation = Reservation {
            id: 3,
            guest_id: 1,
            property_id: 7,
            start_date: NaiveDate::from_ymd_opt(2018, 9, 11).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2018, 9, 26).expect("valid date"),
        };

        let json = serde_json::to_value(&reservation).expect("reservation should serialize");
        assert_eq!(json["start_date"], "2018-09-11");
        assert_eq!(json["end_date"], "2018-09-26");
    }

    #[test]
    fn new_property_deserializes_from_listing_form() {
        let json = r#"{
            "owner_id": 1,
            "title": "Speed lamp",
            "description": "description",
            "thumbnail_photo_url": "https://example.com/thumb.jpg",
            "cover_photo_url": "https://example.com/cover.jpg",
            "cost_per_night": 93061,
            "street": "536 Namsub Highway",
            "city": "Sotboske",
            "province": "Quebec",
            "post_code": "28142",
            "country": "Canada",
            "parking_spaces": 6,
            "number_of_bathrooms": 4,
            "number_of_bedrooms": 8
        }"#;

        let listing: NewProperty = serde_json::from_str(json).expect("listing should parse");
        assert_eq!(listing.cost_per_night, 93_061);
        assert_eq!(listing.number_of_bedrooms, 8);

        let stored = listing.into_property(7);
        assert_eq!(stored, sample_property());
    }
}
