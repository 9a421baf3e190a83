//! Query layer for LightBnB.
//!
//! Six operations make up the data-access surface consumed by the web
//! server:
//!
//! | Operation | Returns |
//! |-----------|---------|
//! | [`get_user_with_email`] | `Option<User>` |
//! | [`get_user_with_id`] | `Option<User>` |
//! | [`add_user`] | the stored `User` |
//! | [`get_all_reservations`] | past reservations with property and rating |
//! | [`get_all_properties`] | filtered properties with average rating |
//! | [`add_property`] | the stored `Property` |
//!
//! Each is a synchronous function over a `rusqlite::Connection` that issues
//! a single parameterised statement. [`Store`] exposes the same operations as
//! async methods over an owned pool.
//!
//! # Failure signalling
//!
//! Absence is a value (`Ok(None)`, `Ok(vec![])`) and every failure is an
//! `Err(QueryError)`. Nothing is logged and swallowed at this layer; callers
//! decide how to report errors.
//!
//! ```rust,ignore
//! use lightbnb_query::{get_all_properties, PropertyFilter, DEFAULT_LIMIT};
//!
//! let filter = PropertyFilter {
//!     city: Some("#Vancouver".to_string()),
//!     minimum_rating: Some(4.0),
//!     ..PropertyFilter::default()
//! };
//! let listings = get_all_properties(&conn, &filter, DEFAULT_LIMIT)?;
//! ```

mod error;
mod properties;
mod reservations;
mod store;
mod users;

pub use error::QueryError;
pub use properties::{add_property, get_all_properties, PropertyFilter, PropertySearch};
pub use reservations::{get_all_reservations, get_reservations_before};
pub use store::Store;
pub use users::{add_user, get_user_with_email, get_user_with_id};

/// Row bound used when the caller does not pick one.
pub const DEFAULT_LIMIT: u32 = 10;
