//! Reservation history.

use chrono::{Local, NaiveDate};
use lightbnb_types::{Reservation, ReservationWithProperty};
use rusqlite::{params, Connection};

use crate::error::QueryError;
use crate::properties::{map_row_to_property, property_columns, PROPERTY_COLUMN_COUNT};

/// Columns read before the property block.
const RESERVATION_COLUMN_COUNT: usize = 5;

/// Returns the guest's past reservations, oldest stay first.
///
/// A reservation is past when its `end_date` is before today's local date.
/// See [`get_reservations_before`] for the row shape.
///
/// # Errors
///
/// Returns `QueryError::Database` on SQL failure.
pub fn get_all_reservations(
    conn: &Connection,
    guest_id: i64,
    limit: u32,
) -> Result<Vec<ReservationWithProperty>, QueryError> {
    get_reservations_before(conn, guest_id, Local::now().date_naive(), limit)
}

/// Returns the guest's reservations that ended strictly before `cutoff`.
///
/// Each row carries the reserved property and that property's average
/// review rating. Stays at properties that have no reviews yet are left
/// out. Rows are ordered by `start_date` ascending and bounded by `limit`.
///
/// # Errors
///
/// Returns `QueryError::Database` on SQL failure.
pub fn get_reservations_before(
    conn: &Connection,
    guest_id: i64,
    cutoff: NaiveDate,
    limit: u32,
) -> Result<Vec<ReservationWithProperty>, QueryError> {
    tracing::debug!(guest_id, %cutoff, limit, "fetching reservation history");

    let columns = property_columns();
    let sql = format!(
        "SELECT
            reservations.id, reservations.guest_id, reservations.property_id,
            reservations.start_date, reservations.end_date,
            {columns},
            AVG(property_reviews.rating) AS average_rating
         FROM reservations
         JOIN properties ON properties.id = reservations.property_id
         JOIN property_reviews ON property_reviews.property_id = properties.id
         WHERE reservations.guest_id = ?1
           AND reservations.end_date < ?2
         GROUP BY properties.id, reservations.id
         ORDER BY reservations.start_date ASC
         LIMIT ?3"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![guest_id, cutoff, limit], |row| {
        Ok(ReservationWithProperty {
            reservation: Reservation {
                id: row.get(0)?,
                guest_id: row.get(1)?,
                property_id: row.get(2)?,
                start_date: row.get(3)?,
                end_date: row.get(4)?,
            },
            property: map_row_to_property(row, RESERVATION_COLUMN_COUNT)?,
            average_rating: row.get(RESERVATION_COLUMN_COUNT + PROPERTY_COLUMN_COUNT)?,
        })
    })?;

    let mut reservations = Vec::new();
    for row in rows {
        reservations.push(row?);
    }
    Ok(reservations)
}
