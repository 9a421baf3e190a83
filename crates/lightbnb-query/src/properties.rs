//! Property search and listing submission.
//!
//! [`PropertySearch`] composes the search statement from a
//! [`PropertyFilter`]. Row conditions are collected into a list and emitted
//! once as a single `WHERE ... AND ...` clause; the rating bound goes into
//! `HAVING` because it applies to the per-property average. Every dynamic
//! value is bound as a positional parameter.

use lightbnb_types::{NewProperty, Property, PropertyWithRating};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Property columns in the order [`map_row_to_property`] reads them.
const PROPERTY_FIELDS: [&str; 15] = [
    "id",
    "owner_id",
    "title",
    "description",
    "thumbnail_photo_url",
    "cover_photo_url",
    "cost_per_night",
    "street",
    "city",
    "province",
    "post_code",
    "country",
    "parking_spaces",
    "number_of_bathrooms",
    "number_of_bedrooms",
];

/// Number of columns [`map_row_to_property`] consumes.
pub(crate) const PROPERTY_COLUMN_COUNT: usize = PROPERTY_FIELDS.len();

/// The property column list qualified with the `properties` table name.
pub(crate) fn property_columns() -> String {
    PROPERTY_FIELDS
        .iter()
        .map(|field| format!("properties.{field}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Characters a caller may put in front of a city search term.
const CITY_MARKERS: &[char] = &['#', '%'];

/// Optional criteria for [`get_all_properties`].
///
/// Unset fields do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Case-sensitive substring of the city. One leading `#` or `%` marker
    /// is stripped before matching. An empty string is treated as unset.
    pub city: Option<String>,
    /// Only properties listed by this user.
    pub owner_id: Option<i64>,
    /// Inclusive lower bound on `cost_per_night`.
    pub minimum_price_per_night: Option<i64>,
    /// Exclusive upper bound on `cost_per_night`.
    pub maximum_price_per_night: Option<i64>,
    /// Inclusive lower bound on the average review rating. Properties
    /// without reviews never satisfy it.
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    /// The city term to match, with any leading marker removed.
    pub fn city_term(&self) -> Option<&str> {
        let city = self.city.as_deref().filter(|c| !c.is_empty())?;
        Some(city.strip_prefix(CITY_MARKERS).unwrap_or(city))
    }
}

/// A composed property search statement and its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySearch {
    sql: String,
    params: Vec<Value>,
}

impl PropertySearch {
    /// Composes the search for `filter`, returning at most `limit` rows.
    pub fn new(filter: &PropertyFilter, limit: u32) -> Self {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(city) = filter.city_term() {
            params.push(Value::Text(city.to_string()));
            conditions.push(format!("instr(properties.city, ?{}) > 0", params.len()));
        }

        if let Some(owner_id) = filter.owner_id {
            params.push(Value::Integer(owner_id));
            conditions.push(format!("properties.owner_id = ?{}", params.len()));
        }

        if let Some(minimum) = filter.minimum_price_per_night {
            params.push(Value::Integer(minimum));
            conditions.push(format!("properties.cost_per_night >= ?{}", params.len()));
        }

        if let Some(maximum) = filter.maximum_price_per_night {
            params.push(Value::Integer(maximum));
            conditions.push(format!("properties.cost_per_night < ?{}", params.len()));
        }

        let columns = property_columns();
        let mut sql = format!(
            "SELECT {columns}, AVG(property_reviews.rating) AS average_rating
             FROM properties
             LEFT JOIN property_reviews ON property_reviews.property_id = properties.id"
        );

        if !conditions.is_empty() {
            sql.push_str("\n WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql.push_str("\n GROUP BY properties.id");

        if let Some(rating) = filter.minimum_rating {
            params.push(Value::Real(rating));
            sql.push_str(&format!(
                "\n HAVING AVG(property_reviews.rating) >= ?{}",
                params.len()
            ));
        }

        params.push(Value::Integer(i64::from(limit)));
        sql.push_str(&format!(
            "\n ORDER BY properties.cost_per_night ASC\n LIMIT ?{}",
            params.len()
        ));

        Self { sql, params }
    }

    /// The statement text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Runs the search on `conn`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Database` on SQL failure.
    pub fn execute(&self, conn: &Connection) -> Result<Vec<PropertyWithRating>, QueryError> {
        let mut stmt = conn.prepare(&self.sql)?;
        let rows = stmt.query_map(params_from_iter(self.params.iter()), |row| {
            Ok(PropertyWithRating {
                property: map_row_to_property(row, 0)?,
                average_rating: row.get(PROPERTY_COLUMN_COUNT)?,
            })
        })?;

        let mut properties = Vec::new();
        for row in rows {
            properties.push(row?);
        }
        Ok(properties)
    }
}

/// Returns properties matching `filter` with their average rating, cheapest
/// first, bounded by `limit`.
///
/// # Errors
///
/// Returns `QueryError::Database` on SQL failure. No match is an empty
/// `Vec`.
pub fn get_all_properties(
    conn: &Connection,
    filter: &PropertyFilter,
    limit: u32,
) -> Result<Vec<PropertyWithRating>, QueryError> {
    let search = PropertySearch::new(filter, limit);
    tracing::debug!(sql = search.sql(), params = ?search.params(), "searching properties");

    let properties = search.execute(conn)?;
    tracing::debug!(count = properties.len(), "property search complete");
    Ok(properties)
}

/// Inserts a property listing and returns the stored row.
///
/// # Errors
///
/// Returns `QueryError::Constraint` if the owner does not exist or a column
/// check fails, and `QueryError::Database` otherwise.
pub fn add_property(conn: &Connection, property: &NewProperty) -> Result<Property, QueryError> {
    let returning = PROPERTY_FIELDS.join(", ");
    let sql = format!(
        "INSERT INTO properties (
            owner_id, title, description, thumbnail_photo_url, cover_photo_url,
            cost_per_night, street, city, province, post_code,
            country, parking_spaces, number_of_bathrooms, number_of_bedrooms
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
        RETURNING {returning}"
    );

    let stored = conn
        .query_row(
            &sql,
            params![
                property.owner_id,
                property.title,
                property.description,
                property.thumbnail_photo_url,
                property.cover_photo_url,
                property.cost_per_night,
                property.street,
                property.city,
                property.province,
                property.post_code,
                property.country,
                property.parking_spaces,
                property.number_of_bathrooms,
                property.number_of_bedrooms,
            ],
            |row| map_row_to_property(row, 0),
        )
        .map_err(QueryError::from_insert)?;

    tracing::debug!(id = stored.id, owner_id = stored.owner_id, "listed property");
    Ok(stored)
}

/// Reads the property column block starting at column `offset`.
pub(crate) fn map_row_to_property(row: &Row, offset: usize) -> rusqlite::Result<Property> {
    Ok(Property {
        id: row.get(offset)?,
        owner_id: row.get(offset + 1)?,
        title: row.get(offset + 2)?,
        description: row.get(offset + 3)?,
        thumbnail_photo_url: row.get(offset + 4)?,
        cover_photo_url: row.get(offset + 5)?,
        cost_per_night: row.get(offset + 6)?,
        street: row.get(offset + 7)?,
        city: row.get(offset + 8)?,
        province: row.get(offset + 9)?,
        post_code: row.get(offset + 10)?,
        country: row.get(offset + 11)?,
        parking_spaces: row.get(offset + 12)?,
        number_of_bathrooms: row.get(offset + 13)?,
        number_of_bedrooms: row.get(offset + 14)?,
    })
}
