//! Async access to the query layer over an owned connection pool.
//!
//! [`Store`] wraps a [`DbPool`] and runs each query on tokio's blocking
//! thread pool, checking a connection out of the pool inside the blocking
//! task. Each method issues exactly one statement; there are no retries and
//! no multi-statement transactions.

use lightbnb_db::DbPool;
use lightbnb_types::{
    NewProperty, NewUser, Property, PropertyWithRating, ReservationWithProperty, User,
};
use rusqlite::Connection;

use crate::error::QueryError;
use crate::properties::{self, PropertyFilter};
use crate::{reservations, users};

/// Handle to the store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    /// Wraps an already-created pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Releases this handle. Idle connections close once the last clone of
    /// the pool is dropped.
    pub fn close(self) {
        let state = self.pool.state();
        tracing::info!(
            connections = state.connections,
            idle = state.idle_connections,
            "closing store"
        );
    }

    async fn run<T, F>(&self, op: F) -> Result<T, QueryError>
    where
        F: FnOnce(&Connection) -> Result<T, QueryError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            op(&conn)
        })
        .await
        .map_err(|e| QueryError::Task(e.to_string()))?
    }

    /// See [`users::get_user_with_email`].
    pub async fn get_user_with_email(&self, email: &str) -> Result<Option<User>, QueryError> {
        let email = email.to_string();
        self.run(move |conn| users::get_user_with_email(conn, &email)).await
    }

    /// See [`users::get_user_with_id`].
    pub async fn get_user_with_id(&self, id: i64) -> Result<Option<User>, QueryError> {
        self.run(move |conn| users::get_user_with_id(conn, id)).await
    }

    /// See [`users::add_user`].
    pub async fn add_user(&self, user: NewUser) -> Result<User, QueryError> {
        self.run(move |conn| users::add_user(conn, &user)).await
    }

    /// See [`reservations::get_all_reservations`].
    pub async fn get_all_reservations(
        &self,
        guest_id: i64,
        limit: u32,
    ) -> Result<Vec<ReservationWithProperty>, QueryError> {
        self.run(move |conn| reservations::get_all_reservations(conn, guest_id, limit)).await
    }

    /// See [`properties::get_all_properties`].
    pub async fn get_all_properties(
        &self,
        filter: PropertyFilter,
        limit: u32,
    ) -> Result<Vec<PropertyWithRating>, QueryError> {
        self.run(move |conn| properties::get_all_properties(conn, &filter, limit)).await
    }

    /// See [`properties::add_property`].
    pub async fn add_property(&self, property: NewProperty) -> Result<Property, QueryError> {
        self.run(move |conn| properties::add_property(conn, &property)).await
    }
}
