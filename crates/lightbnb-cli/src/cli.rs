//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lightbnb_query::{PropertyFilter, DEFAULT_LIMIT};

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    version,
    about = "Query and update the LightBnB listing store"
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate,
    /// Look up a user by email or id
    User(UserArgs),
    /// Register a new user
    AddUser(AddUserArgs),
    /// List a guest's past reservations
    Reservations(ReservationArgs),
    /// Search property listings
    Properties(PropertyArgs),
    /// Submit a property listing from a JSON file
    AddProperty(AddPropertyArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct UserArgs {
    /// Exact, case-sensitive email
    #[arg(long)]
    pub email: Option<String>,

    /// User id
    #[arg(long)]
    pub id: Option<i64>,
}

#[derive(Args, Debug)]
pub struct AddUserArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Stored as given; hash it before passing it here
    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct ReservationArgs {
    #[arg(long)]
    pub guest_id: i64,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

#[derive(Args, Debug)]
pub struct PropertyArgs {
    /// City substring; a leading '#' or '%' is ignored
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub owner_id: Option<i64>,

    /// Inclusive minimum nightly cost
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Exclusive maximum nightly cost
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Minimum average review rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

impl PropertyArgs {
    pub fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
        }
    }
}

#[derive(Args, Debug)]
pub struct AddPropertyArgs {
    /// JSON file holding the listing fields
    #[arg(long)]
    pub file: PathBuf,
}
