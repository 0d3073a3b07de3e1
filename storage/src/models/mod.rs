//! Row models for the storage crate.

mod user_row;

pub use user_row::UserRow;
