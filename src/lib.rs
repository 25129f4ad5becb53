//! A small persisted to-do list.
//!
//! The crate is split the classic MVC way:
//!
//! - [`models`]: the [`TodoList`](models::TodoList) itself. Owns the items and
//!   every operation on them. Knows nothing about storage or output.
//! - [`store`]: key-value persistence behind the [`Storage`](store::Storage)
//!   trait, with in-memory and SQLite backends.
//! - [`app`]: the controller. Routes each user action into the model and
//!   writes the full list back to storage afterwards.
//! - [`view`]: plain-text rendering of the list and its footer.
//! - [`config`]: where the database lives.

pub mod app;
pub mod config;
pub mod models;
pub mod store;
pub mod view;
