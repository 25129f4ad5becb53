//! Domain models.
//!
//! - [`TodoItem`]: one task with a title, a completion flag and a stable id.
//! - [`TodoId`]: the id, minted sequentially as `todo-id-<n>`.
//! - [`TodoList`]: the ordered collection of items plus the id counter. All
//!   mutation goes through its methods.

mod todo;

pub use todo::*;
