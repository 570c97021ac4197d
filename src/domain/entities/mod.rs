//! Core domain entities.
//!
//! The service manages a single entity, [`Link`], plus the input struct
//! [`NewLink`] used to insert one and the aggregate [`LinkTotals`].

pub mod link;

pub use link::{Link, LinkTotals, NewLink};
