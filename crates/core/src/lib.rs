//! Domain primitives shared by the storage and HTTP layers.
//!
//! Nothing in here performs I/O: the error taxonomy, the parent selector and
//! the field whitelists are all plain functions over request data.

pub mod error;
pub mod parent;
pub mod validation;
