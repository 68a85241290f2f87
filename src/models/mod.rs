//! Runtime models that are not part of the catalog domain.

pub mod config;
