//! Core business logic - framework-agnostic timer, invoicing, and
//! statistics operations over the repositories. Functions here take the
//! repositories they read or mutate as explicit arguments and return
//! structured data for a presentation layer to format.

pub mod invoicing;
pub mod stats;
pub mod timer;
