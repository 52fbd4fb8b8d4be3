//! HTTP request / response bodies that are specific to this server.
//!
//! Types shared with other crates live in `mealbot-types`.

pub mod v1;
