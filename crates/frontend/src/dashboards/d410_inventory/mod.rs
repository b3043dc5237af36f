//! Inventory dashboards: product availability planning and the product
//! inventory table. Both share one filter store and request coordinator.

pub mod api;
pub mod config;
pub mod controller;
pub mod coordinator;
pub mod error;
pub mod handlers;
pub mod projection;
pub mod query;
pub mod state;
pub mod ui;
