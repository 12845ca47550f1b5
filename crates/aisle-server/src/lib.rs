//! Aisle Server - HTTP front end for the warehouse path planner.

pub mod api;
pub mod cache;
pub mod config;
pub mod planner;
pub mod state;
