//! CLI command handlers

pub mod commands;

pub use commands::{
    add, by_month, filters, init, list, serve, set_cell, set_status, stats,
};
