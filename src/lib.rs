//! Shift earnings and excess-time engine.
//!
//! This crate converts recorded work shifts (start, theoretical end, real end,
//! shift type and bonus variables) into worked hours, earnings and compensated
//! excess time, and keeps a small ledger of saved shifts with period reports.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
