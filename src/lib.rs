//! Terminal map of regional malaria risk in Senegal over 30 months.
//!
//! The data store feeds the risk resolver, which feeds the view. Every change
//! of the selected month recomputes the snapshot and redraws.

pub mod app;
pub mod braille;
pub mod data;
pub mod map;
pub mod report;
pub mod risk;
pub mod ui;
