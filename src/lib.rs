//! Customer form - a headless customer registration form
//!
//! Builds the customer form as a tree of validated controls, runs the
//! form's reactions (conditional phone requirement, debounced email
//! message) and writes save snapshots to a sink.

pub mod config;
pub mod customer;
pub mod debounce;
pub mod forms;

pub use config::FormConfig;
pub use customer::{CustomerComponent, FormEvent};
