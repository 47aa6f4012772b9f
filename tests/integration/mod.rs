//! Integration tests for the ambient context propagation crate

mod api_scenarios;
mod backend_selection;
