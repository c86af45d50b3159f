//! UI components for the portfolio page.

pub mod backdrop;
pub mod sections;
