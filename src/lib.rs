//! Support Copilot library exports for testing

pub mod core;
pub mod triage;
pub mod tui;

#[cfg(test)]
pub mod test_support;
