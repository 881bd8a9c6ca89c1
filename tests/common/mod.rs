//! Shared test utilities
