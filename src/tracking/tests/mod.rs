//! Unit tests for case tracking.
