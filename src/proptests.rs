//! Property-based tests for canonical form and arithmetic.
