//! Property-based tests for filtering, sorting, and pagination.
