//! Unit tests for the tracker bounded context.
