//! Unit tests for the refract facade.
