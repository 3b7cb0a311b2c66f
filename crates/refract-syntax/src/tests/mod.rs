//! Unit tests exercising the syntax layer through real parses.
