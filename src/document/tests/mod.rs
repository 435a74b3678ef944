//! Unit tests for the document context.
