//! Cross-crate integration tests for the sweepr workspace.

mod engine;
