//! Integration tests for lexstream
//!
//! These tests build a complete mini parser on top of the toolkit and run
//! real source text through the full cycle: tokenize → recursive descent →
//! evaluated result, including the failure paths.
