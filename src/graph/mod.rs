//! Graph construction and representation
//!
//! This module builds the sentence similarity graph and stores it in CSR
//! form for the TextRank power iteration.

pub mod builder;
pub mod csr;
