// Test modules for fault-desk crate
//
// Each source module has a corresponding test file that focuses on
// business rule verification. End-to-end scenarios live in tests/.

pub mod classifier;
pub mod error;
