//! Service layer composing the memory capabilities.

pub mod memory;
