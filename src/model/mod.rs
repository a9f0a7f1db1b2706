//! Record schema: the stored order document and the enumeration output.

pub mod entry;
pub mod order;

pub use entry::*;
pub use order::*;
