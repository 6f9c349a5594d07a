//! I/O wrappers used by archive operations.

pub mod counting;

pub use counting::CountingWriter;
