//! Command implementations for the hashflate CLI.

pub mod compress;
pub mod decompress;
pub mod test;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use test::cmd_test;
