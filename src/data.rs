pub mod error;
pub mod spi;
