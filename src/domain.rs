pub mod classify;
pub mod field;
pub mod spi;
pub mod view;
