pub mod components;
pub mod layout;
pub mod pages;
pub mod quiz;

// Re-export commonly used functions from layout
pub use layout::{page, render, titled};
