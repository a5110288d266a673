pub mod cart;
pub mod catalog;
pub mod config;
pub mod delivery;
pub mod error;
pub mod filter;
pub mod notice;
pub mod order;
pub mod product;
pub mod receipt;
pub mod selection;
pub mod session;
pub mod theme;
