//! Catalog read-model for the storefront (products, brands, categories) and
//! the contact form relay.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod db;
pub mod errors;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod redis_pub;
pub mod relations;
pub mod response;
pub mod slug;

#[cfg(test)]
mod tests;
