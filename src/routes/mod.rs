pub mod api;
pub mod attributes;
pub mod categories;
pub mod customers;
pub mod main;
pub mod orders;
pub mod products;
pub mod staff;
