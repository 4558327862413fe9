pub mod attribute;
pub mod category;
pub mod customer;
pub mod order;
pub mod pricing;
pub mod product;
pub mod staff;
pub mod variant;
