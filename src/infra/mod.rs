pub mod factory;
pub mod identity;
pub mod notify;
pub mod repositories;
