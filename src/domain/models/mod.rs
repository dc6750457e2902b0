pub mod actor;
pub mod booking;
pub mod consultation;
pub mod discount;
pub mod hold;
pub mod job;
pub mod location;
pub mod media;
pub mod offering;
pub mod professional;
