pub mod invoice;
pub mod requests;
pub mod responses;
pub mod user;
