pub mod contact;
pub mod route;
pub mod session;
