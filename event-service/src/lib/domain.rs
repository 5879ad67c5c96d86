pub mod change;
pub mod event;
pub mod session;
pub mod user;
