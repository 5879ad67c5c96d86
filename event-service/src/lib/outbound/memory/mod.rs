//! In-process adapters backing the `memory` storage backend and API tests.

pub mod event;
pub mod session;
pub mod user;

pub use event::InMemoryEventRepository;
pub use session::InMemorySessionStore;
pub use user::InMemoryUserRepository;
