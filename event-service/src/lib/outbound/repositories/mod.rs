pub mod event;
pub mod session;
pub mod user;

pub use event::PostgresEventRepository;
pub use session::PostgresSessionStore;
pub use user::PostgresUserRepository;
