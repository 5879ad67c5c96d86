pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::subject_for;
pub use claims::Claims;
pub use claims::SUBJECT_PREFIX;
pub use errors::JwtError;
pub use handler::JwtHandler;
