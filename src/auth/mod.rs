//! Registration, log-in, bearer token verification and password hashing.

mod log_in;
mod middleware;
mod password;
mod sign_up;
mod token;

pub use log_in::log_in;
pub use middleware::auth_guard;
pub use password::{PasswordHash, RawPassword};
pub use sign_up::{register_user, sign_up};
pub use token::TokenKeys;
