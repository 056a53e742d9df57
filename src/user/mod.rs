//! Users, their profiles and their settings.

mod core;
mod password_endpoint;
mod profile_endpoint;
mod settings_endpoint;

pub use core::{
    User, UserID, create_user, create_user_table, get_user_by_email, validate_email,
};
pub use password_endpoint::change_password;
pub use profile_endpoint::{get_user_profile, update_user_profile};
pub use settings_endpoint::{update_avatar, update_preferences};
