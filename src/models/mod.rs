pub mod booking;
pub mod login_code;
pub mod user;

pub use booking::*;
pub use login_code::*;
pub use user::*;
