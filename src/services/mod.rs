pub mod auth;
pub mod bookings;
pub mod mailer;
pub mod referrals;
