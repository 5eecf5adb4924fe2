pub use super::rp_application::Entity as RpApplication;
pub use super::user::Entity as User;
pub use super::verification_code::Entity as VerificationCode;
