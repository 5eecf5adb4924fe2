mod rp_application;
mod user;
mod verification_code;
