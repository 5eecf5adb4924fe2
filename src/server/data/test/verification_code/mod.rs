use crate::server::{
    data::verification_code::VerificationCodeRepository,
    error::AppError,
    model::verification_code::CreateVerificationCodeParam,
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod active;
mod cleanup;
