use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{UpdateRpNameParam, UpsertUserParam},
};
use chrono::Utc;
use test_utils::{builder::TestBuilder, factory};

mod link_minecraft;
mod update_rp_name;
mod upsert;
