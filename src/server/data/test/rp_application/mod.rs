use crate::server::{
    data::rp_application::RpApplicationRepository,
    error::AppError,
    model::rp_application::{
        ApplyTransitionParam, CreateRpApplicationParam, RpApplicationFields, RpApplicationStatus,
    },
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod apply_transition;
mod create;
mod find;

const OWNER: u64 = 123456789012345678;

fn create_param(token: &str) -> CreateRpApplicationParam {
    CreateRpApplicationParam {
        discord_id: OWNER,
        fields: RpApplicationFields {
            nickname: "Steve_99".to_string(),
            source: "A friend".to_string(),
            rp_name: "Aldric Stone".to_string(),
            birth_date: "1990-04-12".to_string(),
            race: "Human".to_string(),
            gender: "Male".to_string(),
            skills: "Smithing".to_string(),
            plan: "Open a forge.".to_string(),
            biography: "Born. Raised. Trained. Travelled. Settled.".to_string(),
            skin_url: "https://cdn.example.com/skin.png".to_string(),
        },
        moderation_token: token.to_string(),
    }
}
