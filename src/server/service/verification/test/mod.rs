use chrono::{Duration, Utc};
use sea_orm::ConnectionTrait;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::{user::UserRepository, verification_code::VerificationCodeRepository},
    error::AppError,
    model::{user::UpdateRpNameParam, verification_code::VerificationCodeOutcome},
    service::verification::{generate_code, VerificationService, CODE_ALPHABET, CODE_LENGTH},
};


#[test]
fn generates_codes_from_alphabet() {
    let mut rng = rand::rng();

    for _ in 0..50 {
        let code = generate_code(&mut rng);

        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
    }
}
