pub mod verification_cleanup;
