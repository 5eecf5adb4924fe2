pub mod auth;
pub mod server_token;
pub mod session;

#[cfg(test)]
mod test;
