pub mod auth;
pub mod password;
pub mod token;

pub use auth::AuthService;
pub use token::TokenService;
