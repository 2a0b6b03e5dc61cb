pub mod assets;
pub mod auth;
pub mod health;
pub mod request_id;
pub mod scenics;
pub mod users;
