pub mod config;
pub mod credentials;
pub mod errors;
pub mod kernel;
pub mod router;
pub mod traits;
pub mod types;
