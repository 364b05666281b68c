pub mod credentials;
pub mod whoami;
