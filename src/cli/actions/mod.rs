pub mod server;

use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        session_secret: SecretString,
        session_ttl_seconds: u64,
        secure_cookies: bool,
    },
}
