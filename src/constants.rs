pub mod version;

pub static SERVICE_NAME: &str = "quotes";
pub static DEFAULT_DATABASE_URL: &str = "sqlite://quotes.db";
pub static DEFAULT_HOST: &str = "0.0.0.0";
pub static DEFAULT_PORT: u16 = 8080;
pub static DB_MAX_CONNECTIONS: u32 = 20;

/// length of a hyphenated uuid, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`.
pub static UUID_STR_LEN: usize = 36;
pub static UUID_HYPHEN_OFFSETS: [usize; 4] = [8, 13, 18, 23];
