//! Demo key-vault records and seeding

pub mod records;
pub mod seeder;

pub use records::{demo_records, KeyStatus, VaultKeyRecord};
pub use seeder::{seed_key_vault, SeedReport, DEFAULT_VAULT_PREFIX};
