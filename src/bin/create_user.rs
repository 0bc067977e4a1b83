//! Create or update a library account.
//!
//! Usage: create_user <username> <password> [--librarian]
//!
//! The --librarian flag grants the can_mark_returned permission.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use sqlx::postgres::PgPoolOptions;

use locallibrary_server::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (username, password) = match (args.first(), args.get(1)) {
        (Some(u), Some(p)) => (u.clone(), p.clone()),
        _ => {
            eprintln!("Usage: create_user <username> <password> [--librarian]");
            std::process::exit(2);
        }
    };
    let can_mark_returned = args.iter().any(|a| a == "--librarian");

    let config = AppConfig::load().expect("Failed to load configuration");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    sqlx::query(
        r#"
        INSERT INTO users (username, password_hash, can_mark_returned)
        VALUES ($1, $2, $3)
        ON CONFLICT (username)
        DO UPDATE SET password_hash = $2, can_mark_returned = $3
        "#,
    )
    .bind(&username)
    .bind(&password_hash)
    .bind(can_mark_returned)
    .execute(&pool)
    .await?;

    println!(
        "User {} saved{}",
        username,
        if can_mark_returned { " (librarian)" } else { "" }
    );

    Ok(())
}
