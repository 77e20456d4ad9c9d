//! DDL for the three onboarding tables, one string per SQL dialect.
//!
//! Statements are idempotent (`IF NOT EXISTS`). Body-metric CHECKs live in
//! the store; the handler does not validate values itself.

/// SQLite / libSQL dialect.
pub const SQLITE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        whatsapp_number TEXT NOT NULL,
        email TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS profiles (
        user_id INTEGER NOT NULL REFERENCES users(id),
        age INTEGER NOT NULL CHECK (age > 0),
        height_cm REAL NOT NULL CHECK (height_cm > 0),
        weight_kg REAL NOT NULL CHECK (weight_kg > 0),
        target_weight_kg REAL NOT NULL CHECK (target_weight_kg > 0),
        preferences TEXT,
        veg_days TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_profiles_user ON profiles(user_id);

    CREATE TABLE IF NOT EXISTS allergies (
        user_id INTEGER NOT NULL REFERENCES users(id),
        allergy TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_allergies_user ON allergies(user_id);
"#;

/// PostgreSQL dialect.
pub const POSTGRES_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        whatsapp_number TEXT NOT NULL,
        email TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS profiles (
        user_id BIGINT NOT NULL REFERENCES users(id),
        age INTEGER NOT NULL CHECK (age > 0),
        height_cm DOUBLE PRECISION NOT NULL CHECK (height_cm > 0),
        weight_kg DOUBLE PRECISION NOT NULL CHECK (weight_kg > 0),
        target_weight_kg DOUBLE PRECISION NOT NULL CHECK (target_weight_kg > 0),
        preferences TEXT,
        veg_days TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_profiles_user ON profiles(user_id);

    CREATE TABLE IF NOT EXISTS allergies (
        user_id BIGINT NOT NULL REFERENCES users(id),
        allergy TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_allergies_user ON allergies(user_id);
"#;
