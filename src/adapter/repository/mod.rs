pub mod user_postgres;
