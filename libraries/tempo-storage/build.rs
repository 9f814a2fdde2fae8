//! `sqlx::migrate!` embeds the SQL files at compile time, so a new or edited
//! migration has to rebuild this crate.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
