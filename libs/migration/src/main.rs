use migration::Migrator;
use sea_orm_migration::cli;

/// Migration CLI; reads `DATABASE_URL` and accepts `up`, `down`, `status`, `fresh` and friends.
#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
