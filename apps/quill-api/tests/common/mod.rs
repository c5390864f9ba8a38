//! Shared setup for the HTTP integration tests.

use std::sync::Arc;

use quill_infra::database::InMemoryPostRepository;
use quill_infra::fixtures::{PostGenerator, seed_posts};

pub const SEED_COUNT: usize = 10;

/// A fresh store per test, seeded with `SEED_COUNT` generated posts.
pub async fn seeded_store(seed: u64) -> Arc<InMemoryPostRepository> {
    let repo = Arc::new(InMemoryPostRepository::new());
    let mut generator = PostGenerator::seeded(seed);
    seed_posts(repo.as_ref(), &mut generator, SEED_COUNT)
        .await
        .expect("seeding an in-memory store cannot fail");
    repo
}

/// Initialise the application over `$repo`, wired like the server binary.
macro_rules! init_app {
    ($repo:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(quill_api::middleware::error::problem_details())
                .wrap(quill_api::observability::RequestIdMiddleware)
                .app_data(actix_web::web::Data::new(
                    quill_api::AppState::with_repository($repo),
                ))
                .configure(quill_api::handlers::configure_routes),
        )
        .await
    };
}
