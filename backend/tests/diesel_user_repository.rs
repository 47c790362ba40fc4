//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.

use explorer_backend::domain::ports::UserRepository;
use explorer_backend::domain::{User, UserId, Username};
use explorer_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use embedded_postgres::{handle_cluster_setup_failure, reset_database, seed_user};
use pg_embed::test_cluster;

const TEST_DB: &str = "diesel_user_repo_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselUserRepository,
    database_url: String,
}

fn user(id: UserId, username: &str) -> User {
    User::new(id, Username::new(username).expect("valid username"))
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = reset_database(&cluster, TEST_DB)?;
    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(database_url.as_str())))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselUserRepository::new(pool),
        database_url,
    })
}

#[fixture]
fn users_db() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn inserted_user_is_found_by_id(users_db: Option<TestContext>) {
    let Some(context) = users_db else {
        eprintln!("SKIP-TEST-CLUSTER: inserted_user_is_found_by_id skipped");
        return;
    };
    let admin = user(UserId::random(), "admin");

    let inserted = context
        .runtime
        .block_on(context.repository.insert_if_absent(&admin))
        .expect("insert succeeds");
    let found = context
        .runtime
        .block_on(context.repository.find_by_id(admin.id()))
        .expect("lookup succeeds");

    assert!(inserted);
    assert_eq!(found, Some(admin));
}

#[rstest]
fn existing_user_is_left_untouched(users_db: Option<TestContext>) {
    let Some(context) = users_db else {
        eprintln!("SKIP-TEST-CLUSTER: existing_user_is_left_untouched skipped");
        return;
    };
    let id = UserId::random();
    seed_user(&context.database_url, *id.as_uuid(), "original").expect("seed user");

    let inserted = context
        .runtime
        .block_on(context.repository.insert_if_absent(&user(id.clone(), "renamed")))
        .expect("insert succeeds");
    let found = context
        .runtime
        .block_on(context.repository.find_by_id(&id))
        .expect("lookup succeeds");

    assert!(!inserted);
    assert_eq!(found, Some(user(id, "original")));
}

#[rstest]
fn unknown_id_is_none(users_db: Option<TestContext>) {
    let Some(context) = users_db else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_id_is_none skipped");
        return;
    };

    let found = context
        .runtime
        .block_on(context.repository.find_by_id(&UserId::random()))
        .expect("lookup succeeds");

    assert_eq!(found, None);
}
