//! Shared test infrastructure.


pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
pub(crate) use store::InMemoryCodeStore;
