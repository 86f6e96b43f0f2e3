//! Unit-test logging hook.
//!
//! Unit and integration tests share one initializer so `TEST_LOG` behaves
//! the same everywhere; see `backend_test_support::test_logging`.

pub fn init() {
    backend_test_support::test_logging::init();
}
