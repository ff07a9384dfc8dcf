mod person;
mod repository;
mod save;
mod spec;

pub use person::*;

use log::LevelFilter;
use repository::repository;
#[cfg(not(feature = "disable-transactions"))]
use save::save_all_transactional;
use save::save;
use sieve::Connection;
use spec::{spec_functions, spec_paging, spec_temporal};
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run the whole suite against `connection`, every group starts from the
/// eight seeded people.
pub async fn execute_tests<C: Connection>(mut connection: C) {
    repository(&mut connection).await;
    save(&mut connection).await;
    #[cfg(not(feature = "disable-transactions"))]
    save_all_transactional(&mut connection).await;
    spec_functions(&mut connection).await;
    spec_temporal(&mut connection).await;
    spec_paging(&mut connection).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
