use component_macros::{Component, Injectable};
use infrastructure_common::Injectable;
use std::sync::Arc;

#[derive(Component, Injectable)]
struct Clock;

#[derive(Component, Injectable)]
#[inject("clock")]
struct Ticker(std::sync::Arc<Clock>);

#[derive(Component, Injectable)]
#[inject("clock", "ticker", "serviceLocator")]
struct Scheduler {
    clock: Arc<Clock>,
    ticker: Arc<Ticker>,
    locator: Arc<di_impl::ScopeHandle>,
}

fn main() {
    assert!(Clock::dependencies().is_empty());
    assert_eq!(Ticker::dependencies(), &["clock"]);
    assert_eq!(Scheduler::dependencies(), &["clock", "ticker", "serviceLocator"]);
}
