//! Shared fixtures, fake upstream and test server for integration tests

pub mod api_fixtures;
pub mod test_server;
pub mod upstream;

#[allow(unused_imports)]
pub use api_fixtures::ApiFixtures;
#[allow(unused_imports)]
pub use test_server::TestServer;
#[allow(unused_imports)]
pub use upstream::FakeUpstream;
