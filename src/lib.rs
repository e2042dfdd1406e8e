mod config;
mod data;
mod error;
mod fixture_manager;
mod handler;
mod header_filter;
mod http_client;
mod interaction_manager;
mod json_compare;
mod session;
mod substitution;
mod tape;
mod url_pattern;

pub use config::{set_header_policy, HeaderPolicy, MASK};
pub use data::{Headers, InteractionData, RequestData, ResponseData};
pub use error::Error;
pub use fixture_manager::FixtureManager;
pub use handler::RequestHandler;
pub use header_filter::{filter_headers, filter_headers_with};
pub use http_client::{HttpClient, InterceptingClient, ReqwestHttpClient};
pub use interaction_manager::InteractionManager;
pub use json_compare::{compare_json, CompareMode, CompareResult};
pub use session::TapeSession;
pub use substitution::apply_variables;
pub use tape::{HttpTape, TapeMode};
pub use url_pattern::UrlPatternMatcher;
