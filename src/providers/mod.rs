pub mod fund_api;
pub mod util;
