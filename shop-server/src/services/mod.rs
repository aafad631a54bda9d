//! 服务层 - 服务器核心服务
//!
//! - [`http`] - 路由组装、访问日志与 HTTP 服务器

pub mod http;

pub use http::{build_app, build_router, start_server};
