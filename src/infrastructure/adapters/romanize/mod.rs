//! Romanize Adapter - 罗马字转换后端客户端

mod http_romanize_client;

pub use http_romanize_client::{HttpRomanizeClient, HttpRomanizeClientConfig};
