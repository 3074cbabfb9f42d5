pub mod backend;
pub mod encoding;
pub mod handler;
pub mod http;
pub mod request;
pub mod response;
pub mod sink;
pub mod voices;
