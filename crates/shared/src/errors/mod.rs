mod http;
mod service;

pub use self::http::HttpError;
pub use self::service::ServiceError;
