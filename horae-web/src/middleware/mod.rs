pub mod cors;
pub mod error_handler;
pub mod language;
pub mod request_id;

pub use cors::{cors_layer_with_config, CorsConfig};
pub use error_handler::handle_not_found;
pub use language::{negotiate_language, LanguageNegotiator, NegotiatedLanguage};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
