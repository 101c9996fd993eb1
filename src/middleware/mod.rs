pub mod json_content_type;

pub use json_content_type::JsonContentType;
