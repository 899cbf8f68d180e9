mod path;
mod payload;
pub use path::IsbnPath;
pub use payload::BookPayload;
