/// Voice skill callback layer
pub mod cursor;
pub mod handler;
pub mod request;
pub mod response;

pub use cursor::PlaybackCursor;
pub use handler::handle_event;
pub use request::SkillRequest;
pub use response::SkillResponse;
