pub mod track;

pub use self::track::{PlayInfo, PlayUrlResponse, Track, TrackId};
