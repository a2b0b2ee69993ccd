pub mod resolution;
pub mod source;
pub mod stream;
pub mod track;
pub mod track_kind;

pub use resolution::ResolutionKey;
pub use source::{AcquireError, MediaSource, StreamConstraints, TrackConstraints};
pub use stream::StreamHandle;
pub use track::MediaTrack;
pub use track_kind::TrackKind;
