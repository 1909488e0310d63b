use thiserror::Error;

/// Rejection reasons for malformed workload descriptions.
///
/// An empty process list is not an error: scheduling it yields an empty
/// timeline and an empty metrics map. Running out of timeline is not an
/// error either; unfinished processes simply end up with partial metrics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("process `{id}`: {field} must be at least 1, got {value}")]
    MalformedProcess {
        id: String,
        field: &'static str,
        value: u64,
    },

    #[error("duplicate process id `{id}`")]
    DuplicateProcessId { id: String },

    #[error("page replacement requires at least one frame")]
    NoFrames,

    #[error("frame `{id}`: {reason}")]
    MalformedFrame { id: String, reason: &'static str },

    #[error("duplicate frame id `{id}`")]
    DuplicateFrameId { id: String },

    #[error("frames `{first}` and `{second}` share load time {load_time}")]
    DuplicateLoadTime {
        first: String,
        second: String,
        load_time: u64,
    },

    #[error("frames `{first}` and `{second}` both hold page `{page}` initially")]
    DuplicateResidentPage {
        first: String,
        second: String,
        page: String,
    },

    #[error("page request at position {position} is empty")]
    EmptyPageId { position: usize },
}
