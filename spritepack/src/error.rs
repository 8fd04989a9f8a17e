#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("Record of {size} bytes at {offset:#x} is outside the blob ({len} bytes)")]
    OutOfBounds {
        offset: usize,
        size: usize,
        len: usize,
    },
    #[error("String at {offset:#x} is not null-terminated UTF-8 inside the blob")]
    MalformedString { offset: usize },
    #[error("Invalid {kind} count: {count}")]
    InvalidArity { kind: &'static str, count: i64 },
    #[error("Element index {index} is out of range. Pack has ({len}) elements")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Unknown type tag: {tag:#02x}")]
    UnknownTypeTag { tag: u8 },
    #[error("Unknown blob magic: {magic:?}")]
    BadMagic { magic: [u8; 4] },
    #[error("Unsupported blob version: {version}")]
    UnsupportedVersion { version: u32 },
    #[error("Unknown emitter mode: {mode}")]
    UnknownEmitterMode { mode: i32 },
    #[error("Action {action} starts at frame {start_frame} but animation has ({frame_number}) frames")]
    StartFrameOutOfRange {
        action: usize,
        start_frame: i16,
        frame_number: i32,
    },
    #[error("Component id {component_id} matches ({matches}) components, expect exactly one")]
    UnknownComponent { component_id: i32, matches: usize },
    #[error("Expect a {kind} record but its offset is zero")]
    AbsentRecord { kind: &'static str },
    #[error("Component id {id} appears more than once in one animation")]
    DuplicateComponent { id: i32 },
    #[error("Failed to parse record at {offset:#x}")]
    Parse { offset: usize },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
