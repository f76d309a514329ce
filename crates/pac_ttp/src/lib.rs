//! This library handles reading from and creating **TTP** animation descriptors stored in PAC archives.
//!
//! # TTP Format Documentation
//!
//! A TTP file is a small header followed by a list of frame records. Each frame names the
//! resources it shows and carries five numeric values used for timing and placement.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Unknown                | 4 bytes: Meaning unknown, kept as is                       |
//! | 0x0004         | Frame Count            | 4 bytes: Number of frame records that follow               |
//! | 0x0008         | Window Width           | 4 bytes: Width of the playback window                      |
//! | 0x000C         | Window Height          | 4 bytes: Height of the playback window                     |
//! | 0x0010         | Frames                 | Frame Count frame records                                  |
//!
//! ### Frame Record
//!
//! | Field          | Description                                                               |
//! |----------------|---------------------------------------------------------------------------|
//! | Sprite Name    | 4 bytes length, then that many bytes of Shift-JIS text                    |
//! | SE Name        | 4 bytes length, then that many bytes of Shift-JIS text                    |
//! | Textbox Name   | 4 bytes length, then that many bytes of Shift-JIS text                    |
//! | Values         | 5 × 4 bytes: unsigned integers                                            |
//!
//! Anything after the last frame is preserved verbatim.
//!
//! ## Text Form
//!
//! [`to_json`] and [`from_json`] convert a [`TtpAnimation`] to and from JSON whose field names
//! follow the table above. Names that are not clean Shift-JIS are written as `{ "raw": [...] }`.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.ttp`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod error;
pub mod read;
pub mod serde;
pub mod types;
pub mod write;

pub use crate::serde::{from_json, to_json};
pub use read::decode;
pub use types::{ResName, TtpAnimation, TtpFrame};
pub use write::encode;
