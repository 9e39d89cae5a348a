//! # Trama - QR Code Encoder/Decoder Core
//!
//! Trama implements the bit-level data pipeline of ISO/IEC 18004 QR Codes,
//! both directions:
//!
//! - **Encoding**: payloads → segments → codewords → Reed-Solomon blocks →
//!   masked module matrix with format/version information
//! - **Decoding**: tagged module matrix → format recovery → de-interleaved
//!   blocks → error correction → segment parsing → payload string
//!
//! ## Quick Start
//!
//! ```
//! use trama::{EccLevel, QrOptions, decode, encode};
//!
//! // Encode a payload; version and mask are chosen automatically.
//! let options = QrOptions::new().with_ec_level(EccLevel::M);
//! let matrix = encode("HELLO WORLD", &options)?;
//!
//! // Walk the modules (quiet zone included) for rendering.
//! for y in 0..matrix.full_size() {
//!     for x in 0..matrix.full_size() {
//!         print!("{}", if matrix.module_at_full(x, y).dark { "██" } else { "  " });
//!     }
//!     println!();
//! }
//!
//! // And back again.
//! assert_eq!(decode(&matrix)?, "HELLO WORLD");
//! # Ok::<(), trama::QrError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bits`] | Bit-level read/write buffer |
//! | [`segment`] | Encoding modes and segment serialization |
//! | [`version`] | Versions, EC levels, capacity tables |
//! | [`gf256`] | GF(256) arithmetic and Reed-Solomon coding |
//! | [`data`] | Bitstream assembly, blocking and interleaving |
//! | [`matrix`] | Tagged module grid, masking, format/version info |
//! | [`options`] | Validated encoder/output configuration |
//! | [`decode`](mod@decode) | Matrix-to-string decoder pipeline |
//! | [`charset`] | ECI designator and charset table |
//! | [`luminance`] | Luminance-source capability for image front-ends |
//! | [`output`] | Module collection contract for rendering backends |
//! | [`error`] | Error types |
//!
//! ## Scope
//!
//! Rendering backends, camera detection and binarization are external
//! collaborators: renderers consume a finished [`QrMatrix`] through
//! [`output::collect_modules`], and detection front-ends produce the
//! dark/light grid [`QrMatrix::from_modules`] accepts. Structured append,
//! Micro QR and rMQR are out of scope.

pub mod bits;
pub mod charset;
pub mod data;
pub mod decode;
pub mod encode;
pub mod error;
pub mod gf256;
pub mod luminance;
pub mod matrix;
pub mod options;
pub mod output;
pub mod segment;
pub mod version;

// Re-exports for convenience
pub use decode::decode;
pub use encode::{encode, encode_binary, encode_multi};
pub use error::QrError;
pub use gf256::ReedSolomonCoder;
pub use luminance::{ImageLuminanceSource, LuminanceSource};
pub use matrix::mask::MaskPattern;
pub use matrix::{Module, ModuleKind, QrMatrix};
pub use options::{MaskChoice, ModeChoice, QrOptions, VersionChoice};
pub use segment::{Mode, Segment};
pub use version::{EccLevel, Version};
