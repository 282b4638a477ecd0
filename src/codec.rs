//! MsgPack codec for response bodies.
//!
//! Uses `to_vec_named` so struct fields travel by name on the wire; peers
//! can add fields without breaking decode on the other side.
//!
//! # Example
//!
//! ```
//! use filebroker::codec::MsgPackCodec;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Reply {
//!     code: u16,
//!     message: String,
//! }
//!
//! let reply = Reply { code: 1, message: "nope".to_string() };
//! let encoded = MsgPackCodec::encode(&reply).unwrap();
//! let decoded: Reply = MsgPackCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, reply);
//! ```

use crate::error::Result;

/// MessagePack codec for structured data.
pub struct MsgPackCodec;

impl MsgPackCodec {
    /// Encode a value to MsgPack bytes (struct-as-map format).
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(value)?)
    }

    /// Decode MsgPack bytes to a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be deserialized to type T.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}
