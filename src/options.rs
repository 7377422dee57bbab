//! Configuration options for codecs.
//!
//! Every codec holds a [`CodecOptions`] value fixed at construction. Options
//! never change during a read or write, so a codec can be shared freely
//! between threads.
//!
//! ## Examples
//!
//! ```rust
//! use serde_bintext::{CodecOptions, Hash, HashCodec, TokenCodec};
//!
//! // Write hashes without the `0x` prefix
//! let codec = HashCodec::new(CodecOptions::unprefixed());
//! let text = codec.write(&Hash::from([0xab; 32]), str::to_owned).unwrap();
//! assert_eq!(text.len(), 64);
//!
//! // Reject null instead of reading it as the zero hash
//! let codec = HashCodec::new(CodecOptions::strict());
//! assert!(codec.read(&serde_bintext::JsonToken::Null).is_err());
//! ```

use crate::buffer::{BufferPool, DEFAULT_STACK_THRESHOLD, MAX_STACK_BUFFER};
use std::fmt;
use std::sync::Arc;

/// Default bound on the raw length of numeric tokens.
///
/// Large enough for every 64-bit integer (20 digits plus a sign) with room
/// for leading zeros.
pub const DEFAULT_NUMERIC_TOKEN_LIMIT: usize = 32;

/// Per-codec configuration.
///
/// # Examples
///
/// ```rust
/// use serde_bintext::CodecOptions;
///
/// let options = CodecOptions::new()
///     .with_prefix(false)
///     .with_stack_threshold(128)
///     .with_numeric_token_limit(24);
/// assert!(!options.prefix);
/// assert_eq!(options.stack_threshold, 128);
/// ```
#[derive(Clone)]
pub struct CodecOptions {
    /// Write `0x` before hex output (hash, fixed-bytes and byte-string kinds).
    pub prefix: bool,
    /// Read null as the kind's zero value instead of failing.
    pub nullable: bool,
    /// Formatting sizes below this use a stack buffer; sizes at or above it use the pool.
    pub stack_threshold: usize,
    /// Maximum raw length of a numeric token accepted by integer kinds.
    pub numeric_token_limit: usize,
    /// Alphabet for Base58 text.
    pub base58_alphabet: &'static bs58::Alphabet,
    /// Pool serving large formatting buffers.
    pub pool: Arc<BufferPool>,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            prefix: true,
            nullable: true,
            stack_threshold: DEFAULT_STACK_THRESHOLD,
            numeric_token_limit: DEFAULT_NUMERIC_TOKEN_LIMIT,
            base58_alphabet: bs58::Alphabet::DEFAULT,
            pool: BufferPool::shared(),
        }
    }
}

impl fmt::Debug for CodecOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecOptions")
            .field("prefix", &self.prefix)
            .field("nullable", &self.nullable)
            .field("stack_threshold", &self.stack_threshold)
            .field("numeric_token_limit", &self.numeric_token_limit)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl CodecOptions {
    /// Creates default options (prefixed output, nullable, shared pool).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that write hex without the `0x` prefix.
    #[must_use]
    pub fn unprefixed() -> Self {
        Self::default().with_prefix(false)
    }

    /// Options that reject null tokens.
    #[must_use]
    pub fn strict() -> Self {
        Self::default().with_nullable(false)
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the stack/pool threshold, clamped to [`MAX_STACK_BUFFER`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bintext::CodecOptions;
    ///
    /// let options = CodecOptions::new().with_stack_threshold(100_000);
    /// assert_eq!(options.stack_threshold, serde_bintext::buffer::MAX_STACK_BUFFER);
    /// ```
    #[must_use]
    pub fn with_stack_threshold(mut self, threshold: usize) -> Self {
        self.stack_threshold = threshold.min(MAX_STACK_BUFFER);
        self
    }

    #[must_use]
    pub fn with_numeric_token_limit(mut self, limit: usize) -> Self {
        self.numeric_token_limit = limit;
        self
    }

    #[must_use]
    pub fn with_base58_alphabet(mut self, alphabet: &'static bs58::Alphabet) -> Self {
        self.base58_alphabet = alphabet;
        self
    }

    /// Uses a dedicated pool instead of the shared one.
    #[must_use]
    pub fn with_pool(mut self, pool: Arc<BufferPool>) -> Self {
        self.pool = pool;
        self
    }
}
