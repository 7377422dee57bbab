//! Scoped buffer acquisition for formatting.
//!
//! Formatting asks for a buffer of an exact size through
//! [`ScopedBuffer::acquire`]. Sizes below the caller's threshold get an inline
//! array that lives only for the call; larger sizes rent a `Vec<u8>` from a
//! [`BufferPool`]. A rented buffer goes back to the pool when the
//! [`ScopedBuffer`] is dropped, so every exit path (success, `?`, panic
//! unwinding) returns it.
//!
//! # Thread Safety
//!
//! [`BufferPool`] is `Send + Sync`. Free buffers sit in a lock-free
//! [`crossbeam_queue::ArrayQueue`]; a popped buffer belongs to exactly one
//! renter until it is pushed back.

use crate::error::ErrorKind;
use crossbeam_queue::ArrayQueue;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, trace};

/// Largest size served from the inline array.
pub const MAX_STACK_BUFFER: usize = 512;

/// Default stack/pool threshold.
///
/// Covers every fixed-width kind (a 65-byte signature needs 132 bytes) and
/// byte strings up to 126 bytes.
pub const DEFAULT_STACK_THRESHOLD: usize = 256;

/// Configuration for a [`BufferPool`].
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Maximum number of idle buffers kept for reuse.
    pub max_retained: usize,
    /// Buffers whose capacity grew beyond this are freed instead of retained.
    pub max_buffer_len: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            max_retained: 64,
            max_buffer_len: 1 << 20,
        }
    }
}

/// Rent/return counters of a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolStats {
    pub rented: usize,
    pub returned: usize,
}

impl PoolStats {
    /// Buffers currently rented out.
    pub fn outstanding(&self) -> usize {
        self.rented.saturating_sub(self.returned)
    }
}

/// A thread-safe pool of reusable byte buffers.
pub struct BufferPool {
    free: ArrayQueue<Vec<u8>>,
    max_buffer_len: usize,
    rented: AtomicUsize,
    returned: AtomicUsize,
}

impl BufferPool {
    pub fn new(config: PoolConfig) -> Self {
        BufferPool {
            free: ArrayQueue::new(config.max_retained.max(1)),
            max_buffer_len: config.max_buffer_len,
            rented: AtomicUsize::new(0),
            returned: AtomicUsize::new(0),
        }
    }

    /// The process-wide pool used by default codec options.
    pub fn shared() -> Arc<BufferPool> {
        static SHARED: OnceLock<Arc<BufferPool>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(BufferPool::new(PoolConfig::default())))
            .clone()
    }

    /// Rents a zero-filled buffer of exactly `len` bytes.
    pub fn rent(&self, len: usize) -> PooledBuffer<'_> {
        let mut buf = match self.free.pop() {
            Some(buf) => {
                trace!(len, capacity = buf.capacity(), "reusing pooled buffer");
                buf
            }
            None => {
                debug!(len, "buffer pool empty, allocating");
                Vec::with_capacity(len)
            }
        };
        buf.clear();
        buf.resize(len, 0);
        self.rented.fetch_add(1, Ordering::Relaxed);
        PooledBuffer { pool: self, buf }
    }

    fn give_back(&self, mut buf: Vec<u8>) {
        self.returned.fetch_add(1, Ordering::Relaxed);
        if buf.capacity() > self.max_buffer_len {
            debug!(capacity = buf.capacity(), "dropping oversized buffer");
            return;
        }
        buf.clear();
        if self.free.push(buf).is_err() {
            debug!("buffer pool full, dropping buffer");
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            rented: self.rented.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
        }
    }

    /// Number of idle buffers available for reuse.
    pub fn retained(&self) -> usize {
        self.free.len()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("retained", &self.retained())
            .field("stats", &self.stats())
            .finish()
    }
}

/// A buffer rented from a [`BufferPool`], returned on drop.
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buf: Vec<u8>,
}

impl PooledBuffer<'_> {
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.buf));
    }
}

/// A formatting buffer whose lifetime ends with the call that acquired it.
pub enum ScopedBuffer<'p> {
    Stack {
        bytes: [u8; MAX_STACK_BUFFER],
        len: usize,
    },
    Pooled(PooledBuffer<'p>),
}

impl<'p> ScopedBuffer<'p> {
    /// Acquires a buffer of exactly `len` bytes.
    ///
    /// Uses the inline array when `len < threshold`, the pool otherwise.
    pub fn acquire(len: usize, threshold: usize, pool: &'p BufferPool) -> Self {
        if len < threshold && len <= MAX_STACK_BUFFER {
            ScopedBuffer::Stack {
                bytes: [0; MAX_STACK_BUFFER],
                len,
            }
        } else {
            ScopedBuffer::Pooled(pool.rent(len))
        }
    }

    pub fn is_pooled(&self) -> bool {
        matches!(self, ScopedBuffer::Pooled(_))
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            ScopedBuffer::Stack { bytes, len } => &mut bytes[..*len],
            ScopedBuffer::Pooled(pooled) => pooled.as_mut_slice(),
        }
    }
}

/// Fills a scoped buffer of `len` bytes and hands the resulting text to `emit`.
///
/// `fill` returns how many bytes it wrote; anything but a well-formed,
/// in-bounds UTF-8 prefix is a [`ErrorKind::FormatFault`].
pub fn format_into<R>(
    len: usize,
    threshold: usize,
    pool: &BufferPool,
    fill: impl FnOnce(&mut [u8]) -> Result<usize, ErrorKind>,
    emit: impl FnOnce(&str) -> R,
) -> Result<R, ErrorKind> {
    let mut buffer = ScopedBuffer::acquire(len, threshold, pool);
    let out = buffer.as_mut_slice();

    let written = fill(&mut *out).map_err(|err| {
        error!(len, %err, "formatting into scoped buffer failed");
        err
    })?;
    if written > len {
        error!(len, written, "formatter overran its buffer");
        return Err(ErrorKind::FormatFault {
            expected: len,
            written,
        });
    }

    let text = std::str::from_utf8(&out[..written]).map_err(|_| {
        error!(len, written, "formatter produced non-UTF-8 output");
        ErrorKind::FormatFault {
            expected: len,
            written,
        }
    })?;
    Ok(emit(text))
}
