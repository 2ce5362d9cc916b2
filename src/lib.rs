//! Packed bit containers with inline, heap and tagged-pointer storage.
//!
//! This crate stores sequences of bits packed into unsigned words and
//! operates on them a whole word at a time. It is built in layers:
//!
//! - [`BitPtr`] and [`BitRef`] address single bits inside a word buffer.
//! - [`algo`] holds the word-level bulk algorithms (copy, fill, find,
//!   count, compare, swap, binary transforms, reverse, rotate, search and
//!   permutations) over `BitPtr` ranges at arbitrary bit offsets.
//! - [`storage`] provides the buffers behind the dynamic container:
//!   [`PlainStorage`], the small-buffer [`SboStorage`] and the
//!   pointer-packing [`TaggedStorage`].
//! - [`BitVec`], [`BitSet`] and [`BitView`] are the containers. They share
//!   their whole read and write surface through the [`Bits`] and
//!   [`BitsMut`] traits.
//!
//! # Examples
//!
//! ```
//! use smol_bitvec::{BitVec, Bits, BitsMut};
//!
//! // 40 bits fit in the two words of the default storage
//! let mut bits: BitVec = BitVec::with_len(40, false);
//! bits.set(3, true);
//! bits.fill_range(10..20, true);
//! assert!(!bits.is_heap());
//! assert_eq!(bits.count_ones(), 11);
//! assert_eq!(bits.find_next(true, 4), Some(10));
//!
//! // growing past the inline capacity moves the bits to the heap
//! bits.resize(400, true);
//! assert!(bits.is_heap());
//! assert_eq!(bits.count_ones(), 371);
//!
//! let pattern: BitVec = "101".parse().unwrap();
//! let text: BitVec = "101010101010101".parse().unwrap();
//! assert_eq!(text.search_from(&pattern, 2), Some(2));
//! ```
//!
//! # Bit order
//!
//! Bit `i` of a container lives in word `i / BITS` at bit `i % BITS`, least
//! significant bit first. Bits past the length in the last word are always
//! zero. Text renders the highest position first, like a binary number:
//!
//! ```
//! use smol_bitvec::{BitVec, BitsMut};
//!
//! let mut bits: BitVec = BitVec::with_len(4, false);
//! bits.set(0, true);
//! assert_eq!(bits.to_string(), "0001");
//! ```
//!
//! # Errors
//!
//! Operations that can grow a container have a `try_` form returning
//! [`Error`]. The plain form panics with the error's message. A failed
//! operation leaves the container as it was.
//!
//! # `no_std`
//!
//! Disable the default `std` feature to build against `core` and `alloc`
//! only.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod macros;

pub mod algo;
mod bits;
mod bitset;
mod bitview;
mod bitvec;
mod error;
pub mod iter;
mod ptr;
mod reference;
mod set_ops;
pub mod storage;
mod traits;
pub mod word;

pub use bits::{Bits, BitsMut};
pub use bitset::BitSet;
pub use bitview::BitView;
pub use bitvec::BitVec;
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, IterMut, Ones, Select};
pub use ptr::BitPtr;
pub use reference::BitRef;
#[cfg(target_pointer_width = "64")]
pub use storage::TaggedStorage;
pub use storage::{PlainStorage, SboStorage};
pub use word::Word;
