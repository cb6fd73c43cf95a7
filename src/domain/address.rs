//! Ledger address for accounts, assets and pools.

use core::fmt;

use serde::{Serialize, Serializer};

/// A 32-byte ledger address.
///
/// The same type names externally owned accounts, deployed assets and
/// pools.  Two values are reserved: [`Address::ZERO`] (the null address)
/// and [`Address::NATIVE`] (the sentinel standing for the native currency).
/// Neither can back a pool.
///
/// # Examples
///
/// ```
/// use pairswap::domain::Address;
///
/// let alice = Address::from_bytes([1u8; 32]);
/// assert_eq!(alice.as_bytes(), [1u8; 32]);
/// assert!(!alice.is_reserved());
/// assert!(Address::NATIVE.is_reserved());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 32]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Sentinel for the native currency (`0xeeee…ee`).
    pub const NATIVE: Self = Self([0xEE; 32]);

    /// Leading byte of addresses derived for deployed assets.
    pub const ASSET_TAG: u8 = 0xA5;

    /// Leading byte of addresses derived for pools.
    pub const POOL_TAG: u8 = 0xB0;

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Derives a deterministic address from a tag byte and a counter.
    ///
    /// Layout: `tag` in byte 0, `index` big-endian in bytes 24..32, zero
    /// elsewhere.  Used for asset and pool addresses so that replaying the
    /// same sequence of deployments yields the same addresses.
    #[must_use]
    pub const fn derived(tag: u8, index: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[0] = tag;
        let be = index.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < 32 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Returns `true` for the native-currency sentinel.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        let mut i = 0;
        while i < 32 {
            if self.0[i] != 0xEE {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Returns `true` if this is [`Address::ZERO`] or [`Address::NATIVE`].
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        self.is_zero() || self.is_native()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
