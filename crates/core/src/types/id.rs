//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Store ids are opaque
//! strings (`p-1718000000000`, `ORD-1718000000000`), so the wrappers hold a
//! `String` rather than a number.

use chrono::{DateTime, Utc};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use fitkart_core::define_id;
/// define_id!(WishlistId);
/// define_id!(CouponId);
///
/// let wishlist = WishlistId::new("w-1");
/// let coupon = CouponId::new("w-1");
///
/// // These are different types, so this won't compile:
/// // let _: WishlistId = coupon;
/// assert_eq!(wishlist.as_str(), coupon.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(UserId);

impl ProductId {
    /// Prefix of ids minted by the admin panel.
    pub const PREFIX: &'static str = "p-";

    /// Mint a product id from a creation timestamp (`p-<unix millis>`).
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!("{}{}", Self::PREFIX, at.timestamp_millis()))
    }
}

impl OrderId {
    /// Prefix of every order id.
    pub const PREFIX: &'static str = "ORD-";

    /// Mint an order id from the placement timestamp (`ORD-<unix millis>`).
    ///
    /// Two orders placed within the same millisecond share an id.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!("{}{}", Self::PREFIX, at.timestamp_millis()))
    }
}
