//! Generated data models.
//!
//! Models are plain serde value types: camelCase JSON names, absent
//! properties are `None` and are not serialized. Each one publishes its
//! property table through [`Model`](crate::decode::Model).

mod client_error;
mod product_metered_fee;
mod space;
mod transaction_completion;
mod transaction_operation;


pub use client_error::{ClientErrorBody, ClientErrorType};
pub use product_metered_fee::{
    DatabaseTranslatedString, DatabaseTranslatedStringCreate, DatabaseTranslatedStringItem,
    ProductMeteredFee, ProductMeteredFeeUpdate, ProductMeteredTierPricing,
};
pub use space::{Space, SpaceReferenceState};
pub use transaction_completion::{TransactionCompletion, TransactionCompletionState};
pub use transaction_operation::{
    Refund, RefundState, TransactionOperation, TransactionVoid, TransactionVoidState,
};

/// Declares a string enum with its wire names.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every wire name, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            /// Wire name of this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use string_enum;
