//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Generated enum is (de)serialized and parsed/displayed in the
/// `SCREAMING_SNAKE_CASE` form, the way records arrive from the data layer.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Payment method."]
///     enum Method {
///         #[doc = "Paid in cash."]
///         Cash = 1,
///
///         #[doc = "Paid by bank transfer."]
///         BankTransfer = 2,
///     }
/// }
///
/// assert_eq!(Method::BankTransfer.to_string(), "BANK_TRANSFER");
/// assert_eq!("CASH".parse::<Method>(), Ok(Method::Cash));
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }
    };
}
