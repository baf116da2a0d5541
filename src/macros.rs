//! Utility macros for common patterns across the liaison engine
//!
//! Every enum at the API boundary is a closed set identified by a human-readable
//! label ("Pending Submission", "No Answer", ...). The label is the wire format,
//! the `Display` output and the only accepted `FromStr` input.

/// Declare a closed, labeled enum
///
/// Generates the enum with serde renames, an `ALL` slice in declaration order,
/// `as_str`, `Display`, and a `FromStr` that rejects unknown labels with
/// [`LiaisonError::Validation`](crate::error::LiaisonError::Validation).
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Examples
///
/// ```
/// grant_liaison::labeled_enum! {
///     /// Call channel
///     pub enum Channel {
///         Phone => "Phone",
///         Video => "Video Call",
///     }
/// }
///
/// assert_eq!(Channel::Video.to_string(), "Video Call");
/// assert_eq!("video call".parse::<Channel>().unwrap(), Channel::Video);
/// assert!("Fax".parse::<Channel>().is_err());
/// ```
#[macro_export]
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Display label, also the wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::LiaisonError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        $crate::error::LiaisonError::Validation(format!(
                            "Invalid {}: '{}'",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }
    };
}
