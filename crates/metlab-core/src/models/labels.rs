//! `labeled_enum!`: closed option lists whose wire form is the UI label.

/// Declares a closed enum serialized as its display label, with `ALL`,
/// `label()`, `short_label()`, `Display` and a lenient `FromStr` that accepts
/// either the full label or the part before the parenthesized range,
/// case-insensitively.
#[macro_export]
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant, )+
        }

        impl $name {
            /// Every option, in presentation order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Full label as shown in the form and stored in snapshots.
            pub fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            /// Label without the trailing parenthesized range.
            pub fn short_label(&self) -> &'static str {
                let label = self.label();
                match label.find(" (") {
                    Some(idx) => &label[..idx],
                    None => label,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::errors::BuilderError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.label().eq_ignore_ascii_case(wanted)
                            || v.short_label().eq_ignore_ascii_case(wanted)
                    })
                    .ok_or_else(|| $crate::errors::BuilderError::InvalidValue {
                        field: stringify!($name).to_string(),
                        value: s.to_string(),
                    })
            }
        }
    };
}
