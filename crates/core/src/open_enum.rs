//! Enums over backend string codes that tolerate values added server-side.

/// Declare an enum whose variants map to fixed wire strings, plus an
/// `Otro(String)` catch-all so a new server value does not break decoding.
///
/// ```ignore
/// open_enum! {
///     /// Payment type.
///     pub enum TipoPago {
///         Efectivo => "efectivo",
///         Tarjeta => "tarjeta",
///     }
/// }
/// ```
#[macro_export]
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value this client does not know about yet.
            Otro(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Otro(raw) => raw,
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $( $wire => Self::$variant, )+
                    _ => Self::Otro(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::open_enum! {
        pub enum Color {
            Rojo => "rojo",
            Azul => "azul",
        }
    }

    #[test]
    fn known_and_unknown_values_round_trip() {
        let known: Color = serde_json::from_str(r#""rojo""#).unwrap();
        assert_eq!(known, Color::Rojo);

        let unknown: Color = serde_json::from_str(r#""verde""#).unwrap();
        assert_eq!(unknown, Color::Otro("verde".to_string()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), r#""verde""#);
    }
}
