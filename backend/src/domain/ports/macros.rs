//! `define_port_error!`: declares a `thiserror` enum for a port together with
//! snake_case constructors taking `impl Into<_>` for every field.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SampleStoreError {
            Connection { message: String } => "store connection failed: {message}",
            MissingRow { vocab_id: String, attempts: u32 } =>
                "row {vocab_id} missing after {attempts} attempts",
            Closed => "store closed",
        }
    }

    #[test]
    fn string_fields_accept_str_slices() {
        let err = SampleStoreError::connection("refused");
        assert_eq!(err.to_string(), "store connection failed: refused");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SampleStoreError::missing_row("w-1", 3_u32);
        assert_eq!(err.to_string(), "row w-1 missing after 3 attempts");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SampleStoreError::closed(), SampleStoreError::Closed);
    }
}
