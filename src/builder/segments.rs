//! Conversion of rule declarations into pattern segments.

use crate::core::{Literal, Pattern, TypeTag};
use serde_json::Value;

/// Anything that can stand for the positional segments of a rule.
///
/// Single values become one segment; tuples, arrays and vectors become one
/// segment per element; `()` is the empty pattern.
///
/// ```rust
/// use rulebook::builder::IntoSegments;
/// use rulebook::Pattern;
///
/// assert_eq!(("add", Pattern::number()).into_segments().len(), 2);
/// assert_eq!("reset".into_segments().len(), 1);
/// assert!(().into_segments().is_empty());
/// ```
pub trait IntoSegments {
    fn into_segments(self) -> Vec<Pattern>;
}

impl IntoSegments for () {
    fn into_segments(self) -> Vec<Pattern> {
        Vec::new()
    }
}

macro_rules! single_segment {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoSegments for $ty {
                fn into_segments(self) -> Vec<Pattern> {
                    vec![Pattern::from(self)]
                }
            }
        )*
    };
}

single_segment!(Pattern, Literal, TypeTag, Value, &str, String, &String, bool, f64, i32, i64, u32, u64, usize);

impl<P: Into<Pattern>> IntoSegments for Vec<P> {
    fn into_segments(self) -> Vec<Pattern> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<P: Into<Pattern>, const N: usize> IntoSegments for [P; N] {
    fn into_segments(self) -> Vec<Pattern> {
        self.into_iter().map(Into::into).collect()
    }
}

macro_rules! tuple_segments {
    ($($name:ident),+) => {
        impl<$($name: Into<Pattern>),+> IntoSegments for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_segments(self) -> Vec<Pattern> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

tuple_segments!(A);
tuple_segments!(A, B);
tuple_segments!(A, B, C);
tuple_segments!(A, B, C, D);
tuple_segments!(A, B, C, D, E);
tuple_segments!(A, B, C, D, E, F);
