//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances holding the same values are
/// interchangeable. They are immutable; "changing" one means constructing a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Price(Decimal);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price::parse("1.50")?, Price::parse("1.5")?);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
