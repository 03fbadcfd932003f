//! Core form nodes: the [`Form`] trait, value leaves and the
//! transform/mapped combinators.
//!
//! A form node is an immutable description of how to read a shape (the raw,
//! possibly invalid JSON state behind a form field) and reduce it to a
//! validated output. Nodes are built once and validated any number of times;
//! they never store a shape.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ErrorTag, FieldError, Validated};

/// A composable schema node.
pub trait Form {
    /// Validated output produced from a valid shape.
    type Output;

    /// Reduce `shape` to a validated output or a field error.
    ///
    /// Must be total: every shape yields `Ok` or `Err`.
    fn validate(&self, shape: &Value) -> Validated<Self::Output>;
}

impl<F: Form + ?Sized> Form for Box<F> {
    type Output = F::Output;

    fn validate(&self, shape: &Value) -> Validated<Self::Output> {
        (**self).validate(shape)
    }
}

/// Leaf node holding one scalar of type `T`.
pub struct ValueForm<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for ValueForm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueForm")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Leaf node whose output is its shape, read as `T`.
///
/// Any `T` is accepted. A shape that cannot be read as `T` at all fails with
/// [`ErrorTag::Shape`].
pub fn value<T: DeserializeOwned>() -> ValueForm<T> {
    ValueForm {
        _marker: PhantomData,
    }
}

impl<T: DeserializeOwned> Form for ValueForm<T> {
    type Output = T;

    fn validate(&self, shape: &Value) -> Validated<T> {
        Deserialize::deserialize(shape).map_err(|e| {
            tracing::debug!(
                expected = std::any::type_name::<T>(),
                error = %e,
                "shape does not match value type"
            );
            FieldError::Leaf(ErrorTag::Shape)
        })
    }
}

/// Node reducing the inner node's output to a new value, possibly failing.
pub struct Transformed<F, T> {
    inner: F,
    transform: T,
}

/// Apply a fallible `transform` to the inner node's output.
///
/// For a value node, or an object of value nodes, the inner output is the raw
/// shape, so `transform` sees unvalidated sibling data and can run
/// cross-field checks. The inner node's error and whatever `transform`
/// returns are passed through unchanged.
pub fn transformed<F, T, V>(inner: F, transform: T) -> Transformed<F, T>
where
    F: Form,
    T: Fn(F::Output) -> Validated<V>,
{
    Transformed { inner, transform }
}

impl<F, T, V> Form for Transformed<F, T>
where
    F: Form,
    T: Fn(F::Output) -> Validated<V>,
{
    type Output = V;

    fn validate(&self, shape: &Value) -> Validated<V> {
        let output = self.inner.validate(shape)?;
        (self.transform)(output)
    }
}

/// Node post-processing a valid output with a total function.
pub struct Mapped<F, M> {
    inner: F,
    map: M,
}

/// Apply a total `map` to the inner node's successful output.
///
/// Errors short-circuit unchanged.
pub fn mapped<F, M, V>(inner: F, map: M) -> Mapped<F, M>
where
    F: Form,
    M: Fn(F::Output) -> V,
{
    Mapped { inner, map }
}

impl<F, M, V> Form for Mapped<F, M>
where
    F: Form,
    M: Fn(F::Output) -> V,
{
    type Output = V;

    fn validate(&self, shape: &Value) -> Validated<V> {
        self.inner.validate(shape).map(&self.map)
    }
}

/// Node running an extra check over a valid output.
pub struct Checked<F, C> {
    inner: F,
    check: C,
}

/// Keep the inner output unless `check` reports an error tag for it.
pub fn validated<F, C>(inner: F, check: C) -> Checked<F, C>
where
    F: Form,
    C: Fn(&F::Output) -> Option<ErrorTag>,
{
    Checked { inner, check }
}

impl<F, C> Form for Checked<F, C>
where
    F: Form,
    C: Fn(&F::Output) -> Option<ErrorTag>,
{
    type Output = F::Output;

    fn validate(&self, shape: &Value) -> Validated<F::Output> {
        let output = self.inner.validate(shape)?;
        match (self.check)(&output) {
            Some(tag) => Err(tag.into()),
            None => Ok(output),
        }
    }
}

/// Node rejecting an absent optional output.
#[derive(Debug)]
pub struct Required<F> {
    inner: F,
}

/// Turn an `Option<T>` output into `T`, failing with [`ErrorTag::Required`]
/// on `None`.
pub fn required<F, T>(inner: F) -> Required<F>
where
    F: Form<Output = Option<T>>,
{
    Required { inner }
}

impl<F, T> Form for Required<F>
where
    F: Form<Output = Option<T>>,
{
    type Output = T;

    fn validate(&self, shape: &Value) -> Validated<T> {
        self.inner
            .validate(shape)?
            .ok_or(FieldError::Leaf(ErrorTag::Required))
    }
}

/// Read a shape directly as a typed struct.
///
/// Used by object nodes to hand their assembled output to typed callers.
pub(crate) fn read_as<T: DeserializeOwned>(output: Value) -> Validated<T> {
    Deserialize::deserialize(output).map_err(|e| {
        tracing::debug!(
            expected = std::any::type_name::<T>(),
            error = %e,
            "object output does not match target type"
        );
        FieldError::Leaf(ErrorTag::Shape)
    })
}
