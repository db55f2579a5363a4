//! The `hookup` entry point
//!
//! An array source is mapped element by element, order preserved. Every
//! element is resolved on its own, but function accessors see the whole
//! array through [`FieldContext::sources`](crate::schema::FieldContext).
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use crate::config::ResolverConfig;
use crate::resolver::{Resolution, SchemaResolver};
use crate::schema::Schema;
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;
use std::fmt;
use std::future::IntoFuture;
use std::slice;

/// Result of [`hookup`]: available now, or after async validators finish
pub enum Mapped<'a> {
    Ready(Value),
    Deferred(BoxFuture<'a, Value>),
}

impl<'a> Mapped<'a> {
    /// True while async validators still have to run. Field validity is
    /// reported by [`hookup_detailed`], not here.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Mapped::Deferred(_))
    }

    /// The value, if no waiting is needed
    pub fn ready(self) -> Option<Value> {
        match self {
            Mapped::Ready(value) => Some(value),
            Mapped::Deferred(_) => None,
        }
    }

    pub async fn finish(self) -> Value {
        match self {
            Mapped::Ready(value) => value,
            Mapped::Deferred(pending) => pending.await,
        }
    }
}

impl<'a> IntoFuture for Mapped<'a> {
    type Output = Value;
    type IntoFuture = BoxFuture<'a, Value>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Mapped::Ready(value) => future::ready(value).boxed(),
            Mapped::Deferred(pending) => pending,
        }
    }
}

impl fmt::Debug for Mapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapped::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Mapped::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Map `source` through `schema` with the default configuration
pub fn hookup<'a>(schema: &'a Schema, source: &'a Value) -> Mapped<'a> {
    hookup_with(schema, source, ResolverConfig::default())
}

pub fn hookup_with<'a>(
    schema: &'a Schema,
    source: &'a Value,
    config: ResolverConfig,
) -> Mapped<'a> {
    let resolver = SchemaResolver::new(schema).with_config(config);
    if !schema.has_async_validators() {
        return Mapped::Ready(map_sources(&resolver, source));
    }

    tracing::debug!("schema carries async validators, deferring");
    Mapped::Deferred(
        async move {
            match source {
                Value::Array(items) => {
                    let mut mapped = Vec::with_capacity(items.len());
                    for item in items {
                        mapped.push(resolver.resolve_in_async(item, items).await);
                    }
                    Value::Array(mapped)
                }
                single => resolver.resolve_async(single).await,
            }
        }
        .boxed(),
    )
}

fn map_sources(resolver: &SchemaResolver<'_>, source: &Value) -> Value {
    match source {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolver.resolve_in(item, items))
                .collect(),
        ),
        single => resolver.resolve(single),
    }
}

/// Like [`hookup`], returning one [`Resolution`] per source.
///
/// Runs synchronously; async validators are skipped. Use
/// [`hookup_detailed_async`] to run them.
pub fn hookup_detailed(
    schema: &Schema,
    source: &Value,
    config: ResolverConfig,
) -> Vec<Resolution> {
    let resolver = SchemaResolver::new(schema).with_config(config);
    let sources = batch(source);
    sources
        .iter()
        .map(|item| resolver.resolve_detailed_in(item, sources))
        .collect()
}

pub async fn hookup_detailed_async(
    schema: &Schema,
    source: &Value,
    config: ResolverConfig,
) -> Vec<Resolution> {
    let resolver = SchemaResolver::new(schema).with_config(config);
    let sources = batch(source);
    let mut resolutions = Vec::with_capacity(sources.len());
    for item in sources {
        resolutions.push(resolver.resolve_detailed_async_in(item, sources).await);
    }
    resolutions
}

fn batch(source: &Value) -> &[Value] {
    match source {
        Value::Array(items) => items,
        single => slice::from_ref(single),
    }
}
