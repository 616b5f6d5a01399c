//! Response envelopes shared by every Planka endpoint.
//!
//! Planka wraps single resources as `{"item": ...}` and collections as
//! `{"items": [...]}`. Detail endpoints additionally return an `included`
//! object holding related resources.

use serde::{Deserialize, Serialize};

/// A single resource: `{"item": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<T> {
    /// The wrapped resource.
    pub item: T,
}

impl<T> Item<T> {
    /// Unwraps the resource.
    pub fn into_inner(self) -> T {
        self.item
    }
}

/// A collection of resources: `{"items": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items<T> {
    /// The wrapped resources.
    pub items: Vec<T>,
}

impl<T> Items<T> {
    /// Unwraps the resources.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

/// A resource with its related resources: `{"item": ..., "included": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detailed<T, I> {
    /// The requested resource.
    pub item: T,
    /// Related resources, keyed by kind.
    #[serde(default)]
    pub included: I,
}
