//! Pantry Core - Domain types and tokenization
//!
//! This crate holds the item types shared by the pantry engine and the
//! tokenizer that turns display names into indexable words. It has no
//! storage or search logic of its own.

mod item;
mod tokenizer;

pub use item::{ItemPatch, PantryItem, TripItem};
pub use tokenizer::tokenize;
