//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `QueryState` - The query lifecycle (input, loading, result, error)
//! - `ModalStack` - Modal overlay management

pub mod modal;
pub mod query;
