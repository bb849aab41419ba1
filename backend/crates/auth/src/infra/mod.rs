//! Infrastructure Layer
//!
//! Auth service client and storage implementations.

pub mod storage;
pub mod supabase;

pub use storage::{FileSessionStorage, MemorySessionStorage};
pub use supabase::{SupabaseAuthBackend, SupabaseConfig};
