//! Identity provider adapters.
//!
//! - `SupabaseIdentityProvider` - GoTrue REST API (production)
//! - `MockIdentityProvider` - in-memory accounts (tests)

mod mock;
mod supabase;

pub use mock::MockIdentityProvider;
pub use supabase::SupabaseIdentityProvider;
