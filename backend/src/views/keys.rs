use sha2::{Digest, Sha256};
use shared::Slug;

pub fn pageview_key(slug: &Slug) -> String {
    format!("pageviews:projects:{slug}")
}

/// Marker key for one client and slug. Only the digest of the client
/// identifier ends up in the store.
pub fn dedup_key(client_hash: &str, slug: &Slug) -> String {
    format!("deduplicate:{client_hash}:{slug}")
}

pub fn hash_client(client: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(client.as_bytes());
    format!("{:x}", hasher.finalize())
}
