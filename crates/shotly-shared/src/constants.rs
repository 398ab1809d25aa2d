/// Application name
pub const APP_NAME: &str = "Shotly";

/// Photos fetched per gallery page
pub const PHOTOS_PER_PAGE: u32 = 20;

/// Listing order requested from the photo catalog
pub const PHOTO_ORDER_BY: &str = "latest";

/// Default base URL of the photo catalog API
pub const DEFAULT_PHOTO_API_URL: &str = "https://api.unsplash.com";

/// Default base URL of the hosted realtime sync service
pub const DEFAULT_SYNC_URL: &str = "https://sync.shotly.app";

/// Collection namespace for activity records on the sync service
pub const ACTIVITY_NAMESPACE: &str = "activities";

/// Minimum accepted visitor name length, after trimming
pub const MIN_NAME_LEN: usize = 2;

/// Avatar service the deterministic avatar URLs point at
pub const AVATAR_SERVICE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// Derivation context for avatar seeds (BLAKE3)
pub const KDF_CONTEXT_AVATAR_SEED: &str = "shotly-avatar-seed-v1";
