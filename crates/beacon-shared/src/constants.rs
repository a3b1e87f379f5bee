/// Application name
pub const APP_NAME: &str = "Beacon";

/// Reserved author id for system-generated messages (never assigned to a
/// real user).
pub const SYSTEM_USER_ID: &str = "beacon-system";

/// Text of the seeded system message in a fresh global chat feed.
pub const GLOBAL_WELCOME_TEXT: &str = "Welcome to Global Chat";

/// Preview text shown for a conversation that has no messages yet.
pub const EMPTY_CONVERSATION_PREVIEW: &str = "No messages yet";

/// Preference keys persisted in the local key-value store.
pub const PREF_HAS_AGREED_COMMUNITY_RULES: &str = "hasAgreedToCommunityRules";
pub const PREF_HAS_SEEN_COMMUNITY_RULES: &str = "hasSeenCommunityRules";
pub const PREF_IS_DARK_MODE: &str = "isDarkMode";
pub const PREF_IS_ANONYMOUS: &str = "isAnonymous";
pub const PREF_USER_ID: &str = "userId";
pub const PREF_SAVED_REPORTS: &str = "savedReports";
