//! Social platform tags and the canonical per-platform limits table.
//!
//! Every component that needs a character limit, hashtag cap, or field
//! capability reads it from here. There is deliberately exactly one copy
//! of this table; validation and form rendering must never disagree about
//! what a platform allows.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Platform enum
// ---------------------------------------------------------------------------

/// A publishing target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Linkedin,
    Tiktok,
    Youtube,
    X,
    Facebook,
    Threads,
}

/// All platforms, in display order.
pub const ALL_PLATFORMS: &[Platform] = &[
    Platform::Instagram,
    Platform::Linkedin,
    Platform::Tiktok,
    Platform::Youtube,
    Platform::X,
    Platform::Facebook,
    Platform::Threads,
];

impl Platform {
    /// Convert to the wire/database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Linkedin => "linkedin",
            Self::Tiktok => "tiktok",
            Self::Youtube => "youtube",
            Self::X => "x",
            Self::Facebook => "facebook",
            Self::Threads => "threads",
        }
    }

    /// Convert from a wire/database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "instagram" => Ok(Self::Instagram),
            "linkedin" => Ok(Self::Linkedin),
            "tiktok" => Ok(Self::Tiktok),
            "youtube" => Ok(Self::Youtube),
            "x" => Ok(Self::X),
            "facebook" => Ok(Self::Facebook),
            "threads" => Ok(Self::Threads),
            _ => Err(format!(
                "Invalid platform '{s}'. Must be one of: instagram, linkedin, tiktok, youtube, x, facebook, threads"
            )),
        }
    }

    /// The name the platform uses for its primary text field.
    ///
    /// The staging UI renders this as the field label; the stored value is
    /// always `caption` regardless of alias.
    pub fn caption_field_name(&self) -> &'static str {
        match self {
            Self::X => "tweet",
            Self::Threads => "text",
            Self::Youtube | Self::Tiktok => "description",
            _ => "caption",
        }
    }

    /// Whether the platform has a call-to-action field.
    pub fn supports_cta(&self) -> bool {
        matches!(self, Self::Instagram | Self::Facebook | Self::Linkedin)
    }

    /// Whether the platform supports an attached link on staged posts.
    pub fn supports_link(&self) -> bool {
        matches!(self, Self::Linkedin)
    }

    /// The limits row for this platform.
    pub fn limits(&self) -> &'static PlatformLimits {
        match self {
            Self::Instagram => &PlatformLimits {
                caption_max: 2200,
                hashtag_max: 30,
                hashtag_char_budget: 700,
            },
            Self::Linkedin => &PlatformLimits {
                caption_max: 3000,
                hashtag_max: 5,
                hashtag_char_budget: 150,
            },
            Self::Tiktok => &PlatformLimits {
                caption_max: 2200,
                hashtag_max: 8,
                hashtag_char_budget: 200,
            },
            Self::Youtube => &PlatformLimits {
                caption_max: 5000,
                hashtag_max: 15,
                hashtag_char_budget: 300,
            },
            Self::X => &PlatformLimits {
                caption_max: 280,
                hashtag_max: 10,
                hashtag_char_budget: 280,
            },
            // Facebook and Threads disallow hashtags entirely.
            Self::Facebook => &PlatformLimits {
                caption_max: 63206,
                hashtag_max: 0,
                hashtag_char_budget: 0,
            },
            Self::Threads => &PlatformLimits {
                caption_max: 500,
                hashtag_max: 0,
                hashtag_char_budget: 0,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Per-platform character and hashtag limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformLimits {
    /// Maximum caption length in characters (hashtags count against this).
    pub caption_max: usize,
    /// Maximum number of hashtags. Zero means hashtags are not allowed.
    pub hashtag_max: usize,
    /// Character budget for the rendered hashtag block.
    pub hashtag_char_budget: usize,
}

impl PlatformLimits {
    /// Whether the platform allows any hashtags at all.
    pub fn allows_hashtags(&self) -> bool {
        self.hashtag_max > 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_round_trip() {
        for platform in ALL_PLATFORMS {
            assert_eq!(
                Platform::from_str_value(platform.as_str()).unwrap(),
                *platform
            );
        }
    }

    #[test]
    fn unknown_platform_rejected() {
        let result = Platform::from_str_value("myspace");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid platform"));
    }

    #[test]
    fn case_sensitive() {
        assert!(Platform::from_str_value("Instagram").is_err());
        assert!(Platform::from_str_value("X").is_err());
    }

    #[test]
    fn x_limits() {
        let limits = Platform::X.limits();
        assert_eq!(limits.caption_max, 280);
        assert_eq!(limits.hashtag_char_budget, 280);
    }

    #[test]
    fn instagram_limits() {
        let limits = Platform::Instagram.limits();
        assert_eq!(limits.caption_max, 2200);
        assert_eq!(limits.hashtag_max, 30);
    }

    #[test]
    fn facebook_and_threads_disallow_hashtags() {
        assert!(!Platform::Facebook.limits().allows_hashtags());
        assert!(!Platform::Threads.limits().allows_hashtags());
        for platform in [
            Platform::Instagram,
            Platform::Linkedin,
            Platform::Tiktok,
            Platform::Youtube,
            Platform::X,
        ] {
            assert!(platform.limits().allows_hashtags(), "{platform:?}");
        }
    }

    #[test]
    fn caption_field_aliases() {
        assert_eq!(Platform::X.caption_field_name(), "tweet");
        assert_eq!(Platform::Threads.caption_field_name(), "text");
        assert_eq!(Platform::Youtube.caption_field_name(), "description");
        assert_eq!(Platform::Tiktok.caption_field_name(), "description");
        assert_eq!(Platform::Instagram.caption_field_name(), "caption");
        assert_eq!(Platform::Facebook.caption_field_name(), "caption");
        assert_eq!(Platform::Linkedin.caption_field_name(), "caption");
    }

    #[test]
    fn cta_platforms() {
        assert!(Platform::Instagram.supports_cta());
        assert!(Platform::Facebook.supports_cta());
        assert!(Platform::Linkedin.supports_cta());
        assert!(!Platform::X.supports_cta());
        assert!(!Platform::Tiktok.supports_cta());
    }

    #[test]
    fn link_only_on_linkedin() {
        for platform in ALL_PLATFORMS {
            assert_eq!(platform.supports_link(), *platform == Platform::Linkedin);
        }
    }

    #[test]
    fn serde_snake_case() {
        let json = serde_json::to_string(&Platform::Instagram).unwrap();
        assert_eq!(json, "\"instagram\"");
        let back: Platform = serde_json::from_str("\"threads\"").unwrap();
        assert_eq!(back, Platform::Threads);
    }
}
