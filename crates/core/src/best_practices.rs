//! Static social-media best-practice lookup.
//!
//! Fallback data for the Context7 search endpoint when no MCP service is
//! configured or the live call fails. Selection is a keyword match
//! against the query; unrecognized queries get the generic entry.
//!
//! The exact strings are part of the observable contract: callers render
//! them verbatim.

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One best-practice entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BestPractice {
    /// The platform (or "general") this entry covers.
    pub topic: &'static str,
    /// Guidance lines, rendered verbatim.
    pub guidance: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

const INSTAGRAM: BestPractice = BestPractice {
    topic: "instagram",
    guidance: &[
        "Post Reels 3-5 times per week; Reels reach 2x more non-followers than static posts",
        "Use 3-5 targeted hashtags rather than the 30-tag maximum",
        "Front-load the first 125 characters of the caption; the rest is behind 'more'",
        "Add alt text to every image post for accessibility and search",
    ],
};

const TIKTOK: BestPractice = BestPractice {
    topic: "tiktok",
    guidance: &[
        "Hook viewers in the first 3 seconds; completion rate drives distribution",
        "Keep clips between 21 and 34 seconds for the best watch-through rates",
        "Use trending audio within the first 48 hours of the trend",
        "Post 1-4 times per day; consistency outweighs polish",
    ],
};

const LINKEDIN: BestPractice = BestPractice {
    topic: "linkedin",
    guidance: &[
        "Lead with a one-line hook; only the first 2-3 lines show before 'see more'",
        "Native documents and carousels earn 3x the reach of external links",
        "Use 3-5 niche hashtags; broad tags add noise without reach",
        "Post Tuesday through Thursday, 8-10am in your audience's timezone",
    ],
};

const FACEBOOK: BestPractice = BestPractice {
    topic: "facebook",
    guidance: &[
        "Skip hashtags; they do not improve reach on Facebook",
        "Native video outperforms shared YouTube links by a wide margin",
        "Keep captions under 80 characters for the highest engagement",
        "Reply to comments within the first hour to extend distribution",
    ],
};

const YOUTUBE: BestPractice = BestPractice {
    topic: "youtube",
    guidance: &[
        "Put the primary keyword in the first sentence of the description",
        "Custom thumbnails with faces and high contrast lift click-through rates",
        "Shorts under 60 seconds feed discovery; end them with a subscribe prompt",
        "Use chapters; they improve retention and surface in search results",
    ],
};

const TWITTER: BestPractice = BestPractice {
    topic: "x",
    guidance: &[
        "Stay well under the 280-character limit; short posts get more reposts",
        "Threads of 3-7 posts outperform single long posts for reach",
        "Post 2-3 times per day; the feed decays within hours",
        "One hashtag maximum; more reads as spam",
    ],
};

const GENERIC: BestPractice = BestPractice {
    topic: "general",
    guidance: &[
        "Tailor captions per platform instead of cross-posting identical text",
        "Post when your audience is active, not when it is convenient",
        "Lead with the hook; assume readers only see the first line",
        "Track saves and shares over likes; they predict reach better",
    ],
};

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Select the best-practice entry whose platform keyword appears in the
/// query. First match wins, in table order; no match returns the generic
/// entry.
pub fn lookup(query: &str) -> &'static BestPractice {
    let query = query.to_lowercase();
    if query.contains("instagram") {
        &INSTAGRAM
    } else if query.contains("tiktok") {
        &TIKTOK
    } else if query.contains("linkedin") {
        &LINKEDIN
    } else if query.contains("facebook") {
        &FACEBOOK
    } else if query.contains("youtube") {
        &YOUTUBE
    } else if query.contains("twitter") || query.split_whitespace().any(|word| word == "x") {
        &TWITTER
    } else {
        &GENERIC
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
