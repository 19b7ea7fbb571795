//! Static interest taxonomy: categories, tags, and the search-term expansion
//! consumed by the scout stage. Read-only reference data.

pub struct InterestCategory {
    pub name: &'static str,
    pub tags: &'static [&'static str],
    /// Extra search phrasings that tend to surface event listings for this
    /// category.
    pub event_keywords: &'static [&'static str],
}

pub const INTEREST_CATEGORIES: &[InterestCategory] = &[
    InterestCategory {
        name: "Outdoor",
        tags: &[
            "Hiking",
            "Camping",
            "Road Trips",
            "Beach",
            "Mountains",
            "National Parks",
            "Adventure Travel",
            "Backpacking",
        ],
        event_keywords: &["outdoor events", "nature activities", "adventure tours"],
    },
    InterestCategory {
        name: "Social Activities",
        tags: &[
            "Networking",
            "Meetups",
            "Social Events",
            "Parties",
            "Happy Hour",
            "Clubbing",
            "Bars",
            "Dancing",
        ],
        event_keywords: &["social events", "networking events", "happy hours", "meetups"],
    },
    InterestCategory {
        name: "Hobbies and Passion",
        tags: &[
            "Photography",
            "Reading",
            "Writing",
            "Crafts",
            "DIY",
            "Vintage Fashion",
            "Sneakers",
            "Collecting",
        ],
        event_keywords: &["hobby workshops", "craft classes", "creative events"],
    },
    InterestCategory {
        name: "Sports and Fitness",
        tags: &[
            "Gym", "Running", "Yoga", "Swimming", "Cycling", "Basketball", "Soccer", "Tennis",
            "Martial Arts",
        ],
        event_keywords: &["fitness classes", "sports events", "workout sessions"],
    },
    InterestCategory {
        name: "Health and Wellbeing",
        tags: &[
            "Meditation",
            "Wellness",
            "Spa",
            "Mental Health",
            "Nutrition",
            "Mindfulness",
            "Self-care",
        ],
        event_keywords: &["wellness events", "meditation sessions", "health workshops"],
    },
    InterestCategory {
        name: "Technology",
        tags: &[
            "Coding",
            "AI",
            "Startups",
            "Tech Meetups",
            "Hackathons",
            "Gaming Tech",
            "VR",
            "Crypto",
        ],
        event_keywords: &["tech meetups", "hackathons", "startup events", "tech talks"],
    },
    InterestCategory {
        name: "Art and Culture",
        tags: &[
            "Museums",
            "Art Galleries",
            "Theater",
            "Opera",
            "Ballet",
            "Film",
            "Concerts",
            "Live Music",
        ],
        event_keywords: &[
            "art exhibitions",
            "cultural events",
            "museum exhibits",
            "performances",
        ],
    },
    InterestCategory {
        name: "Games",
        tags: &[
            "Video Games",
            "Board Games",
            "E-Sports",
            "Gaming",
            "Tabletop RPG",
            "Card Games",
            "Arcade",
        ],
        event_keywords: &[
            "gaming events",
            "esports",
            "board game nights",
            "gaming tournaments",
        ],
    },
    InterestCategory {
        name: "Career and Business",
        tags: &[
            "Networking",
            "Conferences",
            "Workshops",
            "Professional Development",
            "Entrepreneurship",
            "Leadership",
        ],
        event_keywords: &[
            "business networking",
            "professional events",
            "industry conferences",
        ],
    },
    InterestCategory {
        name: "Science and Education",
        tags: &[
            "Lectures",
            "Workshops",
            "Book Clubs",
            "Learning",
            "Research",
            "STEM",
            "History",
            "Language Exchange",
        ],
        event_keywords: &["lectures", "educational workshops", "learning events"],
    },
];

/// All known tags, sorted and deduplicated.
pub fn all_tags() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = INTEREST_CATEGORIES
        .iter()
        .flat_map(|c| c.tags.iter().copied())
        .collect();
    tags.sort_unstable();
    tags.dedup();
    tags
}

/// Category names whose tag list contains any of the given interests
/// (case-insensitive).
pub fn categories_for(interests: &[String]) -> Vec<&'static str> {
    let lowered: Vec<String> = interests.iter().map(|i| i.to_lowercase()).collect();
    INTEREST_CATEGORIES
        .iter()
        .filter(|category| {
            category
                .tags
                .iter()
                .any(|tag| lowered.iter().any(|i| i == &tag.to_lowercase()))
        })
        .map(|category| category.name)
        .collect()
}

/// Search-term expansion for the scout prompt: the interests themselves, the
/// matching category names, and each category's event keywords. Order is
/// stable (interest order, then taxonomy order); duplicates are dropped.
pub fn search_terms_for(interests: &[String]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for interest in interests {
        if !interest.trim().is_empty() {
            push_unique(interest.trim().to_string(), &mut terms);
        }
    }

    let lowered: Vec<String> = interests.iter().map(|i| i.to_lowercase()).collect();
    for category in INTEREST_CATEGORIES {
        let matched = category
            .tags
            .iter()
            .any(|tag| lowered.iter().any(|i| i == &tag.to_lowercase()));
        if matched {
            push_unique(category.name.to_string(), &mut terms);
            for keyword in category.event_keywords {
                push_unique((*keyword).to_string(), &mut terms);
            }
        }
    }

    terms
}

fn push_unique(term: String, terms: &mut Vec<String>) {
    if !terms.iter().any(|t| t.eq_ignore_ascii_case(&term)) {
        terms.push(term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tags_sorted_unique() {
        let tags = all_tags();
        assert!(!tags.is_empty());
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn test_categories_for_is_case_insensitive() {
        let categories = categories_for(&["hackathons".to_string()]);
        assert_eq!(categories, vec!["Technology"]);
    }

    #[test]
    fn test_search_terms_include_interest_and_keywords() {
        let terms = search_terms_for(&["Hackathons".to_string()]);
        assert_eq!(terms[0], "Hackathons");
        assert!(terms.iter().any(|t| t == "Technology"));
        assert!(terms.iter().any(|t| t == "tech meetups"));
    }

    #[test]
    fn test_unknown_interest_expands_to_itself() {
        let terms = search_terms_for(&["underwater basket weaving".to_string()]);
        assert_eq!(terms, vec!["underwater basket weaving".to_string()]);
    }
}
