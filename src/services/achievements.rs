use chrono::Utc;

use crate::models::{
    achievement::Achievement, activity::ActivitySummary, repository::RepoSummary,
    user::GitHubUser,
};

/// One rung of a category ladder. Tiers are listed highest threshold
/// first; evaluation emits at most the first rung a value clears.
struct Tier {
    min: u64,
    name: &'static str,
    icon: &'static str,
}

const REPO_TIERS: [Tier; 4] = [
    Tier { min: 100, name: "Repository Master", icon: "\u{1F3C6}" },
    Tier { min: 50, name: "Repository Expert", icon: "\u{1F947}" },
    Tier { min: 20, name: "Repository Enthusiast", icon: "\u{1F948}" },
    Tier { min: 10, name: "Repository Starter", icon: "\u{1F949}" },
];

const FOLLOWER_TIERS: [Tier; 3] = [
    Tier { min: 10000, name: "GitHub Superstar", icon: "\u{2B50}" },
    Tier { min: 1000, name: "GitHub Influencer", icon: "\u{1F31F}" },
    Tier { min: 100, name: "GitHub Popular", icon: "\u{2728}" },
];

const CONTRIBUTION_TIERS: [Tier; 3] = [
    Tier { min: 10000, name: "Contribution Legend", icon: "\u{1F525}" },
    Tier { min: 1000, name: "Contribution Hero", icon: "\u{1F4AA}" },
    Tier { min: 100, name: "Active Contributor", icon: "\u{1F680}" },
];

const STAR_TIERS: [Tier; 3] = [
    Tier { min: 10000, name: "Star Collector", icon: "\u{2B50}" },
    Tier { min: 1000, name: "Star Attractor", icon: "\u{1F31F}" },
    Tier { min: 100, name: "Star Gainer", icon: "\u{2728}" },
];

struct AgeTier {
    min_years: f64,
    name: &'static str,
    icon: &'static str,
    description: &'static str,
}

const AGE_TIERS: [AgeTier; 2] = [
    AgeTier {
        min_years: 10.0,
        name: "Veteran Developer",
        icon: "\u{1F396}\u{FE0F}",
        description: "10+ years on GitHub",
    },
    AgeTier {
        min_years: 5.0,
        name: "Experienced Developer",
        icon: "\u{1F3D7}\u{FE0F}",
        description: "5+ years on GitHub",
    },
];

fn highest_tier(tiers: &'static [Tier], value: u64) -> Option<&'static Tier> {
    tiers.iter().find(|tier| value >= tier.min)
}

/// Pure function over already-fetched data; issues no network calls.
/// Categories are evaluated in a fixed order and each emits at most its
/// highest matched tier.
pub fn evaluate(
    user: &GitHubUser,
    repos: &[RepoSummary],
    activity: &ActivitySummary,
) -> Vec<Achievement> {
    let mut achievements = Vec::new();

    let repo_count = repos.len() as u64;
    if let Some(tier) = highest_tier(&REPO_TIERS, repo_count) {
        achievements.push(Achievement {
            name: tier.name.to_string(),
            icon: tier.icon.to_string(),
            description: format!("Has {}+ repositories", tier.min),
        });
    }

    if let Some(tier) = highest_tier(&FOLLOWER_TIERS, user.followers) {
        achievements.push(Achievement {
            name: tier.name.to_string(),
            icon: tier.icon.to_string(),
            description: format!("Has {}+ followers", group_thousands(user.followers)),
        });
    }

    if let Some(tier) = highest_tier(&CONTRIBUTION_TIERS, activity.total_contributions) {
        achievements.push(Achievement {
            name: tier.name.to_string(),
            icon: tier.icon.to_string(),
            description: format!(
                "{}+ total contributions",
                group_thousands(activity.total_contributions)
            ),
        });
    }

    // Summed fresh from the supplied list, never carried over.
    let total_stars: u64 = repos.iter().map(|repo| repo.stars).sum();
    if let Some(tier) = highest_tier(&STAR_TIERS, total_stars) {
        achievements.push(Achievement {
            name: tier.name.to_string(),
            icon: tier.icon.to_string(),
            description: format!(
                "{}+ total stars across repos",
                group_thousands(total_stars)
            ),
        });
    }

    if let Some(created_at) = user.created_at {
        let age_years = (Utc::now() - created_at).num_days() as f64 / 365.0;

        if let Some(tier) = AGE_TIERS.iter().find(|tier| age_years >= tier.min_years) {
            achievements.push(Achievement {
                name: tier.name.to_string(),
                icon: tier.icon.to_string(),
                description: tier.description.to_string(),
            });
        }
    }

    if user.hireable == Some(true) {
        achievements.push(Achievement {
            name: "Open to Work".to_string(),
            icon: "\u{1F4BC}".to_string(),
            description: "Available for hire".to_string(),
        });
    }

    achievements
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::models::activity::ContributionCounts;

    fn test_user() -> GitHubUser {
        GitHubUser {
            login: "octocat".to_string(),
            id: 1,
            name: None,
            avatar_url: None,
            html_url: None,
            bio: None,
            company: None,
            location: None,
            blog: None,
            hireable: None,
            public_repos: 0,
            followers: 0,
            following: 0,
            created_at: None,
        }
    }

    fn empty_activity() -> ActivitySummary {
        ActivitySummary {
            total_events: 0,
            contributions_by_type: ContributionCounts::default(),
            last_30_days: vec![],
            total_contributions: 0,
        }
    }

    fn repo_with_stars(stars: u64) -> RepoSummary {
        RepoSummary {
            name: "repo".to_string(),
            full_name: "octocat/repo".to_string(),
            description: None,
            stars,
            forks: 0,
            language: None,
            updated_at: None,
            url: String::new(),
        }
    }

    #[test]
    fn no_achievements_for_empty_profile() {
        let achievements = evaluate(&test_user(), &[], &empty_activity());
        assert!(achievements.is_empty());
    }

    #[test]
    fn star_tiers_emit_only_highest_match() {
        // 1500 total stars sits between the 1000 and 10000 thresholds.
        let repos = vec![repo_with_stars(1200), repo_with_stars(300)];
        let achievements = evaluate(&test_user(), &repos, &empty_activity());

        let names: Vec<&str> = achievements.iter().map(|a| a.name.as_str()).collect();
        assert!(names.contains(&"Star Attractor"));
        assert!(!names.contains(&"Star Gainer"));
        assert!(!names.contains(&"Star Collector"));
    }

    #[test]
    fn star_collector_requires_ten_thousand() {
        let repos = vec![repo_with_stars(10000)];
        let achievements = evaluate(&test_user(), &repos, &empty_activity());

        let names: Vec<&str> = achievements.iter().map(|a| a.name.as_str()).collect();
        assert!(names.contains(&"Star Collector"));
        assert!(!names.contains(&"Star Attractor"));
    }

    #[test]
    fn one_achievement_per_category_at_most() {
        let mut user = test_user();
        user.followers = 25000;
        user.hireable = Some(true);
        user.created_at = Some(Utc::now() - Duration::days(365 * 12));

        let repos: Vec<RepoSummary> = (0..120).map(|_| repo_with_stars(100)).collect();
        let mut activity = empty_activity();
        activity.total_contributions = 15000;

        let achievements = evaluate(&user, &repos, &activity);

        // one tier per ladder plus the hireable flag
        assert_eq!(achievements.len(), 6);
        let names: Vec<&str> = achievements.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Repository Master",
                "GitHub Superstar",
                "Contribution Legend",
                "Star Collector",
                "Veteran Developer",
                "Open to Work",
            ]
        );
    }

    #[test]
    fn account_age_tiers() {
        let mut user = test_user();
        user.created_at = Some(Utc::now() - Duration::days(365 * 6));

        let achievements = evaluate(&user, &[], &empty_activity());
        assert_eq!(achievements.len(), 1);
        assert_eq!(achievements[0].name, "Experienced Developer");
    }

    #[test]
    fn young_account_earns_no_age_tier() {
        let mut user = test_user();
        user.created_at = Some(Utc::now() - Duration::days(400));

        let achievements = evaluate(&user, &[], &empty_activity());
        assert!(achievements.is_empty());
    }

    #[test]
    fn descriptions_group_thousands() {
        let mut user = test_user();
        user.followers = 1500;

        let achievements = evaluate(&user, &[], &empty_activity());
        assert_eq!(achievements[0].description, "Has 1,500+ followers");
    }

    #[test]
    fn group_thousands_formats() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
